pub mod extract;
pub mod label;
pub mod prompt;
pub mod site;
pub mod stats;

use lotscan_engine::PromptComposer;
use lotscan_runtime::Config;

/// Build the prompt composer from injected workspace configuration.
pub(crate) fn composer_from(config: &Config) -> PromptComposer {
    PromptComposer::new(config.sites.clone())
        .context_examples(config.context_examples)
        .notes_budget(config.notes_budget)
}
