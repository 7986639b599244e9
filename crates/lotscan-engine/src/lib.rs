// Engine module - Core processing logic (aggregation, retrieval, prompts, extraction)
// This layer sits between the persisted store (runtime) and CLI presentation.
// It performs no I/O: everything here is a pure function over store data.

pub mod extract;
pub mod prompt;
pub mod retrieve;
pub mod stats;
pub mod tips;

pub use extract::{Extraction, extract};
pub use prompt::{PromptComposer, PromptVariant};
pub use retrieve::{SiteKnowledge, recent_examples, site_knowledge};
pub use stats::recompute_sites;
pub use tips::{TipRule, TipRuleSet};
