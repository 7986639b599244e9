use clap::ValueEnum;
use lotscan_engine::PromptVariant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

/// CLI-facing prompt variant names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum VariantArg {
    /// Fixed instructions, no site context
    Baseline,
    /// Hand-authored site profile plus fixed few-shot examples
    Static,
    /// Derived site knowledge plus recent labeled examples
    Dynamic,
}

impl From<VariantArg> for PromptVariant {
    fn from(arg: VariantArg) -> Self {
        match arg {
            VariantArg::Baseline => PromptVariant::Baseline,
            VariantArg::Static => PromptVariant::StaticSite,
            VariantArg::Dynamic => PromptVariant::DynamicContext,
        }
    }
}
