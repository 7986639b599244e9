use crate::types::{OutputFormat, VariantArg};
use anyhow::Result;
use lotscan_runtime::{Config, LabelStore};
use serde_json::json;
use std::path::Path;

pub fn handle(
    store_path: &Path,
    config: &Config,
    format: OutputFormat,
    camera_id: &str,
    variant: VariantArg,
    examples: Option<usize>,
) -> Result<()> {
    let store = LabelStore::open(store_path)?;

    let mut composer = super::composer_from(config);
    if let Some(n) = examples {
        composer = composer.context_examples(n);
    }
    let prompt = composer.compose(variant.into(), camera_id, store.data());

    match format {
        OutputFormat::Plain => println!("{}", prompt),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "camera_id": camera_id,
                "variant": format!("{:?}", variant).to_lowercase(),
                "prompt": prompt,
            }))?
        ),
    }

    Ok(())
}
