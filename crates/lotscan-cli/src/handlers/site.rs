use crate::types::OutputFormat;
use anyhow::Result;
use lotscan_engine::{recent_examples, site_knowledge};
use lotscan_runtime::LabelStore;
use serde_json::json;
use std::path::Path;

pub fn handle(
    store_path: &Path,
    format: OutputFormat,
    camera_id: &str,
    examples: usize,
) -> Result<()> {
    let store = LabelStore::open(store_path)?;
    let knowledge = site_knowledge(store.data(), camera_id);
    let window = recent_examples(store.data(), camera_id, examples);

    if format == OutputFormat::Json {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "knowledge": knowledge,
                "examples": window,
            }))?
        );
        return Ok(());
    }

    println!("Site: {}", knowledge.name);
    match knowledge.avg_capacity {
        Some(capacity) => println!("  Typical capacity: {} trucks", capacity),
        None => println!("  Typical capacity: Unknown"),
    }
    println!("  Average occupancy: {}%", knowledge.avg_occupancy);
    println!("  Detection tips: {}", knowledge.detection_tips);
    println!("  Labeled samples: {}", knowledge.sample_count);

    if window.is_empty() {
        println!("\nNo labeled examples yet.");
        return Ok(());
    }

    println!("\nRecent examples (most recent last):");
    for sample in window {
        let trucks = sample
            .truck_count
            .map(|n| n.to_string())
            .unwrap_or_else(|| "?".to_string());
        let occupancy = sample
            .occupancy_percent
            .map(|n| format!("{}%", n))
            .unwrap_or_else(|| "?".to_string());
        println!(
            "  - {} trucks, {} occupied{}",
            trucks,
            occupancy,
            sample
                .detailed_notes
                .as_deref()
                .map(|n| format!(" ({})", n))
                .unwrap_or_default()
        );
    }

    Ok(())
}
