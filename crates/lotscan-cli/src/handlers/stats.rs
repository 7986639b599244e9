use crate::types::OutputFormat;
use anyhow::Result;
use is_terminal::IsTerminal;
use lotscan_engine::{TipRuleSet, recompute_sites};
use lotscan_runtime::LabelStore;
use lotscan_types::SiteStatistics;
use owo_colors::OwoColorize;
use std::path::Path;

pub fn handle(store_path: &Path, format: OutputFormat, camera: Option<&str>) -> Result<()> {
    let mut store = LabelStore::open(store_path)?;
    store.replace_sites(recompute_sites(store.images(), &TipRuleSet::default()));
    store.save()?;

    let sites: Vec<(&String, &SiteStatistics)> = store
        .data()
        .sites
        .iter()
        .filter(|(id, _)| camera.is_none_or(|c| c == id.as_str()))
        .collect();

    if format == OutputFormat::Json {
        let map: std::collections::BTreeMap<_, _> = sites.into_iter().collect();
        println!("{}", serde_json::to_string_pretty(&map)?);
        return Ok(());
    }

    println!("Labeled images: {}", store.images().len());
    println!("Sites: {}", sites.len());

    let color = std::io::stdout().is_terminal();
    for (camera_id, stats) in sites {
        if color {
            println!("\n{}", camera_id.bold());
        } else {
            println!("\n{}", camera_id);
        }
        println!("  Samples: {}", stats.sample_count);
        println!("  Avg trucks: {:.1}", stats.avg_truck_count);
        println!(
            "  Range: {}-{}",
            stats.min_truck_count, stats.max_truck_count
        );
        println!("  Avg occupancy: {:.0}%", stats.avg_occupancy);
        println!("  Tips: {}", stats.detection_tips);
    }

    Ok(())
}
