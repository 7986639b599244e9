use crate::types::OutputFormat;
use anyhow::Result;
use lotscan_engine::{Extraction, extract};
use serde_json::json;
use std::io::Read;
use std::path::Path;

pub fn handle(format: OutputFormat, file: Option<&Path>) -> Result<()> {
    let raw = match file {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let extraction = extract(&raw);

    if format == OutputFormat::Json {
        let payload = match &extraction {
            Extraction::Parsed(report) => json!({ "parsed": true, "report": report }),
            Extraction::Raw(text) => json!({ "parsed": false, "raw": text }),
        };
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    match extraction {
        Extraction::Parsed(report) => {
            println!("Parsed reply:");
            let int_field = |value: Option<u32>| {
                value.map(|n| n.to_string()).unwrap_or_else(|| "-".to_string())
            };
            println!("  truck_count: {}", int_field(report.truck_count));
            println!("  car_count: {}", int_field(report.car_count));
            println!("  occupancy_percent: {}", int_field(report.occupancy_percent));
            println!("  confidence: {}", report.confidence.as_deref().unwrap_or("-"));
            if let Some(notes) = report.detailed_notes.as_deref() {
                println!("  notes: {}", notes);
            }
        }
        Extraction::Raw(text) => {
            println!("No structured result found; raw reply:");
            println!("{}", text);
        }
    }

    Ok(())
}
