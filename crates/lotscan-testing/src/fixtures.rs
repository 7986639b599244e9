//! Fixtures for label and store-document generation.

use anyhow::Result;
use chrono::{TimeZone, Utc};
use lotscan_types::{Label, TrainingStore};
use std::fs;
use std::path::{Path, PathBuf};

/// Builder for test labels with sensible defaults.
#[derive(Debug, Clone)]
pub struct LabelBuilder {
    label: Label,
}

impl LabelBuilder {
    pub fn new(camera_id: &str, image_path: &str) -> Self {
        Self {
            label: Label {
                camera_id: camera_id.to_string(),
                image_path: image_path.to_string(),
                truck_count: None,
                car_count: None,
                occupancy_percent: None,
                weather: None,
                time_of_day: None,
                confidence: None,
                detailed_notes: None,
                labeled_at: Utc.with_ymd_and_hms(2026, 1, 31, 13, 32, 7).unwrap(),
                input_tokens: None,
                output_tokens: None,
                labeling_time_sec: None,
                raw_response: None,
                parse_error: false,
            },
        }
    }

    pub fn trucks(mut self, count: u32) -> Self {
        self.label.truck_count = Some(count);
        self
    }

    pub fn occupancy(mut self, percent: u32) -> Self {
        self.label.occupancy_percent = Some(percent);
        self
    }

    pub fn weather(mut self, weather: &str) -> Self {
        self.label.weather = Some(weather.to_string());
        self
    }

    pub fn notes(mut self, notes: &str) -> Self {
        self.label.detailed_notes = Some(notes.to_string());
        self
    }

    pub fn build(self) -> Label {
        self.label
    }
}

/// Write a store document containing the given labels (no derived sites;
/// tests exercise recomputation themselves).
pub fn write_store(path: &Path, labels: Vec<Label>) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let store = TrainingStore {
        images: labels,
        sites: Default::default(),
    };
    fs::write(path, serde_json::to_string_pretty(&store)?)?;
    Ok(())
}

/// Write a placeholder image file (content is irrelevant to the pipeline;
/// only existence and extension matter).
pub fn write_image(dir: &Path, name: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(name);
    fs::write(&path, [0xFF, 0xD8, 0xFF, 0xE0])?;
    Ok(path)
}

/// Write a canned model reply for the replay model: `<stem>.txt` next to
/// the other replies.
pub fn write_reply(dir: &Path, stem: &str, text: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("{stem}.txt"));
    fs::write(&path, text)?;
    Ok(path)
}
