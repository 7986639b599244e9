use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::label::{Label, LabelSample};

/// Persisted document: the full labeling history plus derived site summaries.
///
/// `images` is append-only; `sites` is fully derived and replaced wholesale
/// on every recompute, so it carries no identity across recomputations.
/// A `BTreeMap` keeps key order stable, which makes recomputation from an
/// unchanged history serialize byte-identically.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingStore {
    #[serde(default)]
    pub images: Vec<Label>,
    #[serde(default)]
    pub sites: BTreeMap<String, SiteStatistics>,
}

/// Derived per-site summary, recomputed from the full label history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteStatistics {
    /// Display name; the camera id until something better is known.
    pub name: String,
    /// Per-label summaries in labeling order (most recent last).
    pub samples: Vec<LabelSample>,

    /// Mean of the labels that carry a truck count. Labels without one are
    /// excluded from the mean, not counted as zero.
    pub avg_truck_count: f64,
    pub max_truck_count: u32,
    pub min_truck_count: u32,
    pub avg_occupancy: f64,
    /// Total labels for this site, including those with missing fields.
    pub sample_count: usize,

    /// Tip text selected by the detection-tip rule table.
    pub detection_tips: String,
}

impl SiteStatistics {
    pub fn empty(camera_id: &str) -> Self {
        Self {
            name: camera_id.to_string(),
            samples: Vec::new(),
            avg_truck_count: 0.0,
            max_truck_count: 0,
            min_truck_count: 0,
            avg_occupancy: 0.0,
            sample_count: 0,
            detection_tips: String::new(),
        }
    }
}
