use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One verified count record for one camera image.
///
/// A label is created exactly once, by a successful vision-model call for a
/// not-yet-labeled image path. It is never mutated or deleted afterwards;
/// the store treats a second labeling attempt for the same path as a no-op.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    /// Stable key identifying the physical camera/lot.
    pub camera_id: String,
    /// Source image path; unique across the store within a run.
    pub image_path: String,

    /// Semi-truck count. Absent when the model omitted it or the reply
    /// could not be parsed; never coerced to zero.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub truck_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub car_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occupancy_percent: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_of_day: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detailed_notes: Option<String>,

    /// When the label was produced.
    pub labeled_at: DateTime<Utc>,

    // --- Call metadata ---
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_tokens: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_tokens: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labeling_time_sec: Option<f64>,

    /// Verbatim model reply, kept only when no structured result could be
    /// extracted from it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<String>,
    /// True when the reply carried no parseable result.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub parse_error: bool,
}

impl Label {
    /// Project this label down to the per-site sample summary stored in
    /// `SiteStatistics.samples`.
    pub fn sample(&self) -> LabelSample {
        LabelSample {
            truck_count: self.truck_count,
            occupancy_percent: self.occupancy_percent,
            weather: self.weather.clone(),
            time_of_day: self.time_of_day.clone(),
            detailed_notes: self.detailed_notes.clone(),
        }
    }
}

/// Condensed per-label summary kept in site statistics.
///
/// Insertion order equals labeling order, which is what makes the tail of
/// the list usable as a recency window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelSample {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub truck_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occupancy_percent: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_of_day: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detailed_notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label() -> Label {
        Label {
            camera_id: "MN_C30038".to_string(),
            image_path: "images/MN_C30038_001.jpg".to_string(),
            truck_count: Some(4),
            car_count: None,
            occupancy_percent: Some(20),
            weather: Some("snow".to_string()),
            time_of_day: None,
            confidence: Some("high".to_string()),
            detailed_notes: Some("plowed lot, trucks nose-in".to_string()),
            labeled_at: Utc::now(),
            input_tokens: Some(1800),
            output_tokens: Some(120),
            labeling_time_sec: Some(2.41),
            raw_response: None,
            parse_error: false,
        }
    }

    #[test]
    fn sample_projects_site_fields_only() {
        let sample = label().sample();
        assert_eq!(sample.truck_count, Some(4));
        assert_eq!(sample.occupancy_percent, Some(20));
        assert_eq!(sample.weather.as_deref(), Some("snow"));
        assert_eq!(sample.time_of_day, None);
        assert_eq!(
            sample.detailed_notes.as_deref(),
            Some("plowed lot, trucks nose-in")
        );
    }

    #[test]
    fn absent_fields_are_omitted_from_the_document() {
        let json = serde_json::to_string(&label()).unwrap();
        assert!(!json.contains("car_count"));
        assert!(!json.contains("raw_response"));
        assert!(!json.contains("parse_error"));
    }

    #[test]
    fn parse_error_defaults_to_false_on_read() {
        let json = r#"{
            "camera_id": "NY_TA_195",
            "image_path": "a.png",
            "labeled_at": "2026-01-31T13:32:07Z"
        }"#;
        let label: Label = serde_json::from_str(json).unwrap();
        assert!(!label.parse_error);
        assert_eq!(label.truck_count, None);
    }
}
