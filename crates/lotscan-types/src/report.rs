use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Structured counting result shared by every prompt variant.
///
/// This is the shape the model is instructed to return. Every field is
/// optional: presence/type checks beyond parse success belong to callers,
/// and a missing numeric field must stay missing (aggregates exclude it).
/// Unknown fields in the reply are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CountReport {
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
    /// The compact contract calls this `notes`; the training-grade contract
    /// calls it `detailed_notes`. Both are accepted.
    #[serde(default, alias = "notes", skip_serializing_if = "Option::is_none")]
    pub detailed_notes: Option<String>,
}

/// Request shape of the vision-model boundary: image bytes, a declared
/// media type, and the composed prompt. The source path rides along so
/// callers can report per-image failures.
#[derive(Debug, Clone)]
pub struct VisionRequest {
    pub image_path: PathBuf,
    pub image: Vec<u8>,
    pub media_type: String,
    pub prompt: String,
}

/// Reply shape of the vision-model boundary. `text` is free-form: it is
/// expected, but not guaranteed, to contain one JSON object.
#[derive(Debug, Clone)]
pub struct VisionReply {
    pub text: String,
    pub input_tokens: Option<u64>,
    pub output_tokens: Option<u64>,
}
