use serde::{Deserialize, Serialize};

/// Hand-authored description of a camera site.
///
/// Consumed read-only by the static-knowledge prompt variant. Lives in the
/// configuration file (`[sites.<camera_id>]`) rather than in the store:
/// unlike `SiteStatistics` it is curated, not derived.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_capacity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub truck_spaces: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub car_spaces: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera_angle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lot_layout: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub landmarks: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detection_tips: Option<String>,
}
