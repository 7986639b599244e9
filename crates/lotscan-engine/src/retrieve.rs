use lotscan_types::{LabelSample, TrainingStore};
use serde::Serialize;

/// Generic tip used when a site has no computed statistics yet.
pub const GENERIC_TIP: &str = "Count semi-truck trailers";

/// Aggregated knowledge about a site, shaped for prompt injection.
///
/// Every field has a defined fallback so retrieval never fails for an
/// unseen camera: the name falls back to the camera id, capacity to
/// "unknown", occupancy to 0, the tip to [`GENERIC_TIP`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteKnowledge {
    pub name: String,
    /// Highest truck count ever observed at the site; stands in for
    /// capacity until a surveyed figure exists.
    pub avg_capacity: Option<u32>,
    /// Mean occupancy, rounded to whole percent.
    pub avg_occupancy: u32,
    pub detection_tips: String,
    pub sample_count: usize,
}

/// Look up the current knowledge summary for a camera.
pub fn site_knowledge(store: &TrainingStore, camera_id: &str) -> SiteKnowledge {
    match store.sites.get(camera_id) {
        Some(stats) => SiteKnowledge {
            name: stats.name.clone(),
            avg_capacity: (stats.max_truck_count > 0).then_some(stats.max_truck_count),
            avg_occupancy: stats.avg_occupancy.round() as u32,
            detection_tips: stats.detection_tips.clone(),
            sample_count: stats.sample_count,
        },
        None => SiteKnowledge {
            name: camera_id.to_string(),
            avg_capacity: None,
            avg_occupancy: 0,
            detection_tips: GENERIC_TIP.to_string(),
            sample_count: 0,
        },
    }
}

/// The last `n` samples recorded for a camera, in labeling order (most
/// recent last).
///
/// This is a recency window, not a similarity search: callers use it as
/// "similar examples" but nothing here compares conditions. Kept that way
/// deliberately; see DESIGN.md.
pub fn recent_examples<'a>(store: &'a TrainingStore, camera_id: &str, n: usize) -> &'a [LabelSample] {
    match store.sites.get(camera_id) {
        Some(stats) => {
            let start = stats.samples.len().saturating_sub(n);
            &stats.samples[start..]
        }
        None => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lotscan_types::SiteStatistics;

    fn store_with_site(camera_id: &str, truck_counts: &[u32]) -> TrainingStore {
        let mut stats = SiteStatistics::empty(camera_id);
        for count in truck_counts {
            stats.samples.push(LabelSample {
                truck_count: Some(*count),
                occupancy_percent: None,
                weather: None,
                time_of_day: None,
                detailed_notes: None,
            });
        }
        stats.max_truck_count = truck_counts.iter().copied().max().unwrap_or(0);
        stats.avg_occupancy = 32.4;
        stats.sample_count = truck_counts.len();
        stats.detection_tips = "Standard detection. Count trailer rectangles.".to_string();

        let mut store = TrainingStore::default();
        store.sites.insert(camera_id.to_string(), stats);
        store
    }

    #[test]
    fn unseen_camera_gets_placeholders() {
        let knowledge = site_knowledge(&TrainingStore::default(), "UNKNOWN_CAM");
        assert_eq!(knowledge.name, "UNKNOWN_CAM");
        assert_eq!(knowledge.avg_capacity, None);
        assert_eq!(knowledge.avg_occupancy, 0);
        assert_eq!(knowledge.detection_tips, GENERIC_TIP);
        assert_eq!(knowledge.sample_count, 0);
    }

    #[test]
    fn known_camera_reads_from_statistics() {
        let store = store_with_site("MN_C30038", &[4, 9, 6]);
        let knowledge = site_knowledge(&store, "MN_C30038");
        assert_eq!(knowledge.avg_capacity, Some(9));
        assert_eq!(knowledge.avg_occupancy, 32);
        assert_eq!(knowledge.sample_count, 3);
    }

    #[test]
    fn recency_window_takes_the_tail() {
        let store = store_with_site("X", &[1, 2, 3, 4, 5]);
        let tail = recent_examples(&store, "X", 3);
        let counts: Vec<_> = tail.iter().map(|s| s.truck_count).collect();
        assert_eq!(counts, vec![Some(3), Some(4), Some(5)]);
    }

    #[test]
    fn window_larger_than_history_returns_everything() {
        let store = store_with_site("X", &[7]);
        assert_eq!(recent_examples(&store, "X", 3).len(), 1);
        assert!(recent_examples(&store, "Y", 3).is_empty());
    }
}
