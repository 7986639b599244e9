use lotscan_types::{Label, SiteStatistics};
use std::collections::BTreeMap;

use crate::tips::TipRuleSet;

/// Recompute every site summary from the full label history.
///
/// Labels are grouped by camera id preserving insertion order, so each
/// site's `samples` list stays in labeling order. Numeric aggregates run
/// over the subsequence of labels where the field is present; a label
/// missing `truck_count` contributes nothing to the truck aggregates and
/// does not shrink `sample_count`, which always counts the whole group.
///
/// The result replaces the store's `sites` mapping wholesale. Recomputing
/// from an unchanged history is deterministic (stable grouping, stable key
/// order), so repeated runs serialize byte-identically.
pub fn recompute_sites(images: &[Label], rules: &TipRuleSet) -> BTreeMap<String, SiteStatistics> {
    let mut sites: BTreeMap<String, SiteStatistics> = BTreeMap::new();

    for label in images {
        sites
            .entry(label.camera_id.clone())
            .or_insert_with(|| SiteStatistics::empty(&label.camera_id))
            .samples
            .push(label.sample());
    }

    for stats in sites.values_mut() {
        let truck_counts: Vec<u32> = stats.samples.iter().filter_map(|s| s.truck_count).collect();
        let occupancies: Vec<u32> = stats
            .samples
            .iter()
            .filter_map(|s| s.occupancy_percent)
            .collect();

        stats.avg_truck_count = mean(&truck_counts);
        stats.max_truck_count = truck_counts.iter().copied().max().unwrap_or(0);
        stats.min_truck_count = truck_counts.iter().copied().min().unwrap_or(0);
        stats.avg_occupancy = mean(&occupancies);
        stats.sample_count = stats.samples.len();

        let all_notes = stats
            .samples
            .iter()
            .filter_map(|s| s.detailed_notes.as_deref())
            .collect::<Vec<_>>()
            .join(" ");
        stats.detection_tips = rules.select(&all_notes).to_string();
    }

    sites
}

fn mean(values: &[u32]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().map(|v| *v as f64).sum::<f64>() / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use lotscan_types::Label;

    fn label(camera_id: &str, n: usize, truck_count: Option<u32>) -> Label {
        Label {
            camera_id: camera_id.to_string(),
            image_path: format!("images/{camera_id}_{n}.jpg"),
            truck_count,
            car_count: None,
            occupancy_percent: None,
            weather: None,
            time_of_day: None,
            confidence: None,
            detailed_notes: None,
            labeled_at: Utc.with_ymd_and_hms(2026, 1, 31, 13, 0, 0).unwrap(),
            input_tokens: None,
            output_tokens: None,
            labeling_time_sec: None,
            raw_response: None,
            parse_error: false,
        }
    }

    #[test]
    fn aggregates_for_one_site() {
        // Three counted labels plus one where the model omitted the count.
        let mut images = vec![
            label("X", 0, Some(3)),
            label("X", 1, Some(5)),
            label("X", 2, Some(7)),
            label("X", 3, None),
        ];
        images[3].occupancy_percent = Some(40);

        let sites = recompute_sites(&images, &TipRuleSet::default());
        let x = &sites["X"];

        assert_eq!(x.avg_truck_count, 5.0);
        assert_eq!(x.max_truck_count, 7);
        assert_eq!(x.min_truck_count, 3);
        assert_eq!(x.sample_count, 4);
        assert_eq!(x.avg_occupancy, 40.0);
    }

    #[test]
    fn missing_field_is_excluded_not_zeroed() {
        let mut images = vec![label("X", 0, None)];
        images[0].occupancy_percent = Some(40);

        let sites = recompute_sites(&images, &TipRuleSet::default());
        let x = &sites["X"];

        // No truck counts at all: aggregates bottom out at zero, but the
        // occupancy-only label still counts toward the site.
        assert_eq!(x.avg_truck_count, 0.0);
        assert_eq!(x.avg_occupancy, 40.0);
        assert_eq!(x.sample_count, 1);
    }

    #[test]
    fn recompute_is_idempotent() {
        let mut images = vec![
            label("A", 0, Some(2)),
            label("B", 0, Some(9)),
            label("A", 1, None),
        ];
        images[2].detailed_notes = Some("Snow covering the stripes".to_string());

        let rules = TipRuleSet::default();
        let first = recompute_sites(&images, &rules);
        let second = recompute_sites(&images, &rules);

        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn tip_rule_runs_over_concatenated_notes() {
        let mut images = vec![label("A", 0, Some(1)), label("A", 1, Some(2))];
        images[0].detailed_notes = Some("clear morning".to_string());
        images[1].detailed_notes = Some("light SNOW on the rows".to_string());

        let sites = recompute_sites(&images, &TipRuleSet::default());
        assert!(sites["A"].detection_tips.starts_with("Winter conditions"));
    }

    #[test]
    fn samples_preserve_labeling_order() {
        let images = vec![
            label("A", 0, Some(1)),
            label("B", 0, Some(5)),
            label("A", 1, Some(2)),
            label("A", 2, Some(3)),
        ];

        let sites = recompute_sites(&images, &TipRuleSet::default());
        let counts: Vec<_> = sites["A"].samples.iter().map(|s| s.truck_count).collect();
        assert_eq!(counts, vec![Some(1), Some(2), Some(3)]);
    }
}
