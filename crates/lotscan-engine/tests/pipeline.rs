//! End-to-end engine flow: label history -> site statistics -> retrieval ->
//! composed prompt -> reply extraction.

use chrono::{TimeZone, Utc};
use lotscan_engine::{
    Extraction, PromptComposer, PromptVariant, TipRuleSet, extract, recompute_sites,
    site_knowledge,
};
use lotscan_types::{Label, TrainingStore};
use std::collections::BTreeMap;

fn label(camera_id: &str, n: usize, truck_count: Option<u32>, notes: Option<&str>) -> Label {
    Label {
        camera_id: camera_id.to_string(),
        image_path: format!("images/{camera_id}_{n}.png"),
        truck_count,
        car_count: None,
        occupancy_percent: truck_count.map(|c| c * 10),
        weather: None,
        time_of_day: Some("day".to_string()),
        confidence: Some("high".to_string()),
        detailed_notes: notes.map(|s| s.to_string()),
        labeled_at: Utc.with_ymd_and_hms(2026, 2, 1, 8, 0, 0).unwrap(),
        input_tokens: Some(1500),
        output_tokens: Some(90),
        labeling_time_sec: Some(2.0),
        raw_response: None,
        parse_error: false,
    }
}

#[test]
fn history_flows_into_the_next_prompt() {
    let images = vec![
        label("NY_TA_195", 0, Some(3), Some("light snow on the rows")),
        label("NY_TA_195", 1, Some(5), None),
        label("NY_TA_195", 2, Some(7), Some("clear")),
        label("NY_TA_195", 3, None, None),
    ];

    let mut store = TrainingStore {
        images,
        sites: BTreeMap::new(),
    };
    store.sites = recompute_sites(&store.images, &TipRuleSet::default());

    let stats = &store.sites["NY_TA_195"];
    assert_eq!(stats.avg_truck_count, 5.0);
    assert_eq!(stats.max_truck_count, 7);
    assert_eq!(stats.min_truck_count, 3);
    assert_eq!(stats.sample_count, 4);
    assert!(stats.detection_tips.starts_with("Winter conditions"));

    let knowledge = site_knowledge(&store, "NY_TA_195");
    assert_eq!(knowledge.avg_capacity, Some(7));

    let composer = PromptComposer::new(BTreeMap::new());
    let prompt = composer.compose(PromptVariant::DynamicContext, "NY_TA_195", &store);
    assert!(prompt.contains("Typical capacity: 7 trucks"));
    assert!(prompt.contains("Detection tips: Winter conditions common."));
    // Window of 3 over 4 samples: the first label is aged out.
    assert!(prompt.contains("- Truck count: 7"));
    assert!(!prompt.contains("- Truck count: 3"));

    // A reply to that prompt parses back into the shared schema.
    let reply = "Based on the reference examples: {\"truck_count\": 6, \"occupancy_percent\": 55, \"confidence\": \"medium\"}";
    let Extraction::Parsed(report) = extract(reply) else {
        panic!("expected a parsed result");
    };
    assert_eq!(report.truck_count, Some(6));
}
