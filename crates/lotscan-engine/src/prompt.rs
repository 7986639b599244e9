use lotscan_types::{SiteProfile, TrainingStore, truncate_chars};
use std::collections::BTreeMap;

use crate::retrieve::{recent_examples, site_knowledge};

/// Default number of historical examples injected by the dynamic variant.
pub const DEFAULT_CONTEXT_EXAMPLES: usize = 3;
/// Default character budget for an injected example's notes field.
pub const DEFAULT_NOTES_BUDGET: usize = 100;

/// Assumed truck capacity when neither a profile nor history names one.
const FALLBACK_TRUCK_SPACES: u32 = 50;

/// Prompt flavor for a counting request. All variants share the same
/// structured-output contract and counting rules; they differ only in how
/// much site context gets injected ahead of the task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptVariant {
    /// Fixed instructional text, no site-specific content.
    Baseline,
    /// Hand-authored site profile plus fixed few-shot examples.
    StaticSite,
    /// Derived site knowledge plus a recency window of labeled examples.
    DynamicContext,
}

/// Renders counting-task prompts from injected, immutable configuration.
///
/// Site profiles and the few-shot block are handed in at construction and
/// never mutated; the dynamic variant additionally reads the store's
/// derived site knowledge at compose time.
#[derive(Debug, Clone)]
pub struct PromptComposer {
    profiles: BTreeMap<String, SiteProfile>,
    context_examples: usize,
    notes_budget: usize,
}

impl PromptComposer {
    pub fn new(profiles: BTreeMap<String, SiteProfile>) -> Self {
        Self {
            profiles,
            context_examples: DEFAULT_CONTEXT_EXAMPLES,
            notes_budget: DEFAULT_NOTES_BUDGET,
        }
    }

    pub fn context_examples(mut self, n: usize) -> Self {
        self.context_examples = n;
        self
    }

    pub fn notes_budget(mut self, chars: usize) -> Self {
        self.notes_budget = chars;
        self
    }

    pub fn compose(&self, variant: PromptVariant, camera_id: &str, store: &TrainingStore) -> String {
        match variant {
            PromptVariant::Baseline => self.compose_baseline(),
            PromptVariant::StaticSite => self.compose_static(camera_id),
            PromptVariant::DynamicContext => self.compose_dynamic(camera_id, store),
        }
    }

    fn compose_baseline(&self) -> String {
        let mut prompt = String::from(
            "Analyze this traffic camera image from a rest area or truck parking location.\n\n\
             Count the semi-trucks/18-wheelers visible and estimate lot occupancy.\n",
        );
        push_counting_rules(&mut prompt);
        push_output_contract(&mut prompt, None);
        prompt
    }

    fn compose_static(&self, camera_id: &str) -> String {
        let fallback = SiteProfile::default();
        let profile = self.profiles.get(camera_id).unwrap_or(&fallback);
        let field = |value: &Option<String>| -> String {
            value.clone().unwrap_or_else(|| "Unknown".to_string())
        };
        let spaces = profile
            .truck_spaces
            .map(|n| n.to_string())
            .unwrap_or_else(|| "Unknown".to_string());

        let mut prompt = format!(
            "You are analyzing a traffic camera image from a truck parking facility.\n\n\
             SITE INFORMATION:\n\
             - Location: {}\n\
             - Total truck parking spaces: {}\n\
             - Camera angle: {}\n\
             - Lot layout: {}\n\
             - Key landmarks: {}\n\n\
             DETECTION GUIDANCE:\n{}\n\n\
             REFERENCE EXAMPLES:\n{}\n\
             YOUR TASK:\n\
             Analyze this image and count:\n\
             1. Semi-trucks (trailers, not cars or small vehicles)\n\
             2. Estimate lot occupancy percentage\n",
            field(&profile.name),
            spaces,
            field(&profile.camera_angle),
            field(&profile.lot_layout),
            field(&profile.landmarks),
            profile
                .detection_tips
                .as_deref()
                .unwrap_or("Count semi-trucks/18-wheelers. Each trailer = 1 truck."),
            FEW_SHOT_EXAMPLES,
        );
        push_counting_rules(&mut prompt);
        push_output_contract(
            &mut prompt,
            Some(profile.truck_spaces.unwrap_or(FALLBACK_TRUCK_SPACES)),
        );
        prompt
    }

    fn compose_dynamic(&self, camera_id: &str, store: &TrainingStore) -> String {
        let knowledge = site_knowledge(store, camera_id);
        let examples = recent_examples(store, camera_id, self.context_examples);

        let capacity = knowledge
            .avg_capacity
            .map(|n| n.to_string())
            .unwrap_or_else(|| "Unknown".to_string());

        let mut examples_text = String::new();
        for (i, example) in examples.iter().enumerate() {
            let count = example
                .truck_count
                .map(|n| n.to_string())
                .unwrap_or_else(|| "?".to_string());
            let occupancy = example
                .occupancy_percent
                .map(|n| n.to_string())
                .unwrap_or_else(|| "?".to_string());
            let notes = example
                .detailed_notes
                .as_deref()
                .map(|n| truncate_chars(n, self.notes_budget))
                .unwrap_or("N/A");
            examples_text.push_str(&format!(
                "\nExample {} (similar conditions):\n\
                 - Truck count: {}\n\
                 - Occupancy: {}%\n\
                 - Notes: {}\n",
                i + 1,
                count,
                occupancy,
                notes,
            ));
        }
        if examples_text.is_empty() {
            examples_text.push_str("\n(no labeled examples yet)\n");
        }

        let mut prompt = format!(
            "Analyze this truck parking camera image.\n\n\
             SITE INFO (from training data):\n\
             - Location: {}\n\
             - Typical capacity: {} trucks\n\
             - Average occupancy: {}%\n\
             - Detection tips: {}\n\n\
             REFERENCE EXAMPLES FROM THIS CAMERA:\n{}\n\
             COUNT TRUCKS CAREFULLY:\n\
             - Semi-trucks (trailers) only, not cars\n\
             - If similar to examples above, expect similar counts\n",
            knowledge.name, capacity, knowledge.avg_occupancy, knowledge.detection_tips,
            examples_text,
        );
        push_counting_rules(&mut prompt);
        push_output_contract(&mut prompt, knowledge.avg_capacity);
        prompt
    }
}

/// Counting rules, invariant across variants.
fn push_counting_rules(prompt: &mut String) {
    prompt.push_str(
        "\nIMPORTANT COUNTING RULES:\n\
         - A semi-truck = large rectangular trailer (40-53 ft long)\n\
         - Bobtail trucks (cab only) count as trucks\n\
         - Cars, SUVs, and pickups do NOT count as trucks\n\
         - If unsure, err on the side of counting (better to overcount than miss)\n",
    );
}

/// Structured-output contract, identical across variants. When a capacity
/// is known the occupancy line names it so the model anchors percentages.
fn push_output_contract(prompt: &mut String, truck_spaces: Option<u32>) {
    let occupancy = match truck_spaces {
        Some(n) => format!("<int based on {} total spaces>", n),
        None => "<int>".to_string(),
    };
    prompt.push_str(&format!(
        "\nReturn your analysis as JSON:\n\
         {{\n\
         \x20 \"truck_count\": <int>,\n\
         \x20 \"car_count\": <int>,\n\
         \x20 \"occupancy_percent\": {},\n\
         \x20 \"confidence\": \"<high/medium/low>\",\n\
         \x20 \"notes\": \"<brief description of what you see>\"\n\
         }}",
        occupancy,
    ));
}

/// Hand-written few-shot block used by the static variant. Curated once
/// from verified counts; not derived from the store.
const FEW_SHOT_EXAMPLES: &str = "
EXAMPLE 1: Winter rest area, 3 trucks visible
- Three semi-trucks parked in rows (one white trailer, one red cab, one silver)
- Lot is approximately 15% occupied
- Snow on ground but parking area clear
- Analysis: truck_count=3, occupancy_percent=15

EXAMPLE 2: Service area, busy lot
- Eight semi-trucks visible in parking rows
- Mix of trailers and cab-only trucks
- Lot is approximately 65% occupied
- Cars also present but not counted as trucks
- Analysis: truck_count=8, occupancy_percent=65

EXAMPLE 3: Empty rest area
- No trucks visible in parking area
- Only 1-2 cars near building
- Lot is approximately 5% occupied
- Analysis: truck_count=0, occupancy_percent=5
";
