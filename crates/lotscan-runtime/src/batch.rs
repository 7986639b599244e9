use crate::model::VisionModel;
use crate::store::LabelStore;
use crate::{Error, Result};
use chrono::Utc;
use lotscan_engine::{Extraction, PromptComposer, TipRuleSet, extract, recompute_sites};
use lotscan_engine::prompt::PromptVariant;
use lotscan_types::{CountReport, Label, VisionRequest, media_type_for};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// One image queued for labeling.
#[derive(Debug, Clone)]
pub struct LabelTask {
    pub image_path: PathBuf,
    pub camera_id: String,
}

#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub variant: PromptVariant,
    /// Fixed delay between successive model calls (rate-limit discipline,
    /// not backoff). Skipped images don't count as calls.
    pub delay: Duration,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            variant: PromptVariant::DynamicContext,
            delay: Duration::from_millis(1000),
        }
    }
}

/// Per-batch tally, reported when the run completes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchOutcome {
    pub labeled: usize,
    pub skipped_existing: usize,
    pub skipped_missing: usize,
    pub failed: usize,
}

/// Progress events surfaced to the caller while a batch runs.
#[derive(Debug)]
pub enum BatchProgress<'a> {
    AlreadyLabeled {
        image_path: &'a Path,
    },
    MissingFile {
        image_path: &'a Path,
    },
    Labeled {
        image_path: &'a Path,
        truck_count: Option<u32>,
        seconds: f64,
        parsed: bool,
    },
    Failed {
        image_path: &'a Path,
        message: String,
    },
}

/// Run a labeling batch: one blocking model call per image, fully
/// sequential.
///
/// Per image: skip if already labeled (restart safety - a killed batch is
/// simply re-run), skip with a diagnostic if the file is gone, otherwise
/// compose the prompt, call the model, extract, record, and recompute site
/// statistics. Model failures are reported per image and never abort the
/// batch; only store persistence failures do.
pub fn run_batch(
    store: &mut LabelStore,
    model: &dyn VisionModel,
    composer: &PromptComposer,
    rules: &TipRuleSet,
    tasks: &[LabelTask],
    opts: &BatchOptions,
    mut on_progress: impl FnMut(BatchProgress),
) -> Result<BatchOutcome> {
    let mut outcome = BatchOutcome::default();
    let mut called_model = false;

    for task in tasks {
        let image_key = task.image_path.display().to_string();

        if store.contains(&image_key) {
            outcome.skipped_existing += 1;
            on_progress(BatchProgress::AlreadyLabeled {
                image_path: &task.image_path,
            });
            continue;
        }

        if !task.image_path.exists() {
            outcome.skipped_missing += 1;
            on_progress(BatchProgress::MissingFile {
                image_path: &task.image_path,
            });
            continue;
        }

        if called_model && !opts.delay.is_zero() {
            std::thread::sleep(opts.delay);
        }

        match label_one(store, model, composer, rules, task, opts, &image_key)? {
            LabelResult::Recorded {
                truck_count,
                seconds,
                parsed,
            } => {
                outcome.labeled += 1;
                called_model = true;
                on_progress(BatchProgress::Labeled {
                    image_path: &task.image_path,
                    truck_count,
                    seconds,
                    parsed,
                });
            }
            LabelResult::Failed(message) => {
                outcome.failed += 1;
                called_model = true;
                on_progress(BatchProgress::Failed {
                    image_path: &task.image_path,
                    message,
                });
            }
        }
    }

    Ok(outcome)
}

enum LabelResult {
    Recorded {
        truck_count: Option<u32>,
        seconds: f64,
        parsed: bool,
    },
    Failed(String),
}

fn label_one(
    store: &mut LabelStore,
    model: &dyn VisionModel,
    composer: &PromptComposer,
    rules: &TipRuleSet,
    task: &LabelTask,
    opts: &BatchOptions,
    image_key: &str,
) -> Result<LabelResult> {
    let image = match std::fs::read(&task.image_path) {
        Ok(bytes) => bytes,
        Err(err) => return Ok(LabelResult::Failed(err.to_string())),
    };

    let request = VisionRequest {
        image_path: task.image_path.clone(),
        image,
        media_type: media_type_for(&task.image_path).to_string(),
        prompt: composer.compose(opts.variant, &task.camera_id, store.data()),
    };

    let started = Instant::now();
    let reply = match model.analyze(&request) {
        Ok(reply) => reply,
        // Transport/auth failure: reported for this image only, no partial
        // label is recorded.
        Err(Error::Model(message)) => return Ok(LabelResult::Failed(message)),
        Err(err) => return Err(err),
    };
    let seconds = round2(started.elapsed().as_secs_f64());

    let (report, raw_response, parse_error) = match extract(&reply.text) {
        Extraction::Parsed(report) => (report, None, false),
        Extraction::Raw(text) => (CountReport::default(), Some(text), true),
    };

    let label = Label {
        camera_id: task.camera_id.clone(),
        image_path: image_key.to_string(),
        truck_count: report.truck_count,
        car_count: report.car_count,
        occupancy_percent: report.occupancy_percent,
        weather: report.weather,
        time_of_day: report.time_of_day,
        confidence: report.confidence,
        detailed_notes: report.detailed_notes,
        labeled_at: Utc::now(),
        input_tokens: reply.input_tokens,
        output_tokens: reply.output_tokens,
        labeling_time_sec: Some(seconds),
        raw_response,
        parse_error,
    };
    let truck_count = label.truck_count;

    store.record(label)?;
    let sites = recompute_sites(store.images(), rules);
    store.replace_sites(sites);
    store.save()?;

    Ok(LabelResult::Recorded {
        truck_count,
        seconds,
        parsed: !parse_error,
    })
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Collect labelable images (jpg/jpeg/png) under a directory, sorted for
/// deterministic batch order.
pub fn collect_images(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut images = Vec::new();
    for entry in walkdir::WalkDir::new(dir) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.into_path();
        let is_image = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                ext.eq_ignore_ascii_case("jpg")
                    || ext.eq_ignore_ascii_case("jpeg")
                    || ext.eq_ignore_ascii_case("png")
            });
        if is_image {
            images.push(path);
        }
    }
    images.sort();
    Ok(images)
}
