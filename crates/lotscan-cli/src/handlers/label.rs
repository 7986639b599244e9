use crate::types::{OutputFormat, VariantArg};
use anyhow::{Result, bail};
use lotscan_engine::TipRuleSet;
use lotscan_runtime::{
    BatchOptions, BatchProgress, Config, LabelStore, LabelTask, ReplayModel, collect_images,
    run_batch,
};
use lotscan_types::camera_id_from_stem;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[allow(clippy::too_many_arguments)]
pub fn handle(
    store_path: &Path,
    config: &Config,
    format: OutputFormat,
    dir: Option<PathBuf>,
    mut images: Vec<PathBuf>,
    camera: Option<String>,
    replies: PathBuf,
    variant: VariantArg,
    delay_ms: Option<u64>,
) -> Result<()> {
    if let Some(dir) = dir {
        images.extend(collect_images(&dir)?);
    }
    if images.is_empty() {
        bail!("nothing to label: pass --dir and/or --image");
    }

    let tasks: Vec<LabelTask> = images
        .into_iter()
        .map(|image_path| {
            let camera_id = camera.clone().unwrap_or_else(|| {
                let stem = image_path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or_default();
                camera_id_from_stem(stem)
            });
            LabelTask {
                image_path,
                camera_id,
            }
        })
        .collect();

    let mut store = LabelStore::open(store_path)?;
    let model = ReplayModel::new(replies);
    let composer = super::composer_from(config);
    let rules = TipRuleSet::default();
    let opts = BatchOptions {
        variant: variant.into(),
        delay: Duration::from_millis(delay_ms.unwrap_or(config.rate_limit_ms)),
    };

    let total = tasks.len();
    let mut position = 0usize;
    let outcome = run_batch(
        &mut store,
        &model,
        &composer,
        &rules,
        &tasks,
        &opts,
        |progress| {
            position += 1;
            if format == OutputFormat::Json {
                return;
            }
            render_progress(position, total, &progress);
        },
    )?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outcome)?),
        OutputFormat::Plain => {
            println!(
                "\nDone: {} labeled, {} already labeled, {} missing, {} failed ({} sites tracked)",
                outcome.labeled,
                outcome.skipped_existing,
                outcome.skipped_missing,
                outcome.failed,
                store.data().sites.len(),
            );
        }
    }

    Ok(())
}

fn render_progress(position: usize, total: usize, progress: &BatchProgress) {
    let name = |path: &Path| {
        path.file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("?")
            .to_string()
    };
    match progress {
        BatchProgress::AlreadyLabeled { image_path } => {
            println!("[{}/{}] {} skipped (already labeled)", position, total, name(image_path));
        }
        BatchProgress::MissingFile { image_path } => {
            eprintln!(
                "[{}/{}] {} skipped (file not found)",
                position,
                total,
                name(image_path)
            );
        }
        BatchProgress::Labeled {
            image_path,
            truck_count,
            seconds,
            parsed,
        } => {
            let trucks = truck_count
                .map(|n| n.to_string())
                .unwrap_or_else(|| "?".to_string());
            let note = if *parsed { "" } else { " [unparsed reply]" };
            println!(
                "[{}/{}] {} {} trucks ({:.1}s){}",
                position,
                total,
                name(image_path),
                trucks,
                seconds,
                note
            );
        }
        BatchProgress::Failed {
            image_path,
            message,
        } => {
            eprintln!("[{}/{}] {} error: {}", position, total, name(image_path), message);
        }
    }
}
