pub mod batch;
pub mod config;
pub mod error;
pub mod model;
pub mod store;

pub use batch::{BatchOptions, BatchOutcome, BatchProgress, LabelTask, collect_images, run_batch};
pub use config::{Config, resolve_workspace_path};
pub use error::{Error, Result};
pub use model::{ReplayModel, VisionModel};
pub use store::LabelStore;
