use crate::types::{OutputFormat, VariantArg};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lotscan")]
#[command(
    about = "Accumulate verified truck counts per camera site and feed that knowledge back into counting prompts",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    /// Workspace data directory (defaults to LOTSCAN_PATH, then the platform data dir)
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    #[arg(long, default_value = "plain", global = true)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Label camera images and fold the results into site knowledge
    Label {
        /// Directory scanned recursively for jpg/jpeg/png images
        #[arg(long)]
        dir: Option<PathBuf>,

        /// Individual image files to label (repeatable)
        #[arg(long = "image")]
        images: Vec<PathBuf>,

        /// Camera id for every image (otherwise inferred from each filename)
        #[arg(long)]
        camera: Option<String>,

        /// Directory of cached model replies: <image-stem>.txt per image
        #[arg(long)]
        replies: PathBuf,

        #[arg(long, default_value = "dynamic")]
        variant: VariantArg,

        /// Delay between model calls in milliseconds (default: config rate_limit_ms)
        #[arg(long)]
        delay_ms: Option<u64>,
    },

    /// Recompute site statistics from the full label history and display them
    Stats {
        /// Restrict output to one camera
        #[arg(long)]
        camera: Option<String>,
    },

    /// Show retrieved site knowledge and the recent-example window
    Site {
        camera_id: String,

        /// Size of the recency window
        #[arg(long, default_value = "3")]
        examples: usize,
    },

    /// Render a counting prompt without calling any model
    Prompt {
        camera_id: String,

        #[arg(long, default_value = "dynamic")]
        variant: VariantArg,

        /// Override the number of injected examples (dynamic variant)
        #[arg(long)]
        examples: Option<usize>,
    },

    /// Run the reply extractor over a file (or stdin) and show the result
    Extract {
        file: Option<PathBuf>,
    },
}
