use super::args::{Cli, Commands};
use super::handlers;
use anyhow::Result;
use lotscan_runtime::{Config, resolve_workspace_path};

pub fn run(cli: Cli) -> Result<()> {
    let data_dir = resolve_workspace_path(cli.data_dir.as_deref())?;
    let config = Config::load_from(&data_dir.join("config.toml"))?;
    let store_path = data_dir.join("labels.json");

    match cli.command {
        Commands::Label {
            dir,
            images,
            camera,
            replies,
            variant,
            delay_ms,
        } => handlers::label::handle(
            &store_path,
            &config,
            cli.format,
            dir,
            images,
            camera,
            replies,
            variant,
            delay_ms,
        ),

        Commands::Stats { camera } => {
            handlers::stats::handle(&store_path, cli.format, camera.as_deref())
        }

        Commands::Site {
            camera_id,
            examples,
        } => handlers::site::handle(&store_path, cli.format, &camera_id, examples),

        Commands::Prompt {
            camera_id,
            variant,
            examples,
        } => handlers::prompt::handle(&store_path, &config, cli.format, &camera_id, variant, examples),

        Commands::Extract { file } => handlers::extract::handle(cli.format, file.as_deref()),
    }
}
