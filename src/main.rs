//! Video Diary CLI
//!
//! Command-line front end over the clip catalog and the trim workflow.
//!
//! # Usage
//!
//! ```bash
//! diary save --input holiday.mp4 --start 12 --end 17 --name "Beach"
//! diary list
//! diary remove --id 1718000000000
//! diary window --duration 30 --max 5 --drag 1000
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};

use video_diary::app::DefaultAppContainer;
use video_diary::cli::{commands, Cli, Commands};
use video_diary::config_initialization::initialize_configuration_hierarchy;
use video_diary::utils::logging::init_logging;

/// Main entry point for the Video Diary CLI
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let resolved = initialize_configuration_hierarchy(&cli.overrides())
        .context("Failed to load configuration")?;
    let config = &resolved.config;
    init_logging(&config.logging.level, config.logging.json)
        .context("Failed to initialize logging")?;
    resolved.log_sources();
    debug!(?config, "Configuration resolved");

    // The selection window needs no storage or media adapters
    let container = || DefaultAppContainer::new(config).context("Failed to set up adapters");

    match cli.command {
        Commands::Window(args) => commands::window(args, &config.selection)?,
        Commands::List(args) => commands::list(&container()?, args).await?,
        Commands::Show(args) => commands::show(&container()?, args).await?,
        Commands::Probe(args) => commands::probe(&container()?, args).await?,
        Commands::Save(args) => {
            info!("Executing save command");
            commands::save(&container()?, args).await?
        }
        Commands::Remove(args) => {
            info!("Executing remove command");
            commands::remove(&container()?, args).await?
        }
    }

    Ok(())
}
