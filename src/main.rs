//! plexport - Export media library playlists to M3U files

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod export;
mod library;
mod settings;
mod utils;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "plexport=debug"
    } else {
        "plexport=info"
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match cli.command {
        Commands::Export { dry_run } => {
            cli::commands::export(&cli.global, dry_run)?;
        }
        Commands::Configure(args) => {
            cli::commands::configure(&cli.global, args)?;
        }
        Commands::Playlists => {
            cli::commands::playlists(&cli.global)?;
        }
        Commands::ShowConfig => {
            cli::commands::show_config(&cli.global)?;
        }
        Commands::Completion { shell } => {
            cli::commands::completion(shell);
        }
    }

    Ok(())
}
