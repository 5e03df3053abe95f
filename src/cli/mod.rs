//! CLI module for plexport

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;

#[derive(Parser, Debug)]
#[command(name = "plexport", about = "Export media library playlists to M3U files")]
#[command(version, author)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Locations shared by every command
#[derive(Args, Debug, Clone)]
pub struct GlobalOpts {
    /// Settings file (defaults to the user config directory)
    #[arg(long, global = true, env = "PLEXPORT_SETTINGS", value_name = "FILE")]
    pub settings: Option<PathBuf>,

    /// Library database (overrides the saved library path)
    #[arg(long, global = true, env = "PLEXPORT_LIBRARY", value_name = "FILE")]
    pub library: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export playlists using the saved configuration
    Export {
        /// Show what would be written without touching the export folder
        #[arg(long)]
        dry_run: bool,
    },

    /// Edit the export configuration (interactive when no options are given)
    Configure(ConfigureArgs),

    /// List playlists in the library
    Playlists,

    /// Show the saved export configuration
    ShowConfig,

    /// Generate shell completions
    Completion {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}

#[derive(Args, Debug, Default)]
pub struct ConfigureArgs {
    /// Folder the playlist files are written to
    #[arg(long, value_name = "DIR")]
    pub path: Option<PathBuf>,

    /// Export every playlist
    #[arg(long, conflicts_with = "playlists")]
    pub all: bool,

    /// Export only these playlist ids (comma-separated)
    #[arg(long, value_delimiter = ',', value_name = "IDS")]
    pub playlists: Option<Vec<String>>,

    /// Write track paths with forward slashes
    #[arg(long, conflicts_with = "backslash")]
    pub forward_slash: bool,

    /// Write track paths with backslashes
    #[arg(long)]
    pub backslash: bool,

    /// Library database to remember for later runs
    #[arg(long, value_name = "FILE")]
    pub library_path: Option<PathBuf>,
}

impl ConfigureArgs {
    /// Whether any option was given on the command line
    pub fn is_empty(&self) -> bool {
        !self.has_export_options() && self.library_path.is_none()
    }

    /// Whether any option touching the export configuration was given
    pub fn has_export_options(&self) -> bool {
        self.path.is_some()
            || self.all
            || self.playlists.is_some()
            || self.forward_slash
            || self.backslash
    }
}
