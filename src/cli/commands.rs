//! CLI command handlers

use anyhow::{Context, Result};
use clap::CommandFactory;
use clap_complete::generate;
use colored::Colorize;
use dialoguer::{Confirm, Input, MultiSelect, Select};
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::{Cli, ConfigureArgs, GlobalOpts};
use crate::export::{
    BatchResult, DryRunFs, ExportCoordinator, ExportFs, ExportProgress, LocalFs,
};
use crate::library::{LibraryStore, SqliteLibrary};
use crate::settings::export_config::{parse_id_list, KEY_LIBRARY_PATH};
use crate::settings::{ExportConfig, JsonSettingsStore, SettingsStore};

/// Failures listed in the end-of-run summary before truncating
const MAX_LISTED_FAILURES: usize = 10;

/// Handle the `export` command
pub fn export(global: &GlobalOpts, dry_run: bool) -> Result<()> {
    let settings = open_settings(global)?;
    let config = ExportConfig::load(&settings);
    let library = open_library(global, &settings)?;

    if dry_run {
        let fs = DryRunFs::new();
        let result = ExportCoordinator::new(&library, &fs).run(&config)?;

        println!();
        println!("{}", "[DRY RUN] Would write:".yellow());
        for (path, bytes) in fs.planned() {
            println!("  {} ({} bytes)", path.display(), bytes);
        }
        for failure in &result.failures {
            println!("  {} {}: {}", "skip".red(), failure.playlist_name, failure.reason);
        }
        return Ok(());
    }

    let result = run_export(&library, LocalFs, &config)?;

    println!();
    let summary = result.summary(MAX_LISTED_FAILURES);
    if result.is_clean() {
        println!("{}", summary.green());
    } else {
        println!("{}", summary.yellow());
    }

    Ok(())
}

fn run_export<F: ExportFs>(
    library: &SqliteLibrary,
    fs: F,
    config: &ExportConfig,
) -> Result<BatchResult> {
    let coordinator = ExportCoordinator::new(library, fs);

    let bar = ProgressBar::new(0);
    bar.set_style(
        ProgressStyle::with_template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .context("Invalid progress template")?
            .progress_chars("=> "),
    );

    let outcome = coordinator.run_with_progress(config, |event| match event {
        ExportProgress::Started { total } => bar.set_length(total as u64),
        ExportProgress::PlaylistExported { name, path } => {
            bar.set_message(format!("{} -> {}", name, path.display()));
            bar.inc(1);
        }
        ExportProgress::PlaylistFailed { name, reason } => {
            bar.println(format!("{} {}: {}", "failed".red(), name, reason));
            bar.inc(1);
        }
    });
    bar.finish_and_clear();

    match outcome {
        Ok(result) => Ok(result),
        Err(e) => {
            if e.is_configuration() {
                println!(
                    "{}",
                    "Check the export settings with 'plexport show-config'.".yellow()
                );
            }
            Err(e.into())
        }
    }
}

/// Handle the `configure` command
pub fn configure(global: &GlobalOpts, args: ConfigureArgs) -> Result<()> {
    let mut settings = open_settings(global)?;
    let current = ExportConfig::load(&settings);

    // Remembering the library alone must work before any export setting exists
    if let Some(library_path) = &args.library_path {
        if !args.has_export_options() {
            save_library_path(&mut settings, library_path)?;
            return Ok(());
        }
    }

    let config = if args.is_empty() {
        match configure_interactive(global, &settings, current)? {
            Some(config) => config,
            None => {
                println!("{}", "Configuration not saved.".yellow());
                return Ok(());
            }
        }
    } else {
        apply_args(current, &args)
    };

    config.validate()?;

    if let Some(library_path) = &args.library_path {
        save_library_path(&mut settings, library_path)?;
    }

    if !config.export_path.is_dir() {
        println!(
            "{} {}",
            "Warning: export path does not exist:".yellow(),
            config.export_path.display()
        );
    }

    config.save(&mut settings)?;
    println!("{}", "Configuration saved.".green().bold());
    print_config(&config);

    Ok(())
}

fn save_library_path(settings: &mut JsonSettingsStore, library_path: &Path) -> Result<()> {
    settings.set_setting(KEY_LIBRARY_PATH, library_path.to_string_lossy())?;
    println!("Library: {}", library_path.display());
    Ok(())
}

/// Apply command-line options on top of the saved configuration
fn apply_args(mut config: ExportConfig, args: &ConfigureArgs) -> ExportConfig {
    if let Some(path) = &args.path {
        config.export_path = path.clone();
    }
    if args.all {
        config.export_all_playlists = true;
    }
    if let Some(ids) = &args.playlists {
        config.export_all_playlists = false;
        config.selected_playlist_ids = parse_id_list(&ids.join(","));
    }
    if args.forward_slash {
        config.use_forward_slash = true;
    }
    if args.backslash {
        config.use_forward_slash = false;
    }
    config
}

/// Walk through every setting with prompts
///
/// Returns `None` when the user backs out.
fn configure_interactive(
    global: &GlobalOpts,
    settings: &JsonSettingsStore,
    current: ExportConfig,
) -> Result<Option<ExportConfig>> {
    let export_path: String = Input::new()
        .with_prompt("Export path")
        .with_initial_text(current.export_path.to_string_lossy())
        .interact_text()
        .context("Failed to read export path")?;
    let export_path = PathBuf::from(export_path.trim());

    if !export_path.is_dir()
        && !Confirm::new()
            .with_prompt("The selected path does not exist. Continue anyway?")
            .default(false)
            .interact()?
    {
        return Ok(None);
    }

    let styles = [
        "Forward slashes (/) - Linux-style",
        "Back slashes (\\) - Windows-style",
    ];
    let style = Select::new()
        .with_prompt("Path format")
        .items(&styles)
        .default(if current.use_forward_slash { 0 } else { 1 })
        .interact()?;

    let export_all_playlists = Confirm::new()
        .with_prompt("Export all playlists?")
        .default(current.export_all_playlists)
        .interact()?;

    let selected_playlist_ids = if export_all_playlists {
        current.selected_playlist_ids.clone()
    } else {
        let library = open_library(global, settings)?;
        let playlists = library.list_playlists()?;
        let names: Vec<String> = playlists
            .iter()
            .map(|p| format!("{} (id {})", p.name, p.id))
            .collect();
        let defaults: Vec<bool> = playlists
            .iter()
            .map(|p| current.selected_playlist_ids.contains(p.id.trim()))
            .collect();

        let chosen = MultiSelect::new()
            .with_prompt("Playlists to export (space to toggle)")
            .items(&names)
            .defaults(&defaults)
            .interact()?;

        chosen
            .into_iter()
            .map(|i| playlists[i].id.trim().to_string())
            .collect()
    };

    Ok(Some(ExportConfig {
        export_all_playlists,
        selected_playlist_ids,
        export_path,
        use_forward_slash: style == 0,
    }))
}

/// Handle the `playlists` command
pub fn playlists(global: &GlobalOpts) -> Result<()> {
    let settings = open_settings(global)?;
    let config = ExportConfig::load(&settings);
    let library = open_library(global, &settings)?;

    let playlists = library.list_playlists()?;
    if playlists.is_empty() {
        println!("{}", "No playlists found in the library.".yellow());
        return Ok(());
    }

    println!("{}", "Playlists:".green().bold());
    for playlist in &playlists {
        let tracks = library.track_count(&playlist.id)?;
        let marker = if config.is_selected(&playlist.id) {
            "*".green()
        } else {
            " ".normal()
        };
        println!(
            "  {} {:>6}  {} ({} tracks)",
            marker, playlist.id, playlist.name, tracks
        );
    }
    println!();
    println!("{} marks playlists selected for export.", "*".green());

    Ok(())
}

/// Handle the `show-config` command
pub fn show_config(global: &GlobalOpts) -> Result<()> {
    let settings = open_settings(global)?;
    let config = ExportConfig::load(&settings);

    if let Some(path) = settings.path() {
        println!("Settings file: {}", path.display());
    }
    let library: String = settings.get_setting(KEY_LIBRARY_PATH, String::new());
    println!(
        "  Library: {}",
        if library.is_empty() { "(not set)" } else { library.as_str() }
    );
    print_config(&config);

    Ok(())
}

fn print_config(config: &ExportConfig) {
    let path = if config.export_path.as_os_str().is_empty() {
        "(not set)".to_string()
    } else {
        config.export_path.display().to_string()
    };
    println!("  Export path: {}", path);
    println!(
        "  Path format: {}",
        if config.use_forward_slash {
            "forward slashes (/)"
        } else {
            "back slashes (\\)"
        }
    );
    if config.export_all_playlists {
        println!("  Playlists: all");
    } else {
        let ids: Vec<&str> = config
            .selected_playlist_ids
            .iter()
            .map(String::as_str)
            .collect();
        println!("  Playlists: {}", ids.join(", "));
    }
}

/// Handle the `completion` command
pub fn completion(shell: clap_complete::Shell) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "plexport", &mut io::stdout());
}

fn open_settings(global: &GlobalOpts) -> Result<JsonSettingsStore> {
    match &global.settings {
        Some(path) => JsonSettingsStore::load(path),
        None => JsonSettingsStore::load_default(),
    }
}

fn open_library(global: &GlobalOpts, settings: &JsonSettingsStore) -> Result<SqliteLibrary> {
    let path = match &global.library {
        Some(path) => path.clone(),
        None => {
            let saved: String = settings.get_setting(KEY_LIBRARY_PATH, String::new());
            if saved.is_empty() {
                anyhow::bail!(
                    "No library database configured. Pass --library or run 'plexport configure --library-path <FILE>'."
                );
            }
            PathBuf::from(saved)
        }
    };

    debug!("Using library database {}", path.display());
    SqliteLibrary::open(&path)
}
