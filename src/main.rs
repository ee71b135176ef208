// src/main.rs
use std::{fs::OpenOptions, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use bandstand::{
    app::App,
    audio::{AudioContext, RodioBackend},
    cli::Cli,
    config::{self, Config},
    fs::{collect_tracks, scan_dir, Track},
    ui,
};

fn default_log_file() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("bandstand")
        .join("bandstand.log")
}

/// Log to a file; the terminal belongs to the UI.
fn init_logging(path: Option<PathBuf>) -> Result<()> {
    let path = path.unwrap_or_else(default_log_file);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

/// Command-line paths win, then the configured library, then the cwd.
fn build_catalog(cli: &Cli, config: &Config) -> Result<Vec<Track>> {
    if !cli.paths.is_empty() {
        return collect_tracks(&cli.paths);
    }
    if !config.library.tracks.is_empty() {
        return collect_tracks(&config.library.tracks);
    }
    if let Some(dir) = &config.library.music_dir {
        return scan_dir(dir);
    }
    scan_dir(&std::env::current_dir()?)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.clone())?;

    let mut config = match config::find_config(cli.config.as_deref()) {
        Some(path) => {
            let cfg = config::load_config(&path)?;
            log::info!("Loaded config from {}", path.display());
            cfg
        }
        None => Config::default(),
    };
    if let Some(rate) = cli.frame_rate {
        config.visualizer.frame_rate = rate;
    }
    config.validate()?;

    let tracks = build_catalog(&cli, &config)?;
    log::info!("{} tracks in catalog", tracks.len());

    let context = AudioContext::init().context("Failed to open audio output")?;
    let backend = RodioBackend::new(context, config.analyser.clone());
    let mut app = App::new(backend, tracks, &config);

    ui::run(&mut app, config.visualizer.frame_rate)
}
