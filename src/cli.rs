// src/cli.rs
//! Command-line arguments.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "bandstand", version, about = "Terminal music player with a block visualizer")]
pub struct Cli {
    /// Audio files or directories to list (defaults to the configured library)
    pub paths: Vec<PathBuf>,

    /// Config file (defaults to ./bandstand.toml, then the user config dir)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log file (defaults to <cache dir>/bandstand/bandstand.log)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Animation frames per second, overrides the config
    #[arg(long)]
    pub frame_rate: Option<u32>,
}
