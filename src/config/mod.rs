// src/config/mod.rs
//! User settings loaded from TOML.
//!
//! Every field has a default, so an absent file or a partial file is fine.
//! Values are validated once after loading.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{ensure, Context, Result};
use serde::Deserialize;

/// File name looked up in the working directory.
pub const LOCAL_CONFIG: &str = "bandstand.toml";

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub visualizer: VisualizerConfig,
    pub analyser: AnalyserConfig,
    /// Highlight colors, one picked at random per track activation
    pub palette: Vec<Rgb>,
    pub library: LibraryConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct VisualizerConfig {
    /// Number of animated blocks
    pub elements: usize,
    /// Normalization constant: byte magnitude that maps to intensity 1.0
    pub travel: f32,
    /// Intensities shown before anything is played or hovered
    pub initial: Vec<f32>,
    /// Added to the mean intensity to scale the active control
    pub scale_bias: f32,
    /// Optional exponential smoothing of reduced intensities, 0 disables it
    pub smoothing: f32,
    /// Frames per second of the render loop
    pub frame_rate: u32,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnalyserConfig {
    pub fft_size: usize,
    pub smoothing_time_constant: f32,
    pub min_db: f32,
    pub max_db: f32,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct LibraryConfig {
    /// Explicit track list, played in this order
    pub tracks: Vec<PathBuf>,
    /// Directory scanned for audio files when no tracks are listed
    pub music_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            visualizer: VisualizerConfig::default(),
            analyser: AnalyserConfig::default(),
            palette: default_palette(),
            library: LibraryConfig::default(),
        }
    }
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            elements: 7,
            travel: 240.0,
            initial: vec![1.0, 0.6, 0.8, 0.4, 0.0, 0.6, 0.2],
            scale_bias: 0.75,
            smoothing: 0.0,
            frame_rate: 60,
        }
    }
}

impl Default for AnalyserConfig {
    fn default() -> Self {
        Self {
            fft_size: 2048,
            smoothing_time_constant: 0.8,
            min_db: -100.0,
            max_db: -30.0,
        }
    }
}

fn default_palette() -> Vec<Rgb> {
    [
        Rgb(0xff, 0x5f, 0x5b),
        Rgb(0xff, 0xb6, 0x6e),
        Rgb(0xff, 0xd9, 0x6d),
        Rgb(0xe8, 0xf8, 0x98),
        Rgb(0x8c, 0xf6, 0xf3),
        Rgb(0x92, 0xae, 0xf0),
        Rgb(0xb8, 0x97, 0xe4),
    ]
    .to_vec()
}

impl Config {
    /// Check value ranges that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        let v = &self.visualizer;
        ensure!(v.elements > 0, "visualizer.elements must be at least 1");
        ensure!(
            v.initial.len() == v.elements,
            "visualizer.initial has {} values but there are {} elements",
            v.initial.len(),
            v.elements
        );
        ensure!(v.travel > 0.0, "visualizer.travel must be positive");
        ensure!(
            (0.0..1.0).contains(&v.smoothing),
            "visualizer.smoothing must be in [0, 1)"
        );
        ensure!(v.frame_rate > 0, "visualizer.frame_rate must be positive");

        let a = &self.analyser;
        ensure!(
            a.fft_size.is_power_of_two() && (32..=32768).contains(&a.fft_size),
            "analyser.fft_size must be a power of two between 32 and 32768, got {}",
            a.fft_size
        );
        ensure!(
            (0.0..=1.0).contains(&a.smoothing_time_constant),
            "analyser.smoothing_time_constant must be in [0, 1]"
        );
        ensure!(
            a.min_db < a.max_db,
            "analyser.min_db ({}) must be below max_db ({})",
            a.min_db,
            a.max_db
        );

        ensure!(!self.palette.is_empty(), "palette must not be empty");
        Ok(())
    }
}

/// Parse and validate a config file.
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("Invalid config {}", path.display()))?;
    Ok(config)
}

/// Explicit path first, then `./bandstand.toml`, then the platform config dir.
pub fn find_config(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    let local = PathBuf::from(LOCAL_CONFIG);
    if local.exists() {
        return Some(local);
    }
    dirs::config_dir()
        .map(|dir| dir.join("bandstand").join("config.toml"))
        .filter(|path| path.exists())
}

/// A `#rrggbb` color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct Rgb(pub u8, pub u8, pub u8);

impl FromStr for Rgb {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let hex = s
            .strip_prefix('#')
            .filter(|h| h.len() == 6 && h.is_ascii())
            .ok_or_else(|| format!("expected #rrggbb, got {s:?}"))?;
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|e| format!("bad color {s:?}: {e}"))
        };
        Ok(Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl TryFrom<String> for Rgb {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}
