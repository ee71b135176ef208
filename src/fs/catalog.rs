// src/fs/catalog.rs
//! The list of playable tracks.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::detection::is_audio;

/// One playable file.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub path: PathBuf,
    /// File stem, used as the display name
    pub title: String,
}

impl Track {
    pub fn from_path(path: PathBuf) -> Self {
        let title = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self { path, title }
    }
}

/// Audio files directly inside `dir`, sorted case-insensitively.
pub fn scan_dir(dir: &Path) -> Result<Vec<Track>> {
    let mut tracks = fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory {}", dir.display()))?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file() && is_audio(p))
        .map(Track::from_path)
        .collect::<Vec<_>>();
    tracks.sort_by_key(|t| t.title.to_lowercase());
    Ok(tracks)
}

/// Files are taken as given, directories are scanned in place.
pub fn collect_tracks(paths: &[PathBuf]) -> Result<Vec<Track>> {
    let mut tracks = Vec::new();
    for path in paths {
        if path.is_dir() {
            tracks.extend(scan_dir(path)?);
        } else {
            tracks.push(Track::from_path(path.clone()));
        }
    }
    Ok(tracks)
}
