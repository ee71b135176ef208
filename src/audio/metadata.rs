// src/audio/metadata.rs
//! Track metadata extraction using Lofty.

use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use lofty::file::{AudioFile, TaggedFileExt};
use lofty::probe::Probe;
use lofty::tag::Accessor;

/// What the loader learns about a track besides its samples.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackInfo {
    pub title: Option<String>,
    pub artist: Option<String>,
    /// `None` when the container does not state a length.
    pub duration: Option<Duration>,
}

/// Read tags and properties of `path`.
/// Blocking; the loader thread calls this, never the UI thread.
pub fn probe_track(path: &Path) -> Result<TrackInfo> {
    let tagged_file = Probe::open(path)?.read()?;

    let duration = Some(tagged_file.properties().duration()).filter(|d| !d.is_zero());
    let tag = tagged_file.primary_tag();

    Ok(TrackInfo {
        title: tag.and_then(|t| t.title()).map(|s| s.into_owned()),
        artist: tag.and_then(|t| t.artist()).map(|s| s.into_owned()),
        duration,
    })
}
