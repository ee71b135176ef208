// src/audio/source.rs
//! The seam between the visualizer and whatever actually decodes and plays audio.

use std::path::Path;
use std::time::Duration;

use crate::error::MediaError;

/// Opaque handle to one opened track inside a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MediaHandle(pub(crate) u64);

/// Byte magnitudes per frequency bin at one instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencySnapshot(Vec<u8>);

impl FrequencySnapshot {
    /// An all-zero snapshot with `bins` entries.
    pub fn silent(bins: usize) -> Self {
        Self(vec![0; bins])
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_silent(&self) -> bool {
        self.0.iter().all(|&b| b == 0)
    }
}

impl From<Vec<u8>> for FrequencySnapshot {
    fn from(bins: Vec<u8>) -> Self {
        Self(bins)
    }
}

/// Produces frequency snapshots for opened tracks.
///
/// `open` builds the whole analysis graph for the handle; nothing else may
/// rebuild it while the handle is open. `close` is idempotent.
pub trait SpectrumSource {
    fn open(&mut self, track: &Path) -> Result<MediaHandle, MediaError>;

    /// Current spectrum. All zeros until playback has produced samples.
    fn current_snapshot(&mut self, handle: MediaHandle) -> FrequencySnapshot;

    fn close(&mut self, handle: MediaHandle);
}

/// Playback lifecycle on top of a spectrum source.
pub trait Transport: SpectrumSource {
    /// `Ok(true)` once the track can start, `Ok(false)` while still loading.
    fn poll_ready(&mut self, handle: MediaHandle) -> Result<bool, MediaError>;

    fn play(&mut self, handle: MediaHandle);

    fn pause(&mut self, handle: MediaHandle);

    /// Elapsed playback time.
    fn position(&self, handle: MediaHandle) -> Duration;

    /// Total length, when the backend knows it.
    fn duration(&self, handle: MediaHandle) -> Option<Duration>;

    /// True once a started track has played to its end.
    fn is_finished(&self, handle: MediaHandle) -> bool;
}
