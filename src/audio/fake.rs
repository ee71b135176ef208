// src/audio/fake.rs
//! In-memory backend that records every call, for tests.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::source::{FrequencySnapshot, MediaHandle, SpectrumSource, Transport};
use crate::error::MediaError;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Open(PathBuf),
    Close(MediaHandle),
    Play(MediaHandle),
    Pause(MediaHandle),
    Snapshot(MediaHandle),
}

/// How a path behaves when opened.
#[derive(Debug, Clone, Default)]
pub enum Script {
    /// Ready on the first poll
    #[default]
    Ready,
    /// Ready after this many pending polls
    ReadyAfter(usize),
    /// `open` itself fails
    Missing,
    /// Opens, then the loader reports a decode failure
    Undecodable,
    /// Never becomes ready
    Never,
}

#[derive(Default)]
pub struct FakeBackend {
    pub calls: Vec<Call>,
    pub scripts: HashMap<PathBuf, Script>,
    pub snapshot: Vec<u8>,
    pub position: Duration,
    pub duration: Option<Duration>,
    pub finished: bool,
    open: HashSet<MediaHandle>,
    pending_polls: HashMap<MediaHandle, usize>,
    paths: HashMap<MediaHandle, PathBuf>,
    next: u64,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self {
            snapshot: vec![0; 1024],
            duration: Some(Duration::from_secs(180)),
            ..Self::default()
        }
    }

    pub fn script(mut self, path: &str, script: Script) -> Self {
        self.scripts.insert(PathBuf::from(path), script);
        self
    }

    pub fn is_open(&self, handle: MediaHandle) -> bool {
        self.open.contains(&handle)
    }

    pub fn open_count(&self) -> usize {
        self.open.len()
    }

    pub fn snapshot_reads(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, Call::Snapshot(_)))
            .count()
    }

    fn script_for(&self, handle: MediaHandle) -> Script {
        self.paths
            .get(&handle)
            .and_then(|p| self.scripts.get(p))
            .cloned()
            .unwrap_or_default()
    }
}

impl SpectrumSource for FakeBackend {
    fn open(&mut self, track: &Path) -> Result<MediaHandle, MediaError> {
        self.calls.push(Call::Open(track.to_path_buf()));
        if let Some(Script::Missing) = self.scripts.get(track) {
            return Err(MediaError::Open {
                path: track.to_path_buf(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            });
        }
        self.next += 1;
        let handle = MediaHandle(self.next);
        self.open.insert(handle);
        self.paths.insert(handle, track.to_path_buf());
        if let Some(Script::ReadyAfter(n)) = self.scripts.get(track) {
            self.pending_polls.insert(handle, *n);
        }
        Ok(handle)
    }

    fn current_snapshot(&mut self, handle: MediaHandle) -> FrequencySnapshot {
        self.calls.push(Call::Snapshot(handle));
        FrequencySnapshot::from(self.snapshot.clone())
    }

    fn close(&mut self, handle: MediaHandle) {
        if self.open.remove(&handle) {
            self.calls.push(Call::Close(handle));
        }
    }
}

impl Transport for FakeBackend {
    fn poll_ready(&mut self, handle: MediaHandle) -> Result<bool, MediaError> {
        if !self.open.contains(&handle) {
            return Err(MediaError::UnknownHandle(handle));
        }
        match self.script_for(handle) {
            Script::Ready | Script::Missing => Ok(true),
            Script::Never => Ok(false),
            Script::Undecodable => Err(MediaError::Decode {
                path: self.paths[&handle].clone(),
                reason: "not audio".into(),
            }),
            Script::ReadyAfter(_) => {
                let left = self.pending_polls.entry(handle).or_default();
                if *left == 0 {
                    Ok(true)
                } else {
                    *left -= 1;
                    Ok(false)
                }
            }
        }
    }

    fn play(&mut self, handle: MediaHandle) {
        self.calls.push(Call::Play(handle));
    }

    fn pause(&mut self, handle: MediaHandle) {
        self.calls.push(Call::Pause(handle));
    }

    fn position(&self, _handle: MediaHandle) -> Duration {
        self.position
    }

    fn duration(&self, _handle: MediaHandle) -> Option<Duration> {
        self.duration
    }

    fn is_finished(&self, _handle: MediaHandle) -> bool {
        self.finished
    }
}
