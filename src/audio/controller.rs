// src/audio/controller.rs
//! Owns the single playback session and its lifecycle.

use std::path::{Path, PathBuf};
use std::time::Duration;

use super::source::{FrequencySnapshot, MediaHandle, Transport};
use crate::error::MediaError;

/// Where the current session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackStatus {
    /// Opened, waiting for the backend to report ready
    Loading,
    Playing,
    Paused,
}

/// One loaded track.
#[derive(Debug)]
struct PlaybackSession {
    handle: MediaHandle,
    track: PathBuf,
    status: PlaybackStatus,
}

/// Elapsed and total playback time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Progress {
    pub elapsed: Duration,
    pub total: Duration,
}

impl Progress {
    /// Fraction played in [0, 1]; 0 when the total is unknown.
    pub fn ratio(&self) -> f32 {
        if self.total.is_zero() {
            return 0.0;
        }
        (self.elapsed.as_secs_f32() / self.total.as_secs_f32()).clamp(0.0, 1.0)
    }
}

/// Loads, starts, pauses and tears down tracks on a [`Transport`].
///
/// At most one session exists. Selecting a new track closes the previous
/// session before the next one is opened.
pub struct PlaybackController<B: Transport> {
    backend: B,
    session: Option<PlaybackSession>,
}

impl<B: Transport> PlaybackController<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            session: None,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Tear down any current session and open `track`.
    ///
    /// The new session starts in [`PlaybackStatus::Loading`]; it only plays
    /// once [`poll_ready`](Self::poll_ready) reports it ready. On error no
    /// session is left behind.
    pub fn select(&mut self, track: &Path) -> Result<(), MediaError> {
        self.teardown();
        let handle = self.backend.open(track)?;
        self.session = Some(PlaybackSession {
            handle,
            track: track.to_path_buf(),
            status: PlaybackStatus::Loading,
        });
        Ok(())
    }

    /// Deliver the backend's ready notification for a loading session.
    ///
    /// Returns `None` while nothing changed, `Some(Ok(()))` when playback just
    /// started and `Some(Err(_))` when loading failed; the failed session is
    /// already torn down.
    pub fn poll_ready(&mut self) -> Option<Result<(), MediaError>> {
        let session = self.session.as_mut()?;
        if session.status != PlaybackStatus::Loading {
            return None;
        }
        match self.backend.poll_ready(session.handle) {
            Ok(false) => None,
            Ok(true) => {
                self.backend.play(session.handle);
                session.status = PlaybackStatus::Playing;
                log::info!("playing {}", session.track.display());
                Some(Ok(()))
            }
            Err(e) => {
                log::warn!("loading {} failed: {e}", session.track.display());
                self.teardown();
                Some(Err(e))
            }
        }
    }

    /// Pause a playing session or resume a paused one.
    ///
    /// Returns the new status, `None` when there is nothing to toggle.
    pub fn toggle(&mut self) -> Option<PlaybackStatus> {
        let session = self.session.as_mut()?;
        session.status = match session.status {
            PlaybackStatus::Loading => return None,
            PlaybackStatus::Playing => {
                self.backend.pause(session.handle);
                PlaybackStatus::Paused
            }
            PlaybackStatus::Paused => {
                self.backend.play(session.handle);
                PlaybackStatus::Playing
            }
        };
        Some(session.status)
    }

    /// Stop and release the current session. Returns whether one existed.
    pub fn stop(&mut self) -> bool {
        self.teardown()
    }

    /// Elapsed and total time; zeros while the total is unknown.
    pub fn progress(&self) -> Progress {
        let Some(session) = &self.session else {
            return Progress::default();
        };
        match self.backend.duration(session.handle) {
            Some(total) if !total.is_zero() => Progress {
                elapsed: self.backend.position(session.handle).min(total),
                total,
            },
            _ => Progress::default(),
        }
    }

    /// Current spectrum of a session that has started.
    pub fn snapshot(&mut self) -> Option<FrequencySnapshot> {
        let session = self.session.as_ref()?;
        if session.status == PlaybackStatus::Loading {
            return None;
        }
        Some(self.backend.current_snapshot(session.handle))
    }

    /// True once a playing track has run out.
    pub fn poll_finished(&self) -> bool {
        self.session.as_ref().is_some_and(|s| {
            s.status == PlaybackStatus::Playing && self.backend.is_finished(s.handle)
        })
    }

    pub fn status(&self) -> Option<PlaybackStatus> {
        self.session.as_ref().map(|s| s.status)
    }

    pub fn current_track(&self) -> Option<&Path> {
        self.session.as_ref().map(|s| s.track.as_path())
    }

    fn teardown(&mut self) -> bool {
        let Some(session) = self.session.take() else {
            return false;
        };
        self.backend.pause(session.handle);
        self.backend.close(session.handle);
        true
    }
}
