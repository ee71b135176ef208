// src/error.rs
//! Errors raised while loading and driving a track.

use std::path::PathBuf;

use thiserror::Error;

use crate::audio::MediaHandle;

/// A track could not be loaded, decoded or routed to the output device.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("cannot open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot decode {path}: {reason}")]
    Decode { path: PathBuf, reason: String },

    #[error("audio output unavailable: {0}")]
    Output(String),

    #[error("an audio context is already active")]
    ContextActive,

    #[error("unknown media handle {0:?}")]
    UnknownHandle(MediaHandle),

    #[error("loader for {0} exited without reporting")]
    LoaderGone(PathBuf),
}
