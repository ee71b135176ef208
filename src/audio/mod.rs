// src/audio/mod.rs
//! Audio module - playback sessions, spectrum analysis and reduction.

mod analyser;
mod backend;
mod context;
pub mod controller;
#[cfg(test)]
pub mod fake;
pub mod metadata;
pub mod reducer;
mod sample_capture;
mod source;

// Re-export commonly used types
pub use analyser::Analyser;
pub use backend::RodioBackend;
pub use context::AudioContext;
pub use controller::{PlaybackController, PlaybackStatus, Progress};
pub use reducer::{IntensityVector, Smoother, reduce};
pub use source::{FrequencySnapshot, MediaHandle, SpectrumSource, Transport};
