// src/fs/mod.rs
//! Filesystem module - builds the track catalog.

pub mod catalog;
pub mod detection;

// Re-export commonly used types
pub use catalog::{collect_tracks, scan_dir, Track};
pub use detection::{detect_file_type, is_audio, FileCategory};
