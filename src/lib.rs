// src/lib.rs
//! Bandstand - a terminal music player with a block visualizer.
//!
//! Tracks play through rodio; each frame the live spectrum is reduced to a
//! handful of intensities that raise and lower the blocks on screen.

pub mod app;
pub mod audio;
pub mod cli;
pub mod config;
pub mod error;
pub mod fs;
pub mod ui;
