// src/fs/detection.rs
//! File type detection using magic numbers and extension-based fallback.

use std::path::Path;

use anyhow::Result;
use infer::{Infer, MatcherType};
use mime_guess::MimeGuess;

/// High-level file categories.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum FileCategory {
    Audio,
    Other,
}

/// Detect the category of a given file path.
pub fn detect_file_type(path: &Path) -> Result<FileCategory> {
    // 1. Try magic-number sniffing
    if let Some(kind) = Infer::new().get_from_path(path)? {
        return Ok(match kind.matcher_type() {
            MatcherType::Audio => FileCategory::Audio,
            _ => FileCategory::Other,
        });
    }

    // 2. Fallback to extension-based lookup
    let mime = MimeGuess::from_path(path).first_or_octet_stream();
    if mime.type_() == mime_guess::mime::AUDIO {
        Ok(FileCategory::Audio)
    } else {
        Ok(FileCategory::Other)
    }
}

/// True for files that sniff or are named like audio.
pub fn is_audio(path: &Path) -> bool {
    match detect_file_type(path) {
        Ok(category) => category == FileCategory::Audio,
        Err(e) => {
            log::debug!("cannot sniff {}: {e}", path.display());
            false
        }
    }
}
