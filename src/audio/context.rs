// src/audio/context.rs
//! The process-wide audio output.

use std::sync::atomic::{AtomicBool, Ordering};

use rodio::{OutputStream, OutputStreamHandle};

use crate::error::MediaError;

static ACTIVE: AtomicBool = AtomicBool::new(false);

/// Owns the output device for the lifetime of the program.
///
/// At most one exists at a time: create it once at startup, hand it to the
/// backend, and drop it at shutdown to release the device.
pub struct AudioContext {
    // Dropping the stream silences every sink created from the handle.
    _stream: OutputStream,
    handle: OutputStreamHandle,
}

impl AudioContext {
    pub fn init() -> Result<Self, MediaError> {
        if ACTIVE.swap(true, Ordering::SeqCst) {
            return Err(MediaError::ContextActive);
        }
        match OutputStream::try_default() {
            Ok((stream, handle)) => {
                log::info!("audio output opened");
                Ok(Self {
                    _stream: stream,
                    handle,
                })
            }
            Err(e) => {
                ACTIVE.store(false, Ordering::SeqCst);
                Err(MediaError::Output(e.to_string()))
            }
        }
    }

    pub fn handle(&self) -> &OutputStreamHandle {
        &self.handle
    }
}

impl Drop for AudioContext {
    fn drop(&mut self) {
        log::info!("audio output closed");
        ACTIVE.store(false, Ordering::SeqCst);
    }
}
