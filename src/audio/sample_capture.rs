// src/audio/sample_capture.rs
//! A pass-through source that records what is being played for analysis.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use ringbuf::{traits::*, HeapRb};
use rodio::Source;

/// Mono samples most recently handed to the output, oldest first.
pub type SharedSamples = Arc<Mutex<HeapRb<f32>>>;

/// Create an empty capture buffer holding `capacity` mono samples.
pub fn shared_samples(capacity: usize) -> SharedSamples {
    Arc::new(Mutex::new(HeapRb::new(capacity)))
}

/// Copy the buffered samples without consuming them.
pub fn read_recent(buffer: &SharedSamples) -> Vec<f32> {
    match buffer.lock() {
        Ok(buf) => buf.iter().copied().collect(),
        Err(_) => Vec::new(),
    }
}

/// Wraps a source, downmixes each frame to mono and pushes it into a
/// circular buffer while passing the original samples through.
pub struct SampleCapture<S> {
    source: S,
    buffer: SharedSamples,
    frame_sum: f32,
    frame_fill: u16,
}

impl<S> SampleCapture<S> {
    pub fn new(source: S, buffer: SharedSamples) -> Self {
        Self {
            source,
            buffer,
            frame_sum: 0.0,
            frame_fill: 0,
        }
    }
}

impl<S> SampleCapture<S>
where
    S: Source<Item = f32>,
{
    fn record(&mut self, sample: f32) {
        let channels = self.source.channels().max(1);
        self.frame_sum += sample;
        self.frame_fill += 1;
        if self.frame_fill < channels {
            return;
        }

        let mono = self.frame_sum / channels as f32;
        self.frame_sum = 0.0;
        self.frame_fill = 0;

        if let Ok(mut buf) = self.buffer.lock() {
            // Overwrite the oldest sample when full
            if buf.is_full() {
                let _ = buf.try_pop();
            }
            let _ = buf.try_push(mono);
        }
    }
}

impl<S> Iterator for SampleCapture<S>
where
    S: Source<Item = f32>,
{
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        let sample = self.source.next()?;
        self.record(sample);
        Some(sample)
    }
}

impl<S> Source for SampleCapture<S>
where
    S: Source<Item = f32>,
{
    fn current_frame_len(&self) -> Option<usize> {
        self.source.current_frame_len()
    }

    fn channels(&self) -> u16 {
        self.source.channels()
    }

    fn sample_rate(&self) -> u32 {
        self.source.sample_rate()
    }

    fn total_duration(&self) -> Option<Duration> {
        self.source.total_duration()
    }
}
