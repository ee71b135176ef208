// src/audio/analyser.rs
//! FFT analysis producing byte frequency data.

use std::sync::Arc;

use rustfft::{num_complex::Complex, Fft, FftPlanner};

use super::source::FrequencySnapshot;
use crate::config::AnalyserConfig;

/// Turns the most recent time-domain samples into one byte per frequency bin.
///
/// Magnitudes are Blackman-windowed, smoothed over time with
/// `smoothing_time_constant`, converted to dB and mapped linearly from
/// `[min_db, max_db]` onto `0..=255`.
pub struct Analyser {
    fft: Arc<dyn Fft<f32>>,
    fft_size: usize,
    window: Vec<f32>,
    scratch: Vec<Complex<f32>>,
    /// Time-smoothed linear magnitudes from the previous call
    smoothed: Vec<f32>,
    smoothing: f32,
    min_db: f32,
    max_db: f32,
}

impl Analyser {
    pub fn new(config: &AnalyserConfig) -> Self {
        let fft_size = config.fft_size;
        let fft = FftPlanner::<f32>::new().plan_fft_forward(fft_size);
        Self {
            fft,
            fft_size,
            window: blackman_window(fft_size),
            scratch: vec![Complex::new(0.0, 0.0); fft_size],
            smoothed: vec![0.0; fft_size / 2],
            smoothing: config.smoothing_time_constant,
            min_db: config.min_db,
            max_db: config.max_db,
        }
    }

    pub fn bin_count(&self) -> usize {
        self.fft_size / 2
    }

    /// Compute a snapshot from the newest samples, oldest first.
    ///
    /// Fewer than `fft_size` samples are treated as preceded by silence;
    /// more are truncated to the newest `fft_size`. No samples at all yields a
    /// silent snapshot and leaves the smoothing history untouched.
    pub fn snapshot(&mut self, samples: &[f32]) -> FrequencySnapshot {
        if samples.is_empty() {
            return FrequencySnapshot::silent(self.bin_count());
        }

        let recent = &samples[samples.len().saturating_sub(self.fft_size)..];
        let pad = self.fft_size - recent.len();
        for (i, slot) in self.scratch.iter_mut().enumerate() {
            let sample = if i < pad { 0.0 } else { recent[i - pad] };
            *slot = Complex::new(sample * self.window[i], 0.0);
        }

        self.fft.process(&mut self.scratch);

        let scale = 1.0 / self.fft_size as f32;
        let smoothing = self.smoothing;
        let min_db = self.min_db;
        let db_range = self.max_db - self.min_db;
        let bins = self
            .smoothed
            .iter_mut()
            .zip(self.scratch.iter())
            .map(|(prev, c)| {
                let magnitude = c.norm() * scale;
                *prev = smoothing * *prev + (1.0 - smoothing) * magnitude;
                // log10(0) is -inf, which clamps to 0 below
                let db = 20.0 * prev.log10();
                let scaled = (255.0 / db_range * (db - min_db)).floor();
                scaled.clamp(0.0, 255.0) as u8
            })
            .collect::<Vec<u8>>();

        FrequencySnapshot::from(bins)
    }
}

fn blackman_window(size: usize) -> Vec<f32> {
    use std::f32::consts::PI;
    let n = size as f32;
    (0..size)
        .map(|i| {
            let x = i as f32 / n;
            0.42 - 0.5 * (2.0 * PI * x).cos() + 0.08 * (4.0 * PI * x).cos()
        })
        .collect()
}
