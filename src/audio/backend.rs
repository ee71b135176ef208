// src/audio/backend.rs
//! Rodio playback with a per-track analysis graph.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::Duration;

use rodio::{Decoder, Sink, Source};

use super::analyser::Analyser;
use super::context::AudioContext;
use super::metadata::probe_track;
use super::sample_capture::{read_recent, shared_samples, SampleCapture, SharedSamples};
use super::source::{FrequencySnapshot, MediaHandle, SpectrumSource, Transport};
use crate::config::AnalyserConfig;
use crate::error::MediaError;

type BoxedSource = Box<dyn Source<Item = f32> + Send>;

/// What the loader thread hands back once a track is decodable.
struct Loaded {
    source: BoxedSource,
    duration: Option<Duration>,
}

/// One opened track: loader, output sink and analysis state.
struct Channel {
    path: PathBuf,
    /// Present until the loader reports
    loader: Option<Receiver<Result<Loaded, MediaError>>>,
    /// Present once ready
    sink: Option<Sink>,
    capture: SharedSamples,
    analyser: Analyser,
    duration: Option<Duration>,
}

/// Plays tracks through the shared [`AudioContext`].
pub struct RodioBackend {
    /// Absent only for backends built without an output device
    output: Option<AudioContext>,
    analyser_config: AnalyserConfig,
    channels: HashMap<MediaHandle, Channel>,
    next_handle: u64,
}

impl RodioBackend {
    pub fn new(context: AudioContext, analyser_config: AnalyserConfig) -> Self {
        Self::with_output(Some(context), analyser_config)
    }

    fn with_output(output: Option<AudioContext>, analyser_config: AnalyserConfig) -> Self {
        Self {
            output,
            analyser_config,
            channels: HashMap::new(),
            next_handle: 1,
        }
    }

    fn finish_loading(&mut self, handle: MediaHandle) -> Result<bool, MediaError> {
        let channel = self
            .channels
            .get_mut(&handle)
            .ok_or(MediaError::UnknownHandle(handle))?;
        if channel.sink.is_some() {
            return Ok(true);
        }
        let Some(loader) = &channel.loader else {
            return Err(MediaError::LoaderGone(channel.path.clone()));
        };

        let loaded = match loader.try_recv() {
            Ok(result) => result?,
            Err(TryRecvError::Empty) => return Ok(false),
            Err(TryRecvError::Disconnected) => {
                return Err(MediaError::LoaderGone(channel.path.clone()));
            }
        };
        channel.loader = None;

        let Some(output) = &self.output else {
            return Err(MediaError::Output("no output device".into()));
        };
        let sink = Sink::try_new(output.handle())
            .map_err(|e| MediaError::Output(e.to_string()))?;
        // Queued paused; the controller starts it
        sink.pause();
        sink.append(loaded.source);
        channel.sink = Some(sink);
        channel.duration = loaded.duration;
        log::debug!("{} ready, duration {:?}", channel.path.display(), channel.duration);
        Ok(true)
    }
}

impl SpectrumSource for RodioBackend {
    fn open(&mut self, track: &Path) -> Result<MediaHandle, MediaError> {
        let file = File::open(track).map_err(|source| MediaError::Open {
            path: track.to_path_buf(),
            source,
        })?;

        let handle = MediaHandle(self.next_handle);
        self.next_handle += 1;

        // Analysis graph for this handle: capture buffer feeding one analyser
        let capture = shared_samples(self.analyser_config.fft_size * 4);
        let analyser = Analyser::new(&self.analyser_config);

        let (tx, rx) = mpsc::channel();
        let path = track.to_path_buf();
        let loader_capture = capture.clone();
        thread::spawn(move || {
            let _ = tx.send(load(&path, file, loader_capture));
        });

        self.channels.insert(
            handle,
            Channel {
                path: track.to_path_buf(),
                loader: Some(rx),
                sink: None,
                capture,
                analyser,
                duration: None,
            },
        );
        log::info!("opened {} as {:?}", track.display(), handle);
        Ok(handle)
    }

    fn current_snapshot(&mut self, handle: MediaHandle) -> FrequencySnapshot {
        let Some(channel) = self.channels.get_mut(&handle) else {
            return FrequencySnapshot::silent(self.analyser_config.fft_size / 2);
        };
        if channel.sink.is_none() {
            return FrequencySnapshot::silent(channel.analyser.bin_count());
        }
        let samples = read_recent(&channel.capture);
        channel.analyser.snapshot(&samples)
    }

    fn close(&mut self, handle: MediaHandle) {
        if let Some(channel) = self.channels.remove(&handle) {
            if let Some(sink) = channel.sink {
                sink.stop();
            }
            log::info!("closed {:?} ({})", handle, channel.path.display());
        }
    }
}

impl Transport for RodioBackend {
    fn poll_ready(&mut self, handle: MediaHandle) -> Result<bool, MediaError> {
        self.finish_loading(handle)
    }

    fn play(&mut self, handle: MediaHandle) {
        if let Some(sink) = self.channels.get(&handle).and_then(|c| c.sink.as_ref()) {
            sink.play();
        }
    }

    fn pause(&mut self, handle: MediaHandle) {
        if let Some(sink) = self.channels.get(&handle).and_then(|c| c.sink.as_ref()) {
            sink.pause();
        }
    }

    fn position(&self, handle: MediaHandle) -> Duration {
        self.channels
            .get(&handle)
            .and_then(|c| c.sink.as_ref())
            .map(|s| s.get_pos())
            .unwrap_or_default()
    }

    fn duration(&self, handle: MediaHandle) -> Option<Duration> {
        self.channels.get(&handle).and_then(|c| c.duration)
    }

    fn is_finished(&self, handle: MediaHandle) -> bool {
        self.channels
            .get(&handle)
            .and_then(|c| c.sink.as_ref())
            .is_some_and(|s| s.empty())
    }
}

impl Drop for RodioBackend {
    fn drop(&mut self) {
        let handles: Vec<MediaHandle> = self.channels.keys().copied().collect();
        for handle in handles {
            self.close(handle);
        }
    }
}

/// Decode headers and probe metadata. Runs on the loader thread.
fn load(path: &Path, file: File, capture: SharedSamples) -> Result<Loaded, MediaError> {
    let decoder = Decoder::new(BufReader::new(file)).map_err(|e| MediaError::Decode {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let duration = match probe_track(path) {
        Ok(info) => {
            log::info!(
                "{}: title {:?}, artist {:?}",
                path.display(),
                info.title,
                info.artist
            );
            info.duration
        }
        Err(e) => {
            log::debug!("no metadata for {}: {e}", path.display());
            None
        }
    }
    .or_else(|| decoder.total_duration());

    let source = SampleCapture::new(decoder.convert_samples::<f32>(), capture);
    Ok(Loaded {
        source: Box::new(source),
        duration,
    })
}
