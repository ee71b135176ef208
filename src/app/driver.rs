// src/app/driver.rs
//! Per-frame animation: spectrum while playing, pointer preview otherwise.

use super::machine::VisualizationState;
use super::sink::VisualSink;
use crate::audio::reducer::{reduce, IntensityVector, Smoother};
use crate::audio::{PlaybackController, Transport};
use crate::config::VisualizerConfig;

/// One visual element and the horizontal center used for hover distances.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementRef {
    pub index: usize,
    pub center_x: f32,
}

/// Explicit schedule for the render loop.
///
/// The host calls [`AnimationDriver::tick`] once per display frame; the tick
/// does nothing unless the loop is running. After `stop` no tick does any
/// work until `start` is called again.
#[derive(Debug, Default)]
pub struct FrameLoop {
    running: bool,
    starts: u64,
}

impl FrameLoop {
    /// Schedule the loop. Returns false if it was already running.
    pub fn start(&mut self) -> bool {
        if self.running {
            return false;
        }
        self.running = true;
        self.starts += 1;
        true
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// How many times the loop has been (re)started.
    pub fn starts(&self) -> u64 {
        self.starts
    }
}

pub struct AnimationDriver {
    frame_loop: FrameLoop,
    elements: Vec<ElementRef>,
    panel_width: f32,
    initial: IntensityVector,
    /// Last vector produced while playing, kept until a new track is chosen
    last_played: Option<IntensityVector>,
    element_count: usize,
    travel: f32,
    scale_bias: f32,
    smoother: Smoother,
}

impl AnimationDriver {
    pub fn new(config: &VisualizerConfig) -> Self {
        Self {
            frame_loop: FrameLoop::default(),
            elements: Vec::new(),
            panel_width: 0.0,
            initial: IntensityVector::new(config.initial.clone()),
            last_played: None,
            element_count: config.elements,
            travel: config.travel,
            scale_bias: config.scale_bias,
            smoother: Smoother::new(config.smoothing),
        }
    }

    pub fn frame_loop(&self) -> &FrameLoop {
        &self.frame_loop
    }

    pub fn start(&mut self) -> bool {
        self.frame_loop.start()
    }

    pub fn stop(&mut self) {
        self.frame_loop.stop();
    }

    /// Record element centers after a layout pass.
    pub fn set_layout(&mut self, centers: &[f32], panel_width: f32) {
        self.elements = centers
            .iter()
            .enumerate()
            .map(|(index, &center_x)| ElementRef { index, center_x })
            .collect();
        self.panel_width = panel_width;
    }

    pub fn elements(&self) -> &[ElementRef] {
        &self.elements
    }

    pub fn last_played(&self) -> Option<&IntensityVector> {
        self.last_played.as_ref()
    }

    /// Forget the frozen frame and smoothing history of the previous track.
    pub fn forget_session(&mut self) {
        self.last_played = None;
        self.smoother.reset();
    }

    /// One frame. Returns whether the next frame stays scheduled.
    ///
    /// Reads the spectrum only in [`VisualizationState::Playing`]; in any
    /// other state the loop stops itself without touching the source.
    pub fn tick<B, S>(
        &mut self,
        state: VisualizationState,
        controller: &mut PlaybackController<B>,
        sink: &mut S,
    ) -> bool
    where
        B: Transport,
        S: VisualSink,
    {
        if !self.frame_loop.is_running() {
            return false;
        }
        if state != VisualizationState::Playing {
            self.frame_loop.stop();
            return false;
        }
        let Some(snapshot) = controller.snapshot() else {
            self.frame_loop.stop();
            return false;
        };

        let intensities = self
            .smoother
            .apply(reduce(&snapshot, self.element_count, self.travel));
        self.push(&intensities, sink);
        sink.set_scale(intensities.mean() + self.scale_bias);
        sink.set_progress(controller.progress().ratio());
        self.last_played = Some(intensities);

        self.frame_loop.is_running()
    }

    /// Hover intensities for a pointer at `x`: `1 - |x - center| / width`.
    /// Elements without a laid-out center keep their resting value.
    pub fn preview(&self, x: f32) -> IntensityVector {
        let width = self.panel_width.max(1.0);
        let mut values = self.resting().as_slice().to_vec();
        for e in &self.elements {
            if let Some(slot) = values.get_mut(e.index) {
                *slot = 1.0 - (x - e.center_x).abs() / width;
            }
        }
        IntensityVector::new(values)
    }

    /// Pattern shown when the pointer leaves: the last played frame where
    /// one exists, the initial pattern otherwise.
    pub fn resting(&self) -> IntensityVector {
        IntensityVector::new(
            (0..self.element_count)
                .map(|i| {
                    self.last_played
                        .as_ref()
                        .and_then(|v| v.get(i))
                        .or_else(|| self.initial.get(i))
                        .unwrap_or(0.0)
                })
                .collect(),
        )
    }

    /// Returns whether the sink was updated.
    pub fn pointer_move<S: VisualSink>(
        &mut self,
        state: VisualizationState,
        x: f32,
        sink: &mut S,
    ) -> bool {
        if !state.accepts_pointer() {
            return false;
        }
        self.push(&self.preview(x), sink);
        true
    }

    /// Returns whether the sink was updated.
    pub fn pointer_leave<S: VisualSink>(&mut self, state: VisualizationState, sink: &mut S) -> bool {
        if !state.accepts_pointer() {
            return false;
        }
        self.push(&self.resting(), sink);
        true
    }

    /// Push the resting pattern regardless of state, e.g. at startup.
    pub fn rest<S: VisualSink>(&self, sink: &mut S) {
        self.push(&self.resting(), sink);
    }

    fn push<S: VisualSink>(&self, intensities: &IntensityVector, sink: &mut S) {
        for (i, ratio) in intensities.as_slice().iter().enumerate() {
            sink.set_offset(i, self.travel * (1.0 - ratio));
        }
    }
}
