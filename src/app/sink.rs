// src/app/sink.rs
//! Receiver of everything the animation pushes, and the model the UI draws.

use crate::config::Rgb;

/// Text of the play/pause control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayLabel {
    /// Shown while nothing plays or playback is paused
    #[default]
    Play,
    /// Shown while playing
    Pause,
}

impl PlayLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            PlayLabel::Play => "Play",
            PlayLabel::Pause => "Pause",
        }
    }
}

/// Accepts per-frame visual updates.
///
/// Offsets are in travel units: 0 is fully raised, `travel` fully lowered.
/// Implementations must tolerate offsets outside that range.
pub trait VisualSink {
    fn set_offset(&mut self, element: usize, offset: f32);
    fn set_scale(&mut self, scale: f32);
    fn set_progress(&mut self, ratio: f32);
    fn set_label(&mut self, label: PlayLabel);
    /// Highlight one control with `color`; every other control is reset.
    fn set_highlight(&mut self, control: Option<usize>, color: Rgb);
}

/// Retained visual state, drawn by the widgets every redraw.
#[derive(Debug, Clone, PartialEq)]
pub struct Stage {
    travel: f32,
    offsets: Vec<f32>,
    pub scale: f32,
    pub progress: f32,
    pub label: PlayLabel,
    pub highlight: Option<(usize, Rgb)>,
}

impl Stage {
    pub fn new(elements: usize, travel: f32) -> Self {
        Self {
            travel,
            offsets: vec![travel; elements],
            scale: 1.0,
            progress: 0.0,
            label: PlayLabel::Play,
            highlight: None,
        }
    }

    pub fn offsets(&self) -> &[f32] {
        &self.offsets
    }

    /// Raised fraction of each element, clamped to [0, 1].
    pub fn levels(&self) -> impl Iterator<Item = f32> + '_ {
        self.offsets
            .iter()
            .map(|o| (1.0 - o / self.travel).clamp(0.0, 1.0))
    }
}

impl VisualSink for Stage {
    fn set_offset(&mut self, element: usize, offset: f32) {
        if let Some(slot) = self.offsets.get_mut(element) {
            *slot = offset;
        }
    }

    fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
    }

    fn set_progress(&mut self, ratio: f32) {
        self.progress = ratio.clamp(0.0, 1.0);
    }

    fn set_label(&mut self, label: PlayLabel) {
        self.label = label;
    }

    fn set_highlight(&mut self, control: Option<usize>, color: Rgb) {
        self.highlight = control.map(|c| (c, color));
    }
}
