// src/app/machine.rs
//! Which data source drives the blocks.

/// Visualization state. `Idle` and `Previewing` have no playback session,
/// `Playing` and `Paused` always have one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisualizationState {
    /// No session and the pointer is not over the panel
    #[default]
    Idle,
    /// No session, the pointer hovers the panel
    Previewing,
    /// Session running, frame loop scheduled
    Playing,
    /// Session loaded, frame loop halted, last frame frozen
    Paused,
}

/// Everything that may move the state machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VisualEvent {
    /// A new track was chosen; any previous session is gone
    TrackSelected,
    /// The backend reported the selected track ready
    SessionReady,
    /// The session ended without a replacement (stop, end of track, failure)
    SessionClosed,
    Toggle,
    PointerMove { x: f32 },
    PointerLeave,
}

impl VisualizationState {
    pub fn has_session(self) -> bool {
        matches!(self, Self::Playing | Self::Paused)
    }

    /// Pointer data only drives the blocks without a session.
    pub fn accepts_pointer(self) -> bool {
        matches!(self, Self::Idle | Self::Previewing)
    }

    pub fn next(self, event: VisualEvent) -> Self {
        use VisualEvent::*;
        use VisualizationState::*;

        match (self, event) {
            (Idle | Previewing, PointerMove { .. }) => Previewing,
            (Previewing, PointerLeave) => Idle,

            // The old session is torn down before the new one loads
            (Playing | Paused, TrackSelected | SessionClosed) => Idle,
            (Idle | Previewing, SessionReady) => Playing,

            (Playing, Toggle) => Paused,
            (Paused, Toggle) => Playing,

            (state, _) => state,
        }
    }
}
