// src/app/state.rs
//! Application state management.

use crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use rand::seq::SliceRandom;
use ratatui::{layout::Rect, widgets::ListState, Frame};

use super::driver::AnimationDriver;
use super::machine::{VisualEvent, VisualizationState};
use super::sink::{PlayLabel, Stage, VisualSink};
use crate::{
    audio::{PlaybackController, PlaybackStatus, Transport},
    config::{Config, Rgb},
    fs::Track,
    ui::{
        keybindings::{key_to_action, NavigationAction},
        layout::{compute_layout, control_buttons, element_centers},
        widgets::{render_blocks, render_controls, render_player_panel, render_track_list},
    },
};

const IDLE_COLOR: Rgb = Rgb(0xff, 0xff, 0xff);
/// Button scale while no track plays.
const IDLE_SCALE: f32 = 1.0;

/// Main application state.
pub struct App<B: Transport> {
    /// Playable tracks, in display order
    pub tracks: Vec<Track>,
    /// List widget state
    pub list_state: ListState,
    /// Cursor position in the track list
    pub selected: usize,

    controller: PlaybackController<B>,
    driver: AnimationDriver,
    state: VisualizationState,
    /// What the widgets draw
    pub stage: Stage,
    palette: Vec<Rgb>,
    /// Track whose control is highlighted and whose session is loaded
    active: Option<usize>,
    /// Last load error shown under the progress bar
    pub status: Option<String>,

    /// Block panel area from the last layout pass
    panel: Option<Rect>,
    /// Track buttons from the last layout pass
    buttons: Vec<Rect>,
    /// Whether the pointer was inside the panel on the last mouse event
    hovering: bool,
}

impl<B: Transport> App<B> {
    pub fn new(backend: B, tracks: Vec<Track>, config: &Config) -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));

        let driver = AnimationDriver::new(&config.visualizer);
        let mut stage = Stage::new(config.visualizer.elements, config.visualizer.travel);
        driver.rest(&mut stage);

        Self {
            tracks,
            list_state,
            selected: 0,
            controller: PlaybackController::new(backend),
            driver,
            state: VisualizationState::Idle,
            stage,
            palette: config.palette.clone(),
            active: None,
            status: None,
            panel: None,
            buttons: Vec::new(),
            hovering: false,
        }
    }

    pub fn state(&self) -> VisualizationState {
        self.state
    }

    pub fn controller(&self) -> &PlaybackController<B> {
        &self.controller
    }

    pub fn driver(&self) -> &AnimationDriver {
        &self.driver
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    /// Handle a key event and return true if the app should quit.
    pub fn on_key(&mut self, key: KeyEvent) -> bool {
        match key_to_action(&key) {
            NavigationAction::Down => {
                if self.selected + 1 < self.tracks.len() {
                    self.selected += 1;
                }
            }
            NavigationAction::Up => {
                self.selected = self.selected.saturating_sub(1);
            }
            NavigationAction::Enter => self.activate(self.selected),
            NavigationAction::Activate(index) => self.activate(index),
            NavigationAction::TogglePause => self.toggle(),
            NavigationAction::Stop => self.stop(),
            NavigationAction::Quit => {
                self.stop();
                return true;
            }
            NavigationAction::None => {}
        }
        self.list_state.select(Some(self.selected));
        false
    }

    /// Translate terminal mouse events into pointer and click events.
    pub fn on_mouse(&mut self, mouse: MouseEvent) {
        let inside = |r: &Rect| {
            mouse.column >= r.x
                && mouse.column < r.x + r.width
                && mouse.row >= r.y
                && mouse.row < r.y + r.height
        };

        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                let over_panel = self.panel.as_ref().is_some_and(inside);
                if over_panel {
                    self.hovering = true;
                    self.pointer_move(mouse.column as f32);
                } else if self.hovering {
                    self.hovering = false;
                    self.pointer_leave();
                }
            }
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(index) = self.buttons.iter().position(inside) {
                    self.activate(index);
                }
            }
            _ => {}
        }
    }

    /// One display frame: deliver media notifications, then run the loop.
    pub fn on_frame(&mut self) {
        match self.controller.poll_ready() {
            Some(Ok(())) => {
                self.dispatch(VisualEvent::SessionReady);
                self.driver.start();
                self.stage.set_label(PlayLabel::Pause);
            }
            Some(Err(e)) => {
                self.status = Some(e.to_string());
                self.clear_active();
            }
            None => {}
        }

        if self.controller.poll_finished() {
            log::info!("track finished");
            self.stop();
        }

        self.driver
            .tick(self.state, &mut self.controller, &mut self.stage);
    }

    /// Activate track `index`: toggle it if it is the loaded track,
    /// otherwise switch to it.
    pub fn activate(&mut self, index: usize) {
        if index >= self.tracks.len() {
            return;
        }
        if self.active == Some(index) && self.controller.status().is_some() {
            self.toggle();
        } else {
            self.select(index);
        }
    }

    /// Switch to track `index`, tearing down the current session first.
    pub fn select(&mut self, index: usize) {
        let Some(track) = self.tracks.get(index) else {
            return;
        };
        let path = track.path.clone();

        self.driver.stop();
        self.dispatch(VisualEvent::TrackSelected);
        self.driver.forget_session();
        self.reset_transport_view();
        self.status = None;
        self.selected = index;
        self.list_state.select(Some(index));

        match self.controller.select(&path) {
            Ok(()) => {
                let color = self
                    .palette
                    .choose(&mut rand::thread_rng())
                    .copied()
                    .unwrap_or(IDLE_COLOR);
                self.active = Some(index);
                self.stage.set_highlight(Some(index), color);
            }
            Err(e) => {
                log::warn!("cannot load {}: {e}", path.display());
                self.status = Some(e.to_string());
                self.clear_active();
            }
        }
    }

    /// Pause or resume the loaded track.
    pub fn toggle(&mut self) {
        let Some(status) = self.controller.toggle() else {
            return;
        };
        self.dispatch(VisualEvent::Toggle);
        match status {
            PlaybackStatus::Playing => {
                self.driver.start();
                self.stage.set_label(PlayLabel::Pause);
            }
            PlaybackStatus::Paused | PlaybackStatus::Loading => {
                self.driver.stop();
                self.stage.set_label(PlayLabel::Play);
            }
        }
    }

    /// Stop playback and release the session.
    pub fn stop(&mut self) {
        self.end_session();
        self.clear_active();
    }

    pub fn pointer_move(&mut self, x: f32) {
        self.dispatch(VisualEvent::PointerMove { x });
        self.driver.pointer_move(self.state, x, &mut self.stage);
    }

    pub fn pointer_leave(&mut self) {
        self.dispatch(VisualEvent::PointerLeave);
        self.driver.pointer_leave(self.state, &mut self.stage);
    }

    /// Record a new block panel area; element centers are only recomputed
    /// when it actually changed.
    pub fn relayout(&mut self, panel: Rect) {
        if self.panel == Some(panel) {
            return;
        }
        let centers = element_centers(panel, self.stage.offsets().len());
        self.driver.set_layout(&centers, panel.width as f32);
        self.panel = Some(panel);
    }

    /// Draw the application UI.
    pub fn draw(&mut self, f: &mut Frame<'_>) {
        let layout = compute_layout(f.area());
        self.relayout(layout.panel_inner);
        self.buttons = control_buttons(layout.controls_inner, self.tracks.len());

        render_track_list(
            f,
            layout.tracks,
            &self.tracks,
            self.active,
            &mut self.list_state,
        );
        render_blocks(f, layout.panel, layout.panel_inner, &self.stage);
        render_controls(f, layout.controls, &self.buttons, &self.stage);
        render_player_panel(
            f,
            layout.player,
            &self.stage,
            self.controller.progress(),
            self.status.as_deref(),
        );
    }

    fn end_session(&mut self) {
        self.driver.stop();
        if self.controller.stop() {
            self.dispatch(VisualEvent::SessionClosed);
        }
        self.reset_transport_view();
    }

    /// Label, gauge and button size of a stage with no session.
    fn reset_transport_view(&mut self) {
        self.stage.set_label(PlayLabel::Play);
        self.stage.set_progress(0.0);
        self.stage.set_scale(IDLE_SCALE);
    }

    fn clear_active(&mut self) {
        self.active = None;
        self.stage.set_highlight(None, IDLE_COLOR);
    }

    fn dispatch(&mut self, event: VisualEvent) {
        let next = self.state.next(event);
        if next != self.state {
            log::debug!("{:?} --{:?}--> {:?}", self.state, event, next);
        }
        self.state = next;
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::time::Duration;

    use crossterm::event::{KeyCode, KeyModifiers};

    use super::*;
    use crate::audio::fake::{Call, FakeBackend, Script};

    fn tracks() -> Vec<Track> {
        ["a.mp3", "b.mp3", "bad.mp3"]
            .into_iter()
            .map(|p| Track::from_path(PathBuf::from(p)))
            .collect()
    }

    fn app(backend: FakeBackend) -> App<FakeBackend> {
        let mut app = App::new(backend, tracks(), &Config::default());
        let centers_panel = Rect::new(0, 0, 70, 10);
        app.relayout(centers_panel);
        app
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn playing(backend: FakeBackend) -> App<FakeBackend> {
        let mut app = app(backend);
        app.activate(0);
        app.on_frame();
        assert_eq!(app.state(), VisualizationState::Playing);
        app
    }

    #[test]
    fn starts_idle_with_initial_pattern() {
        let app = app(FakeBackend::new());
        assert_eq!(app.state(), VisualizationState::Idle);
        let levels: Vec<f32> = app.stage.levels().collect();
        let initial = Config::default().visualizer.initial;
        for (got, want) in levels.iter().zip(&initial) {
            assert!((got - want).abs() < 1e-5);
        }
        assert_eq!(app.stage.label, PlayLabel::Play);
    }

    #[test]
    fn select_then_ready_plays_first_frame() {
        let mut backend = FakeBackend::new();
        backend.snapshot[0] = 200;
        let mut app = app(backend);

        app.activate(0);
        assert_eq!(app.state(), VisualizationState::Idle);
        assert!(app.stage.highlight.is_some_and(|(i, _)| i == 0));

        app.on_frame();
        assert_eq!(app.state(), VisualizationState::Playing);
        assert_eq!(app.stage.label, PlayLabel::Pause);
        let travel = Config::default().visualizer.travel;
        let levels: Vec<f32> = app.stage.levels().collect();
        assert!((levels[0] - 200.0 / travel).abs() < 1e-5);
        assert!(levels[1..].iter().all(|l| *l == 0.0));
    }

    #[test]
    fn highlight_color_comes_from_palette() {
        let mut app = app(FakeBackend::new());
        app.activate(1);
        let (_, color) = app.stage.highlight.unwrap();
        assert!(Config::default().palette.contains(&color));
    }

    #[test]
    fn activating_the_loaded_track_toggles() {
        let mut app = playing(FakeBackend::new());
        app.activate(0);
        assert_eq!(app.state(), VisualizationState::Paused);
        assert_eq!(app.stage.label, PlayLabel::Play);
        app.activate(0);
        assert_eq!(app.state(), VisualizationState::Playing);
        let opens = app
            .controller()
            .backend()
            .calls
            .iter()
            .filter(|c| matches!(c, Call::Open(_)))
            .count();
        assert_eq!(opens, 1);
    }

    #[test]
    fn pause_resume_restarts_loop_exactly_once() {
        let mut app = playing(FakeBackend::new());
        assert_eq!(app.driver().frame_loop().starts(), 1);

        app.on_key(key(KeyCode::Char(' ')));
        assert_eq!(app.state(), VisualizationState::Paused);
        assert!(!app.driver().frame_loop().is_running());

        let reads = app.controller().backend().snapshot_reads();
        app.on_frame();
        assert_eq!(app.controller().backend().snapshot_reads(), reads);

        app.on_key(key(KeyCode::Char(' ')));
        assert_eq!(app.state(), VisualizationState::Playing);
        assert!(app.driver().frame_loop().is_running());
        assert_eq!(app.driver().frame_loop().starts(), 2);

        app.on_frame();
        assert_eq!(app.controller().backend().snapshot_reads(), reads + 1);
    }

    #[test]
    fn switching_tracks_closes_before_opening() {
        let mut app = playing(FakeBackend::new());
        app.activate(1);
        assert_eq!(app.state(), VisualizationState::Idle);
        assert!(!app.driver().frame_loop().is_running());

        let calls = &app.controller().backend().calls;
        let close = calls.iter().position(|c| matches!(c, Call::Close(_))).unwrap();
        let open_b = calls
            .iter()
            .position(|c| *c == Call::Open(PathBuf::from("b.mp3")))
            .unwrap();
        assert!(close < open_b);

        app.on_frame();
        assert_eq!(app.state(), VisualizationState::Playing);
        assert_eq!(app.active(), Some(1));
    }

    #[test]
    fn failed_load_reports_and_never_schedules_loop() {
        let mut app = app(FakeBackend::new().script("bad.mp3", Script::Undecodable));
        app.activate(2);
        app.on_frame();
        assert_eq!(app.state(), VisualizationState::Idle);
        assert!(app.status.is_some());
        assert!(app.active().is_none());
        assert!(!app.driver().frame_loop().is_running());
        assert_eq!(app.controller().backend().open_count(), 0);
    }

    #[test]
    fn missing_file_reports_synchronously() {
        let mut app = app(FakeBackend::new().script("bad.mp3", Script::Missing));
        app.activate(2);
        assert!(app.status.is_some());
        assert!(app.controller().status().is_none());
        assert!(app.stage.highlight.is_none());
    }

    #[test]
    fn hover_previews_only_without_session() {
        let mut app = app(FakeBackend::new());
        app.pointer_move(5.0);
        assert_eq!(app.state(), VisualizationState::Previewing);
        let preview: Vec<f32> = app.stage.offsets().to_vec();

        app.pointer_leave();
        assert_eq!(app.state(), VisualizationState::Idle);
        assert_ne!(app.stage.offsets(), preview.as_slice());

        let mut app = playing(FakeBackend::new());
        let before = app.stage.offsets().to_vec();
        app.pointer_move(60.0);
        assert_eq!(app.state(), VisualizationState::Playing);
        assert_eq!(app.stage.offsets(), before.as_slice());
    }

    #[test]
    fn stop_freezes_last_frame_for_pointer_leave() {
        let mut backend = FakeBackend::new();
        backend.snapshot = vec![120; 1024];
        let mut app = playing(backend);
        app.on_key(key(KeyCode::Char('s')));
        assert_eq!(app.state(), VisualizationState::Idle);
        assert_eq!(app.controller().backend().open_count(), 0);

        app.pointer_move(0.0);
        app.pointer_leave();
        let travel = Config::default().visualizer.travel;
        assert!(app.stage.levels().all(|l| (l - 120.0 / travel).abs() < 1e-5));
    }

    #[test]
    fn end_of_track_returns_to_idle() {
        let mut backend = FakeBackend::new();
        backend.finished = true;
        let mut app = app(backend);
        app.activate(0);
        app.on_frame();
        assert_eq!(app.state(), VisualizationState::Idle);
        assert!(!app.driver().frame_loop().is_running());
        assert_eq!(app.stage.label, PlayLabel::Play);
        assert_eq!(app.controller().backend().open_count(), 0);
        assert!(app.active().is_none());
        assert!(app.stage.highlight.is_none());
        assert_eq!(app.stage.progress, 0.0);
    }

    #[test]
    fn stop_empties_the_progress_gauge() {
        let mut backend = FakeBackend::new();
        backend.position = Duration::from_secs(120);
        backend.duration = Some(Duration::from_secs(180));
        backend.snapshot = vec![240; 1024];
        let mut app = playing(backend);
        assert!((app.stage.progress - 2.0 / 3.0).abs() < 1e-5);
        assert!(app.stage.scale > 1.0);

        app.stop();
        assert_eq!(app.stage.progress, 0.0);
        assert_eq!(app.stage.scale, 1.0);
        assert_eq!(app.controller().progress(), crate::audio::Progress::default());
    }

    #[test]
    fn switching_to_a_loading_track_empties_the_gauge() {
        let mut backend = FakeBackend::new().script("b.mp3", Script::Never);
        backend.position = Duration::from_secs(90);
        let mut app = playing(backend);
        assert_eq!(app.stage.progress, 0.5);

        app.activate(1);
        app.on_frame();
        assert_eq!(app.controller().status(), Some(PlaybackStatus::Loading));
        assert_eq!(app.stage.progress, 0.0);
        assert_eq!(app.stage.scale, 1.0);
    }

    #[test]
    fn progress_reaches_the_stage() {
        let mut backend = FakeBackend::new();
        backend.position = Duration::from_secs(45);
        backend.duration = Some(Duration::from_secs(180));
        let mut app = playing(backend);
        app.on_frame();
        assert_eq!(app.stage.progress, 0.25);
    }

    #[test]
    fn relayout_only_when_panel_changes() {
        let mut app = app(FakeBackend::new());
        let before = app.driver().elements().to_vec();
        app.relayout(Rect::new(0, 0, 70, 10));
        assert_eq!(app.driver().elements(), before.as_slice());
        app.relayout(Rect::new(0, 0, 140, 10));
        assert_ne!(app.driver().elements(), before.as_slice());
        assert_eq!(app.driver().elements().len(), 7);
    }

    #[test]
    fn quit_stops_playback() {
        let mut app = playing(FakeBackend::new());
        assert!(app.on_key(key(KeyCode::Char('q'))));
        assert_eq!(app.controller().backend().open_count(), 0);
    }
}
