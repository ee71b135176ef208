// src/ui/tui.rs
//! Terminal setup and the event/frame loop.

use std::{
    io,
    time::{Duration, Instant},
};

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as CEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::{app::App, audio::Transport};

type Term = Terminal<CrosstermBackend<io::Stdout>>;

/// Run the UI until the user quits. The terminal is restored even when
/// the loop fails.
pub fn run<B: Transport>(app: &mut App<B>, frame_rate: u32) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, app, frame_rate);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    result
}

fn event_loop<B: Transport>(terminal: &mut Term, app: &mut App<B>, frame_rate: u32) -> Result<()> {
    terminal.clear()?;
    let frame = Duration::from_secs_f64(1.0 / f64::from(frame_rate.max(1)));
    let mut last_frame = Instant::now();

    loop {
        terminal.draw(|f| app.draw(f))?;
        let timeout = frame.checked_sub(last_frame.elapsed()).unwrap_or_default();

        if event::poll(timeout)? {
            match event::read()? {
                CEvent::Key(key) if key.kind == KeyEventKind::Press => {
                    if app.on_key(key) {
                        log::info!("quit requested");
                        return Ok(());
                    }
                }
                CEvent::Mouse(mouse) => app.on_mouse(mouse),
                _ => {}
            }
        }

        if last_frame.elapsed() >= frame {
            last_frame = Instant::now();
            app.on_frame();
        }
    }
}
