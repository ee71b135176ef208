// src/ui/widgets/player_panel.rs
//! Player information panel widget.

use std::time::Duration;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use crate::app::sink::{PlayLabel, Stage};
use crate::audio::Progress;

fn clock(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Render the play label, the progress gauge and the status line.
pub fn render_player_panel(
    f: &mut Frame<'_>,
    area: Rect,
    stage: &Stage,
    progress: Progress,
    status: Option<&str>,
) {
    f.render_widget(
        Block::default().borders(Borders::ALL).title(" Player "),
        area,
    );

    let inner = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    let accent = match stage.highlight {
        Some((_, rgb)) => Color::Rgb(rgb.0, rgb.1, rgb.2),
        None => Color::Gray,
    };

    let icon = match stage.label {
        PlayLabel::Play => " ⏵ ",
        PlayLabel::Pause => " ⏸ ",
    };
    let controls = Line::from(vec![
        Span::styled(icon, Style::default().fg(accent)),
        Span::raw(stage.label.as_str()),
        Span::styled("   space toggle · s stop · q quit", Style::default().fg(Color::DarkGray)),
    ]);
    f.render_widget(
        Paragraph::new(controls).alignment(Alignment::Center),
        inner[0],
    );

    let time_label = format!("{} / {}", clock(progress.elapsed), clock(progress.total));
    f.render_widget(
        Gauge::default()
            .gauge_style(Style::default().fg(accent).add_modifier(Modifier::ITALIC))
            .ratio(f64::from(stage.progress.clamp(0.0, 1.0)))
            .label(time_label),
        inner[1],
    );

    if let Some(message) = status {
        f.render_widget(
            Paragraph::new(message).style(Style::default().fg(Color::Red)),
            inner[2],
        );
    }
}
