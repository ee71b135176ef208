// src/ui/widgets/track_list.rs
//! Track list widget.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use crate::fs::Track;

/// Render the numbered track list; the loaded track is marked.
pub fn render_track_list(
    f: &mut Frame<'_>,
    area: Rect,
    tracks: &[Track],
    active: Option<usize>,
    state: &mut ListState,
) {
    let items: Vec<ListItem> = tracks
        .iter()
        .enumerate()
        .map(|(i, track)| {
            let marker = if active == Some(i) { "♪" } else { " " };
            ListItem::new(format!("{marker} {}. {}", i + 1, track.title))
        })
        .collect();

    let title = if tracks.is_empty() {
        " Tracks (none found) ".to_string()
    } else {
        format!(" Tracks ({}) ", tracks.len())
    };

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol(">> ");

    f.render_stateful_widget(list, area, state);
}
