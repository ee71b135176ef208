// src/ui/layout.rs
//! Layout computation for the UI panels.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Columns between two blocks.
const BLOCK_GAP: u16 = 1;
/// Columns between two track buttons.
const BUTTON_GAP: u16 = 1;

/// Computed layout areas for rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComputedLayout {
    /// Track list on the left
    pub tracks: Rect,
    /// Bordered block panel
    pub panel: Rect,
    /// Inside of the block panel, where the blocks are drawn
    pub panel_inner: Rect,
    /// Bordered row of track buttons
    pub controls: Rect,
    pub controls_inner: Rect,
    /// Play label, progress and status
    pub player: Rect,
}

fn inner(area: Rect) -> Rect {
    Rect {
        x: area.x.saturating_add(1),
        y: area.y.saturating_add(1),
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    }
}

/// Split the terminal: track list left, blocks center, controls and
/// player strip at the bottom.
pub fn compute_layout(area: Rect) -> ComputedLayout {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(22), Constraint::Percentage(78)])
        .split(area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(3),
            Constraint::Length(5),
        ])
        .split(columns[1]);

    ComputedLayout {
        tracks: columns[0],
        panel: rows[0],
        panel_inner: inner(rows[0]),
        controls: rows[1],
        controls_inner: inner(rows[1]),
        player: rows[2],
    }
}

fn equal_columns(area: Rect, n: usize, gap: u16) -> Vec<Rect> {
    if n == 0 {
        return Vec::new();
    }
    let n = u32::try_from(n).unwrap_or(u32::MAX);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints((0..n).map(|_| Constraint::Ratio(1, n)))
        .spacing(gap)
        .split(area)
        .to_vec()
}

/// Block columns inside the panel.
pub fn element_columns(panel: Rect, n: usize) -> Vec<Rect> {
    equal_columns(panel, n, BLOCK_GAP)
}

/// Horizontal center of each block column, in terminal columns.
pub fn element_centers(panel: Rect, n: usize) -> Vec<f32> {
    element_columns(panel, n)
        .iter()
        .map(|c| c.x as f32 + c.width as f32 / 2.0)
        .collect()
}

/// One button slot per track inside the controls row.
pub fn control_buttons(area: Rect, n: usize) -> Vec<Rect> {
    equal_columns(area, n, BUTTON_GAP)
}
