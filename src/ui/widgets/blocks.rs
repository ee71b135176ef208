// src/ui/widgets/blocks.rs
//! The animated block panel.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders},
    Frame,
};

use crate::app::sink::Stage;
use crate::ui::layout::element_columns;

/// Share of the panel height a block keeps even when fully lowered.
const BASE_SHARE: f32 = 0.2;

/// Rows a block occupies at `level` in a panel `height` rows tall.
pub fn block_height(height: u16, level: f32) -> u16 {
    let h = height as f32;
    let rows = BASE_SHARE * h + (1.0 - BASE_SHARE) * h * level.clamp(0.0, 1.0);
    (rows.round() as u16).min(height)
}

/// Render one column per element, bottom-aligned, sized by its level.
pub fn render_blocks(f: &mut Frame<'_>, area: Rect, inner: Rect, stage: &Stage) {
    f.render_widget(
        Block::default().borders(Borders::ALL).title(" Blocks "),
        area,
    );
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let color = match stage.highlight {
        Some((_, rgb)) => Color::Rgb(rgb.0, rgb.1, rgb.2),
        None => Color::White,
    };

    let levels: Vec<f32> = stage.levels().collect();
    let columns = element_columns(inner, levels.len());
    for (column, level) in columns.into_iter().zip(levels) {
        let rows = block_height(column.height, level);
        if rows == 0 || column.width == 0 {
            continue;
        }
        let bar = Rect {
            y: column.y + column.height - rows,
            height: rows,
            ..column
        };
        f.render_widget(Block::default().style(Style::default().bg(color)), bar);
    }
}
