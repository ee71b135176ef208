// src/ui/widgets/controls.rs
//! Row of track buttons.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::sink::Stage;

/// Columns a button spans: its slot scaled by half the animation scale.
pub fn button_width(slot: u16, scale: f32) -> u16 {
    let min = 3.min(slot);
    let scaled = (slot as f32 * scale / 2.0).round();
    if !scaled.is_finite() {
        return slot;
    }
    (scaled as u16).clamp(min, slot)
}

/// Render one numbered button per slot. The highlighted button follows
/// the animation scale and carries the session color.
pub fn render_controls(f: &mut Frame<'_>, area: Rect, buttons: &[Rect], stage: &Stage) {
    f.render_widget(
        Block::default().borders(Borders::ALL).title(" Controls "),
        area,
    );

    for (i, slot) in buttons.iter().enumerate() {
        let (rect, style) = match stage.highlight {
            Some((index, rgb)) if index == i => {
                let width = button_width(slot.width, stage.scale);
                let rect = Rect {
                    x: slot.x + (slot.width - width) / 2,
                    width,
                    ..*slot
                };
                let style = Style::default()
                    .fg(Color::Black)
                    .bg(Color::Rgb(rgb.0, rgb.1, rgb.2))
                    .add_modifier(Modifier::BOLD);
                (rect, style)
            }
            _ => (*slot, Style::default().fg(Color::Black).bg(Color::White)),
        };

        f.render_widget(
            Paragraph::new(format!("{}", i + 1))
                .style(style)
                .alignment(Alignment::Center),
            rect,
        );
    }
}
