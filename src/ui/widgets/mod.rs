// src/ui/widgets/mod.rs
//! Custom widgets for the bandstand UI.

pub mod blocks;
pub mod controls;
pub mod player_panel;
pub mod track_list;

// Re-export widget rendering functions
pub use blocks::render_blocks;
pub use controls::render_controls;
pub use player_panel::render_player_panel;
pub use track_list::render_track_list;
