// src/app/mod.rs
//! Application module - visualization state, animation and the app shell.

pub mod driver;
pub mod machine;
pub mod sink;
pub mod state;

// Re-export the App struct
pub use state::App;
