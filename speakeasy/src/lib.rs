//! speakeasy
//!
//! Terminal front-end for `speakeasy-core`: translates crossterm input into
//! engine events and draws the engine's view model.

pub mod app;
pub use app::App;

pub mod keymap;
pub use keymap::{map_key, Command};

pub mod render;
pub use render::{draw, layout, phrase_at};
