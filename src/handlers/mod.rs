//! Command front end
//!
//! Text commands typed by an organizer are parsed into [`commands::Command`]
//! and answered with plain-text replies.

pub mod commands;
pub mod render;

// Re-export commonly used handler functions
pub use commands::{handle_command, handle_line, Command};
