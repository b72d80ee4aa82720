//! Handles Command Line Interface (CLI) related functionalities.
//!
//! Includes defining commands, parsing arguments, handling user interaction
//! (prompts, menus), and running commands against the configured sensors.

mod commands;

pub use commands::*;
