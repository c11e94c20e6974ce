//! Command-line interface components
//!
//! This module contains CLI-specific code for the review fetcher, including
//! argument parsing, command handlers, and progress display.

pub mod args;
pub mod commands;
pub mod progress;

pub use args::{Cli, Commands, FetchArgs, GlobalArgs};
pub use commands::{handle_config, handle_countries, handle_fetch};
pub use progress::FetchProgress;
