//! Presentation layer for secscope
//!
//! This crate contains CLI definitions, the HTTP request boundary, output
//! formatters and the console stage reporter.

pub mod cli;
pub mod output;
pub mod progress;
pub mod server;

// Re-export commonly used types
pub use cli::commands::{Cli, Command, OutputFormat};
pub use output::console::ConsoleFormatter;
pub use progress::reporter::StageReporter;
pub use server::{AppState, app, serve};
