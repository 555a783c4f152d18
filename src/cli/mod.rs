//! CLI layer for chanlog.
//!
//! Provides the command-line interface using clap, with commands for
//! replaying an event stream and navigating the resulting log.

pub mod commands;
pub mod output;
pub mod parser;

pub use commands::{LogStats, Replay, execute, replay};
pub use output::OutputFormat;
pub use parser::{Cli, Commands};
