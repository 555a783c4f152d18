//! I/O utilities for chanlog.
//!
//! Provides event stream reading for ingestion, along with Unicode
//! utilities for rendering message previews.

pub mod reader;
pub mod unicode;

pub use reader::{STDIN_PATH, parse_events, read_events};
pub use unicode::preview;
