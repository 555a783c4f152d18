//! # chanlog
//!
//! Ordered, deduplicated message log for a single chat channel.
//!
//! A channel log merges server posts and client-generated events (date
//! markers, the unread marker, local errors) into one chronological
//! sequence, tolerating out-of-order and duplicate arrival, and answers the
//! navigation queries a chat UI needs: next/previous post, latest post,
//! split-at-post and messages-after-time.
//!
//! ## Features
//!
//! - **Typed direction**: chronological and retrograde views are distinct types
//! - **Identity deduplication**: re-delivered posts are dropped on insertion
//! - **Navigation**: skips tombstones and client-only entries
//! - **CLI**: replay an NDJSON event stream and query it

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod core;
pub mod error;
pub mod io;
pub mod log;

// Re-export commonly used types at crate root
pub use error::{Error, Result};

// Re-export core domain types
pub use crate::core::{
    Attachment, ChannelId, ClientMessage, ClientMessageType, Event, Message, MessageType, Post,
    PostId, PostType, ReplyState, RichText, ServerTime,
};

// Re-export log types
pub use crate::log::{
    Chronological, ChronologicalMessages, Direction, LogEntry, Messages, Placement, Retrograde,
    RetrogradeMessages, Split,
};

// Re-export CLI types
pub use cli::{Cli, Commands, OutputFormat};
