//! The channel message log.
//!
//! A log is a [`Messages`] sequence tagged with a compile-time
//! [`Direction`]. The authoritative copy is always [`Chronological`]; a
//! [`Retrograde`] view is obtained by [`Messages::reverse`].
//!
//! - **Insertion**: [`Messages::insert`] / [`Messages::add_message`] keep the
//!   log ordered by date and free of duplicate post identities
//! - **Navigation**: split, find, next/previous/latest identity, latest
//!   match and time-suffix queries
//!
//! Every operation is a plain synchronous function over an owned value;
//! sharing a snapshot between readers only needs a clone.

pub mod direction;
pub mod entry;
pub mod insert;
pub mod navigate;
pub mod sequence;

pub use direction::{Chronological, Direction, Retrograde};
pub use entry::LogEntry;
pub use insert::Placement;
pub use navigate::Split;
pub use sequence::{ChronologicalMessages, Messages, RetrogradeMessages};
