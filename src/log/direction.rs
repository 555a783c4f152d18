//! Compile-time traversal direction markers.
//!
//! The markers are uninhabited: they exist only as type parameters of
//! [`Messages`](crate::log::Messages) and have no runtime representation.
//! The [`Direction`] trait is sealed so no other crate can add a direction.

use std::fmt::Debug;

mod sealed {
    pub trait Sealed {}
}

/// A traversal direction for a message sequence.
pub trait Direction: sealed::Sealed + Copy + Eq + Debug + 'static {
    /// Short human-readable name, used in logs and debug output.
    const NAME: &'static str;
}

/// Oldest to newest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Chronological {}

/// Newest to oldest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retrograde {}

impl sealed::Sealed for Chronological {}
impl sealed::Sealed for Retrograde {}

impl Direction for Chronological {
    const NAME: &'static str = "chronological";
}

impl Direction for Retrograde {
    const NAME: &'static str = "retrograde";
}
