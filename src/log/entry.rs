//! The view of a log element that ordering and navigation need.

use crate::core::{Message, PostId, ServerTime};

/// An element that can live in an ordered message log.
///
/// Insertion orders entries by [`date`](LogEntry::date) and deduplicates by
/// [`post_id`](LogEntry::post_id). Navigation skips entries that are deleted
/// or have no identity; an empty identity counts as none.
pub trait LogEntry {
    /// Ordering key.
    fn date(&self) -> ServerTime;

    /// Server identity, if any.
    fn post_id(&self) -> Option<&PostId>;

    /// Whether the entry is a tombstone.
    fn is_deleted(&self) -> bool;

    /// Whether navigation may land on this entry.
    fn is_selectable(&self) -> bool {
        !self.is_deleted() && self.post_id().is_some_and(|id| !id.is_empty())
    }
}

impl LogEntry for Message {
    fn date(&self) -> ServerTime {
        self.date
    }

    fn post_id(&self) -> Option<&PostId> {
        self.post_id.as_ref()
    }

    fn is_deleted(&self) -> bool {
        self.deleted
    }
}

/// True when both entries carry the same identity.
///
/// Entries without an identity, or with an empty one, are never the same post.
pub(crate) fn same_post<A: LogEntry, B: LogEntry>(a: &A, b: &B) -> bool {
    matches!((a.post_id(), b.post_id()), (Some(x), Some(y)) if !x.is_empty() && x == y)
}
