//! Ordered, deduplicating insertion into a chronological log.
//!
//! Dates are authoritative but not unique: several posts can share a
//! timestamp at server resolution. The post identity is the deduplication
//! key, and it is only consulted between entries with equal dates.

use crate::log::direction::Chronological;
use crate::log::entry::{LogEntry, same_post};
use crate::log::sequence::Messages;

/// Where [`Messages::insert`] put an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Added at the end (the live-message fast path).
    Appended,
    /// Inserted out of order at this index.
    Inserted(usize),
    /// An entry with the same date and identity already exists; the
    /// incoming entry was dropped.
    Duplicate,
}

impl<T: LogEntry> Messages<Chronological, T> {
    /// Adds `entry` in date order, returning the updated log.
    ///
    /// This is the by-value form of [`Messages::insert`].
    ///
    /// # Examples
    ///
    /// ```
    /// use chanlog::core::{Message, MessageType, PostId, PostType, ServerTime};
    /// use chanlog::log::ChronologicalMessages;
    ///
    /// let mut post = Message::new(
    ///     "hi".into(),
    ///     MessageType::Post(PostType::Normal),
    ///     ServerTime::from_millis(10).unwrap(),
    /// );
    /// post.post_id = Some(PostId::new("a"));
    ///
    /// let log = ChronologicalMessages::new().add_message(post.clone());
    /// let again = log.clone().add_message(post);
    /// assert_eq!(log, again);
    /// ```
    #[must_use]
    pub fn add_message(mut self, entry: T) -> Self {
        self.insert(entry);
        self
    }

    /// Adds `entry` in date order and reports where it landed.
    ///
    /// Policy, against the current newest entry `last`:
    ///
    /// - empty log, or `entry` newer than `last`: append;
    /// - same date and same identity as `last`: drop `entry`;
    /// - otherwise scan from the newest end towards the oldest and place
    ///   `entry` directly after the first entry older than it, dropping it
    ///   instead if an entry with the same date and identity is met first.
    ///
    /// Entries sharing a date with `entry` therefore stay after it. An entry
    /// whose identity exists at a *different* date is not recognized as a
    /// duplicate; updates to known posts are applied in place by the owner
    /// after looking them up with [`Messages::find_by_id`].
    pub fn insert(&mut self, entry: T) -> Placement {
        let items = self.items_mut();

        let Some(last) = items.last() else {
            items.push(entry);
            return Placement::Appended;
        };

        if entry.date() > last.date() {
            items.push(entry);
            return Placement::Appended;
        }

        if entry.date() == last.date() && same_post(&entry, last) {
            tracing::trace!(date = %entry.date(), "dropping duplicate of newest entry");
            return Placement::Duplicate;
        }

        let mut index = items.len();
        while index > 0 {
            let existing = &items[index - 1];
            if existing.date() < entry.date() {
                break;
            }
            if existing.date() == entry.date() && same_post(existing, &entry) {
                tracing::trace!(date = %entry.date(), index = index - 1, "dropping duplicate entry");
                return Placement::Duplicate;
            }
            index -= 1;
        }

        tracing::trace!(date = %entry.date(), index, "inserting entry out of order");
        items.insert(index, entry);
        Placement::Inserted(index)
    }
}
