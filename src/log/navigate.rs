//! Identity-based navigation over a chronological log.
//!
//! Navigation only ever lands on *selectable* entries: ones that carry a
//! post identity and are not tombstones. Client-generated entries and deleted
//! posts are skipped. Scans start from the newest end wherever the target is
//! likely to be recent.

use crate::core::{PostId, ServerTime};
use crate::log::direction::{Chronological, Retrograde};
use crate::log::entry::LogEntry;
use crate::log::sequence::Messages;

/// Result of [`Messages::split_at`].
#[derive(Debug, Clone, PartialEq)]
pub struct Split<T> {
    /// The entry with the requested identity, if present.
    pub found: Option<T>,
    /// Entries before `found`, newest first.
    pub before: Messages<Retrograde, T>,
    /// Entries after `found`, oldest first.
    pub after: Messages<Chronological, T>,
}

impl<T: LogEntry> Messages<Chronological, T> {
    /// Splits the log around the entry with identity `id`.
    ///
    /// The found entry is excluded from both halves. If `id` is `None` or
    /// not present, `found` is `None`, `before` holds the whole log newest
    /// first and `after` is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use chanlog::core::{Message, MessageType, PostId, PostType, ServerTime};
    /// use chanlog::log::ChronologicalMessages;
    ///
    /// let log: ChronologicalMessages = ["a", "b", "c"]
    ///     .into_iter()
    ///     .enumerate()
    ///     .map(|(i, id)| {
    ///         let date = ServerTime::from_millis(i as i64).unwrap();
    ///         let mut m = Message::new(id.into(), MessageType::Post(PostType::Normal), date);
    ///         m.post_id = Some(PostId::new(id));
    ///         m
    ///     })
    ///     .collect();
    ///
    /// let split = log.split_at(Some(&PostId::new("b")));
    /// assert_eq!(split.found.map(|m| m.text.to_string()), Some("b".to_string()));
    /// assert_eq!(split.before.len(), 1);
    /// assert_eq!(split.after.len(), 1);
    /// ```
    #[must_use]
    pub fn split_at(self, id: Option<&PostId>) -> Split<T> {
        let index = id.and_then(|id| self.items().iter().rposition(|e| e.post_id() == Some(id)));

        let Some(index) = index else {
            return Split {
                found: None,
                before: self.reverse(),
                after: Messages::new(),
            };
        };

        let mut before = self.into_items();
        let mut rest = before.split_off(index);
        let after = rest.split_off(1);

        Split {
            found: rest.pop(),
            before: Messages::<Chronological, T>::from_vec(before).reverse(),
            after: Messages::from_vec(after),
        }
    }

    /// Finds the entry with identity `id`, searching newest first.
    #[must_use]
    pub fn find_by_id(&self, id: &PostId) -> Option<&T> {
        self.items()
            .iter()
            .rev()
            .find(|entry| entry.post_id() == Some(id))
    }

    /// The newest selectable entry.
    #[must_use]
    pub fn latest_post(&self) -> Option<&T> {
        self.items().iter().rev().find(|entry| entry.is_selectable())
    }

    /// Identity of the newest selectable entry.
    #[must_use]
    pub fn latest_id(&self) -> Option<&PostId> {
        self.latest_post().and_then(LogEntry::post_id)
    }

    /// Identity of the oldest selectable entry.
    #[must_use]
    pub fn earliest_id(&self) -> Option<&PostId> {
        self.items()
            .iter()
            .find(|entry| entry.is_selectable())
            .and_then(LogEntry::post_id)
    }

    /// Identity of the first selectable entry after `from`.
    ///
    /// With `from == None` this is [`Messages::latest_id`]. Returns `None`
    /// if `from` is not in the log or nothing selectable follows it.
    #[must_use]
    pub fn next_id(&self, from: Option<&PostId>) -> Option<&PostId> {
        let Some(from) = from else {
            return self.latest_id();
        };
        let items = self.items();
        let start = items.iter().position(|e| e.post_id() == Some(from))?;
        items[start + 1..]
            .iter()
            .find(|entry| entry.is_selectable())
            .and_then(LogEntry::post_id)
    }

    /// Identity of the nearest selectable entry before `from`.
    ///
    /// With `from == None` this is [`Messages::latest_id`]. Returns `None`
    /// if `from` is not in the log or nothing selectable precedes it.
    #[must_use]
    pub fn previous_id(&self, from: Option<&PostId>) -> Option<&PostId> {
        let Some(from) = from else {
            return self.latest_id();
        };
        let items = self.items();
        let start = items.iter().rposition(|e| e.post_id() == Some(from))?;
        items[..start]
            .iter()
            .rev()
            .find(|entry| entry.is_selectable())
            .and_then(LogEntry::post_id)
    }

    /// The newest selectable entry satisfying `predicate`.
    ///
    /// Walks backwards from [`Messages::latest_post`] one selectable entry
    /// at a time, so client-generated entries and tombstones are never
    /// offered to `predicate`.
    #[must_use]
    pub fn latest_matching<F>(&self, mut predicate: F) -> Option<&T>
    where
        F: FnMut(&T) -> bool,
    {
        self.items()
            .iter()
            .rev()
            .filter(|entry| entry.is_selectable())
            .find(|entry| predicate(*entry))
    }

    /// The trailing run of entries dated strictly after `time`.
    #[must_use]
    pub fn messages_after(&self, time: ServerTime) -> Self
    where
        T: Clone,
    {
        let items = self.items();
        let start = items
            .iter()
            .rposition(|entry| entry.date() <= time)
            .map_or(0, |index| index + 1);
        Self::from_vec(items[start..].to_vec())
    }
}
