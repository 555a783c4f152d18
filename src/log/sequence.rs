//! Direction-tagged message sequences.
//!
//! A [`Messages`] value can only be built through this crate: the public
//! constructors are the empty sequence, [`FromIterator`]/[`Extend`] on
//! chronological sequences (both fold through the insertion algorithm), and
//! the named conversions [`Messages::reverse`] / [`Messages::unreverse`].
//! Callers therefore cannot fabricate a wrongly-labelled or unordered log.

use crate::core::Message;
use crate::log::direction::{Chronological, Direction, Retrograde};
use crate::log::entry::LogEntry;
use serde::{Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;

/// An ordered sequence of log entries traversed in direction `D`.
#[derive(Clone, PartialEq, Eq)]
pub struct Messages<D: Direction, T = Message> {
    items: Vec<T>,
    direction: PhantomData<D>,
}

/// Oldest-to-newest log.
pub type ChronologicalMessages<T = Message> = Messages<Chronological, T>;

/// Newest-to-oldest log, always obtained by reversing a chronological one.
pub type RetrogradeMessages<T = Message> = Messages<Retrograde, T>;

impl<D: Direction, T> Messages<D, T> {
    /// Creates an empty sequence.
    #[must_use]
    pub const fn new() -> Self {
        Self::from_vec(Vec::new())
    }

    pub(crate) const fn from_vec(items: Vec<T>) -> Self {
        Self {
            items,
            direction: PhantomData,
        }
    }

    pub(crate) fn items(&self) -> &[T] {
        &self.items
    }

    pub(crate) const fn items_mut(&mut self) -> &mut Vec<T> {
        &mut self.items
    }

    pub(crate) fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the sequence holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// First entry in this sequence's direction.
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.items.first()
    }

    /// Last entry in this sequence's direction.
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.items.last()
    }

    /// Iterates in this sequence's direction.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Transforms every entry, keeping positions and direction.
    #[must_use]
    pub fn map<U, F>(self, f: F) -> Messages<D, U>
    where
        F: FnMut(T) -> U,
    {
        Messages::from_vec(self.items.into_iter().map(f).collect())
    }

    /// Keeps the entries matching `predicate`, in their original order.
    #[must_use]
    pub fn filter<F>(mut self, mut predicate: F) -> Self
    where
        F: FnMut(&T) -> bool,
    {
        self.items.retain(|item| predicate(item));
        self
    }

    /// Appends `other` after `self` without reordering.
    ///
    /// Only concatenate ranges that are already compatible, such as the
    /// halves produced by [`Messages::split_at`].
    #[must_use]
    pub fn append(mut self, other: Self) -> Self {
        self.items.extend(other.items);
        self
    }
}

impl<T> Messages<Chronological, T> {
    /// Converts to newest-first order.
    #[must_use]
    pub fn reverse(mut self) -> Messages<Retrograde, T> {
        self.items.reverse();
        Messages::from_vec(self.items)
    }
}

impl<T> Messages<Retrograde, T> {
    /// Converts back to oldest-first order.
    #[must_use]
    pub fn unreverse(mut self) -> Messages<Chronological, T> {
        self.items.reverse();
        Messages::from_vec(self.items)
    }
}

impl<D: Direction, T> Default for Messages<D, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Direction, T: fmt::Debug> fmt::Debug for Messages<D, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Messages")
            .field("direction", &D::NAME)
            .field("items", &self.items)
            .finish()
    }
}

impl<D: Direction, T: Serialize> Serialize for Messages<D, T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.items)
    }
}

impl<D: Direction, T> IntoIterator for Messages<D, T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, D: Direction, T> IntoIterator for &'a Messages<D, T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Folds every entry through [`Messages::insert`].
impl<T: LogEntry> FromIterator<T> for Messages<Chronological, T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut log = Self::new();
        log.extend(iter);
        log
    }
}

impl<T: LogEntry> Extend<T> for Messages<Chronological, T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for entry in iter {
            self.insert(entry);
        }
    }
}
