//! Bounded edit history.
//!
//! A [`HistoryBuffer`] is a fixed-capacity log of entries with a single
//! cursor. Entries at or before the cursor can be undone, entries after it
//! can be redone. Adding an entry while the cursor is not at the tip drops
//! the abandoned redo branch, and adding to a full buffer evicts the oldest
//! entry.
//!
//! # Example
//!
//! ```
//! use tardis_history::{Direction, HistoryBuffer};
//!
//! let mut history = HistoryBuffer::new(3).unwrap();
//! for entry in ["A", "B", "C", "D"] {
//!     history.add(entry);
//! }
//!
//! assert_eq!(history.shift(Direction::Backward), Some(&"D"));
//! assert_eq!(history.shift(Direction::Backward), Some(&"C"));
//! assert_eq!(history.shift(Direction::Backward), Some(&"B"));
//! assert_eq!(history.shift(Direction::Backward), None);
//! assert_eq!(history.shift(Direction::Forward), Some(&"B"));
//! ```

use std::collections::VecDeque;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HistoryError {
    #[error("history capacity must be a positive integer, got {0}")]
    InvalidCapacity(usize),
}

/// Cursor movement direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards newer entries (redo).
    Forward,
    /// Towards older entries (undo).
    Backward,
}

/// Fixed-capacity history log with a cursor.
///
/// The cursor is tracked as `position`, the number of entries that can
/// currently be undone. `position == 0` is the origin and
/// `position == entries.len()` is the tip.
#[derive(Debug, Clone)]
pub struct HistoryBuffer<T> {
    capacity: usize,
    entries: VecDeque<T>,
    position: usize,
}

impl<T> HistoryBuffer<T> {
    /// Creates an empty buffer holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Result<Self, HistoryError> {
        if capacity == 0 {
            return Err(HistoryError::InvalidCapacity(capacity));
        }
        Ok(Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
            position: 0,
        })
    }

    /// Appends `item` as the new tip.
    ///
    /// Entries after the cursor are discarded first. When the buffer is full
    /// the oldest entry is evicted to make room.
    pub fn add(&mut self, item: T) {
        self.entries.truncate(self.position);
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(item);
        self.position = self.entries.len();
    }

    /// Moves the cursor one step in `direction` and returns the entry it
    /// passed over.
    ///
    /// Backward returns the entry at the cursor and then steps back. Forward
    /// steps ahead and then returns the entry at the new cursor. Returns
    /// `None` without moving at the origin (backward) or the tip (forward).
    pub fn shift(&mut self, direction: Direction) -> Option<&T> {
        if !self.can_shift(direction) {
            return None;
        }
        match direction {
            Direction::Backward => {
                self.position -= 1;
                self.entries.get(self.position)
            }
            Direction::Forward => {
                self.position += 1;
                self.entries.get(self.position - 1)
            }
        }
    }

    /// Returns the entry [`shift`](Self::shift) would return, without moving
    /// the cursor.
    pub fn peek(&self, direction: Direction) -> Option<&T> {
        if !self.can_shift(direction) {
            return None;
        }
        match direction {
            Direction::Backward => self.entries.get(self.position - 1),
            Direction::Forward => self.entries.get(self.position),
        }
    }

    /// Returns `true` when a shift in `direction` would yield an entry.
    pub fn can_shift(&self, direction: Direction) -> bool {
        match direction {
            Direction::Backward => self.position > 0,
            Direction::Forward => self.position < self.entries.len(),
        }
    }

    /// Index of the most recently undoable entry, `None` at the origin.
    pub fn cursor(&self) -> Option<usize> {
        self.position.checked_sub(1)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries that can be undone.
    pub fn undo_depth(&self) -> usize {
        self.position
    }

    /// Number of entries that can be redone.
    pub fn redo_depth(&self) -> usize {
        self.entries.len() - self.position
    }

    /// Drops every entry and returns the cursor to the origin.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.position = 0;
    }

    /// Iterates over retained entries, oldest first, including redoable ones.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain_backward(history: &mut HistoryBuffer<&'static str>) -> Vec<&'static str> {
        let mut out = Vec::new();
        while let Some(entry) = history.shift(Direction::Backward) {
            out.push(*entry);
        }
        out
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let err = HistoryBuffer::<u8>::new(0).unwrap_err();
        assert_eq!(err, HistoryError::InvalidCapacity(0));
    }

    #[test]
    fn empty_buffer_has_nothing_to_shift() {
        let mut history = HistoryBuffer::<u8>::new(4).unwrap();
        assert!(history.is_empty());
        assert_eq!(history.cursor(), None);
        assert_eq!(history.peek(Direction::Backward), None);
        assert_eq!(history.peek(Direction::Forward), None);
        assert_eq!(history.shift(Direction::Backward), None);
        assert_eq!(history.shift(Direction::Forward), None);
    }

    #[test]
    fn undo_then_redo_walks_entries() {
        let mut history = HistoryBuffer::new(5).unwrap();
        history.add("A");
        history.add("B");
        history.add("C");

        assert_eq!(drain_backward(&mut history), vec!["C", "B", "A"]);
        assert_eq!(history.cursor(), None);

        assert_eq!(history.shift(Direction::Forward), Some(&"A"));
        assert_eq!(history.shift(Direction::Forward), Some(&"B"));
        assert_eq!(history.shift(Direction::Forward), Some(&"C"));
        assert_eq!(history.shift(Direction::Forward), None);
        assert_eq!(history.cursor(), Some(2));
    }

    #[test]
    fn add_discards_redo_branch() {
        let mut history = HistoryBuffer::new(5).unwrap();
        history.add("A");
        history.add("B");
        history.add("C");

        history.shift(Direction::Backward);
        history.shift(Direction::Backward);
        history.add("D");

        assert_eq!(history.len(), 2);
        assert_eq!(history.shift(Direction::Forward), None);
        assert_eq!(drain_backward(&mut history), vec!["D", "A"]);
    }

    #[test]
    fn full_buffer_evicts_oldest() {
        let mut history = HistoryBuffer::new(3).unwrap();
        for entry in ["A", "B", "C", "D"] {
            history.add(entry);
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.cursor(), Some(2));
        assert_eq!(history.iter().copied().collect::<Vec<_>>(), vec!["B", "C", "D"]);
        assert_eq!(drain_backward(&mut history), vec!["D", "C", "B"]);
    }

    #[test]
    fn peek_matches_shift_without_moving() {
        let mut history = HistoryBuffer::new(3).unwrap();
        history.add(1);
        history.add(2);

        assert_eq!(history.peek(Direction::Backward), Some(&2));
        assert_eq!(history.peek(Direction::Backward), Some(&2));
        assert_eq!(history.peek(Direction::Forward), None);

        assert_eq!(history.shift(Direction::Backward), Some(&2));
        assert_eq!(history.peek(Direction::Forward), Some(&2));
        assert_eq!(history.peek(Direction::Backward), Some(&1));
        assert_eq!(history.undo_depth(), 1);
        assert_eq!(history.redo_depth(), 1);
    }

    #[test]
    fn clear_returns_to_origin() {
        let mut history = HistoryBuffer::new(2).unwrap();
        history.add('x');
        history.add('y');
        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.capacity(), 2);
        assert!(!history.can_shift(Direction::Backward));
        assert!(!history.can_shift(Direction::Forward));
    }

    #[test]
    fn capacity_one_keeps_latest() {
        let mut history = HistoryBuffer::new(1).unwrap();
        history.add("A");
        history.add("B");
        assert_eq!(history.shift(Direction::Backward), Some(&"B"));
        assert_eq!(history.shift(Direction::Backward), None);
        assert_eq!(history.shift(Direction::Forward), Some(&"B"));
    }
}
