//! Linear undo/redo history over serialized document snapshots.
//!
//! The history never mutates a document itself. `undo`/`redo` move the
//! cursor and hand back the snapshot at the new position; applying it is the
//! caller's job, which keeps this module decoupled from rendering.

/// Maximum number of history entries to keep.
pub const MAX_HISTORY: usize = 50;

/// An immutable snapshot of the full document serialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Monotonically increasing sequence number.
    pub seq: u64,
    /// Serialized document.
    pub snapshot: String,
}

/// Bounded ordered sequence of snapshots with a cursor.
///
/// Pushing while the cursor is not at the tail discards every entry past the
/// cursor (standard linear branch-overwrite).
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
    /// Index of the current entry. Meaningless while `entries` is empty.
    cursor: usize,
    next_seq: u64,
}

impl History {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all entries and start over from a single baseline snapshot.
    pub fn reset(&mut self, snapshot: String) {
        self.entries.clear();
        self.cursor = 0;
        self.push(snapshot);
    }

    /// Record a committed snapshot, discarding any redo branch.
    pub fn push(&mut self, snapshot: String) {
        if !self.entries.is_empty() {
            self.entries.truncate(self.cursor + 1);
        }
        self.entries.push(HistoryEntry {
            seq: self.next_seq,
            snapshot,
        });
        self.next_seq += 1;
        self.cursor = self.entries.len() - 1;

        if self.entries.len() > MAX_HISTORY {
            self.entries.remove(0);
            self.cursor -= 1;
        }
    }

    /// The snapshot at the cursor, if any.
    pub fn current(&self) -> Option<&str> {
        self.entries.get(self.cursor).map(|e| e.snapshot.as_str())
    }

    /// Step back and return the snapshot to apply.
    pub fn undo(&mut self) -> Option<&str> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        self.current()
    }

    /// Step forward and return the snapshot to apply.
    pub fn redo(&mut self) -> Option<&str> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        self.current()
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        self.cursor > 0 && !self.entries.is_empty()
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        !self.entries.is_empty() && self.cursor + 1 < self.entries.len()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the history holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undo_redo_round_trip() {
        let mut history = History::new();
        history.push("A".into());
        history.push("B".into());
        assert_eq!(history.undo(), Some("A"));
        assert_eq!(history.redo(), Some("B"));
    }

    #[test]
    fn push_discards_redo_branch() {
        let mut history = History::new();
        history.push("A".into());
        history.push("B".into());
        assert_eq!(history.undo(), Some("A"));
        history.push("C".into());
        assert_eq!(history.redo(), None);
        assert_eq!(history.current(), Some("C"));
    }

    #[test]
    fn empty_history_has_nothing_to_do() {
        let mut history = History::new();
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert_eq!(history.undo(), None);
        assert_eq!(history.redo(), None);
    }

    #[test]
    fn baseline_entry_cannot_be_undone_past() {
        let mut history = History::new();
        history.push("A".into());
        assert!(!history.can_undo());
        assert_eq!(history.undo(), None);
        assert_eq!(history.current(), Some("A"));
    }

    #[test]
    fn sequence_numbers_are_monotonic() {
        let mut history = History::new();
        history.push("A".into());
        history.push("B".into());
        history.undo();
        history.push("C".into());
        let seqs: Vec<u64> = history.entries.iter().map(|e| e.seq).collect();
        assert_eq!(seqs.len(), 2);
        assert!(seqs[0] < seqs[1]);
        assert_eq!(seqs[1], 2);
    }

    #[test]
    fn history_is_bounded() {
        let mut history = History::new();
        for i in 0..(MAX_HISTORY + 10) {
            history.push(format!("{i}"));
        }
        assert_eq!(history.len(), MAX_HISTORY);
        assert_eq!(history.current(), Some(format!("{}", MAX_HISTORY + 9).as_str()));
    }

    #[test]
    fn reset_seeds_a_single_baseline() {
        let mut history = History::new();
        history.push("A".into());
        history.push("B".into());
        history.reset("C".into());
        assert_eq!(history.len(), 1);
        assert_eq!(history.current(), Some("C"));
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }
}
