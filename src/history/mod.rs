mod snapshot;

use log::debug;

pub use snapshot::Snapshot;

/// Linear undo log of document snapshots.
///
/// The cursor points at the snapshot matching the current document, or is
/// `None` while the log is empty. `History` only moves the cursor when told
/// to: restoring the engine is the editor's job, and the cursor follows once
/// the restore has succeeded.
#[derive(Debug, Default)]
pub struct History {
    entries: Vec<Snapshot>,
    cursor: Option<usize>,
    max_entries: Option<usize>,
}

impl History {
    /// Creates a new empty history with no length limit
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a history that evicts its oldest snapshots past `max_entries`
    pub fn with_limit(max_entries: Option<usize>) -> Self {
        Self {
            max_entries: max_entries.map(|max| max.max(1)),
            ..Self::default()
        }
    }

    /// Appends a snapshot, discarding everything after the cursor first
    pub fn record(&mut self, snapshot: Snapshot) {
        let keep = self.cursor.map_or(0, |cursor| cursor + 1);
        if keep < self.entries.len() {
            debug!("Discarding {} redo entries", self.entries.len() - keep);
            self.entries.truncate(keep);
        }
        self.entries.push(snapshot);

        if let Some(max) = self.max_entries {
            if self.entries.len() > max {
                let overflow = self.entries.len() - max;
                self.entries.drain(..overflow);
            }
        }
        self.cursor = Some(self.entries.len() - 1);
    }

    /// Index of the snapshot an undo should restore, if any
    pub fn undo_target(&self) -> Option<usize> {
        match self.cursor {
            Some(cursor) if cursor > 0 => Some(cursor - 1),
            _ => None,
        }
    }

    /// Index of the snapshot a redo should restore, if any
    pub fn redo_target(&self) -> Option<usize> {
        match self.cursor {
            Some(cursor) if cursor + 1 < self.entries.len() => Some(cursor + 1),
            _ => None,
        }
    }

    /// Moves the cursor after a successful restore. Out-of-range indices are ignored.
    pub fn set_cursor(&mut self, index: usize) -> bool {
        if index < self.entries.len() {
            self.cursor = Some(index);
            true
        } else {
            false
        }
    }

    /// Returns true if there are snapshots before the cursor
    pub fn can_undo(&self) -> bool {
        self.undo_target().is_some()
    }

    /// Returns true if there are snapshots after the cursor
    pub fn can_redo(&self) -> bool {
        self.redo_target().is_some()
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Snapshot] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&Snapshot> {
        self.entries.get(index)
    }

    /// The snapshot under the cursor
    pub fn current(&self) -> Option<&Snapshot> {
        self.cursor.and_then(|cursor| self.entries.get(cursor))
    }

    /// Clear the whole log
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(count: usize) -> History {
        let mut history = History::new();
        for i in 0..count {
            history.record(Snapshot::new(format!("state-{i}")));
        }
        history
    }

    fn undo(history: &mut History) -> bool {
        match history.undo_target() {
            Some(target) => history.set_cursor(target),
            None => false,
        }
    }

    #[test]
    fn test_empty_history() {
        let history = History::new();
        assert_eq!(history.cursor(), None);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert!(history.current().is_none());
    }

    #[test]
    fn test_single_entry_cannot_undo() {
        let history = filled(1);
        assert_eq!(history.cursor(), Some(0));
        assert!(!history.can_undo());
    }

    #[test]
    fn test_undo_to_first_entry_then_stop() {
        let mut history = filled(5);
        for _ in 0..4 {
            assert!(undo(&mut history));
        }
        assert_eq!(history.cursor(), Some(0));
        assert!(!undo(&mut history));
        assert_eq!(history.cursor(), Some(0));
        assert!(history.can_redo());
    }

    #[test]
    fn test_record_after_undo_truncates_redo() {
        let mut history = filled(4);
        undo(&mut history);
        undo(&mut history);
        assert_eq!(history.cursor(), Some(1));

        history.record(Snapshot::new("branch".to_owned()));
        assert_eq!(history.len(), 3);
        assert_eq!(history.cursor(), Some(2));
        assert!(!history.can_redo());
        assert_eq!(history.current().unwrap().json(), "branch");
        assert_eq!(history.get(1).unwrap().json(), "state-1");
    }

    #[test]
    fn test_redo_target() {
        let mut history = filled(3);
        assert_eq!(history.redo_target(), None);
        undo(&mut history);
        assert_eq!(history.redo_target(), Some(2));
        assert!(!history.set_cursor(7));
        assert_eq!(history.cursor(), Some(1));
    }

    #[test]
    fn test_limit_evicts_oldest() {
        let mut history = History::with_limit(Some(3));
        for i in 0..5 {
            history.record(Snapshot::new(format!("state-{i}")));
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.cursor(), Some(2));
        assert_eq!(history.get(0).unwrap().json(), "state-2");
    }

    #[test]
    fn test_ties_in_timestamps_keep_recording_order() {
        let history = filled(50);
        let order: Vec<_> = history.entries().iter().map(|s| s.json().to_owned()).collect();
        let expected: Vec<_> = (0..50).map(|i| format!("state-{i}")).collect();
        assert_eq!(order, expected);
    }
}
