//! Linear undo/redo history.
//!
//! The history only moves [`Action`] records between its two stacks; it never
//! touches document state itself. Whenever an action leaves a stack it is
//! handed to the apply callback registered at construction, together with the
//! [`Direction`] of travel.

use crate::action::Action;
use std::collections::VecDeque;
use std::fmt;

/// Which way an action is travelling through the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Undo,
    Redo,
}

/// Callback invoked with every action that is undone or redone.
pub type ApplyFn = Box<dyn FnMut(&Action, Direction)>;

/// Two-stack undo/redo history.
pub struct ActionHistory {
    /// Applied actions, oldest first.
    past: Vec<Action>,
    /// Undone actions, most recently undone first.
    future: VecDeque<Action>,
    /// Maximum length of `past` (None = unbounded).
    limit: Option<usize>,
    apply: ApplyFn,
}

impl fmt::Debug for ActionHistory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionHistory")
            .field("past", &self.past.len())
            .field("future", &self.future.len())
            .field("limit", &self.limit)
            .finish_non_exhaustive()
    }
}

impl ActionHistory {
    /// Create an unbounded history that reports undo/redo through `apply`.
    pub fn new(apply: impl FnMut(&Action, Direction) + 'static) -> Self {
        Self {
            past: Vec::new(),
            future: VecDeque::new(),
            limit: None,
            apply: Box::new(apply),
        }
    }

    /// Keep at most `limit` undo entries, dropping the oldest first.
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self.enforce_limit();
        self
    }

    fn enforce_limit(&mut self) {
        if let Some(limit) = self.limit {
            if self.past.len() > limit {
                let excess = self.past.len() - limit;
                self.past.drain(..excess);
            }
        }
    }

    /// Push a completed action. Anything that could be redone is discarded.
    pub fn record(&mut self, action: Action) {
        log::debug!("Recording {}", action.kind());
        self.past.push(action);
        self.future.clear();
        self.enforce_limit();
    }

    /// Undo the most recent action.
    /// Returns true if undo was performed, false if nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(action) = self.past.pop() else {
            log::debug!("Nothing to undo");
            return false;
        };
        log::debug!("Undoing {}", action.kind());
        (self.apply)(&action, Direction::Undo);
        self.future.push_front(action);
        true
    }

    /// Redo the most recently undone action.
    /// Returns true if redo was performed, false if nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(action) = self.future.pop_front() else {
            log::debug!("Nothing to redo");
            return false;
        };
        log::debug!("Redoing {}", action.kind());
        (self.apply)(&action, Direction::Redo);
        self.past.push(action);
        true
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.past.len()
    }

    pub fn redo_len(&self) -> usize {
        self.future.len()
    }

    /// Applied actions, oldest first.
    pub fn past(&self) -> &[Action] {
        &self.past
    }

    /// Undone actions, next to redo first.
    pub fn future(&self) -> impl Iterator<Item = &Action> {
        self.future.iter()
    }

    /// Forget every recorded action.
    pub fn clear(&mut self) {
        log::debug!("Clearing history");
        self.past.clear();
        self.future.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::ActionKind;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<(ActionKind, Direction)>>>;

    fn recording_history() -> (ActionHistory, Log) {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        let history = ActionHistory::new(move |action, direction| {
            sink.borrow_mut().push((action.kind(), direction));
        });
        (history, log)
    }

    fn clear_action() -> Action {
        Action::AnnotationClear {
            previous: Vec::new(),
        }
    }

    fn batch_action() -> Action {
        Action::VoxelBatch {
            operations: Vec::new(),
        }
    }

    #[test]
    fn test_empty_history_is_noop() {
        let (mut history, log) = recording_history();
        assert!(!history.can_undo());
        assert!(!history.undo());
        assert!(!history.can_redo());
        assert!(!history.redo());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_undo_then_redo() {
        let (mut history, log) = recording_history();
        history.record(batch_action());
        history.record(clear_action());

        assert!(history.undo());
        assert_eq!(history.undo_len(), 1);
        assert_eq!(history.redo_len(), 1);

        assert!(history.undo());
        assert!(!history.undo());

        assert!(history.redo());
        assert_eq!(history.future().next().map(Action::kind), Some(ActionKind::AnnotationClear));

        assert_eq!(
            *log.borrow(),
            vec![
                (ActionKind::AnnotationClear, Direction::Undo),
                (ActionKind::VoxelBatch, Direction::Undo),
                (ActionKind::VoxelBatch, Direction::Redo),
            ]
        );
    }

    #[test]
    fn test_record_clears_redo() {
        let (mut history, _log) = recording_history();
        history.record(batch_action());
        history.undo();
        assert!(history.can_redo());

        history.record(clear_action());
        assert!(!history.can_redo());
        assert!(!history.redo());
        assert_eq!(history.undo_len(), 1);
    }

    #[test]
    fn test_limit_drops_oldest() {
        let (history, _log) = recording_history();
        let mut history = history.with_limit(Some(2));
        history.record(batch_action());
        history.record(clear_action());
        history.record(clear_action());
        assert_eq!(history.undo_len(), 2);
        assert!(history.past().iter().all(|a| a.kind() == ActionKind::AnnotationClear));
    }

    #[test]
    fn test_clear() {
        let (mut history, _log) = recording_history();
        history.record(batch_action());
        history.record(batch_action());
        history.undo();
        history.clear();
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }
}
