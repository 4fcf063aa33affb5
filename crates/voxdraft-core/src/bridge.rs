//! Observer bus connecting the history to the stores.
//!
//! The history does not know which store owns an action. It hands every
//! undone or redone action to an [`ActionBus`], which forwards it to each
//! subscribed [`ActionListener`] whose domain matches.

use crate::action::{Action, ActionDomain};
use crate::history::Direction;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// A store that can restore its own state from an action.
pub trait ActionListener {
    /// The actions this listener owns.
    fn domain(&self) -> ActionDomain;

    /// Restore the state recorded as "previous" in `action`.
    fn apply_action(&mut self, action: &Action);
}

/// Shared handle to a subscribed listener.
pub type SharedListener = Rc<RefCell<dyn ActionListener>>;

/// Broadcasts history events to subscribed stores.
///
/// Clones share the same subscriber list, so a clone can be moved into the
/// history's apply callback while the original keeps accepting subscribers.
#[derive(Clone, Default)]
pub struct ActionBus {
    listeners: Rc<RefCell<Vec<SharedListener>>>,
}

impl fmt::Debug for ActionBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionBus")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl ActionBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. It receives every later dispatch in its domain.
    pub fn subscribe(&self, listener: SharedListener) {
        self.listeners.borrow_mut().push(listener);
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Deliver an action to every listener owning its domain.
    ///
    /// Redo is delivered as the inverse action, so listeners only ever
    /// restore "previous" state.
    pub fn dispatch(&self, action: &Action, direction: Direction) {
        let inverted;
        let action = match direction {
            Direction::Undo => action,
            Direction::Redo => {
                inverted = action.invert();
                &inverted
            }
        };

        let domain = action.domain();
        let listeners = self.listeners.borrow();
        let mut delivered = 0;
        for listener in listeners.iter() {
            let mut listener = listener.borrow_mut();
            if listener.domain() == domain {
                listener.apply_action(action);
                delivered += 1;
            }
        }
        if delivered == 0 {
            log::warn!("No listener for {} action", action.kind());
        }
    }
}
