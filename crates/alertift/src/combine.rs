#![forbid(unsafe_code)]

//! Composition of an action's own handler with the shared finally handler.
//!
//! # Invariants
//!
//! - The action's handler runs strictly before the finally handler.
//! - The finally handler runs at most once per [`FinallySlot`], no matter
//!   how many composed callbacks share the slot.
//! - With neither handler present the composed callback is a no-op.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::action::ActionHandler;
use crate::field::TextField;

/// Callback handed to the host for one action. Receives the live fields.
pub type SelectCallback = Box<dyn FnOnce(&[TextField])>;

/// Single-use holder for the finally handler, shared by every composed
/// callback and the dismissal path of one presentation.
#[derive(Clone, Default)]
pub struct FinallySlot {
    handler: Rc<RefCell<Option<Box<dyn FnOnce()>>>>,
}

impl FinallySlot {
    pub fn new(handler: Option<Box<dyn FnOnce()>>) -> Self {
        Self {
            handler: Rc::new(RefCell::new(handler)),
        }
    }

    /// Run the handler if it has not run yet. Returns whether it ran.
    pub fn fire(&self) -> bool {
        // Release the borrow before running so the handler may touch the slot.
        let handler = self.handler.borrow_mut().take();
        match handler {
            Some(handler) => {
                handler();
                true
            }
            None => false,
        }
    }

    /// Whether a handler is still waiting to run.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.handler.borrow().is_some()
    }
}

impl fmt::Debug for FinallySlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FinallySlot")
            .field("armed", &self.is_armed())
            .finish()
    }
}

/// Merge `handler` and the finally slot into one callback for the host.
pub fn combine(handler: ActionHandler, finally: FinallySlot) -> SelectCallback {
    Box::new(move |fields: &[TextField]| {
        match handler {
            ActionHandler::None => {}
            ActionHandler::Plain(f) => f(),
            ActionHandler::WithFields(f) => {
                let fields = (!fields.is_empty()).then(|| fields.to_vec());
                f(fields);
            }
        }
        finally.fire();
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn log() -> Rc<RefCell<Vec<&'static str>>> {
        Rc::new(RefCell::new(Vec::new()))
    }

    #[test]
    fn action_runs_before_finally() {
        let events = log();
        let a = Rc::clone(&events);
        let f = Rc::clone(&events);
        let slot = FinallySlot::new(Some(Box::new(move || f.borrow_mut().push("finally"))));

        let cb = combine(
            ActionHandler::Plain(Box::new(move || a.borrow_mut().push("action"))),
            slot,
        );
        cb(&[]);
        assert_eq!(*events.borrow(), vec!["action", "finally"]);
    }

    #[test]
    fn empty_composition_is_noop() {
        let cb = combine(ActionHandler::None, FinallySlot::default());
        cb(&[]);
    }

    #[test]
    fn finally_alone_still_fires() {
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        let slot = FinallySlot::new(Some(Box::new(move || h.set(h.get() + 1))));
        combine(ActionHandler::None, slot)(&[]);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn shared_slot_fires_once() {
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        let slot = FinallySlot::new(Some(Box::new(move || h.set(h.get() + 1))));

        let first = combine(ActionHandler::None, slot.clone());
        let second = combine(ActionHandler::None, slot.clone());
        first(&[]);
        second(&[]);
        assert_eq!(hits.get(), 1);
        assert!(!slot.is_armed());
    }

    #[test]
    fn with_fields_receives_none_when_empty() {
        let got = Rc::new(Cell::new(None));
        let g = Rc::clone(&got);
        let cb = combine(
            ActionHandler::WithFields(Box::new(move |fields| g.set(Some(fields.is_none())))),
            FinallySlot::default(),
        );
        cb(&[]);
        assert_eq!(got.get(), Some(true));
    }

    #[test]
    fn with_fields_receives_live_handles() {
        let field = TextField::new();
        field.set_text("typed");
        let got = Rc::new(RefCell::new(String::new()));
        let g = Rc::clone(&got);
        let cb = combine(
            ActionHandler::WithFields(Box::new(move |fields| {
                if let Some(fields) = fields {
                    *g.borrow_mut() = fields[0].text();
                }
            })),
            FinallySlot::default(),
        );
        cb(std::slice::from_ref(&field));
        assert_eq!(*got.borrow(), "typed");
    }
}
