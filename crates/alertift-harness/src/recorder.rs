#![forbid(unsafe_code)]

use std::cell::RefCell;
use std::rc::Rc;

/// Shared, ordered log of named events.
///
/// Clones share the same log, so a recorder can be captured by any number
/// of callbacks and inspected afterwards.
#[derive(Clone, Debug, Default)]
pub struct Recorder {
    events: Rc<RefCell<Vec<String>>>,
}

impl Recorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, event: impl Into<String>) {
        self.events.borrow_mut().push(event.into());
    }

    /// A one-shot callback that records `event` when called.
    pub fn hook(&self, event: impl Into<String>) -> Box<dyn FnOnce()> {
        let this = self.clone();
        let event = event.into();
        Box::new(move || this.record(event))
    }

    /// A reusable callback that records `event` on every call.
    pub fn hook_fn(&self, event: impl Into<String>) -> Box<dyn Fn()> {
        let this = self.clone();
        let event = event.into();
        Box::new(move || this.record(event.clone()))
    }

    #[must_use]
    pub fn events(&self) -> Vec<String> {
        self.events.borrow().clone()
    }

    /// How many times `event` was recorded.
    #[must_use]
    pub fn count(&self, event: &str) -> usize {
        self.events.borrow().iter().filter(|e| *e == event).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}
