#![forbid(unsafe_code)]

//! Text field handles and input-field declarations.
//!
//! A [`TextField`] is the shape the builder needs from a host's text-entry
//! widget: read the current text, receive edits, and notify subscribers.
//! Hosts create one per declared field (see
//! [`PresentationSurface::create_text_field`](crate::PresentationSurface::create_text_field))
//! and mirror their native widget into it.
//!
//! # Invariants
//!
//! 1. Subscribers are notified in registration order.
//! 2. Setting text equal to the current text is a no-op (no notifications).
//! 3. Dropping a [`Subscription`] removes the callback before the next
//!    notification.
//! 4. Notification iterates a snapshot of subscribers, so callbacks may
//!    subscribe, unsubscribe, or read the field without a borrow panic.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

type ChangeCallback = Rc<dyn Fn(&str)>;

struct FieldInner {
    text: RefCell<String>,
    placeholder: RefCell<Option<String>>,
    secure: Cell<bool>,
    subscribers: RefCell<Vec<(u64, ChangeCallback)>>,
    next_subscriber: Cell<u64>,
}

/// Live handle to a text-entry field inside a presented dialog.
///
/// Cloning yields another handle to the same field.
#[derive(Clone)]
pub struct TextField {
    inner: Rc<FieldInner>,
}

impl TextField {
    /// Create an empty field.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Rc::new(FieldInner {
                text: RefCell::new(String::new()),
                placeholder: RefCell::new(None),
                secure: Cell::new(false),
                subscribers: RefCell::new(Vec::new()),
                next_subscriber: Cell::new(0),
            }),
        }
    }

    /// Current text.
    #[must_use]
    pub fn text(&self) -> String {
        self.inner.text.borrow().clone()
    }

    /// Run `f` against the current text without cloning it.
    pub fn with_text<R>(&self, f: impl FnOnce(&str) -> R) -> R {
        f(&self.inner.text.borrow())
    }

    /// Replace the text, notifying subscribers when it changed.
    pub fn set_text(&self, text: impl Into<String>) {
        let text = text.into();
        {
            let mut current = self.inner.text.borrow_mut();
            if *current == text {
                return;
            }
            current.clone_from(&text);
        }
        self.notify(&text);
    }

    #[must_use]
    pub fn placeholder(&self) -> Option<String> {
        self.inner.placeholder.borrow().clone()
    }

    pub fn set_placeholder(&self, placeholder: impl Into<String>) {
        *self.inner.placeholder.borrow_mut() = Some(placeholder.into());
    }

    /// Whether the host should mask typed characters.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.inner.secure.get()
    }

    pub fn set_secure(&self, secure: bool) {
        self.inner.secure.set(secure);
    }

    /// Subscribe to text changes. The callback runs until the returned
    /// [`Subscription`] is dropped.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe(&self, callback: impl Fn(&str) + 'static) -> Subscription {
        let id = self.inner.next_subscriber.get();
        self.inner.next_subscriber.set(id + 1);
        self.inner
            .subscribers
            .borrow_mut()
            .push((id, Rc::new(callback)));
        Subscription {
            field: Rc::downgrade(&self.inner),
            id,
        }
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.borrow().len()
    }

    /// Non-owning handle, used by callbacks stored inside the field itself.
    #[must_use]
    pub fn downgrade(&self) -> WeakTextField {
        WeakTextField {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Whether two handles refer to the same field.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    fn notify(&self, text: &str) {
        let snapshot: Vec<ChangeCallback> = self
            .inner
            .subscribers
            .borrow()
            .iter()
            .map(|(_, cb)| Rc::clone(cb))
            .collect();
        for callback in snapshot {
            callback(text);
        }
    }
}

impl Default for TextField {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TextField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextField")
            .field("text", &*self.inner.text.borrow())
            .field("placeholder", &*self.inner.placeholder.borrow())
            .field("secure", &self.inner.secure.get())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// Weak counterpart of [`TextField`].
#[derive(Clone, Debug)]
pub struct WeakTextField {
    inner: Weak<FieldInner>,
}

impl WeakTextField {
    #[must_use]
    pub fn upgrade(&self) -> Option<TextField> {
        self.inner.upgrade().map(|inner| TextField { inner })
    }
}

/// RAII guard for a text-change subscription.
#[must_use = "dropping the subscription unsubscribes immediately"]
pub struct Subscription {
    field: Weak<FieldInner>,
    id: u64,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(field) = self.field.upgrade() {
            field.subscribers.borrow_mut().retain(|(id, _)| *id != self.id);
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

/// Callback run once against a freshly created field.
pub type ConfigureField = Box<dyn FnOnce(&TextField)>;

/// A requested input field. Its position in the builder is its identity.
#[derive(Default)]
pub struct InputFieldSpec {
    configure: Option<ConfigureField>,
}

impl InputFieldSpec {
    pub fn new(configure: Option<ConfigureField>) -> Self {
        Self { configure }
    }

    /// Consume the declaration, running the configure callback against `field`.
    pub(crate) fn configure(self, field: &TextField) {
        if let Some(configure) = self.configure {
            configure(field);
        }
    }
}

impl fmt::Debug for InputFieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputFieldSpec")
            .field("configure", &self.configure.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_text_notifies_subscribers_in_order() {
        let field = TextField::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        let l1 = Rc::clone(&log);
        let _a = field.subscribe(move |t| l1.borrow_mut().push(format!("a:{t}")));
        let l2 = Rc::clone(&log);
        let _b = field.subscribe(move |t| l2.borrow_mut().push(format!("b:{t}")));

        field.set_text("hi");
        assert_eq!(*log.borrow(), vec!["a:hi", "b:hi"]);
    }

    #[test]
    fn unchanged_text_is_silent() {
        let field = TextField::new();
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        let _sub = field.subscribe(move |_| h.set(h.get() + 1));

        field.set_text("x");
        field.set_text("x");
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn dropping_subscription_unsubscribes() {
        let field = TextField::new();
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        let sub = field.subscribe(move |_| h.set(h.get() + 1));
        assert_eq!(field.subscriber_count(), 1);

        drop(sub);
        assert_eq!(field.subscriber_count(), 0);
        field.set_text("ignored");
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn callback_may_read_field_during_notification() {
        let field = TextField::new();
        let weak = field.downgrade();
        let seen = Rc::new(RefCell::new(String::new()));
        let s = Rc::clone(&seen);
        let _sub = field.subscribe(move |_| {
            if let Some(field) = weak.upgrade() {
                *s.borrow_mut() = field.text();
            }
        });

        field.set_text("abc");
        assert_eq!(*seen.borrow(), "abc");
    }

    #[test]
    fn subscription_outliving_field_is_harmless() {
        let field = TextField::new();
        let sub = field.subscribe(|_| {});
        drop(field);
        drop(sub);
    }

    #[test]
    fn clones_share_identity() {
        let field = TextField::new();
        let clone = field.clone();
        assert!(field.ptr_eq(&clone));
        assert!(!field.ptr_eq(&TextField::new()));

        clone.set_text("shared");
        assert_eq!(field.text(), "shared");
        assert!(field.downgrade().upgrade().is_some_and(|f| f.ptr_eq(&field)));
    }

    #[test]
    fn attributes_round_trip() {
        let field = TextField::new();
        field.set_placeholder("Password");
        field.set_secure(true);
        assert_eq!(field.placeholder().as_deref(), Some("Password"));
        assert!(field.is_secure());
    }

    #[test]
    fn configure_runs_once_on_consume() {
        let runs = Rc::new(Cell::new(0));
        let r = Rc::clone(&runs);
        let spec = InputFieldSpec::new(Some(Box::new(move |field: &TextField| {
            r.set(r.get() + 1);
            field.set_placeholder("Name");
        })));
        let field = TextField::new();
        spec.configure(&field);
        assert_eq!(runs.get(), 1);
        assert_eq!(field.placeholder().as_deref(), Some("Name"));
    }
}
