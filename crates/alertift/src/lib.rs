#![forbid(unsafe_code)]

//! Fluent builder for modal alerts and action sheets.
//!
//! An [`AlertBuilder`] collects a title and message, actions, text fields,
//! a text-change handler and a finally handler, then hands the assembled
//! [`NativeDialog`] to a [`PresentationSurface`]. The surface draws it and
//! later resolves it exactly once, by selecting an action or dismissing.
//!
//! Per resolution the builder guarantees:
//!
//! 1. At most one action handler runs, at most once.
//! 2. The finally handler runs exactly once, right after the chosen
//!    action's own handler. On dismissal without a selection it runs only
//!    when the host reports dismissals
//!    ([`HostCapabilities::REPORTS_DISMISSAL`]).
//! 3. At most one action is preferred (last one wins).
//! 4. Field configure callbacks run once each, in registration order,
//!    before the host presents.
//! 5. Text-change notifications carry the field's registration index.
//!
//! Everything is single-threaded (`Rc`-based) and driven by the host's
//! event loop; nothing here blocks or spawns.

pub mod action;
pub mod adapter;
pub mod builder;
pub mod combine;
pub mod config;
pub mod error;
pub mod field;
pub mod surface;

pub use action::{Action, ActionHandler, ActionStyle, EnabledPredicate};
pub use adapter::FieldChangeHandler;
pub use builder::{AlertBuilder, AlertKind};
pub use combine::{FinallySlot, SelectCallback, combine};
pub use config::{Anchor, HostCapabilities, PresentationConfig};
pub use error::AlertError;
pub use field::{InputFieldSpec, Subscription, TextField, WeakTextField};
pub use surface::{
    Completion, NativeAction, NativeDialog, PresentationSurface, clear_default_surface,
    has_default_surface, set_default_surface,
};
