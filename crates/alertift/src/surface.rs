#![forbid(unsafe_code)]

//! The host side: presentation surfaces and the dialog descriptor they receive.
//!
//! A [`PresentationSurface`] is whatever actually draws the dialog. It
//! receives a [`NativeDialog`] from [`AlertBuilder::show_on`](crate::AlertBuilder::show_on),
//! renders it, and later reports exactly one outcome by consuming the
//! dialog through [`NativeDialog::select`] or [`NativeDialog::dismiss`].
//!
//! # Invariants
//!
//! - A dialog resolves at most once: both outcomes take `self` by value.
//! - Field subscriptions are owned by the dialog and released with it, so
//!   no builder callback outlives the presentation.
//! - `dismiss` runs the finally handler only when the surface advertised
//!   [`HostCapabilities::REPORTS_DISMISSAL`] at show time.
//!
//! # Failure Modes
//!
//! - `select` with an out-of-range or disabled index hands the dialog back
//!   in `Err` and fires nothing.
//! - Dropping a dialog without resolving it fires nothing.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use web_time::Instant;

use crate::action::ActionStyle;
use crate::builder::AlertKind;
use crate::combine::{FinallySlot, SelectCallback};
use crate::config::{Anchor, HostCapabilities, PresentationConfig};
use crate::error::AlertError;
use crate::field::{Subscription, TextField};

/// Callback run once the presentation transition completes.
pub type Completion = Box<dyn FnOnce()>;

/// A host able to present dialogs.
pub trait PresentationSurface {
    /// Optional behaviors this host supports.
    fn capabilities(&self) -> HostCapabilities {
        HostCapabilities::empty()
    }

    /// Whether the surface is attached to a container it can present on.
    fn is_attached(&self) -> bool {
        true
    }

    /// Create the live field for the input declared at `index`.
    ///
    /// Called in registration order during `show`, before `present`.
    fn create_text_field(&mut self, index: usize) -> TextField {
        let _ = index;
        TextField::new()
    }

    /// Host-level checks on the assembled dialog.
    ///
    /// # Errors
    ///
    /// Returns a human-readable reason when the host cannot present `dialog`.
    fn validate(&self, dialog: &NativeDialog) -> Result<(), String> {
        let _ = dialog;
        Ok(())
    }

    /// Take ownership of `dialog` and start presenting it. `completion`
    /// must run once the transition finishes.
    fn present(&mut self, dialog: NativeDialog, completion: Option<Completion>);
}

/// One action as the host sees it.
pub struct NativeAction {
    pub(crate) label: String,
    pub(crate) style: ActionStyle,
    pub(crate) preferred: bool,
    pub(crate) enabled: Rc<Cell<bool>>,
    pub(crate) on_select: SelectCallback,
}

impl NativeAction {
    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[inline]
    pub fn style(&self) -> ActionStyle {
        self.style
    }

    /// Whether the host should emphasize this action as the default choice.
    #[inline]
    pub fn is_preferred(&self) -> bool {
        self.preferred
    }

    /// Current enabled state; changes as fields are edited.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled.get()
    }
}

impl fmt::Debug for NativeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeAction")
            .field("label", &self.label)
            .field("style", &self.style)
            .field("preferred", &self.preferred)
            .field("enabled", &self.enabled.get())
            .finish()
    }
}

/// The assembled dialog handed to a [`PresentationSurface`].
pub struct NativeDialog {
    pub(crate) kind: AlertKind,
    pub(crate) title: Option<String>,
    pub(crate) message: Option<String>,
    pub(crate) actions: Vec<NativeAction>,
    pub(crate) fields: Vec<TextField>,
    pub(crate) anchor: Option<Anchor>,
    pub(crate) config: PresentationConfig,
    pub(crate) on_dismiss: Option<FinallySlot>,
    pub(crate) _subscriptions: Vec<Subscription>,
    pub(crate) created_at: Instant,
}

impl NativeDialog {
    #[inline]
    pub fn kind(&self) -> AlertKind {
        self.kind
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn set_title(&mut self, title: Option<String>) {
        self.title = title;
    }

    pub fn set_message(&mut self, message: Option<String>) {
        self.message = message;
    }

    /// Actions in presentation order.
    pub fn actions(&self) -> &[NativeAction] {
        &self.actions
    }

    /// Live fields in registration order.
    pub fn fields(&self) -> &[TextField] {
        &self.fields
    }

    pub fn anchor(&self) -> Option<Anchor> {
        self.anchor
    }

    pub fn config(&self) -> PresentationConfig {
        self.config
    }

    pub fn config_mut(&mut self) -> &mut PresentationConfig {
        &mut self.config
    }

    /// Index of the preferred action, if any.
    pub fn preferred_index(&self) -> Option<usize> {
        self.actions.iter().position(|a| a.preferred)
    }

    /// Whether dismissing without a selection will run the finally handler.
    pub fn reports_dismissal(&self) -> bool {
        self.on_dismiss.is_some()
    }

    /// Resolve the dialog by choosing the action at `index`.
    ///
    /// Runs the action's own handler, then the finally handler.
    ///
    /// # Errors
    ///
    /// Returns the dialog unchanged when `index` is out of range or the
    /// action is currently disabled.
    pub fn select(mut self, index: usize) -> Result<(), Self> {
        let Some(action) = self.actions.get(index) else {
            tracing::warn!(index, actions = self.actions.len(), "select out of range");
            return Err(self);
        };
        if !action.is_enabled() {
            tracing::debug!(index, label = %action.label, "select ignored: action disabled");
            return Err(self);
        }

        let action = self.actions.swap_remove(index);
        tracing::debug!(
            index,
            label = %action.label,
            elapsed_ms = self.created_at.elapsed().as_millis() as u64,
            "alert action selected"
        );
        (action.on_select)(self.fields.as_slice());
        Ok(())
    }

    /// Resolve the dialog without a selection.
    pub fn dismiss(self) {
        let elapsed_ms = self.created_at.elapsed().as_millis() as u64;
        match &self.on_dismiss {
            Some(finally) => {
                tracing::debug!(elapsed_ms, "alert dismissed");
                finally.fire();
            }
            None => {
                tracing::debug!(elapsed_ms, "alert dismissed; host does not report dismissal");
            }
        }
    }
}

impl fmt::Debug for NativeDialog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeDialog")
            .field("kind", &self.kind)
            .field("title", &self.title)
            .field("message", &self.message)
            .field("actions", &self.actions)
            .field("fields", &self.fields.len())
            .field("anchor", &self.anchor)
            .field("config", &self.config)
            .field("reports_dismissal", &self.on_dismiss.is_some())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Default surface
// ---------------------------------------------------------------------------

thread_local! {
    static DEFAULT_SURFACE: RefCell<Option<Rc<RefCell<dyn PresentationSurface>>>> =
        const { RefCell::new(None) };
}

/// Register the surface [`AlertBuilder::show`](crate::AlertBuilder::show)
/// presents on for the current thread, replacing any previous one.
pub fn set_default_surface(surface: Rc<RefCell<dyn PresentationSurface>>) {
    DEFAULT_SURFACE.with(|slot| *slot.borrow_mut() = Some(surface));
}

/// Remove the current thread's default surface.
pub fn clear_default_surface() {
    DEFAULT_SURFACE.with(|slot| slot.borrow_mut().take());
}

/// Whether a default surface is registered on this thread.
pub fn has_default_surface() -> bool {
    DEFAULT_SURFACE.with(|slot| slot.borrow().is_some())
}

pub(crate) fn with_default_surface<R>(
    f: impl FnOnce(&mut dyn PresentationSurface) -> R,
) -> Result<R, AlertError> {
    let surface = DEFAULT_SURFACE
        .with(|slot| slot.borrow().clone())
        .ok_or(AlertError::NoPresentingSurface)?;
    let mut surface = surface
        .try_borrow_mut()
        .map_err(|_| AlertError::SurfaceBusy)?;
    Ok(f(&mut *surface))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::ActionHandler;
    use crate::combine::combine;

    fn dialog_with(
        actions: Vec<(&str, SelectCallback, bool)>,
        dismiss: Option<FinallySlot>,
    ) -> NativeDialog {
        NativeDialog {
            kind: AlertKind::Alert,
            title: Some("T".into()),
            message: None,
            actions: actions
                .into_iter()
                .map(|(label, on_select, enabled)| NativeAction {
                    label: label.into(),
                    style: ActionStyle::Default,
                    preferred: false,
                    enabled: Rc::new(Cell::new(enabled)),
                    on_select,
                })
                .collect(),
            fields: Vec::new(),
            anchor: None,
            config: PresentationConfig::default(),
            on_dismiss: dismiss,
            _subscriptions: Vec::new(),
            created_at: Instant::now(),
        }
    }

    fn counter() -> (Rc<Cell<u32>>, SelectCallback) {
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        let cb = combine(
            ActionHandler::Plain(Box::new(move || h.set(h.get() + 1))),
            FinallySlot::default(),
        );
        (hits, cb)
    }

    #[test]
    fn select_fires_chosen_action_only() {
        let (a_hits, a) = counter();
        let (b_hits, b) = counter();
        let dialog = dialog_with(vec![("A", a, true), ("B", b, true)], None);
        assert!(dialog.select(1).is_ok());
        assert_eq!(a_hits.get(), 0);
        assert_eq!(b_hits.get(), 1);
    }

    #[test]
    fn out_of_range_returns_dialog() {
        let (hits, a) = counter();
        let dialog = dialog_with(vec![("A", a, true)], None);
        let dialog = dialog.select(5).expect_err("out of range");
        assert_eq!(hits.get(), 0);
        assert!(dialog.select(0).is_ok());
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn disabled_action_cannot_be_selected() {
        let (hits, a) = counter();
        let dialog = dialog_with(vec![("A", a, false)], None);
        assert!(dialog.select(0).is_err());
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn dismiss_fires_finally_only_when_reported() {
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        let slot = FinallySlot::new(Some(Box::new(move || h.set(h.get() + 1))));

        dialog_with(Vec::new(), None).dismiss();
        assert_eq!(hits.get(), 0);

        dialog_with(Vec::new(), Some(slot)).dismiss();
        assert_eq!(hits.get(), 1);
    }

    struct Inert;

    impl PresentationSurface for Inert {
        fn present(&mut self, _dialog: NativeDialog, _completion: Option<Completion>) {}
    }

    #[test]
    fn default_surface_lifecycle() {
        clear_default_surface();
        assert!(!has_default_surface());
        assert_eq!(
            with_default_surface(|_| ()).unwrap_err(),
            AlertError::NoPresentingSurface
        );

        let surface: Rc<RefCell<Inert>> = Rc::new(RefCell::new(Inert));
        set_default_surface(surface.clone());
        assert!(has_default_surface());
        assert!(with_default_surface(|_| ()).is_ok());

        let held = surface.borrow_mut();
        assert_eq!(
            with_default_surface(|_| ()).unwrap_err(),
            AlertError::SurfaceBusy
        );
        drop(held);
        clear_default_surface();
    }
}
