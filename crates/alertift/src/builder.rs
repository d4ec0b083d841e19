#![forbid(unsafe_code)]

//! The chainable alert / action-sheet builder.
//!
//! # Example
//!
//! ```
//! use alertift::{Action, AlertBuilder, NativeDialog, PresentationSurface, Completion};
//!
//! struct Screen(Option<NativeDialog>);
//!
//! impl PresentationSurface for Screen {
//!     fn present(&mut self, dialog: NativeDialog, _completion: Option<Completion>) {
//!         self.0 = Some(dialog);
//!     }
//! }
//!
//! let mut screen = Screen(None);
//! AlertBuilder::alert(Some("Delete?"), None)
//!     .cancel("Cancel")
//!     .action(Action::destructive("Delete"), || println!("deleted"))
//!     .finally(|| println!("done"))
//!     .show_on(&mut screen, None)?;
//!
//! let dialog = screen.0.take().expect("presented");
//! assert_eq!(dialog.actions()[1].label(), "Delete");
//! # Ok::<(), alertift::AlertError>(())
//! ```
//!
//! # Invariants
//!
//! - Actions are presented in registration order; nothing is reordered
//!   or deduplicated.
//! - At most one action is preferred: the last one registered with
//!   [`Action::preferred`].
//! - Field index `i` in change notifications is the `i`-th
//!   [`text_field`](AlertBuilder::text_field) call.
//! - The finally handler is a single slot; setting it again replaces it.
//! - `show` consumes the builder. One builder is one presentation.
//!
//! # Failure Modes
//!
//! Configuration never fails. `show` / `show_on` report violated
//! preconditions as [`AlertError`] before anything reaches the host.

use std::fmt;
use std::rc::Rc;

use crate::action::{Action, ActionHandler, ActionStyle, RegisteredAction};
use crate::adapter::{self, DialogParts, FieldChangeHandler};
use crate::config::{Anchor, HostCapabilities, PresentationConfig};
use crate::error::AlertError;
use crate::field::{InputFieldSpec, TextField};
use crate::surface::{self, Completion, NativeDialog, PresentationSurface};

/// Presentation style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AlertKind {
    /// Centered modal alert.
    #[default]
    Alert,
    /// List of actions, usually anchored to the element that triggered it.
    ActionSheet,
}

type Customize = Box<dyn FnOnce(&mut NativeDialog)>;

/// Fluent builder for one alert or action sheet.
pub struct AlertBuilder {
    kind: AlertKind,
    title: Option<String>,
    message: Option<String>,
    actions: Vec<RegisteredAction>,
    preferred: Option<usize>,
    fields: Vec<InputFieldSpec>,
    on_field_change: Option<FieldChangeHandler>,
    finally: Option<Box<dyn FnOnce()>>,
    config: PresentationConfig,
    anchor: Option<Anchor>,
    customize: Option<Customize>,
}

impl AlertBuilder {
    /// Create a builder of the given kind.
    ///
    /// Title and message are fixed here; pass `None` to omit either.
    pub fn new(kind: AlertKind, title: Option<&str>, message: Option<&str>) -> Self {
        Self {
            kind,
            title: title.map(str::to_owned),
            message: message.map(str::to_owned),
            actions: Vec::new(),
            preferred: None,
            fields: Vec::new(),
            on_field_change: None,
            finally: None,
            config: PresentationConfig::default(),
            anchor: None,
            customize: None,
        }
    }

    /// Create a centered modal alert.
    pub fn alert(title: Option<&str>, message: Option<&str>) -> Self {
        Self::new(AlertKind::Alert, title, message)
    }

    /// Create an action sheet.
    pub fn action_sheet(title: Option<&str>, message: Option<&str>) -> Self {
        Self::new(AlertKind::ActionSheet, title, message)
    }

    fn register(mut self, action: Action, handler: ActionHandler) -> Self {
        if action.is_preferred() {
            self.preferred = Some(self.actions.len());
        }
        self.actions.push(RegisteredAction { action, handler });
        self
    }

    /// Add an action whose handler takes no arguments.
    ///
    /// `on_select` runs when the user chooses this action, before the
    /// finally handler.
    pub fn action(self, action: Action, on_select: impl FnOnce() + 'static) -> Self {
        self.register(action, ActionHandler::Plain(Box::new(on_select)))
    }

    /// Add an action whose handler receives the live text fields.
    ///
    /// The handler gets `None` when no text fields were registered.
    pub fn action_with_fields(
        self,
        action: Action,
        on_select: impl FnOnce(Option<Vec<TextField>>) + 'static,
    ) -> Self {
        self.register(action, ActionHandler::WithFields(Box::new(on_select)))
    }

    /// Add a cancel action with no handler of its own.
    pub fn cancel(self, label: impl Into<String>) -> Self {
        self.register(Action::cancel(label), ActionHandler::None)
    }

    /// Request a text field. `configure` runs once against the field when
    /// it is created during `show`.
    ///
    /// Use [`plain_text_field`](Self::plain_text_field) for a field that
    /// needs no configuration.
    pub fn text_field(mut self, configure: impl FnOnce(&TextField) + 'static) -> Self {
        self.fields.push(InputFieldSpec::new(Some(Box::new(configure))));
        self
    }

    /// Request a text field with no configuration.
    pub fn plain_text_field(mut self) -> Self {
        self.fields.push(InputFieldSpec::default());
        self
    }

    /// Set the handler for text edits, replacing any previous one.
    ///
    /// It receives the field's registration index and its current text.
    pub fn handle_text_field_change(mut self, handler: impl Fn(usize, &str) + 'static) -> Self {
        self.on_field_change = Some(Rc::new(handler));
        self
    }

    /// Set the handler that runs after whichever action was chosen,
    /// replacing any previous one.
    pub fn finally(mut self, handler: impl FnOnce() + 'static) -> Self {
        self.finally = Some(Box::new(handler));
        self
    }

    pub fn config(mut self, config: PresentationConfig) -> Self {
        self.config = config;
        self
    }

    /// Anchor an action sheet to a source rectangle. Alerts ignore it.
    pub fn anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = Some(anchor);
        self
    }

    /// Adjust the assembled dialog just before it is handed to the host.
    pub fn customize(mut self, f: impl FnOnce(&mut NativeDialog) + 'static) -> Self {
        self.customize = Some(Box::new(f));
        self
    }

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

    /// Registered action labels in presentation order.
    pub fn action_labels(&self) -> Vec<&str> {
        self.actions.iter().map(|a| a.action.label()).collect()
    }

    /// Registered action styles in presentation order.
    pub fn action_styles(&self) -> Vec<ActionStyle> {
        self.actions.iter().map(|a| a.action.style()).collect()
    }

    pub fn preferred_index(&self) -> Option<usize> {
        self.preferred
    }

    pub fn preferred_action(&self) -> Option<&Action> {
        self.preferred.map(|i| &self.actions[i].action)
    }

    pub fn text_field_count(&self) -> usize {
        self.fields.len()
    }

    /// Present on the current thread's default surface.
    ///
    /// See [`show_on`](Self::show_on) for the presentation contract.
    ///
    /// # Errors
    ///
    /// [`AlertError::NoPresentingSurface`] when no default surface is
    /// registered, [`AlertError::SurfaceBusy`] when it is already borrowed,
    /// plus every error of [`show_on`](Self::show_on).
    pub fn show(self, completion: Option<Completion>) -> Result<(), AlertError> {
        surface::with_default_surface(|surface| self.show_on(surface, completion))?
    }

    /// Validate, assemble, and hand the dialog to `surface`.
    ///
    /// `completion` runs when the host finishes the presentation
    /// transition, independent of which action is later chosen.
    ///
    /// The builder is consumed, so it cannot be shown twice:
    ///
    /// ```compile_fail
    /// # use alertift::{AlertBuilder, PresentationSurface, NativeDialog, Completion};
    /// # struct Screen;
    /// # impl PresentationSurface for Screen {
    /// #     fn present(&mut self, _: NativeDialog, _: Option<Completion>) {}
    /// # }
    /// let mut screen = Screen;
    /// let alert = AlertBuilder::alert(Some("Once"), None);
    /// alert.show_on(&mut screen, None).unwrap();
    /// alert.show_on(&mut screen, None).unwrap();
    /// ```
    ///
    /// # Errors
    ///
    /// - [`AlertError::SurfaceDetached`] if the surface cannot present.
    /// - [`AlertError::TextFieldsUnsupported`] for text fields on an action
    ///   sheet when the host lacks [`HostCapabilities::SHEET_TEXT_FIELDS`].
    /// - [`AlertError::MissingAnchor`] for an unanchored action sheet on a
    ///   host with [`HostCapabilities::REQUIRES_SHEET_ANCHOR`].
    /// - [`AlertError::Rejected`] when the host's own validation fails.
    ///   Field configure callbacks have already run in that case.
    pub fn show_on(
        self,
        surface: &mut dyn PresentationSurface,
        completion: Option<Completion>,
    ) -> Result<(), AlertError> {
        let _span = tracing::debug_span!(
            "alert_show",
            kind = ?self.kind,
            actions = self.actions.len(),
            fields = self.fields.len()
        )
        .entered();

        if let Err(err) = self.check_preconditions(surface) {
            tracing::warn!(error = %err, "alert precondition failed");
            return Err(err);
        }

        let customize = self.customize;
        let parts = DialogParts {
            kind: self.kind,
            title: self.title,
            message: self.message,
            actions: self.actions,
            preferred: self.preferred,
            fields: self.fields,
            on_field_change: self.on_field_change,
            finally: self.finally,
            config: self.config,
            anchor: self.anchor,
        };
        let mut dialog = adapter::assemble(parts, surface);
        if let Some(customize) = customize {
            customize(&mut dialog);
        }

        if let Err(reason) = surface.validate(&dialog) {
            tracing::warn!(%reason, "host rejected alert");
            return Err(AlertError::Rejected(reason));
        }

        tracing::debug!(preferred = ?dialog.preferred_index(), "presenting alert");
        surface.present(dialog, completion);
        Ok(())
    }

    fn check_preconditions(&self, surface: &dyn PresentationSurface) -> Result<(), AlertError> {
        if !surface.is_attached() {
            return Err(AlertError::SurfaceDetached);
        }
        let caps = surface.capabilities();
        if self.kind == AlertKind::ActionSheet {
            if !self.fields.is_empty() && !caps.contains(HostCapabilities::SHEET_TEXT_FIELDS) {
                return Err(AlertError::TextFieldsUnsupported {
                    kind: self.kind,
                    requested: self.fields.len(),
                });
            }
            if self.anchor.is_none() && caps.contains(HostCapabilities::REQUIRES_SHEET_ANCHOR) {
                return Err(AlertError::MissingAnchor);
            }
        }
        Ok(())
    }
}

impl fmt::Debug for AlertBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlertBuilder")
            .field("kind", &self.kind)
            .field("title", &self.title)
            .field("message", &self.message)
            .field("actions", &self.actions)
            .field("preferred", &self.preferred)
            .field("fields", &self.fields)
            .field("finally", &self.finally.is_some())
            .field("config", &self.config)
            .field("anchor", &self.anchor)
            .finish()
    }
}
