#![forbid(unsafe_code)]

//! Headless presentation surface.
//!
//! [`HeadlessSurface`] implements [`PresentationSurface`] by holding on to
//! the presented dialog. [`HeadlessHost`] wraps it in `Rc<RefCell<..>>` and
//! plays the user: every interaction takes what it needs out of the surface
//! under a short borrow and releases the borrow before any builder callback
//! runs, so callbacks are free to present follow-up alerts.
//!
//! Host rules it enforces, mirroring common native toolkits:
//!
//! - one dialog at a time (a second presentation is rejected),
//! - at most one cancel-style action per dialog,
//! - animated presentations complete on [`HeadlessHost::finish_transition`];
//!   un-animated ones complete inside [`PresentationSurface::present`].
//!
//! An un-animated completion runs while the surface is still borrowed by
//! the presenting call. On the default surface it may show further alerts
//! (they report [`AlertError::SurfaceBusy`]) but must not query the
//! [`HeadlessHost`]. [`HeadlessHost::show_then`] has no such limit: it
//! keeps the completion itself and runs it after the borrow is released.

use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;

use alertift::{
    ActionStyle, AlertBuilder, AlertError, AlertKind, Completion, HostCapabilities, NativeDialog,
    PresentationSurface, TextField,
};
use unicode_segmentation::UnicodeSegmentation;

use crate::render::render_text;

/// A surface that keeps the presented dialog in memory.
#[derive(Default)]
pub struct HeadlessSurface {
    caps: HostCapabilities,
    detached: bool,
    current: Option<NativeDialog>,
    pending_completion: Option<Completion>,
    presented: usize,
    fields_created: usize,
}

impl HeadlessSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capabilities(caps: HostCapabilities) -> Self {
        Self {
            caps,
            ..Self::default()
        }
    }

    /// Mark the surface as not attached to any container.
    pub fn set_detached(&mut self, detached: bool) {
        self.detached = detached;
    }

    /// The dialog currently on screen.
    #[must_use]
    pub fn dialog(&self) -> Option<&NativeDialog> {
        self.current.as_ref()
    }

    pub fn take_dialog(&mut self) -> Option<NativeDialog> {
        self.current.take()
    }

    /// Put a dialog back on screen after an interaction it refused.
    pub fn restore_dialog(&mut self, dialog: NativeDialog) {
        self.current = Some(dialog);
    }

    pub fn take_completion(&mut self) -> Option<Completion> {
        self.pending_completion.take()
    }

    /// Whether a presentation transition is still running.
    #[must_use]
    pub fn is_transitioning(&self) -> bool {
        self.pending_completion.is_some()
    }

    /// Number of dialogs presented over the surface's lifetime.
    #[must_use]
    pub fn presented_count(&self) -> usize {
        self.presented
    }

    /// Number of text fields created over the surface's lifetime.
    #[must_use]
    pub fn fields_created(&self) -> usize {
        self.fields_created
    }
}

impl fmt::Debug for HeadlessSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeadlessSurface")
            .field("caps", &self.caps)
            .field("detached", &self.detached)
            .field("current", &self.current)
            .field("transitioning", &self.pending_completion.is_some())
            .field("presented", &self.presented)
            .finish()
    }
}

impl PresentationSurface for HeadlessSurface {
    fn capabilities(&self) -> HostCapabilities {
        self.caps
    }

    fn is_attached(&self) -> bool {
        !self.detached
    }

    fn create_text_field(&mut self, index: usize) -> TextField {
        tracing::trace!(index, "headless field");
        self.fields_created += 1;
        TextField::new()
    }

    fn validate(&self, dialog: &NativeDialog) -> Result<(), String> {
        if self.current.is_some() {
            return Err("a dialog is already presented".to_owned());
        }
        let cancels = dialog
            .actions()
            .iter()
            .filter(|a| a.style() == ActionStyle::Cancel)
            .count();
        if cancels > 1 {
            return Err(format!("{cancels} cancel actions; at most one is allowed"));
        }
        Ok(())
    }

    fn present(&mut self, dialog: NativeDialog, completion: Option<Completion>) {
        let animated = dialog.config().animated;
        self.current = Some(dialog);
        self.presented += 1;
        match completion {
            Some(completion) if !animated => completion(),
            completion => self.pending_completion = completion,
        }
    }
}

/// Shared handle to a [`HeadlessSurface`] that simulates user interaction.
#[derive(Clone, Debug, Default)]
pub struct HeadlessHost {
    surface: Rc<RefCell<HeadlessSurface>>,
}

impl HeadlessHost {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capabilities(caps: HostCapabilities) -> Self {
        Self {
            surface: Rc::new(RefCell::new(HeadlessSurface::with_capabilities(caps))),
        }
    }

    /// Register this host as the current thread's default surface.
    pub fn install_as_default(&self) {
        alertift::set_default_surface(self.surface.clone());
    }

    pub fn surface(&self) -> Ref<'_, HeadlessSurface> {
        self.surface.borrow()
    }

    pub fn set_detached(&self, detached: bool) {
        self.surface.borrow_mut().set_detached(detached);
    }

    /// Present `builder` on this host.
    ///
    /// # Errors
    ///
    /// Whatever [`AlertBuilder::show_on`] reports.
    pub fn show(&self, builder: AlertBuilder) -> Result<(), AlertError> {
        builder.show_on(&mut *self.surface.borrow_mut(), None)
    }

    /// Present `builder` with a completion callback.
    ///
    /// The completion never runs under a surface borrow, so it may freely
    /// interact with this host.
    ///
    /// # Errors
    ///
    /// Whatever [`AlertBuilder::show_on`] reports.
    pub fn show_then(
        &self,
        builder: AlertBuilder,
        completion: impl FnOnce() + 'static,
    ) -> Result<(), AlertError> {
        builder.show_on(&mut *self.surface.borrow_mut(), None)?;
        let animated = self
            .surface
            .borrow()
            .dialog()
            .is_some_and(|d| d.config().animated);
        if animated {
            self.surface.borrow_mut().pending_completion = Some(Box::new(completion));
        } else {
            completion();
        }
        Ok(())
    }

    /// Complete a running presentation transition. Returns whether one was running.
    pub fn finish_transition(&self) -> bool {
        let completion = self.surface.borrow_mut().take_completion();
        match completion {
            Some(completion) => {
                completion();
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn is_presenting(&self) -> bool {
        self.surface.borrow().dialog().is_some()
    }

    #[must_use]
    pub fn kind(&self) -> Option<AlertKind> {
        self.surface.borrow().dialog().map(NativeDialog::kind)
    }

    #[must_use]
    pub fn action_labels(&self) -> Vec<String> {
        self.surface
            .borrow()
            .dialog()
            .map(|d| d.actions().iter().map(|a| a.label().to_owned()).collect())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn preferred_index(&self) -> Option<usize> {
        self.surface
            .borrow()
            .dialog()
            .and_then(NativeDialog::preferred_index)
    }

    #[must_use]
    pub fn is_enabled(&self, index: usize) -> Option<bool> {
        self.surface
            .borrow()
            .dialog()
            .and_then(|d| d.actions().get(index).map(|a| a.is_enabled()))
    }

    /// Live handle to the field registered at `index`.
    #[must_use]
    pub fn field(&self, index: usize) -> Option<TextField> {
        self.surface
            .borrow()
            .dialog()
            .and_then(|d| d.fields().get(index).cloned())
    }

    /// Tap the action at `index`. Returns whether the dialog accepted it.
    pub fn select(&self, index: usize) -> bool {
        let Some(dialog) = self.surface.borrow_mut().take_dialog() else {
            return false;
        };
        match dialog.select(index) {
            Ok(()) => true,
            Err(dialog) => {
                self.surface.borrow_mut().restore_dialog(dialog);
                false
            }
        }
    }

    /// Tap the first action labeled `label`.
    pub fn select_label(&self, label: &str) -> bool {
        let index = self.action_labels().iter().position(|l| l == label);
        index.is_some_and(|i| self.select(i))
    }

    /// Dismiss without choosing an action. Returns whether a dialog was shown.
    pub fn dismiss(&self) -> bool {
        let Some(dialog) = self.surface.borrow_mut().take_dialog() else {
            return false;
        };
        dialog.dismiss();
        true
    }

    /// Tap outside the dialog. Only action sheets configured to allow it
    /// are dismissed. Returns whether the dialog was dismissed.
    pub fn tap_outside(&self) -> bool {
        let allowed = self.surface.borrow().dialog().is_some_and(|d| {
            d.kind() == AlertKind::ActionSheet && d.config().dismiss_on_outside_tap
        });
        allowed && self.dismiss()
    }

    /// Type `text` into field `index` one grapheme at a time, producing one
    /// change notification per grapheme.
    pub fn type_text(&self, index: usize, text: &str) -> bool {
        let Some(field) = self.field(index) else {
            return false;
        };
        for grapheme in text.graphemes(true) {
            let next = field.with_text(|current| format!("{current}{grapheme}"));
            field.set_text(next);
        }
        true
    }

    /// Replace the whole text of field `index` in one edit.
    pub fn set_text(&self, index: usize, text: &str) -> bool {
        let Some(field) = self.field(index) else {
            return false;
        };
        field.set_text(text);
        true
    }

    /// Delete the last grapheme of field `index`.
    pub fn backspace(&self, index: usize) -> bool {
        let Some(field) = self.field(index) else {
            return false;
        };
        let next = field.with_text(|current| {
            let cut = current
                .grapheme_indices(true)
                .next_back()
                .map_or(0, |(start, _)| start);
            current[..cut].to_owned()
        });
        field.set_text(next);
        true
    }

    /// Plain-text rendering of the current dialog.
    #[must_use]
    pub fn render(&self) -> Option<String> {
        self.surface.borrow().dialog().map(render_text)
    }
}
