#![forbid(unsafe_code)]

//! Action values and the handlers attached to them at registration.

use std::fmt;
use std::rc::Rc;

use crate::field::TextField;

/// Visual and semantic style of an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ActionStyle {
    /// Regular choice.
    #[default]
    Default,
    /// Choice that destroys or discards data.
    Destructive,
    /// Choice that backs out without changes.
    Cancel,
}

/// Predicate deciding whether an action is enabled, given the live fields.
pub type EnabledPredicate = Rc<dyn Fn(&[TextField]) -> bool>;

/// A labeled, styled choice offered by an alert or action sheet.
///
/// `Action` only describes the choice. The callback is attached when the
/// action is registered on an [`AlertBuilder`](crate::AlertBuilder).
#[derive(Clone)]
pub struct Action {
    style: ActionStyle,
    label: String,
    preferred: bool,
    enabled_when: Option<EnabledPredicate>,
}

impl Action {
    /// Create an action with an explicit style.
    pub fn new(style: ActionStyle, label: impl Into<String>) -> Self {
        Self {
            style,
            label: label.into(),
            preferred: false,
            enabled_when: None,
        }
    }

    /// Create a default-style action.
    pub fn default_style(label: impl Into<String>) -> Self {
        Self::new(ActionStyle::Default, label)
    }

    /// Create a destructive action.
    pub fn destructive(label: impl Into<String>) -> Self {
        Self::new(ActionStyle::Destructive, label)
    }

    /// Create a cancel action.
    pub fn cancel(label: impl Into<String>) -> Self {
        Self::new(ActionStyle::Cancel, label)
    }

    /// Request that this action become the preferred action.
    ///
    /// Only one action of a builder is preferred; the most recently
    /// registered preferred action wins.
    #[must_use]
    pub fn preferred(mut self) -> Self {
        self.preferred = true;
        self
    }

    /// Enable this action only while `predicate` holds for the live fields.
    ///
    /// The predicate is evaluated after the fields are created and again
    /// after every text change.
    #[must_use]
    pub fn enabled_when(mut self, predicate: impl Fn(&[TextField]) -> bool + 'static) -> Self {
        self.enabled_when = Some(Rc::new(predicate));
        self
    }

    #[inline]
    pub fn style(&self) -> ActionStyle {
        self.style
    }

    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[inline]
    pub fn is_preferred(&self) -> bool {
        self.preferred
    }

    pub(crate) fn enabled_predicate(&self) -> Option<&EnabledPredicate> {
        self.enabled_when.as_ref()
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("style", &self.style)
            .field("label", &self.label)
            .field("preferred", &self.preferred)
            .field("conditional", &self.enabled_when.is_some())
            .finish()
    }
}

/// The callback attached to an action at registration time.
///
/// Exactly one form is attached per action.
pub enum ActionHandler {
    /// No action-specific callback; only the finally handler runs.
    None,
    /// Callback taking no arguments.
    Plain(Box<dyn FnOnce()>),
    /// Callback receiving the live text fields, `None` when none were registered.
    WithFields(Box<dyn FnOnce(Option<Vec<TextField>>)>),
}

impl fmt::Debug for ActionHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let form = match self {
            Self::None => "None",
            Self::Plain(_) => "Plain",
            Self::WithFields(_) => "WithFields",
        };
        f.write_str(form)
    }
}

/// An action together with its handler, as stored by the builder.
#[derive(Debug)]
pub(crate) struct RegisteredAction {
    pub(crate) action: Action,
    pub(crate) handler: ActionHandler,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_style() {
        assert_eq!(Action::default_style("OK").style(), ActionStyle::Default);
        assert_eq!(
            Action::destructive("Delete").style(),
            ActionStyle::Destructive
        );
        assert_eq!(Action::cancel("Cancel").style(), ActionStyle::Cancel);
    }

    #[test]
    fn preferred_is_opt_in() {
        let plain = Action::default_style("OK");
        assert!(!plain.is_preferred());
        assert!(plain.preferred().is_preferred());
    }

    #[test]
    fn debug_hides_predicate_body() {
        let action = Action::default_style("Save").enabled_when(|_| true);
        let rendered = format!("{action:?}");
        assert!(rendered.contains("conditional: true"));
        assert!(rendered.contains("\"Save\""));
    }

    #[test]
    fn handler_debug_names_form() {
        assert_eq!(format!("{:?}", ActionHandler::None), "None");
        assert_eq!(
            format!("{:?}", ActionHandler::Plain(Box::new(|| {}))),
            "Plain"
        );
    }
}
