#![forbid(unsafe_code)]

//! Presentation options and host capability flags.

use bitflags::bitflags;

bitflags! {
    /// What a presentation surface can do beyond the baseline.
    ///
    /// The baseline host presents alerts with text fields and action
    /// sheets without them, and does not report dismissals.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct HostCapabilities: u8 {
        /// Action sheets may embed text fields.
        const SHEET_TEXT_FIELDS = 0b0001;
        /// The host tells the dialog when it is dismissed without a
        /// selection, so the finally handler can run.
        const REPORTS_DISMISSAL = 0b0010;
        /// Action sheets must be anchored to a source rectangle.
        const REQUIRES_SHEET_ANCHOR = 0b0100;
    }
}

impl Default for HostCapabilities {
    fn default() -> Self {
        Self::empty()
    }
}

/// Presentation configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PresentationConfig {
    /// Animate the presentation transition.
    pub animated: bool,
    /// Allow the host to dismiss an action sheet when the user taps outside it.
    pub dismiss_on_outside_tap: bool,
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            animated: true,
            dismiss_on_outside_tap: true,
        }
    }
}

impl PresentationConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether the transition is animated.
    #[must_use]
    pub fn animated(mut self, animated: bool) -> Self {
        self.animated = animated;
        self
    }

    /// Set whether tapping outside an action sheet dismisses it.
    #[must_use]
    pub fn dismiss_on_outside_tap(mut self, dismiss: bool) -> Self {
        self.dismiss_on_outside_tap = dismiss;
        self
    }
}

/// Source rectangle an action sheet is anchored to, in host coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Anchor {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Anchor {
    #[must_use]
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}
