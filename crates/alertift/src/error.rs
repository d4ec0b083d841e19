#![forbid(unsafe_code)]

use crate::builder::AlertKind;

/// Precondition violations reported by [`AlertBuilder::show`](crate::AlertBuilder::show).
///
/// Configuration calls never fail; everything is checked when the alert is
/// about to be handed to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlertError {
    /// Text fields were requested on a presentation kind the host cannot
    /// embed them in.
    TextFieldsUnsupported { kind: AlertKind, requested: usize },
    /// No default surface is registered for this thread.
    NoPresentingSurface,
    /// The target surface is not attached to a visible container.
    SurfaceDetached,
    /// The default surface is already borrowed, e.g. by a callback that
    /// shows another alert while the surface is dispatching.
    SurfaceBusy,
    /// The host requires an anchor for action sheets and none was set.
    MissingAnchor,
    /// The host rejected the assembled dialog.
    Rejected(String),
}

impl std::fmt::Display for AlertError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TextFieldsUnsupported { kind, requested } => {
                write!(
                    f,
                    "{requested} text field(s) requested on {kind:?}, which the host does not support"
                )
            }
            Self::NoPresentingSurface => write!(f, "no presenting surface registered"),
            Self::SurfaceDetached => write!(f, "presenting surface is not attached"),
            Self::SurfaceBusy => write!(f, "presenting surface is busy"),
            Self::MissingAnchor => write!(f, "action sheet requires an anchor on this host"),
            Self::Rejected(reason) => write!(f, "host rejected dialog: {reason}"),
        }
    }
}

impl std::error::Error for AlertError {}
