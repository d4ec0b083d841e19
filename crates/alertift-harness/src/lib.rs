#![forbid(unsafe_code)]

//! Test harness for Alertift.
//!
//! - [`HeadlessHost`]: a presentation surface with no screen. Tests drive
//!   it the way a user would (finish the transition, type, tap an action,
//!   tap outside) and inspect what it was asked to show.
//! - [`Recorder`]: ordered log of callback invocations.
//! - [`render_text`]: plain-text rendering of a dialog for inline snapshots.
//! - [`TraceCapture`]: collects `tracing` events emitted while a closure runs.

mod capture;
mod headless;
mod recorder;
mod render;

pub use capture::{CapturedEvent, TraceCapture};
pub use headless::{HeadlessHost, HeadlessSurface};
pub use recorder::Recorder;
pub use render::render_text;
