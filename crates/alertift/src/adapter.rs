#![forbid(unsafe_code)]

//! Translation from builder state into a [`NativeDialog`].
//!
//! The adapter creates fields through the host, runs configure callbacks,
//! composes action callbacks, and routes field edits back to the builder's
//! change handler tagged with the field's registration index. It makes no
//! decisions of its own; preconditions are checked by the builder first.

use std::cell::Cell;
use std::rc::Rc;

use web_time::Instant;

use crate::action::{EnabledPredicate, RegisteredAction};
use crate::builder::AlertKind;
use crate::combine::{FinallySlot, combine};
use crate::config::{Anchor, HostCapabilities, PresentationConfig};
use crate::field::{InputFieldSpec, TextField, WeakTextField};
use crate::surface::{NativeAction, NativeDialog, PresentationSurface};

/// Shared change handler: `(registration index, current text)`.
pub type FieldChangeHandler = Rc<dyn Fn(usize, &str)>;

/// Everything the builder hands over at show time.
pub(crate) struct DialogParts {
    pub(crate) kind: AlertKind,
    pub(crate) title: Option<String>,
    pub(crate) message: Option<String>,
    pub(crate) actions: Vec<RegisteredAction>,
    pub(crate) preferred: Option<usize>,
    pub(crate) fields: Vec<InputFieldSpec>,
    pub(crate) on_field_change: Option<FieldChangeHandler>,
    pub(crate) finally: Option<Box<dyn FnOnce()>>,
    pub(crate) config: PresentationConfig,
    pub(crate) anchor: Option<Anchor>,
}

/// An enabled predicate bound to the flag the host reads.
struct Gate {
    predicate: EnabledPredicate,
    enabled: Rc<Cell<bool>>,
}

fn refresh_gates(gates: &[Gate], fields: &[TextField]) {
    for gate in gates {
        gate.enabled.set((gate.predicate)(fields));
    }
}

fn upgrade_all(fields: &[WeakTextField]) -> Vec<TextField> {
    fields.iter().filter_map(WeakTextField::upgrade).collect()
}

/// Build the host-facing dialog for `parts` on `surface`.
pub(crate) fn assemble(parts: DialogParts, surface: &mut dyn PresentationSurface) -> NativeDialog {
    let DialogParts {
        kind,
        title,
        message,
        actions,
        preferred,
        fields: field_specs,
        on_field_change,
        finally,
        config,
        anchor,
    } = parts;

    // Fields first: configure callbacks run in registration order before
    // anything is visible.
    let mut fields = Vec::with_capacity(field_specs.len());
    for (index, spec) in field_specs.into_iter().enumerate() {
        let field = surface.create_text_field(index);
        spec.configure(&field);
        tracing::trace!(index, "text field created");
        fields.push(field);
    }

    let finally = FinallySlot::new(finally);
    let mut gates = Vec::new();
    let native_actions: Vec<NativeAction> = actions
        .into_iter()
        .enumerate()
        .map(|(index, registered)| {
            let enabled = Rc::new(Cell::new(true));
            if let Some(predicate) = registered.action.enabled_predicate() {
                gates.push(Gate {
                    predicate: Rc::clone(predicate),
                    enabled: Rc::clone(&enabled),
                });
            }
            NativeAction {
                label: registered.action.label().to_owned(),
                style: registered.action.style(),
                preferred: preferred == Some(index),
                enabled,
                on_select: combine(registered.handler, finally.clone()),
            }
        })
        .collect();

    refresh_gates(&gates, &fields);

    let mut subscriptions = Vec::new();
    if on_field_change.is_some() || !gates.is_empty() {
        let gates = Rc::new(gates);
        let weak_fields: Rc<[WeakTextField]> = fields.iter().map(TextField::downgrade).collect();
        for (index, field) in fields.iter().enumerate() {
            let handler = on_field_change.clone();
            let gates = Rc::clone(&gates);
            let weak_fields = Rc::clone(&weak_fields);
            subscriptions.push(field.subscribe(move |text| {
                if let Some(handler) = &handler {
                    handler(index, text);
                }
                if !gates.is_empty() {
                    refresh_gates(&gates, &upgrade_all(&weak_fields));
                }
            }));
        }
    }

    let on_dismiss = surface
        .capabilities()
        .contains(HostCapabilities::REPORTS_DISMISSAL)
        .then(|| finally.clone());

    NativeDialog {
        kind,
        title,
        message,
        actions: native_actions,
        fields,
        anchor,
        config,
        on_dismiss,
        _subscriptions: subscriptions,
        created_at: Instant::now(),
    }
}
