#![forbid(unsafe_code)]

//! Plain-text rendering of a dialog.
//!
//! Layout rules:
//! - title, then message, then one row per text field, then actions;
//! - alerts with one or two actions lay them out on one row, otherwise
//!   one action per row (action sheets are always vertical);
//! - `[*Label*]` marks the preferred action, `( Label )` a disabled one;
//! - secure fields render one `*` per grapheme; empty fields show their
//!   placeholder in angle brackets.

use alertift::{AlertKind, NativeAction, NativeDialog, TextField};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

fn button(action: &NativeAction) -> String {
    if !action.is_enabled() {
        format!("( {} )", action.label())
    } else if action.is_preferred() {
        format!("[*{}*]", action.label())
    } else {
        format!("[ {} ]", action.label())
    }
}

fn field_row(field: &TextField) -> String {
    field.with_text(|text| {
        if field.is_secure() {
            format!("> {}", "*".repeat(text.graphemes(true).count()))
        } else if text.is_empty() {
            match field.placeholder() {
                Some(placeholder) => format!("> <{placeholder}>"),
                None => "> ".to_owned(),
            }
        } else {
            format!("> {text}")
        }
    })
}

fn centered(text: &str, width: usize) -> String {
    let pad = width.saturating_sub(text.width());
    let left = pad / 2;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(pad - left))
}

/// Render `dialog` as a bordered block of text, one line per row.
#[must_use]
pub fn render_text(dialog: &NativeDialog) -> String {
    let mut rows: Vec<String> = Vec::new();
    rows.extend(dialog.title().map(str::to_owned));
    rows.extend(dialog.message().map(str::to_owned));
    rows.extend(dialog.fields().iter().map(field_row));

    let buttons: Vec<String> = dialog.actions().iter().map(button).collect();
    let horizontal = dialog.kind() == AlertKind::Alert && buttons.len() <= 2;
    if horizontal {
        if !buttons.is_empty() {
            rows.push(buttons.join("  "));
        }
    } else {
        rows.extend(buttons);
    }

    let inner = rows.iter().map(|r| r.width()).max().unwrap_or(0);
    let border = format!("+{}+", "-".repeat(inner + 2));

    let mut out = String::new();
    out.push_str(&border);
    out.push('\n');
    for row in &rows {
        out.push_str("| ");
        out.push_str(&centered(row, inner));
        out.push_str(" |\n");
    }
    out.push_str(&border);
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_pads_by_display_width() {
        assert_eq!(centered("ab", 6), "  ab  ");
        assert_eq!(centered("abc", 6), " abc  ");
        // Wide glyphs take two columns.
        assert_eq!(centered("日本", 6), " 日本 ");
    }

    #[test]
    fn secure_field_masks_graphemes() {
        let field = TextField::new();
        field.set_secure(true);
        field.set_text("e\u{301}x");
        assert_eq!(field_row(&field), "> **");
    }

    #[test]
    fn placeholder_shown_when_empty() {
        let field = TextField::new();
        field.set_placeholder("Name");
        assert_eq!(field_row(&field), "> <Name>");
        field.set_text("Ada");
        assert_eq!(field_row(&field), "> Ada");
    }
}
