//! Shared rendering utilities.
//!
//! Components write into a `String` frame buffer rather than stdout so a frame
//! can be inspected in tests and flushed in one write by the binary. All width
//! math is in characters, not bytes.

use std::fmt::Write;

/// Moves the cursor to a 1-indexed row and column.
pub fn position_cursor(out: &mut String, row: usize, col: usize) {
    let _ = write!(out, "\u{1b}[{row};{col}H");
}

/// Clears the screen and homes the cursor.
pub fn clear_screen(out: &mut String) {
    out.push_str("\u{1b}[2J\u{1b}[H");
}

/// Truncates `text` to at most `width` characters, marking the cut with `…`.
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut cut: String = text.chars().take(width - 1).collect();
    cut.push('…');
    cut
}

/// Pads or truncates `text` to exactly `width` characters.
#[must_use]
pub fn fit(text: &str, width: usize) -> String {
    let cut = truncate(text, width);
    let len = cut.chars().count();
    format!("{cut}{}", " ".repeat(width.saturating_sub(len)))
}

/// Centers `text` in `width` characters; extra padding goes right.
#[must_use]
pub fn center(text: &str, width: usize) -> String {
    let cut = truncate(text, width);
    let len = cut.chars().count();
    let left = width.saturating_sub(len) / 2;
    let right = width.saturating_sub(len + left);
    format!("{}{cut}{}", " ".repeat(left), " ".repeat(right))
}
