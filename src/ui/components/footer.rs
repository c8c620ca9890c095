//! Footer help bar renderer.

use crate::ui::helpers::{center, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

/// Renders centered, dimmed command hints at `row`.
///
/// Hints longer than the terminal are truncated rather than wrapped so the
/// layout never shifts.
pub fn render_footer(out: &mut String, row: usize, footer: &FooterInfo, theme: &Theme, cols: usize) -> usize {
    position_cursor(out, row, 1);
    out.push_str(&Theme::fg(&theme.colors.text_dim));
    out.push_str(&center(&footer.keybindings, cols));
    out.push_str(Theme::reset());
    row + 1
}
