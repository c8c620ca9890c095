//! Header bar renderer.

use crate::app::Breakpoint;
use crate::ui::helpers::{fit, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the header at `row` and returns the next free row.
///
/// ```text
/// ‹ Candidate Profile                        AM  Alexandra Morgan
/// ```
///
/// The user name is dropped on mobile; only the avatar initials remain.
pub fn render_header(out: &mut String, row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let left = if header.show_back {
        format!(" ‹ {}", header.title)
    } else {
        format!(" {}", header.title)
    };

    let right = match (&header.user, header.breakpoint) {
        (Some(user), Breakpoint::Mobile) => format!("{} ", user.avatar),
        (Some(user), _) => format!("{}  {} ", user.avatar, user.name),
        (None, _) => String::new(),
    };

    let right_len = right.chars().count();
    let left_width = cols.saturating_sub(right_len);

    position_cursor(out, row, 1);
    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        out.push_str(&Theme::bg(bg));
    }
    out.push_str(&fit(&left, left_width));
    out.push_str(&fit(&right, cols.saturating_sub(left_width)));
    out.push_str(Theme::reset());
    row + 1
}
