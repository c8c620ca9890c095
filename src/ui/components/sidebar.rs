//! Sidebar navigation renderer.

use crate::ui::components::Area;
use crate::ui::helpers::{fit, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SidebarInfo;

/// Columns taken by the sidebar, including its separator.
pub const SIDEBAR_WIDTH: usize = 22;

/// Renders the sidebar inside `area`; the last column is the separator.
pub fn render_sidebar(out: &mut String, area: Area, sidebar: &SidebarInfo, theme: &Theme) {
    let inner = area.width.saturating_sub(1);

    for offset in 0..area.height {
        let row = area.row + offset;
        position_cursor(out, row, area.col);

        match sidebar.items.get(offset) {
            Some(item) if item.is_active => {
                out.push_str(Theme::bold());
                out.push_str(&Theme::fg(&theme.colors.sidebar_active_fg));
                out.push_str(&Theme::bg(&theme.colors.sidebar_active_bg));
                out.push_str(&fit(&format!(" {}", item.label), inner));
            }
            Some(item) => {
                out.push_str(&Theme::fg(&theme.colors.sidebar_fg));
                out.push_str(&fit(&format!(" {}", item.label), inner));
            }
            None => out.push_str(&" ".repeat(inner)),
        }
        out.push_str(Theme::reset());

        out.push_str(&Theme::fg(&theme.colors.border));
        out.push('│');
        out.push_str(Theme::reset());
    }
}
