//! Composable UI component renderers.
//!
//! Each component draws one part of the frame into a `String` buffer at
//! absolute cursor positions.
//!
//! # Components
//!
//! - [`header`]: title, back marker and user badge
//! - [`sidebar`]: top-level screen list with the active entry highlighted
//! - [`panel`]: content panels and the modal overlay box
//! - [`footer`]: command hints
//!
//! # Layout
//!
//! ```text
//! [Header]
//! [Border]
//! [Sidebar │ Content panel        ]
//! [        │     ┌ Modal ┐        ]
//! [Border]
//! [Footer]
//! ```

mod footer;
mod header;
mod panel;
mod sidebar;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::ShellViewModel;

use footer::render_footer;
use header::render_header;
use panel::{render_modal, render_panel};
use sidebar::{render_sidebar, SIDEBAR_WIDTH};

/// Rectangle in 1-indexed terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Area {
    pub row: usize,
    pub col: usize,
    pub width: usize,
    pub height: usize,
}

/// Renders a horizontal border line and returns the next row.
fn render_border(out: &mut String, row: usize, color: &str, cols: usize) -> usize {
    position_cursor(out, row, 1);
    out.push_str(&Theme::fg(color));
    out.push_str(&"─".repeat(cols));
    out.push_str(Theme::reset());
    row + 1
}

/// Renders the full shell layout.
///
/// Reserves four rows of chrome (header, two borders, footer); the rest goes
/// to the body. The sidebar is skipped when the terminal is too narrow to
/// leave any content width next to it.
pub fn render_shell(out: &mut String, vm: &ShellViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 1;
    current_row = render_header(out, current_row, &vm.header, theme, cols);
    current_row = render_border(out, current_row, &theme.colors.border, cols);

    let footer_row = rows.max(current_row + 2);
    let border_row = footer_row - 1;
    let body_height = border_row.saturating_sub(current_row);

    let content_col = match &vm.sidebar {
        Some(sidebar) if cols > SIDEBAR_WIDTH + 10 => {
            let area = Area {
                row: current_row,
                col: 1,
                width: SIDEBAR_WIDTH,
                height: body_height,
            };
            render_sidebar(out, area, sidebar, theme);
            SIDEBAR_WIDTH + 2
        }
        _ => 2,
    };

    let content = Area {
        row: current_row + 1,
        col: content_col,
        width: cols.saturating_sub(content_col),
        height: body_height.saturating_sub(1),
    };
    render_panel(out, content, &vm.content, theme);

    if let Some(modal) = &vm.modal {
        render_modal(out, content, modal, theme);
    }

    render_border(out, border_row, &theme.colors.border, cols);
    render_footer(out, footer_row, &vm.footer, theme, cols);
}
