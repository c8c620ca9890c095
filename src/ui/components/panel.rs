//! Content and modal panel renderers.

use crate::ui::components::Area;
use crate::ui::helpers::{fit, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{Panel, PanelKind};
use std::fmt::Write;

/// Renders a panel's title, subtitle, lines and numbered actions in `area`.
///
/// Rows that do not fit are dropped; actions are kept in preference to body
/// lines so every action stays reachable.
pub fn render_panel(out: &mut String, area: Area, panel: &Panel, theme: &Theme) {
    let title_color = match panel.kind {
        PanelKind::Fallback => &theme.colors.error_fg,
        PanelKind::Modal => &theme.colors.modal_border,
        _ => &theme.colors.header_fg,
    };

    let mut rows: Vec<String> = Vec::new();
    rows.push(format!("{}{}{}", Theme::bold(), Theme::fg(title_color), fit(&panel.title, area.width)));
    if let Some(subtitle) = &panel.subtitle {
        rows.push(format!("{}{}", Theme::fg(&theme.colors.text_dim), fit(subtitle, area.width)));
    }
    rows.push(" ".repeat(area.width));

    let action_rows: Vec<String> = panel
        .actions
        .iter()
        .enumerate()
        .map(|(index, action)| {
            let marker = format!("[{}] ", index + 1);
            let label_width = area.width.saturating_sub(marker.chars().count());
            format!(
                "{}{marker}{}{}",
                Theme::fg(&theme.colors.accent),
                Theme::fg(&theme.colors.text_normal),
                fit(&action.label, label_width)
            )
        })
        .collect();

    let reserved = if action_rows.is_empty() { 0 } else { action_rows.len() + 1 };
    let body_budget = area.height.saturating_sub(rows.len() + reserved);

    let body_color = match panel.kind {
        PanelKind::Fallback => &theme.colors.error_fg,
        PanelKind::Loading => &theme.colors.text_dim,
        _ => &theme.colors.text_normal,
    };
    for line in panel.lines.iter().take(body_budget) {
        rows.push(format!("{}{}", Theme::fg(body_color), fit(line, area.width)));
    }

    if !action_rows.is_empty() {
        rows.push(" ".repeat(area.width));
        rows.extend(action_rows);
    }

    for (offset, text) in rows.iter().take(area.height).enumerate() {
        position_cursor(out, area.row + offset, area.col);
        out.push_str(text);
        out.push_str(Theme::reset());
    }
}

/// Renders a bordered modal box centered over `area`.
pub fn render_modal(out: &mut String, area: Area, panel: &Panel, theme: &Theme) {
    let width = area.width.saturating_sub(4).min(60);
    let needed = panel.lines.len() + panel.actions.len() + 5;
    let height = needed.min(area.height.saturating_sub(2)).max(3);

    let col = area.col + area.width.saturating_sub(width) / 2;
    let row = area.row + area.height.saturating_sub(height) / 2;
    let border = Theme::fg(&theme.colors.modal_border);

    position_cursor(out, row, col);
    let _ = write!(out, "{border}┌{}┐{}", "─".repeat(width.saturating_sub(2)), Theme::reset());
    for offset in 1..height.saturating_sub(1) {
        position_cursor(out, row + offset, col);
        let _ = write!(out, "{border}│{}│{}", " ".repeat(width.saturating_sub(2)), Theme::reset());
    }
    position_cursor(out, row + height.saturating_sub(1), col);
    let _ = write!(out, "{border}└{}┘{}", "─".repeat(width.saturating_sub(2)), Theme::reset());

    let inner = Area {
        row: row + 1,
        col: col + 2,
        width: width.saturating_sub(4),
        height: height.saturating_sub(2),
    };
    render_panel(out, inner, panel, theme);
}
