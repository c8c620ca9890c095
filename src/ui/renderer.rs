//! Top-level rendering coordinator.
//!
//! Turns a composed [`ShellViewModel`] into one ANSI frame. The frame is
//! returned as a string so the caller decides when to flush it.
//!
//! # Example
//!
//! ```
//! use delv_shell::app::AppState;
//! use delv_shell::ui::{render, Theme, ViewDispatcher};
//!
//! let state = AppState::new(Theme::default(), 1280);
//! let vm = ViewDispatcher::default().compose(&state);
//! let frame = render(&vm, &state.theme, 24, 80);
//! assert!(frame.contains("Loading"));
//! ```

use crate::ui::components;
use crate::ui::helpers::clear_screen;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::ShellViewModel;

/// Renders a view model into an ANSI frame of `rows` by `cols` cells.
#[must_use]
pub fn render(vm: &ShellViewModel, theme: &Theme, rows: usize, cols: usize) -> String {
    let _span = tracing::trace_span!("render", rows, cols).entered();

    let mut out = String::with_capacity(rows * cols * 2);
    clear_screen(&mut out);
    components::render_shell(&mut out, vm, theme, cols, rows);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::session::{authenticate, Session, DEMO_EMAIL, DEMO_PASSWORD};
    use crate::app::{AppState, ModalState};
    use crate::domain::{Credentials, ModalId};
    use crate::ui::ViewDispatcher;

    fn signed_in(width: u32) -> AppState {
        let mut state = AppState::new(Theme::default(), width);
        let user = authenticate(&Credentials::new(DEMO_EMAIL, DEMO_PASSWORD), 0).unwrap();
        state.session = Session::signed_in(user);
        state.viewport = state.viewport.reauthenticated(true);
        state
    }

    #[test]
    fn signed_in_frame_has_sidebar_and_user() {
        let state = signed_in(1280);
        let vm = ViewDispatcher::default().compose(&state);
        let frame = render(&vm, &state.theme, 30, 100);

        assert!(frame.contains("Alexandra Morgan"));
        assert!(frame.contains("Pipeline"));
        assert!(frame.contains("[1] "));
        assert!(frame.contains("View candidates"));
    }

    #[test]
    fn mobile_header_shows_initials_only() {
        let state = signed_in(500);
        let vm = ViewDispatcher::default().compose(&state);
        let frame = render(&vm, &state.theme, 30, 60);
        assert!(!frame.contains("Alexandra Morgan"));
        assert!(frame.contains("AM"));
    }

    #[test]
    fn modal_overlay_is_drawn() {
        let mut state = signed_in(1280);
        state.modal = ModalState::open(ModalId::ShareShortlist, None);
        let vm = ViewDispatcher::default().compose(&state);
        let frame = render(&vm, &state.theme, 30, 100);
        assert!(frame.contains("Share Shortlist"));
        assert!(frame.contains('┌'));
    }

    #[test]
    fn tiny_terminal_does_not_panic() {
        let state = signed_in(1280);
        let vm = ViewDispatcher::default().compose(&state);
        let _ = render(&vm, &state.theme, 1, 1);
        let _ = render(&vm, &state.theme, 0, 0);
    }
}
