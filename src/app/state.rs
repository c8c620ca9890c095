//! Application state and chrome view model computation.
//!
//! [`AppState`] is the single source of truth for the shell. It is made of
//! independent blocks (session, navigation, modal, viewport) that the reducer
//! replaces wholesale, plus the theme, which is fixed for the life of the
//! process.
//!
//! The chrome around the content (header, sidebar, footer) is computed here;
//! the content and modal panels come from the view dispatcher, which composes
//! everything into a [`ShellViewModel`](crate::ui::viewmodel::ShellViewModel).

use crate::app::layout::ViewportState;
use crate::app::modal::ModalState;
use crate::app::navigation::NavigationState;
use crate::app::session::Session;
use crate::domain::ScreenId;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{FooterInfo, HeaderInfo, SidebarInfo, SidebarItem, UserBadge};

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    pub session: Session,
    pub navigation: NavigationState,
    pub modal: ModalState,
    pub viewport: ViewportState,

    /// Color scheme for terminal rendering.
    pub theme: Theme,
}

impl AppState {
    /// Creates the startup state: session loading, dashboard, no modal.
    ///
    /// # Example
    ///
    /// ```
    /// use delv_shell::app::AppState;
    /// use delv_shell::ui::theme::Theme;
    ///
    /// let state = AppState::new(Theme::default(), 1280);
    /// assert!(state.session.loading);
    /// assert!(!state.viewport.sidebar_open);
    /// ```
    #[must_use]
    pub fn new(theme: Theme, viewport_width: u32) -> Self {
        Self {
            session: Session::initial(),
            navigation: NavigationState::default(),
            modal: ModalState::closed(),
            viewport: ViewportState::new(viewport_width),
            theme,
        }
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.session.authenticated
    }

    /// Returns every block to its startup value, keeping theme and width.
    pub fn reset(&mut self) {
        let width = self.viewport.width_px;
        self.session = Session::initial();
        self.navigation = NavigationState::default();
        self.modal = ModalState::closed();
        self.viewport = ViewportState::new(width);
    }

    #[must_use]
    pub fn compute_header(&self) -> HeaderInfo {
        let title = if self.is_authenticated() {
            self.navigation.current_screen.title().to_string()
        } else {
            "Delv Talent".to_string()
        };

        let user = self.session.user.as_ref().map(|user| UserBadge {
            name: user.name.clone(),
            role: user.role.clone(),
            avatar: user.avatar.clone(),
        });

        HeaderInfo {
            title,
            user,
            breakpoint: self.viewport.breakpoint,
            show_back: self.is_authenticated() && self.navigation.current_screen.shows_back(),
        }
    }

    /// Sidebar entries, or `None` when the sidebar is closed.
    #[must_use]
    pub fn compute_sidebar(&self) -> Option<SidebarInfo> {
        if !self.viewport.sidebar_open {
            return None;
        }

        let current = self.navigation.current_screen;
        let items = ScreenId::ALL
            .iter()
            .filter(|screen| screen.in_sidebar())
            .map(|&screen| SidebarItem {
                screen,
                label: screen.title().to_string(),
                is_active: screen == current,
            })
            .collect();

        Some(SidebarInfo { items })
    }

    #[must_use]
    pub fn compute_footer(&self) -> FooterInfo {
        let keybindings = if !self.is_authenticated() {
            "login <email> <password> | reload | quit"
        } else if self.modal.is_open() {
            "act <n> | close | quit"
        } else {
            "go <screen> | back | open <modal> | act <n> | sidebar | logout | quit"
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::session::{authenticate, DEMO_EMAIL, DEMO_PASSWORD};
    use crate::domain::Credentials;

    fn signed_in() -> AppState {
        let mut state = AppState::new(Theme::default(), 1280);
        let user = authenticate(&Credentials::new(DEMO_EMAIL, DEMO_PASSWORD), 0).unwrap();
        state.session = Session::signed_in(user);
        state.viewport = state.viewport.reauthenticated(true);
        state
    }

    #[test]
    fn sidebar_lists_top_level_screens_with_active_marker() {
        let mut state = signed_in();
        state.navigation = state.navigation.navigate(ScreenId::Pipeline, None);

        let sidebar = state.compute_sidebar().unwrap();
        let labels: Vec<_> = sidebar.items.iter().map(|i| i.label.as_str()).collect();
        assert_eq!(labels, ["Dashboard", "Candidates", "Pipeline", "Shortlists", "Settings"]);
        assert!(sidebar.items.iter().any(|i| i.is_active && i.screen == ScreenId::Pipeline));
    }

    #[test]
    fn closed_sidebar_computes_nothing() {
        let state = AppState::new(Theme::default(), 1280);
        assert!(state.compute_sidebar().is_none());
    }

    #[test]
    fn header_shows_back_only_on_detail_screens() {
        let mut state = signed_in();
        assert!(!state.compute_header().show_back);

        state.navigation = state.navigation.navigate(ScreenId::CandidateDetail, Some("c-1".into()));
        let header = state.compute_header();
        assert!(header.show_back);
        assert_eq!(header.title, "Candidate Profile");
        assert_eq!(header.user.unwrap().avatar, "AM");
    }

    #[test]
    fn reset_keeps_width() {
        let mut state = signed_in();
        state.viewport = state.viewport.resized(900, true);
        state.reset();
        assert_eq!(state.viewport.width_px, 900);
        assert!(!state.viewport.sidebar_open);
        assert!(state.session.loading);
    }
}
