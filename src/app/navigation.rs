//! Navigation state machine.
//!
//! [`NavigationState`] holds the current screen, the optional entity it shows,
//! and a bounded history of previously visited screens. Transitions return a
//! new value; the old one is never mutated in place.
//!
//! # Invariants
//!
//! - `history.len() <= HISTORY_LIMIT`
//! - history only grows when the screen actually changes, so no two
//!   consecutive entries are equal
//! - the last history entry never equals `current_screen`

use crate::domain::ScreenId;
use std::collections::VecDeque;

/// Maximum number of screens kept for `back`.
pub const HISTORY_LIMIT: usize = 4;

/// Current screen plus back stack.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NavigationState {
    pub current_screen: ScreenId,
    pub selected_entity_id: Option<String>,
    pub history: VecDeque<ScreenId>,
    pub transitioning: bool,
}

impl NavigationState {
    /// Moves to `screen`, recording the current screen if it changes.
    ///
    /// Navigating to the current screen only replaces the entity id.
    ///
    /// # Examples
    ///
    /// ```
    /// use delv_shell::app::NavigationState;
    /// use delv_shell::domain::ScreenId;
    ///
    /// let nav = NavigationState::default()
    ///     .navigate(ScreenId::Candidates, None)
    ///     .navigate(ScreenId::Candidates, None);
    /// assert_eq!(nav.history.len(), 1);
    /// ```
    #[must_use]
    pub fn navigate(&self, screen: ScreenId, entity_id: Option<String>) -> Self {
        let mut history = self.history.clone();

        if screen != self.current_screen {
            history.push_back(self.current_screen);
            while history.len() > HISTORY_LIMIT {
                history.pop_front();
            }
        }

        Self {
            current_screen: screen,
            selected_entity_id: entity_id,
            history,
            transitioning: true,
        }
    }

    /// Returns to the most recent history entry, or the dashboard.
    ///
    /// The screen being left is not pushed, so repeated `back` calls walk the
    /// stack instead of bouncing between two screens. The entity id is not
    /// part of history and is cleared.
    #[must_use]
    pub fn back(&self) -> Self {
        let mut history = self.history.clone();
        let target = history.pop_back().unwrap_or(ScreenId::Dashboard);

        Self {
            current_screen: target,
            selected_entity_id: None,
            history,
            transitioning: true,
        }
    }

    /// Clears the transitioning flag.
    #[must_use]
    pub fn settle(&self) -> Self {
        Self {
            transitioning: false,
            ..self.clone()
        }
    }

    /// Screen that `back` would return to.
    #[must_use]
    pub fn previous(&self) -> ScreenId {
        self.history.back().copied().unwrap_or(ScreenId::Dashboard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_invariants(nav: &NavigationState) {
        assert!(nav.history.len() <= HISTORY_LIMIT, "history too long: {:?}", nav.history);
        for pair in nav.history.iter().collect::<Vec<_>>().windows(2) {
            assert_ne!(pair[0], pair[1], "consecutive duplicate in {:?}", nav.history);
        }
        if let Some(last) = nav.history.back() {
            assert_ne!(*last, nav.current_screen);
        }
    }

    #[test]
    fn navigate_pushes_previous_screen() {
        let nav = NavigationState::default().navigate(ScreenId::Settings, None);
        assert_eq!(nav.current_screen, ScreenId::Settings);
        assert_eq!(nav.history, VecDeque::from(vec![ScreenId::Dashboard]));
        assert!(nav.transitioning);
    }

    #[test]
    fn navigate_to_same_screen_does_not_push() {
        let nav = NavigationState::default()
            .navigate(ScreenId::CandidateDetail, Some("c-1".into()))
            .navigate(ScreenId::CandidateDetail, Some("c-2".into()));
        assert_eq!(nav.history.len(), 1);
        assert_eq!(nav.selected_entity_id.as_deref(), Some("c-2"));
    }

    #[test]
    fn history_is_bounded_and_drops_oldest() {
        let mut nav = NavigationState::default();
        for screen in [
            ScreenId::Candidates,
            ScreenId::Pipeline,
            ScreenId::Shortlists,
            ScreenId::Settings,
            ScreenId::Candidates,
            ScreenId::Pipeline,
        ] {
            nav = nav.navigate(screen, None);
            assert_invariants(&nav);
        }
        assert_eq!(
            nav.history,
            VecDeque::from(vec![
                ScreenId::Pipeline,
                ScreenId::Shortlists,
                ScreenId::Settings,
                ScreenId::Candidates,
            ])
        );
    }

    #[test]
    fn back_returns_to_preceding_screen() {
        let nav = NavigationState::default()
            .navigate(ScreenId::Pipeline, None)
            .navigate(ScreenId::Settings, None)
            .back();
        assert_eq!(nav.current_screen, ScreenId::Pipeline);
        assert_eq!(nav.history, VecDeque::from(vec![ScreenId::Dashboard]));
    }

    #[test]
    fn back_with_empty_history_goes_to_dashboard() {
        let nav = NavigationState {
            current_screen: ScreenId::StandaloneShortlistPreview,
            ..NavigationState::default()
        }
        .back();
        assert_eq!(nav.current_screen, ScreenId::Dashboard);
        assert!(nav.history.is_empty());
    }

    #[test]
    fn mixed_navigate_and_back_keep_invariants() {
        let screens = ScreenId::ALL;
        let mut nav = NavigationState::default();
        // Deterministic pseudo-random walk over navigate/back.
        let mut seed: u32 = 7;
        for _ in 0..500 {
            seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            let pick = (seed >> 16) as usize;
            nav = if pick % 4 == 0 {
                nav.back()
            } else {
                nav.navigate(screens[pick % screens.len()], None)
            };
            assert_invariants(&nav);
        }
    }

    #[test]
    fn settle_only_clears_flag() {
        let nav = NavigationState::default().navigate(ScreenId::Candidates, None);
        let settled = nav.settle();
        assert!(!settled.transitioning);
        assert_eq!(settled.history, nav.history);
        assert_eq!(settled.current_screen, nav.current_screen);
    }
}
