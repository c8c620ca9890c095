//! Event handling and state transition logic.
//!
//! [`handle_event`] is the single reducer for the shell. It pattern-matches the
//! event, replaces the affected state blocks wholesale, and returns whether a
//! re-render is needed plus the side effects to run.
//!
//! # Event Types
//!
//! - **Session**: `CheckAuth`, `Login`, `Logout`, `Reload`
//! - **Navigation**: `Navigate`, `Back`, `TransitionSettled`
//! - **Overlay**: `OpenModal`, `CloseModal`
//! - **Layout**: `ToggleSidebar`, `ViewportSettled`
//! - **Worker**: `WorkerResponse` with typed response variants
//!
//! Navigation, modal and sidebar events are ignored while signed out; the
//! login view is the only surface then.
//!
//! # Example
//!
//! ```
//! use delv_shell::app::{handle_event, AppState, Event};
//! use delv_shell::ui::theme::Theme;
//!
//! let mut state = AppState::new(Theme::default(), 1280);
//! let (render, actions) = handle_event(&mut state, &Event::CheckAuth);
//! assert!(render);
//! assert_eq!(actions.len(), 1);
//! ```

use crate::app::modal::ModalState;
use crate::app::navigation::NavigationState;
use crate::app::session::Session;
use crate::app::{Action, AppState, Notification};
use crate::domain::{Credentials, ModalId, ScreenId};
use crate::ui::dispatcher::{window_title, APP_NAME};
use crate::worker::{WorkerMessage, WorkerResponse};
use serde_json::Value;

/// Events triggered by the host, views, or worker responses.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Starts (or restarts) restoration of the persisted session.
    CheckAuth,
    Login(Credentials),
    Logout,

    Navigate {
        screen: ScreenId,
        entity_id: Option<String>,
    },
    /// Returns to the previous screen, or the dashboard.
    Back,
    /// Frame after a navigation has been painted.
    TransitionSettled,

    OpenModal {
        modal: ModalId,
        payload: Option<Value>,
    },
    CloseModal,

    ToggleSidebar,
    /// Debounced viewport width after a resize burst.
    ViewportSettled { width_px: u32 },

    /// Wraps a response from the session worker.
    WorkerResponse(WorkerResponse),

    /// Tears down and re-initializes the whole shell.
    Reload,
}

impl Event {
    /// Short name for spans.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::CheckAuth => "check_auth",
            Self::Login(_) => "login",
            Self::Logout => "logout",
            Self::Navigate { .. } => "navigate",
            Self::Back => "back",
            Self::TransitionSettled => "transition_settled",
            Self::OpenModal { .. } => "open_modal",
            Self::CloseModal => "close_modal",
            Self::ToggleSidebar => "toggle_sidebar",
            Self::ViewportSettled { .. } => "viewport_settled",
            Self::WorkerResponse(_) => "worker_response",
            Self::Reload => "reload",
        }
    }
}

/// Processes an event, replaces state, and returns the actions to execute.
///
/// The boolean is `true` when the visible state changed and the view should be
/// recomposed.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> (bool, Vec<Action>) {
    let _span = tracing::debug_span!("handle_event", event_type = event.kind()).entered();

    match event {
        Event::CheckAuth => {
            state.session = Session::initial();
            (true, vec![Action::PostToWorker(WorkerMessage::check_auth())])
        }

        Event::Login(credentials) => {
            if state.session.authenticated {
                tracing::debug!("already signed in, ignoring login");
                return (false, vec![]);
            }
            if state.session.loading {
                tracing::debug!("session operation in flight, ignoring login");
                return (false, vec![]);
            }
            state.session = state.session.pending();
            (true, vec![Action::PostToWorker(WorkerMessage::login(credentials.clone()))])
        }

        Event::Logout => {
            if !state.session.authenticated || state.session.loading {
                tracing::debug!("not signed in or busy, ignoring logout");
                return (false, vec![]);
            }
            state.session = state.session.pending();
            (true, vec![Action::PostToWorker(WorkerMessage::logout())])
        }

        Event::Navigate { screen, entity_id } => {
            if !state.is_authenticated() {
                tracing::debug!(screen = %screen, "signed out, ignoring navigation");
                return (false, vec![]);
            }
            tracing::debug!(screen = %screen, entity_id = ?entity_id, "navigating");
            state.navigation = state.navigation.navigate(*screen, entity_id.clone());
            state.modal = ModalState::closed();
            (true, navigation_effects(*screen))
        }

        Event::Back => {
            if !state.is_authenticated() {
                return (false, vec![]);
            }
            state.navigation = state.navigation.back();
            state.modal = ModalState::closed();
            tracing::debug!(screen = %state.navigation.current_screen, "navigated back");
            (true, navigation_effects(state.navigation.current_screen))
        }

        Event::TransitionSettled => {
            if !state.navigation.transitioning {
                return (false, vec![]);
            }
            state.navigation = state.navigation.settle();
            (true, vec![])
        }

        Event::OpenModal { modal, payload } => {
            if !state.is_authenticated() {
                tracing::debug!(modal = %modal, "signed out, ignoring modal");
                return (false, vec![]);
            }
            if let Some(previous) = state.modal.active_modal {
                tracing::debug!(previous = %previous, next = %modal, "replacing open modal");
            }
            state.modal = ModalState::open(*modal, payload.clone());
            (true, vec![])
        }

        Event::CloseModal => {
            if !state.modal.is_open() {
                return (false, vec![]);
            }
            state.modal = ModalState::closed();
            (true, vec![])
        }

        Event::ToggleSidebar => match state.viewport.toggled(state.is_authenticated()) {
            Some(viewport) => {
                state.viewport = viewport;
                (true, vec![])
            }
            None => {
                tracing::debug!(width_px = state.viewport.width_px, "sidebar toggle not allowed");
                (false, vec![])
            }
        },

        Event::ViewportSettled { width_px } => {
            let viewport = state.viewport.resized(*width_px, state.is_authenticated());
            if viewport == state.viewport {
                tracing::debug!(width_px, "viewport unchanged, skipping render");
                return (false, vec![]);
            }
            tracing::debug!(
                width_px,
                breakpoint = %viewport.breakpoint,
                sidebar_open = viewport.sidebar_open,
                "viewport settled"
            );
            state.viewport = viewport;
            (true, vec![])
        }

        Event::WorkerResponse(response) => handle_worker_response(state, response),

        Event::Reload => {
            tracing::info!("reloading shell");
            state.reset();
            (
                true,
                vec![
                    Action::Reload,
                    Action::SetTitle(APP_NAME.to_string()),
                    Action::PostToWorker(WorkerMessage::check_auth()),
                ],
            )
        }
    }
}

fn handle_worker_response(state: &mut AppState, response: &WorkerResponse) -> (bool, Vec<Action>) {
    match response {
        WorkerResponse::AuthChecked { user: Some(user) } => {
            tracing::debug!(user_id = %user.id, "session restored");
            state.session = Session::signed_in(user.clone());
            state.viewport = state.viewport.reauthenticated(true);
            (true, vec![Action::SetTitle(window_title(state.navigation.current_screen))])
        }

        WorkerResponse::AuthChecked { user: None } => {
            state.session = Session::signed_out();
            state.viewport = state.viewport.reauthenticated(false);
            (true, vec![])
        }

        WorkerResponse::AuthCheckFailed { message } => {
            state.session = Session::failed(message.clone());
            state.viewport = state.viewport.reauthenticated(false);
            (true, vec![Action::Notify(Notification::error(message.clone()))])
        }

        WorkerResponse::LoginSucceeded { user } => {
            let greeting = format!("Welcome back, {}", user.first_name());
            state.session = Session::signed_in(user.clone());
            state.viewport = state.viewport.reauthenticated(true);
            (
                true,
                vec![
                    Action::SetTitle(window_title(state.navigation.current_screen)),
                    Action::Notify(Notification::success(greeting)),
                ],
            )
        }

        WorkerResponse::LoginFailed { message } => {
            state.session = Session::failed(message.clone());
            (true, vec![Action::Notify(Notification::error(message.clone()))])
        }

        WorkerResponse::LoggedOut { error } => {
            state.session = Session::signed_out();
            state.navigation = NavigationState::default();
            state.modal = ModalState::closed();
            state.viewport = state.viewport.reauthenticated(false);

            let notification = match error {
                Some(message) => {
                    tracing::warn!(error = %message, "logout completed with storage error");
                    Notification::error(format!("Sign out failed: {message}"))
                }
                None => Notification::success("Signed out"),
            };
            (
                true,
                vec![Action::SetTitle(APP_NAME.to_string()), Action::Notify(notification)],
            )
        }
    }
}

fn navigation_effects(screen: ScreenId) -> Vec<Action> {
    vec![
        Action::SetTitle(window_title(screen)),
        Action::ScrollToTop,
        Action::SettleTransition,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::session::{authenticate, DEMO_EMAIL, DEMO_PASSWORD};
    use crate::app::NotificationLevel;
    use crate::domain::User;
    use crate::ui::theme::Theme;
    use serde_json::json;

    fn user() -> User {
        authenticate(&Credentials::new(DEMO_EMAIL, DEMO_PASSWORD), 0).unwrap()
    }

    fn signed_in_state() -> AppState {
        let mut state = AppState::new(Theme::default(), 1280);
        handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::AuthChecked { user: Some(user()) }),
        );
        state
    }

    fn navigate(screen: ScreenId) -> Event {
        Event::Navigate {
            screen,
            entity_id: None,
        }
    }

    #[test]
    fn check_auth_enters_loading_and_posts() {
        let mut state = AppState::new(Theme::default(), 1280);
        state.session = Session::signed_out();
        let (render, actions) = handle_event(&mut state, &Event::CheckAuth);
        assert!(render);
        assert!(state.session.loading);
        assert!(matches!(actions[..], [Action::PostToWorker(WorkerMessage::CheckAuth { .. })]));
    }

    #[test]
    fn restored_session_opens_sidebar_on_wide_viewport() {
        let state = signed_in_state();
        assert!(state.session.authenticated);
        assert!(!state.session.loading);
        assert!(state.viewport.sidebar_open);
    }

    #[test]
    fn login_while_loading_is_ignored() {
        let mut state = AppState::new(Theme::default(), 1280);
        let (render, actions) = handle_event(&mut state, &Event::Login(Credentials::new("a@b.c", "x")));
        assert!(!render);
        assert!(actions.is_empty());
    }

    #[test]
    fn failed_login_sets_error_and_notifies() {
        let mut state = AppState::new(Theme::default(), 1280);
        state.session = Session::signed_out();
        handle_event(&mut state, &Event::Login(Credentials::new("x@y.com", "bad")));
        assert!(state.session.loading);

        let (_, actions) = handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::LoginFailed {
                message: "Invalid email or password".into(),
            }),
        );
        assert!(!state.session.authenticated);
        assert!(!state.session.loading);
        assert_eq!(state.session.error.as_deref(), Some("Invalid email or password"));
        assert!(matches!(
            &actions[..],
            [Action::Notify(Notification { level: NotificationLevel::Error, .. })]
        ));
    }

    #[test]
    fn navigation_closes_modal_and_emits_effects() {
        let mut state = signed_in_state();
        handle_event(
            &mut state,
            &Event::OpenModal {
                modal: ModalId::AddCandidate,
                payload: None,
            },
        );
        let (render, actions) = handle_event(&mut state, &navigate(ScreenId::Pipeline));
        assert!(render);
        assert!(!state.modal.is_open());
        assert!(state.navigation.transitioning);
        assert_eq!(
            actions,
            vec![
                Action::SetTitle("Pipeline | Delv Talent".into()),
                Action::ScrollToTop,
                Action::SettleTransition,
            ]
        );
    }

    #[test]
    fn navigation_ignored_when_signed_out() {
        let mut state = AppState::new(Theme::default(), 1280);
        state.session = Session::signed_out();
        let (render, _) = handle_event(&mut state, &navigate(ScreenId::Settings));
        assert!(!render);
        assert_eq!(state.navigation.current_screen, ScreenId::Dashboard);
    }

    #[test]
    fn close_when_closed_is_noop() {
        let mut state = signed_in_state();
        let before = state.clone();
        let (render, actions) = handle_event(&mut state, &Event::CloseModal);
        assert!(!render);
        assert!(actions.is_empty());
        assert_eq!(state.modal, before.modal);
    }

    #[test]
    fn preview_modal_keeps_payload() {
        let mut state = signed_in_state();
        handle_event(
            &mut state,
            &Event::OpenModal {
                modal: ModalId::CandidatePreview,
                payload: Some(json!({"candidateId": "c-12"})),
            },
        );
        assert_eq!(state.modal.payload, Some(json!({"candidateId": "c-12"})));
    }

    #[test]
    fn logout_resets_navigation_and_modal() {
        let mut state = signed_in_state();
        handle_event(&mut state, &navigate(ScreenId::Candidates));
        handle_event(
            &mut state,
            &Event::OpenModal {
                modal: ModalId::EditTask,
                payload: None,
            },
        );
        handle_event(&mut state, &Event::Logout);
        let (_, actions) = handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::LoggedOut { error: None }),
        );

        assert!(!state.session.authenticated);
        assert!(state.session.user.is_none());
        assert_eq!(state.navigation, NavigationState::default());
        assert!(!state.modal.is_open());
        assert!(!state.viewport.sidebar_open);
        assert_eq!(
            actions,
            vec![
                Action::SetTitle(APP_NAME.to_string()),
                Action::Notify(Notification::success("Signed out")),
            ]
        );
    }

    #[test]
    fn toggle_is_refused_on_narrow_viewport() {
        let mut state = signed_in_state();
        handle_event(&mut state, &Event::ViewportSettled { width_px: 500 });
        let (render, _) = handle_event(&mut state, &Event::ToggleSidebar);
        assert!(!render);
        assert!(!state.viewport.sidebar_open);
    }

    #[test]
    fn same_width_does_not_rerender() {
        let mut state = signed_in_state();
        let (render, _) = handle_event(&mut state, &Event::ViewportSettled { width_px: 1280 });
        assert!(!render);
    }

    #[test]
    fn reload_resets_and_rechecks() {
        let mut state = signed_in_state();
        handle_event(&mut state, &navigate(ScreenId::Settings));
        let (_, actions) = handle_event(&mut state, &Event::Reload);

        assert!(state.session.loading);
        assert_eq!(state.navigation.current_screen, ScreenId::Dashboard);
        assert_eq!(state.viewport.width_px, 1280);
        assert_eq!(actions[0], Action::Reload);
        assert_eq!(actions[1], Action::SetTitle(APP_NAME.to_string()));
        assert!(matches!(actions[2], Action::PostToWorker(WorkerMessage::CheckAuth { .. })));
    }
}
