//! End-to-end flows through the public `Shell`, driven by a virtual clock.

use delv_shell::app::session::{DEMO_EMAIL, DEMO_PASSWORD, INVALID_CREDENTIALS};
use delv_shell::app::{AppState, NotificationLevel};
use delv_shell::runtime::{ManualScheduler, RecordingHost, Task};
use delv_shell::storage::{JsonSessionStore, MemorySessionStore, SessionStore};
use delv_shell::ui::contract::{ScreenCallbacks, ScreenView, ViewFactory};
use delv_shell::ui::{Intent, Panel, PanelKind, StandardViews};
use delv_shell::worker::WorkerMessage;
use delv_shell::{Credentials, ModalId, ScreenId, Shell, Theme};
use serde_json::json;
use std::time::Duration;

type TestShell = Shell<ManualScheduler, RecordingHost>;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn shell_with(store: impl SessionStore + 'static) -> TestShell {
    let mut shell = Shell::new(
        AppState::new(Theme::default(), 1280),
        Box::new(store),
        ManualScheduler::new(),
        RecordingHost::new(),
    );
    shell.start();
    shell
}

fn demo() -> Credentials {
    Credentials::new(DEMO_EMAIL, DEMO_PASSWORD)
}

/// Starts with an empty store and signs in with the demo account.
fn signed_in(store: impl SessionStore + 'static) -> TestShell {
    let mut shell = shell_with(store);
    shell.advance(ms(500));
    shell.login(demo());
    shell.advance(ms(1000));
    assert!(shell.state().is_authenticated());
    shell
}

#[test]
fn login_with_demo_account_signs_in_and_persists() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonSessionStore::in_dir(dir.path()).unwrap();
    let record_path = store.path().to_path_buf();

    let mut shell = shell_with(store);
    shell.advance(ms(500));
    assert!(!shell.state().session.loading);

    assert!(shell.login(demo()));
    assert!(shell.state().session.loading);
    assert_eq!(shell.frame().content.kind, PanelKind::Loading);

    shell.advance(ms(999));
    assert!(!shell.state().is_authenticated());
    shell.advance(ms(1));

    let session = &shell.state().session;
    assert!(session.authenticated);
    assert_eq!(session.user.as_ref().unwrap().name, "Alexandra Morgan");
    assert_eq!(shell.host().messages(), ["Welcome back, Alexandra"]);
    assert_eq!(shell.host().last_title(), Some("Dashboard | Delv Talent"));

    let stored = std::fs::read_to_string(record_path).unwrap();
    assert!(stored.contains("Alexandra Morgan"));
}

#[test]
fn stored_session_is_restored_on_next_start() {
    let dir = tempfile::tempdir().unwrap();
    let first = signed_in(JsonSessionStore::in_dir(dir.path()).unwrap());
    drop(first);

    let mut second = shell_with(JsonSessionStore::in_dir(dir.path()).unwrap());
    assert_eq!(second.frame().content.kind, PanelKind::Loading);
    second.advance(ms(500));

    assert!(second.state().is_authenticated());
    assert!(second.state().viewport.sidebar_open);
    assert!(second.host().notifications.is_empty());
}

#[test]
fn bad_credentials_stay_signed_out_with_message() {
    let mut shell = shell_with(MemorySessionStore::new());
    shell.advance(ms(500));

    shell.login(Credentials::new("x@y.com", "bad"));
    shell.advance(ms(1000));

    let state = shell.state();
    assert!(!state.session.authenticated);
    assert_eq!(state.session.error.as_deref(), Some(INVALID_CREDENTIALS));

    let notification = &shell.host().notifications[0];
    assert_eq!(notification.level, NotificationLevel::Error);
    assert_eq!(notification.message, INVALID_CREDENTIALS);

    let frame = shell.frame();
    assert_eq!(frame.content.kind, PanelKind::Login);
    assert!(frame.content.lines.iter().any(|l| l == INVALID_CREDENTIALS));
    assert!(frame.sidebar.is_none());
}

#[test]
fn retry_after_failed_login_succeeds() {
    let mut shell = shell_with(MemorySessionStore::new());
    shell.advance(ms(500));
    shell.login(Credentials::new("x@y.com", "bad"));
    shell.advance(ms(1000));

    shell.login(demo());
    shell.advance(ms(1000));
    assert!(shell.state().is_authenticated());
    assert_eq!(shell.state().session.error, None);
}

#[test]
fn second_login_while_in_flight_is_ignored() {
    let mut shell = shell_with(MemorySessionStore::new());
    shell.advance(ms(500));

    assert!(shell.login(demo()));
    assert!(!shell.login(demo()));
    assert_eq!(shell.scheduler().queue().pending_timers(), 1);
}

#[test]
fn corrupt_record_resolves_silently_to_signed_out() {
    let mut shell = shell_with(MemorySessionStore::with_raw(r#"{"id": "usr-001", "name": 7"#));
    shell.advance(ms(500));

    let session = &shell.state().session;
    assert!(!session.authenticated);
    assert!(!session.loading);
    assert_eq!(session.error, None);
    assert!(shell.host().notifications.is_empty());
    assert_eq!(shell.frame().content.kind, PanelKind::Login);
}

#[test]
fn non_utf8_record_is_discarded_without_notice() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonSessionStore::in_dir(dir.path()).unwrap();
    let record_path = store.path().to_path_buf();
    std::fs::write(&record_path, [0xff, 0xfe, 0x7b, 0x00]).unwrap();

    let mut shell = shell_with(store);
    shell.advance(ms(500));

    let session = &shell.state().session;
    assert!(!session.authenticated);
    assert_eq!(session.error, None);
    assert!(shell.host().notifications.is_empty());
    assert!(!record_path.exists());
}

#[test]
fn navigation_and_modals_are_ignored_while_signed_out() {
    let mut shell = shell_with(MemorySessionStore::new());
    shell.advance(ms(500));

    assert!(!shell.navigate(ScreenId::Settings, None));
    assert!(!shell.open_modal(ModalId::AddCandidate, None));
    assert!(!shell.toggle_sidebar());
    assert_eq!(shell.state().navigation.current_screen, ScreenId::Dashboard);
    assert!(shell.host().titles.is_empty());
}

#[test]
fn navigate_then_back_returns_to_previous_screen() {
    let mut shell = signed_in(MemorySessionStore::new());

    shell.navigate(ScreenId::Candidates, None);
    shell.navigate(ScreenId::Settings, None);
    shell.back();

    let nav = &shell.state().navigation;
    assert_eq!(nav.current_screen, ScreenId::Candidates);
    assert_eq!(shell.host().last_title(), Some("Candidates | Delv Talent"));
    assert_eq!(shell.host().scroll_resets, 3);
}

#[test]
fn back_with_empty_history_goes_to_dashboard() {
    let mut shell = signed_in(MemorySessionStore::new());
    shell.navigate(ScreenId::Pipeline, None);
    shell.back();
    shell.back();

    let nav = &shell.state().navigation;
    assert_eq!(nav.current_screen, ScreenId::Dashboard);
    assert!(nav.history.is_empty());
}

#[test]
fn history_stays_bounded_without_consecutive_duplicates() {
    let mut shell = signed_in(MemorySessionStore::new());
    let route = [
        ScreenId::Candidates,
        ScreenId::Candidates,
        ScreenId::Pipeline,
        ScreenId::Shortlists,
        ScreenId::Settings,
        ScreenId::Settings,
        ScreenId::Dashboard,
        ScreenId::Candidates,
    ];

    for screen in route {
        shell.navigate(screen, None);
        let history = &shell.state().navigation.history;
        assert!(history.len() <= 4);
        assert!(history.iter().zip(history.iter().skip(1)).all(|(a, b)| a != b));
    }
}

#[test]
fn navigation_closes_modal_and_settles_on_next_frame() {
    let mut shell = signed_in(MemorySessionStore::new());
    shell.open_modal(ModalId::ScheduleInterview, None);

    shell.navigate(ScreenId::CandidateDetail, Some("c-101"));
    let state = shell.state();
    assert_eq!(state.modal.active_modal, None);
    assert_eq!(state.navigation.selected_entity_id.as_deref(), Some("c-101"));
    assert!(state.navigation.transitioning);

    shell.run_pending();
    assert!(!shell.state().navigation.transitioning);
    assert_eq!(shell.frame().content.title, "Priya Raman");
}

#[test]
fn opening_a_modal_replaces_the_previous_one() {
    let mut shell = signed_in(MemorySessionStore::new());

    shell.open_modal(ModalId::CandidatePreview, Some(json!({"name": "A"})));
    shell.open_modal(ModalId::ShortlistPreview, Some(json!({"name": "B"})));

    let modal = &shell.state().modal;
    assert_eq!(modal.active_modal, Some(ModalId::ShortlistPreview));
    assert_eq!(modal.payload, Some(json!({"name": "B"})));

    shell.open_modal(ModalId::AddCandidate, Some(json!({"ignored": true})));
    assert_eq!(shell.state().modal.payload, None);

    assert!(shell.close_modal());
    assert!(!shell.close_modal());
    assert_eq!(shell.state().modal.active_modal, None);
}

#[test]
fn modal_actions_take_precedence_when_activating() {
    let mut shell = signed_in(MemorySessionStore::new());
    shell.open_modal(ModalId::EditTask, None);

    // [0] Save task
    assert!(shell.activate(0));
    assert_eq!(shell.state().modal.active_modal, None);
    assert_eq!(shell.state().navigation.current_screen, ScreenId::Dashboard);
}

#[test]
fn resize_storm_applies_only_the_settled_width() {
    let mut shell = signed_in(MemorySessionStore::new());
    assert!(shell.state().viewport.sidebar_open);

    for width in [900, 300, 1100, 500] {
        shell.resize(width);
        shell.advance(ms(10));
    }
    assert_eq!(shell.state().viewport.width_px, 1280);

    // Last resize at t+30ms; its window ends at t+180ms.
    shell.advance(ms(139));
    assert_eq!(shell.state().viewport.width_px, 1280);
    assert!(shell.is_resize_pending());

    shell.advance(ms(1));
    let viewport = shell.state().viewport;
    assert_eq!(viewport.width_px, 500);
    assert!(!viewport.sidebar_open);
    assert!(!shell.is_resize_pending());

    shell.resize(900);
    shell.advance(ms(150));
    assert!(shell.state().viewport.sidebar_open);
}

#[test]
fn manual_toggle_lasts_until_next_resize() {
    let mut shell = signed_in(MemorySessionStore::new());

    assert!(shell.toggle_sidebar());
    assert!(!shell.state().viewport.sidebar_open);
    assert!(shell.frame().sidebar.is_none());

    shell.resize(1300);
    shell.advance(ms(150));
    assert!(shell.state().viewport.sidebar_open);

    shell.resize(600);
    shell.advance(ms(150));
    assert!(!shell.toggle_sidebar());
    assert!(!shell.state().viewport.sidebar_open);
}

#[test]
fn teardown_discards_in_flight_check_auth() {
    let dir = tempfile::tempdir().unwrap();
    drop(signed_in(JsonSessionStore::in_dir(dir.path()).unwrap()));

    let mut shell = shell_with(JsonSessionStore::in_dir(dir.path()).unwrap());
    shell.advance(ms(200));
    shell.resize(700);
    shell.advance(ms(100));
    assert!(shell.is_resize_pending());
    shell.teardown();
    assert!(!shell.is_resize_pending());

    assert_eq!(shell.advance(ms(1000)), 0);
    shell.deliver(Task::Worker(WorkerMessage::check_auth()));
    shell.deliver(Task::ResizeFrame);

    let state = shell.state();
    assert!(state.session.loading);
    assert!(!state.session.authenticated);
    assert_eq!(state.viewport.width_px, 1280);
    assert!(!shell.is_alive());
    assert!(!shell.navigate(ScreenId::Settings, None));
}

#[test]
fn logout_resets_everything_and_notifies() {
    let mut shell = signed_in(MemorySessionStore::new());
    shell.navigate(ScreenId::Shortlists, None);
    shell.open_modal(ModalId::CreateShortlist, None);
    assert_eq!(shell.host().last_title(), Some("Shortlists | Delv Talent"));

    assert!(shell.logout());
    shell.advance(ms(300));
    assert_eq!(shell.host().last_title(), Some("Delv Talent"));

    let state = shell.state();
    assert!(!state.session.authenticated);
    assert_eq!(state.session.user, None);
    assert_eq!(state.navigation.current_screen, ScreenId::Dashboard);
    assert!(state.navigation.history.is_empty());
    assert_eq!(state.modal.active_modal, None);
    assert!(!state.viewport.sidebar_open);
    assert_eq!(shell.host().messages().last(), Some(&"Signed out"));
}

#[test]
fn logout_storage_failure_is_reported_but_state_still_resets() {
    let mut shell = signed_in(MemorySessionStore::new().failing_clear());

    shell.logout();
    shell.advance(ms(300));

    assert!(!shell.state().session.authenticated);
    let last = shell.host().notifications.last().unwrap();
    assert_eq!(last.level, NotificationLevel::Error);
    assert!(last.message.starts_with("Sign out failed:"));
    assert!(last.message.contains("storage is locked"));
}

struct BrokenPipeline;

struct Explodes;

impl ScreenView for Explodes {
    fn render(&self, _callbacks: &ScreenCallbacks) -> delv_shell::Result<Panel> {
        panic!("stage data unavailable");
    }
}

impl ViewFactory for BrokenPipeline {
    fn construct(&self, screen: ScreenId, entity_id: Option<&str>) -> delv_shell::Result<Box<dyn ScreenView>> {
        match screen {
            ScreenId::Pipeline => Ok(Box::new(Explodes)),
            _ => StandardViews.construct(screen, entity_id),
        }
    }
}

#[test]
fn render_failure_shows_fallback_and_reload_recovers() {
    let mut shell = signed_in(MemorySessionStore::new()).with_views(Box::new(BrokenPipeline));

    shell.navigate(ScreenId::Pipeline, None);
    shell.run_pending();

    let frame = shell.frame();
    assert_eq!(frame.content.kind, PanelKind::Fallback);
    assert_eq!(frame.content.actions[0].intent, Intent::Reload);
    assert!(frame.sidebar.is_some());
    assert!(shell.state().is_authenticated());
    assert_eq!(shell.state().navigation.current_screen, ScreenId::Pipeline);

    assert!(shell.activate(0));
    assert_eq!(shell.host().last_title(), Some("Delv Talent"));
    assert!(shell.state().session.loading);
    assert_eq!(shell.frame().content.kind, PanelKind::Loading);

    shell.advance(ms(500));
    assert!(shell.state().is_authenticated());
    assert_eq!(shell.state().navigation.current_screen, ScreenId::Dashboard);
    assert_eq!(shell.frame().content.kind, PanelKind::Screen);
}

#[test]
fn reload_drops_pending_work() {
    let mut shell = signed_in(MemorySessionStore::new());
    shell.resize(400);
    shell.logout();

    shell.dispatch(delv_shell::Event::Reload);
    assert!(!shell.is_resize_pending());
    assert_eq!(shell.scheduler().queue().pending_timers(), 1);

    shell.advance(ms(500));
    // The pending logout never ran, so the stored session is restored.
    assert!(shell.state().is_authenticated());
    assert_eq!(shell.state().viewport.width_px, 1280);
}
