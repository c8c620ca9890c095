//! Shell event loop.
//!
//! [`Shell`] owns the application state and everything with side effects: the
//! session worker, the view dispatcher, the scheduler and the host. Events go
//! through [`handle_event`]; the returned actions are executed here, in order,
//! before the next event is looked at.
//!
//! # Event Flow
//!
//! ```text
//! host command ─▶ dispatch(Event) ─▶ handle_event ─▶ Vec<Action>
//!                      ▲                                  │
//!                      │                    ┌─────────────┼──────────────┐
//!                      │                    ▼             ▼              ▼
//!               deliver(Task) ◀── scheduler timers    host title    notifications
//!                      │             and frames
//!                      └─▶ SessionWorker ─▶ WorkerResponse
//! ```
//!
//! Once [`Shell::teardown`] has run, every pending timer and frame is dropped
//! and any task delivered afterwards is discarded.

use crate::app::{handle_event, Action, AppState, Event};
use crate::domain::{Credentials, ModalId, ScreenId};
use crate::runtime::host::Host;
use crate::runtime::resize::{ResizeCoalescer, DEFAULT_DEBOUNCE};
use crate::runtime::scheduler::{FrameId, ManualScheduler, Scheduler, Task};
use crate::storage::SessionStore;
use crate::ui::contract::{Intent, ViewFactory};
use crate::ui::dispatcher::ViewDispatcher;
use crate::ui::viewmodel::ShellViewModel;
use crate::worker::{Latency, SessionWorker};
use serde_json::Value;
use std::time::Duration;

/// Upper bound on scheduler drain rounds in one [`Shell::run_pending`] call.
const MAX_DRAIN_ROUNDS: usize = 64;

pub struct Shell<S: Scheduler, H: Host> {
    state: AppState,
    worker: SessionWorker,
    dispatcher: ViewDispatcher,
    scheduler: S,
    host: H,
    resize: ResizeCoalescer,
    latency: Latency,
    transition_frame: Option<FrameId>,
    alive: bool,
    last_frame: Option<ShellViewModel>,
}

impl<S: Scheduler, H: Host> Shell<S, H> {
    /// Creates a shell around an initial state. Call [`Shell::start`] to begin
    /// restoring the session.
    #[must_use]
    pub fn new(state: AppState, store: Box<dyn SessionStore>, scheduler: S, host: H) -> Self {
        Self {
            state,
            worker: SessionWorker::new(store),
            dispatcher: ViewDispatcher::default(),
            scheduler,
            host,
            resize: ResizeCoalescer::new(DEFAULT_DEBOUNCE),
            latency: Latency::default(),
            transition_frame: None,
            alive: true,
            last_frame: None,
        }
    }

    #[must_use]
    pub fn with_latency(mut self, latency: Latency) -> Self {
        self.latency = latency;
        self
    }

    #[must_use]
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.resize = ResizeCoalescer::new(debounce);
        self
    }

    /// Replaces the screen views, e.g. with a test double.
    #[must_use]
    pub fn with_views(mut self, factory: Box<dyn ViewFactory>) -> Self {
        self.dispatcher = ViewDispatcher::new(factory);
        self.last_frame = None;
        self
    }

    /// Kicks off the startup session check.
    pub fn start(&mut self) {
        tracing::info!("starting shell");
        self.dispatch(Event::CheckAuth);
    }

    /// Runs one event through the reducer and executes its actions.
    ///
    /// A transition still waiting for its frame is settled first, so every
    /// navigation has fully completed before the next event is handled.
    /// Returns whether the visible state changed.
    pub fn dispatch(&mut self, event: Event) -> bool {
        if !self.alive {
            tracing::debug!(event_type = event.kind(), "shell torn down, dropping event");
            return false;
        }

        let mut changed = false;
        if !matches!(event, Event::TransitionSettled) {
            changed |= self.flush_transition();
        }
        changed |= self.apply(&event);
        changed
    }

    fn apply(&mut self, event: &Event) -> bool {
        let (render, actions) = handle_event(&mut self.state, event);
        if render {
            self.last_frame = None;
        }
        for action in actions {
            self.execute_action(action);
        }
        render
    }

    fn flush_transition(&mut self) -> bool {
        match self.transition_frame.take() {
            Some(frame) => {
                self.scheduler.cancel_frame(frame);
                self.apply(&Event::TransitionSettled)
            }
            None => false,
        }
    }

    fn execute_action(&mut self, action: Action) {
        match action {
            Action::PostToWorker(message) => {
                let delay = self.latency.for_message(&message);
                tracing::debug!(
                    message = message.kind(),
                    delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                    "scheduling worker request"
                );
                self.scheduler.set_timeout(delay, Task::Worker(message));
            }
            Action::SetTitle(title) => self.host.set_title(&title),
            Action::ScrollToTop => self.host.scroll_to_top(),
            Action::Notify(notification) => self.host.notify(&notification),
            Action::SettleTransition => {
                if let Some(frame) = self.transition_frame.take() {
                    self.scheduler.cancel_frame(frame);
                }
                self.transition_frame = Some(self.scheduler.request_frame(Task::TransitionFrame));
            }
            Action::Reload => {
                self.resize.teardown(&mut self.scheduler);
                self.scheduler.clear();
                self.transition_frame = None;
                self.last_frame = None;
            }
        }
    }

    /// Delivers a task taken from the scheduler.
    pub fn deliver(&mut self, task: Task) {
        if !self.alive {
            tracing::debug!(task = ?task, "shell torn down, discarding task");
            return;
        }

        match task {
            Task::Worker(message) => {
                let response = self.worker.handle_message(message);
                self.dispatch(Event::WorkerResponse(response));
            }
            Task::ResizeDebounce => self.resize.on_debounce(&mut self.scheduler),
            Task::ResizeFrame => {
                if let Some(width_px) = self.resize.on_frame() {
                    self.dispatch(Event::ViewportSettled { width_px });
                }
            }
            Task::TransitionFrame => {
                self.transition_frame = None;
                self.apply(&Event::TransitionSettled);
            }
        }
    }

    /// Delivers every due timer, then every requested frame, until neither
    /// is left. Returns the number of tasks delivered.
    pub fn run_pending(&mut self) -> usize {
        let mut delivered = 0;

        for _ in 0..MAX_DRAIN_ROUNDS {
            let mut tasks = self.scheduler.take_due();
            if tasks.is_empty() {
                tasks = self.scheduler.take_frames();
            }
            if tasks.is_empty() {
                return delivered;
            }
            for task in tasks {
                self.deliver(task);
                delivered += 1;
            }
        }

        tracing::warn!(delivered, "scheduler still busy after drain limit");
        delivered
    }

    /// Feeds a raw viewport width into the resize coalescer.
    pub fn resize(&mut self, width_px: u32) {
        if self.alive {
            self.resize.observe(width_px, &mut self.scheduler);
        }
    }

    pub fn login(&mut self, credentials: Credentials) -> bool {
        self.dispatch(Event::Login(credentials))
    }

    pub fn logout(&mut self) -> bool {
        self.dispatch(Event::Logout)
    }

    pub fn navigate(&mut self, screen: ScreenId, entity_id: Option<&str>) -> bool {
        self.dispatch(Event::Navigate {
            screen,
            entity_id: entity_id.map(str::to_string),
        })
    }

    pub fn back(&mut self) -> bool {
        self.dispatch(Event::Back)
    }

    pub fn open_modal(&mut self, modal: ModalId, payload: Option<Value>) -> bool {
        self.dispatch(Event::OpenModal { modal, payload })
    }

    pub fn close_modal(&mut self) -> bool {
        self.dispatch(Event::CloseModal)
    }

    pub fn toggle_sidebar(&mut self) -> bool {
        self.dispatch(Event::ToggleSidebar)
    }

    /// Composes the current frame, reusing the last one if nothing changed.
    pub fn frame(&mut self) -> &ShellViewModel {
        let Self {
            last_frame,
            dispatcher,
            state,
            ..
        } = self;
        last_frame.get_or_insert_with(|| dispatcher.compose(state))
    }

    /// Activates the action at `index` (zero-based) of the current frame.
    ///
    /// Uses the modal's actions while a modal is open. Returns `false` when
    /// there is no such action.
    pub fn activate(&mut self, index: usize) -> bool {
        let Some(intent) = self.frame().active_actions().get(index).map(|a| a.intent.clone()) else {
            tracing::debug!(index, "no action at index");
            return false;
        };
        self.dispatch(intent_event(intent));
        true
    }

    /// Cancels the resize timer and frame, drops every pending task, and
    /// marks the shell defunct.
    pub fn teardown(&mut self) {
        if !self.alive {
            return;
        }
        tracing::info!("tearing down shell");
        self.resize.teardown(&mut self.scheduler);
        if let Some(frame) = self.transition_frame.take() {
            self.scheduler.cancel_frame(frame);
        }
        self.scheduler.clear();
        self.alive = false;
    }

    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    #[must_use]
    pub const fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    #[must_use]
    pub const fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.alive
    }

    #[must_use]
    pub const fn is_resize_pending(&self) -> bool {
        self.resize.is_pending()
    }
}

impl<H: Host> Shell<ManualScheduler, H> {
    /// Moves the virtual clock forward and runs whatever became due.
    pub fn advance(&mut self, by: Duration) -> usize {
        self.scheduler.advance(by);
        self.run_pending()
    }
}

impl<S: Scheduler, H: Host> std::fmt::Debug for Shell<S, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Shell")
            .field("state", &self.state)
            .field("alive", &self.alive)
            .field("transition_frame", &self.transition_frame)
            .finish_non_exhaustive()
    }
}

fn intent_event(intent: Intent) -> Event {
    match intent {
        Intent::NavigateToScreen { screen, entity_id } => Event::Navigate { screen, entity_id },
        Intent::OpenModal { modal, payload } => Event::OpenModal { modal, payload },
        Intent::Back => Event::Back,
        Intent::CloseModal => Event::CloseModal,
        Intent::Reload => Event::Reload,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::session::{DEMO_EMAIL, DEMO_PASSWORD};
    use crate::runtime::host::RecordingHost;
    use crate::storage::MemorySessionStore;
    use crate::ui::theme::Theme;
    use crate::worker::WorkerMessage;

    fn shell() -> Shell<ManualScheduler, RecordingHost> {
        let state = AppState::new(Theme::default(), 1280);
        let mut shell = Shell::new(
            state,
            Box::new(MemorySessionStore::new()),
            ManualScheduler::new(),
            RecordingHost::new(),
        );
        shell.start();
        shell
    }

    fn signed_in() -> Shell<ManualScheduler, RecordingHost> {
        let mut shell = shell();
        shell.advance(Duration::from_millis(500));
        shell.login(Credentials::new(DEMO_EMAIL, DEMO_PASSWORD));
        shell.advance(Duration::from_millis(1000));
        assert!(shell.state().is_authenticated());
        shell
    }

    #[test]
    fn check_auth_waits_for_latency() {
        let mut shell = shell();
        assert!(shell.state().session.loading);
        assert_eq!(shell.advance(Duration::from_millis(499)), 0);
        assert!(shell.state().session.loading);
        assert_eq!(shell.advance(Duration::from_millis(1)), 1);
        assert!(!shell.state().session.loading);
        assert!(!shell.state().is_authenticated());
    }

    #[test]
    fn navigation_transition_settles_on_frame() {
        let mut shell = signed_in();
        shell.navigate(ScreenId::Pipeline, None);
        assert!(shell.state().navigation.transitioning);
        assert!(shell.scheduler().has_frames());

        shell.run_pending();
        assert!(!shell.state().navigation.transitioning);
    }

    #[test]
    fn next_event_settles_pending_transition_first() {
        let mut shell = signed_in();
        shell.navigate(ScreenId::Pipeline, None);
        shell.open_modal(ModalId::AddCandidate, None);

        assert!(!shell.state().navigation.transitioning);
        assert!(!shell.scheduler().has_frames());
        assert_eq!(shell.state().modal.active_modal, Some(ModalId::AddCandidate));
    }

    #[test]
    fn activate_maps_intents() {
        let mut shell = signed_in();
        // Dashboard: [0] View candidates
        assert!(shell.activate(0));
        assert_eq!(shell.state().navigation.current_screen, ScreenId::Candidates);
        assert!(!shell.activate(99));
    }

    #[test]
    fn frame_is_cached_until_state_changes() {
        let mut shell = signed_in();
        let first = shell.frame().clone();
        assert_eq!(shell.frame(), &first);

        shell.navigate(ScreenId::Settings, None);
        assert_eq!(shell.frame().header.title, "Settings");
    }

    #[test]
    fn teardown_discards_queued_worker_request() {
        let mut shell = signed_in();
        shell.execute_action(Action::PostToWorker(WorkerMessage::logout()));
        shell.teardown();

        assert!(!shell.is_alive());
        assert_eq!(shell.advance(Duration::from_secs(5)), 0);
        shell.deliver(Task::Worker(WorkerMessage::logout()));
        assert!(shell.state().is_authenticated());
    }
}
