//! Application layer coordinating state, events, and actions.
//!
//! This module sits between the runtime (scheduler, host, worker delivery) and
//! the domain/worker/ui layers. It implements the event-driven core of the
//! shell.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! Host input → Events → handle_event → State blocks replaced → Actions → Runtime
//!                           ↑                                      ↓
//!                           └────────── Worker Responses ──────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: side effect commands emitted by the reducer
//! - [`handler`]: the reducer and its [`Event`] type
//! - [`layout`]: breakpoints and sidebar policy
//! - [`modal`]: single-slot modal state
//! - [`navigation`]: current screen and bounded back stack
//! - [`palette`]: fuzzy screen lookup
//! - [`session`]: authentication state and credential check
//! - [`state`]: [`AppState`] and chrome view models

pub mod actions;
pub mod handler;
pub mod layout;
pub mod modal;
pub mod navigation;
pub mod palette;
pub mod session;
pub mod state;

pub use actions::{Action, Notification, NotificationLevel};
pub use handler::{handle_event, Event};
pub use layout::{Breakpoint, ViewportState};
pub use modal::ModalState;
pub use navigation::NavigationState;
pub use session::Session;
pub use state::AppState;
