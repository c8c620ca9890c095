//! Actions representing side effects to be executed by the shell runtime.
//!
//! The reducer returns a `Vec<Action>` after each event so several effects can
//! be queued atomically. The runtime executes them in order against its
//! scheduler and host.
//!
//! # Example
//!
//! ```
//! use delv_shell::app::Action;
//! use delv_shell::worker::WorkerMessage;
//!
//! let actions = vec![
//!     Action::PostToWorker(WorkerMessage::check_auth()),
//! ];
//! assert_eq!(actions.len(), 1);
//! ```

use crate::worker::WorkerMessage;
use std::fmt;

/// Commands produced by the reducer and executed by the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Schedules a request for the session worker.
    ///
    /// The runtime delays delivery by the configured latency for the message
    /// kind, so the reducer never blocks on authentication.
    PostToWorker(WorkerMessage),

    /// Updates the host window title.
    SetTitle(String),

    /// Scrolls the host content area back to the top.
    ScrollToTop,

    /// Shows a transient notification.
    Notify(Notification),

    /// Requests the frame that ends a screen transition.
    ///
    /// Replaces any transition frame still pending.
    SettleTransition,

    /// Drops every pending timer and frame and rebuilds the view layer.
    ///
    /// Emitted before the fresh `CheckAuth` of a reload so stale responses from
    /// the previous run can never land.
    Reload,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationLevel {
    Success,
    Info,
    Error,
}

impl NotificationLevel {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Error => "error",
        }
    }
}

/// Transient toast shown by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.level.as_str(), self.message)
    }
}
