//! Session worker implementation.
//!
//! Owns the [`SessionStore`] and turns each [`WorkerMessage`] into exactly one
//! [`WorkerResponse`]. Storage trouble never escapes as an error: corrupt
//! records are discarded, and failed writes are logged and reported in the
//! response where the shell needs to know.

use crate::app::session::authenticate;
use crate::domain::error::ShellError;
use crate::domain::Credentials;
use crate::storage::{SessionRecord, SessionStore};
use crate::worker::{WorkerMessage, WorkerResponse};

/// Processes session requests against a store.
pub struct SessionWorker {
    store: Box<dyn SessionStore>,
}

impl SessionWorker {
    #[must_use]
    pub fn new(store: Box<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Handles the `CheckAuth` message.
    ///
    /// Missing and corrupt records both resolve to "no session"; a corrupt
    /// record is also removed so it is not re-read on the next start.
    fn handle_check_auth(&mut self) -> WorkerResponse {
        match self.store.load().and_then(|record| record.map(SessionRecord::into_user).transpose()) {
            Ok(Some(user)) => {
                tracing::debug!(user_id = %user.id, "stored session restored");
                WorkerResponse::AuthChecked { user: Some(user) }
            }
            Ok(None) => {
                tracing::debug!("no stored session");
                WorkerResponse::AuthChecked { user: None }
            }
            Err(e) if e.is_corruption() => {
                tracing::warn!(error = %e, "discarding corrupt stored session");
                if let Err(clear_err) = self.store.clear() {
                    tracing::warn!(error = %clear_err, "failed to discard corrupt session");
                }
                WorkerResponse::AuthChecked { user: None }
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to read stored session");
                WorkerResponse::AuthCheckFailed {
                    message: format!("Could not restore session: {e}"),
                }
            }
        }
    }

    /// Handles the `Login` message.
    ///
    /// A failed save leaves the user signed in for this run only.
    fn handle_login(&mut self, credentials: &Credentials) -> WorkerResponse {
        let now = chrono::Utc::now().timestamp();

        match authenticate(credentials, now) {
            Ok(user) => {
                if let Err(e) = self.store.save(&SessionRecord::from(&user)) {
                    tracing::error!(error = %e, "failed to persist session");
                }
                tracing::info!(user_id = %user.id, "login succeeded");
                WorkerResponse::LoginSucceeded { user }
            }
            Err(e) => {
                tracing::info!(error = %e, "login failed");
                let message = match e {
                    ShellError::Auth(message) => message,
                    other => other.to_string(),
                };
                WorkerResponse::LoginFailed { message }
            }
        }
    }

    /// Handles the `Logout` message.
    fn handle_logout(&mut self) -> WorkerResponse {
        match self.store.clear() {
            Ok(()) => {
                tracing::info!("logged out");
                WorkerResponse::LoggedOut { error: None }
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to clear stored session");
                WorkerResponse::LoggedOut {
                    error: Some(e.to_string()),
                }
            }
        }
    }

    /// Attaches the parent trace context carried by a message.
    ///
    /// Returns a guard that must be held for the duration of the operation.
    fn attach_parent_trace_context(message: &WorkerMessage) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_context = message.trace_context()?;

        let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
        let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        let otel_context = opentelemetry::Context::current().with_remote_span_context(span_context);

        Some(otel_context.attach())
    }

    /// Processes a worker message and returns its response.
    pub fn handle_message(&mut self, message: WorkerMessage) -> WorkerResponse {
        let _context_guard = Self::attach_parent_trace_context(&message);

        let span = tracing::debug_span!("worker_handle_message", message_type = message.kind());
        let _guard = span.entered();

        match message {
            WorkerMessage::CheckAuth { .. } => self.handle_check_auth(),
            WorkerMessage::Login { credentials, .. } => self.handle_login(&credentials),
            WorkerMessage::Logout { .. } => self.handle_logout(),
        }
    }
}

impl std::fmt::Debug for SessionWorker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionWorker").finish_non_exhaustive()
    }
}
