//! Session worker message types.
//!
//! Requests travel from the shell to the [`SessionWorker`](super::SessionWorker)
//! after a simulated network delay; responses come back as
//! [`Event::WorkerResponse`](crate::app::Event::WorkerResponse). Each request
//! carries the trace context of the span that issued it so the worker's spans
//! join the same trace even though they run on a later scheduler tick.

use crate::domain::{Credentials, User};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Distributed tracing context for cross-tick span propagation.
///
/// Captures the current trace and span IDs from OpenTelemetry so a request
/// handled later can be linked to the span that issued it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID for linking spans.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Creates a trace context from the current tracing span.
    ///
    /// Returns `None` if the current span context is invalid or not sampled,
    /// which is always the case when no OpenTelemetry layer is installed.
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let span = tracing::Span::current();

        let otel_context = span.context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if span_context.is_valid() {
            let trace_id = format!("{:032x}", span_context.trace_id());
            let parent_span_id = format!("{:016x}", span_context.span_id());

            tracing::trace!(%trace_id, %parent_span_id, "capturing trace context");

            Some(Self {
                trace_id,
                parent_span_id,
            })
        } else {
            None
        }
    }
}

/// Generates constructors that attach the current trace context.
macro_rules! worker_message_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl WorkerMessage {
            $(
                #[doc = concat!("Create a ", stringify!($variant), " message with current trace context")]
                #[must_use]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

worker_message_builders! {
    check_auth(CheckAuth {}),
    login(Login { credentials: Credentials }),
    logout(Logout {}),
}

/// Requests handled by the session worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// Restore the persisted session, if any.
    CheckAuth {
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Verify credentials and persist the resulting user.
    Login {
        credentials: Credentials,

        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Remove the persisted session.
    Logout {
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

impl WorkerMessage {
    #[must_use]
    pub const fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::CheckAuth { trace_context }
            | Self::Login { trace_context, .. }
            | Self::Logout { trace_context } => trace_context.as_ref(),
        }
    }

    /// Short name for logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::CheckAuth { .. } => "check_auth",
            Self::Login { .. } => "login",
            Self::Logout { .. } => "logout",
        }
    }
}

/// Responses produced by the session worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerResponse {
    /// Stored session resolved. `None` means no usable session.
    AuthChecked { user: Option<User> },

    /// Reading the stored session failed for a reason other than corruption.
    AuthCheckFailed { message: String },

    LoginSucceeded { user: User },

    LoginFailed { message: String },

    /// Session ended. `error` is set when removing the stored record failed;
    /// the shell signs out regardless.
    LoggedOut { error: Option<String> },
}

/// Simulated round-trip time per request kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Latency {
    pub check_auth: Duration,
    pub login: Duration,
    pub logout: Duration,
}

impl Latency {
    /// No delay at all; every request resolves on the next scheduler pass.
    #[must_use]
    pub const fn immediate() -> Self {
        Self {
            check_auth: Duration::ZERO,
            login: Duration::ZERO,
            logout: Duration::ZERO,
        }
    }

    #[must_use]
    pub const fn for_message(&self, message: &WorkerMessage) -> Duration {
        match message {
            WorkerMessage::CheckAuth { .. } => self.check_auth,
            WorkerMessage::Login { .. } => self.login,
            WorkerMessage::Logout { .. } => self.logout,
        }
    }
}

impl Default for Latency {
    fn default() -> Self {
        Self {
            check_auth: Duration::from_millis(500),
            login: Duration::from_millis(1000),
            logout: Duration::from_millis(300),
        }
    }
}
