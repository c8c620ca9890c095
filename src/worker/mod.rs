//! Session worker for simulated-latency authentication calls.
//!
//! The shell never touches the session store directly. It schedules a
//! [`WorkerMessage`] on its scheduler with the configured [`Latency`], and when
//! the timer fires the [`SessionWorker`] handles it and the response is fed
//! back through the reducer.
//!
//! # Architecture
//!
//! - `messages`: request/response protocol with trace context propagation
//! - `handler`: worker implementation over a [`SessionStore`](crate::storage::SessionStore)

pub mod handler;
pub mod messages;

pub use handler::SessionWorker;
pub use messages::{Latency, TraceContext, WorkerMessage, WorkerResponse};
