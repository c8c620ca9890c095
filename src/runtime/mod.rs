//! Runtime: scheduling, resize coalescing, the host seam and the shell loop.
//!
//! Nothing in here decides state transitions; that is the reducer's job. The
//! runtime only decides *when* events reach the reducer and carries out the
//! actions it returns.

pub mod host;
pub mod resize;
pub mod scheduler;
pub mod shell;

pub use host::{Host, RecordingHost};
pub use resize::{ResizeCoalescer, DEFAULT_DEBOUNCE};
pub use scheduler::{ManualScheduler, Scheduler, SystemScheduler, Task};
pub use shell::Shell;
