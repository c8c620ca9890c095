//! Tracing with file-based OTLP export.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → SDK provider → FileSpanExporter
//!                                                            │
//!                                        <data_dir>/delv-shell-otlp.json (+ .1 .2 .3)
//! ```
//!
//! The live file rotates at 10 MiB; three backups are kept. The filter comes
//! from `Config::trace_level` (default `info`).

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::{init_tracing, TRACE_FILE};
