//! Structured logging setup for Yomiage.
//!
//! Console output for humans, optional daily-rotated NDJSON files, and
//! environment-based level control.

pub mod logger;

pub use logger::{init_logger, LogSettings, LOG_ENV_VAR};
pub use tracing_appender::non_blocking::WorkerGuard;
