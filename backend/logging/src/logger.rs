//! Structured Logger
//!
//! Wraps `tracing` to provide console output, file rotation (NDJSON),
//! and environment-based level control.

use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable that overrides the configured level.
pub const LOG_ENV_VAR: &str = "YOMIAGE_LOG";

const LOG_FILE_PREFIX: &str = "yomiage.log";

/// Where and how much to log.
#[derive(Debug, Clone)]
pub struct LogSettings {
    /// Level or filter directive, e.g. `info` or `yomiage_speech=debug`.
    pub level: String,
    /// Directory for rolling NDJSON files; console only when `None`.
    pub dir: Option<PathBuf>,
    pub ansi: bool,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            dir: None,
            ansi: true,
        }
    }
}

fn build_filter(level: &str, env_override: Option<String>) -> EnvFilter {
    env_override
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .or_else(|| EnvFilter::try_new(level).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

/// Initialize the global structured logger.
///
/// Console goes to stderr so command output on stdout stays clean. When a
/// log directory is set, NDJSON is written to `yomiage.log.YYYY-MM-DD`
/// through a background writer; keep the returned guard alive until exit
/// or buffered lines are lost.
pub fn init_logger(settings: &LogSettings) -> Option<WorkerGuard> {
    let env_filter = build_filter(&settings.level, std::env::var(LOG_ENV_VAR).ok());

    let (file_layer, guard) = match &settings.dir {
        Some(dir) => {
            let appender = RollingFileAppender::new(Rotation::DAILY, dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().json().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(settings.ansi);

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init();

    guard
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_override_wins_over_configured_level() {
        let filter = build_filter("info", Some("debug".to_string()));
        assert_eq!(filter.to_string(), "debug");
    }

    #[test]
    fn unparsable_levels_fall_back() {
        let filter = build_filter("warn", Some("yomiage=loud".to_string()));
        assert_eq!(filter.to_string(), "warn");

        let filter = build_filter("yomiage=loud", None);
        assert_eq!(filter.to_string(), "info");
    }

    #[test]
    fn file_logging_writes_ndjson() {
        let dir = tempfile::tempdir().unwrap();
        let settings = LogSettings {
            level: "info".to_string(),
            dir: Some(dir.path().to_path_buf()),
            ansi: false,
        };
        let guard = init_logger(&settings);
        assert!(guard.is_some());
        tracing::info!(answer = 42, "hello from test");
        drop(guard);

        let written: String = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(Result::ok)
            .filter(|e| e.file_name().to_string_lossy().starts_with(LOG_FILE_PREFIX))
            .map(|e| std::fs::read_to_string(e.path()).unwrap())
            .collect();
        assert!(written.contains("hello from test"));
    }
}
