mod check_config_cmd;
mod dictionary_cmd;
mod session;
mod speak_cmd;
mod terminal_output;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use yomiage_config::{
    apply_all_defaults, config_dir, config_file_path, ensure_valid, load_config, YomiageConfig,
};
use yomiage_hooks::SymbolLevel;
use yomiage_logging::{init_logger, LogSettings, WorkerGuard};

#[derive(Parser)]
#[command(name = "yomiage")]
#[command(about = "Yomiage: reads English in Japanese text the way you want it read")]
#[command(version)]
struct Cli {
    /// Config file (default: <config dir>/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run text through the speech hook and print what would be spoken
    Speak {
        /// Locale of the text
        #[arg(short, long, default_value = "ja_JP")]
        locale: String,
        /// Symbol level (none, some, most, all, char or a number)
        #[arg(long, default_value = "some")]
        level: SymbolLevel,
        /// Speak with text processing switched off
        #[arg(long)]
        disabled: bool,
        /// Text to speak
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Show the builtin dictionary before and after modification
    Dictionary,
    /// Validate the config file and print the report
    CheckConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let path = cli
        .config
        .unwrap_or_else(|| config_file_path(&config_dir()));

    let (config, _guard) = load_and_init_logging(&path).await?;

    match cli.command {
        Commands::Speak {
            locale,
            level,
            disabled,
            text,
        } => {
            ensure_valid(&config)?;
            speak_cmd::run(&config, &locale, level, disabled, &text.join(" "))
        }
        Commands::Dictionary => {
            ensure_valid(&config)?;
            dictionary_cmd::run(&config)
        }
        Commands::CheckConfig => check_config_cmd::run(&path, &config),
    }
}

/// Load the config, then start logging with its settings.
///
/// Loading happens before any subscriber exists, so what it found is
/// reported once logging is up.
async fn load_and_init_logging(path: &Path) -> Result<(YomiageConfig, Option<WorkerGuard>)> {
    let config = apply_all_defaults(load_config(path).await?);
    let guard = init_logger(&log_settings(&config));
    let source = if path.exists() { "file" } else { "defaults" };
    info!(path = %path.display(), source, "Using config");
    Ok((config, guard))
}

fn log_settings(config: &YomiageConfig) -> LogSettings {
    let logging = config.logging.clone().unwrap_or_default();
    LogSettings {
        level: config.log_level().to_string(),
        dir: logging.dir,
        ansi: logging.ansi.unwrap_or(true) && terminal_output::supports_color(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn config_source_is_logged_after_logger_init() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        let _default = tracing::subscriber::set_default(subscriber);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        tokio::fs::write(&path, "logging:\n  level: warn\n").await.unwrap();

        let (config, _guard) = load_and_init_logging(&path).await.unwrap();
        assert_eq!(config.log_level(), "warn");

        let out = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(out.contains("Using config"), "log output: {out}");
        assert!(
            out.contains("source=\"file\"") || out.contains("source=file"),
            "log output: {out}"
        );
    }
}
