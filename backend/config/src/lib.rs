//! `yomiage-config`: Yomiage runtime configuration management.
//!
//! Provides:
//! - Typed config schema (reading, dictionary, logging)
//! - YAML read/write with atomic backup rotation
//! - Default value application
//! - Deep schema validation

pub mod defaults;
pub mod io;
pub mod schema;
pub mod validation;

// Re-export most-used types at crate root.
pub use defaults::{apply_all_defaults, DEFAULT_LOCALE_PREFIX, DEFAULT_LOG_LEVEL};
pub use io::{config_dir, config_file_path, load_config, write_config};
pub use schema::{DictionaryConfig, LoggingConfig, ReadingConfig, YomiageConfig};
pub use validation::{validate, ConfigValidationError, ValidationReport};

use anyhow::Result;
use std::path::Path;

/// Load, apply defaults to, and validate a config file.
///
/// This is the main entry point for loading a config at runtime.
pub async fn load_and_prepare(path: &Path) -> Result<YomiageConfig> {
    let config = apply_all_defaults(load_config(path).await?);
    ensure_valid(&config)?;
    Ok(config)
}

/// Log validation warnings and fail on any validation error.
pub fn ensure_valid(config: &YomiageConfig) -> Result<()> {
    let report = validate(config);
    for warning in &report.warnings {
        tracing::warn!(path = %warning.path, message = %warning.message, "Config warning");
    }
    if report.is_valid() {
        return Ok(());
    }
    for error in &report.errors {
        tracing::error!(path = %error.path, message = %error.message, "Config error");
    }
    let joined = report
        .errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ");
    anyhow::bail!("Invalid config: {joined}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn prepare_fills_defaults_for_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_and_prepare(&dir.path().join("config.yaml")).await.unwrap();
        assert!(cfg.reading_enabled());
        assert_eq!(cfg.locale_prefix(), DEFAULT_LOCALE_PREFIX);
        assert_eq!(cfg.log_level(), DEFAULT_LOG_LEVEL);
    }

    #[tokio::test]
    async fn prepare_rejects_invalid_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        tokio::fs::write(&path, "dictionary:\n  removePatterns:\n    - \"([a-z]\"\n")
            .await
            .unwrap();
        let err = load_and_prepare(&path).await.unwrap_err();
        assert!(err.to_string().contains("dictionary.removePatterns[0]"));
    }
}
