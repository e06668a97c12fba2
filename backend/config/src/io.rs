//! Config file read/write with atomic backup rotation.

use crate::schema::YomiageConfig;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};

/// Default config file name within the config directory.
const CONFIG_FILE_NAME: &str = "config.yaml";

/// Number of rolling backups to keep.
const MAX_BACKUPS: usize = 3;

/// Resolve the Yomiage config directory.
/// Priority: `YOMIAGE_CONFIG_DIR` env > platform config dir > `./.yomiage`
pub fn config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("YOMIAGE_CONFIG_DIR") {
        return PathBuf::from(dir);
    }
    dirs::config_dir()
        .map(|base| base.join("yomiage"))
        .unwrap_or_else(|| PathBuf::from(".yomiage"))
}

/// Resolve the full path to the main config file.
pub fn config_file_path(config_dir: &Path) -> PathBuf {
    config_dir.join(CONFIG_FILE_NAME)
}

/// Load and parse the config from disk.
///
/// Returns `Ok(Default::default())` if the file doesn't exist (first run).
pub async fn load_config(path: &Path) -> Result<YomiageConfig> {
    if !fs::try_exists(path).await.unwrap_or(false) {
        debug!(path = %path.display(), "Config file does not exist; using defaults");
        return Ok(YomiageConfig::default());
    }

    let raw = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    // An empty file is a valid "all defaults" config.
    if raw.trim().is_empty() {
        return Ok(YomiageConfig::default());
    }

    let config: YomiageConfig = serde_yaml::from_str(&raw)
        .with_context(|| format!("Failed to parse config YAML at: {}", path.display()))?;

    info!(path = %path.display(), "Loaded config");
    Ok(config)
}

/// Write config to disk atomically (write to temp file, rename).
///
/// Keeps up to [`MAX_BACKUPS`] previous versions as `config.yaml.bak.N`.
pub async fn write_config(config: &YomiageConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await.with_context(|| {
            format!("Failed to create config directory: {}", parent.display())
        })?;
    }

    if fs::try_exists(path).await.unwrap_or(false) {
        rotate_backups(path).await;
    }

    let yaml = serde_yaml::to_string(config).context("Failed to serialize config to YAML")?;

    let tmp_path = path.with_extension("yaml.tmp");
    fs::write(&tmp_path, yaml.as_bytes())
        .await
        .with_context(|| format!("Failed to write temp config: {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path)
        .await
        .with_context(|| format!("Failed to rename temp config to: {}", path.display()))?;

    info!(path = %path.display(), "Wrote config");
    Ok(())
}

fn backup_path(path: &Path, n: usize) -> PathBuf {
    path.with_extension(format!("yaml.bak.{n}"))
}

/// Shift `.bak.1 → .bak.2 → …` and copy the current file to `.bak.1`.
/// Failures are logged; a missing backup never blocks a write.
async fn rotate_backups(path: &Path) {
    for i in (1..MAX_BACKUPS).rev() {
        let old = backup_path(path, i);
        if fs::try_exists(&old).await.unwrap_or(false) {
            if let Err(e) = fs::rename(&old, backup_path(path, i + 1)).await {
                warn!(backup = %old.display(), error = %e, "Failed to rotate backup");
            }
        }
    }

    let bak = backup_path(path, 1);
    if let Err(e) = fs::copy(path, &bak).await {
        warn!(backup = %bak.display(), error = %e, "Failed to create backup");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ReadingConfig;

    #[tokio::test]
    async fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config(&dir.path().join("nope.yaml")).await.unwrap();
        assert_eq!(cfg, YomiageConfig::default());
    }

    #[tokio::test]
    async fn write_then_load_and_keep_backups() {
        let dir = tempfile::tempdir().unwrap();
        let path = config_file_path(&dir.path().join("nested"));

        for enabled in [true, false, true, false, true] {
            let cfg = YomiageConfig {
                reading: Some(ReadingConfig {
                    enabled: Some(enabled),
                    ..Default::default()
                }),
                ..Default::default()
            };
            write_config(&cfg, &path).await.unwrap();
        }

        let loaded = load_config(&path).await.unwrap();
        assert_eq!(loaded.reading.unwrap().enabled, Some(true));

        assert!(backup_path(&path, 1).exists());
        assert!(backup_path(&path, MAX_BACKUPS).exists());
        assert!(!backup_path(&path, MAX_BACKUPS + 1).exists());
        assert!(!path.with_extension("yaml.tmp").exists());

        // Most recent backup holds the previous write.
        let previous = load_config(&backup_path(&path, 1)).await.unwrap();
        assert_eq!(previous.reading.unwrap().enabled, Some(false));
    }

    #[tokio::test]
    async fn malformed_yaml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        tokio::fs::write(&path, "reading: [unclosed").await.unwrap();
        let err = load_config(&path).await.unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }

    #[tokio::test]
    async fn empty_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        tokio::fs::write(&path, "\n").await.unwrap();
        assert_eq!(load_config(&path).await.unwrap(), YomiageConfig::default());
    }
}
