//! Yomiage configuration schema.
//!
//! Every section is optional in the YAML file; [`apply_all_defaults`]
//! fills in whatever the user left out.
//!
//! [`apply_all_defaults`]: crate::defaults::apply_all_defaults

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YomiageConfig {
    /// Text processing (English → Kana) settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reading: Option<ReadingConfig>,

    /// Builtin speech dictionary modifications
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dictionary: Option<DictionaryConfig>,

    /// Logging configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging: Option<LoggingConfig>,
}

impl YomiageConfig {
    pub fn reading_enabled(&self) -> bool {
        self.reading.as_ref().and_then(|r| r.enabled).unwrap_or(true)
    }

    pub fn locale_prefix(&self) -> &str {
        self.reading
            .as_ref()
            .and_then(|r| r.locale_prefix.as_deref())
            .unwrap_or(crate::defaults::DEFAULT_LOCALE_PREFIX)
    }

    pub fn log_level(&self) -> &str {
        self.logging
            .as_ref()
            .and_then(|l| l.level.as_deref())
            .unwrap_or(crate::defaults::DEFAULT_LOG_LEVEL)
    }
}

// ---------------------------------------------------------------------------
// Reading
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingConfig {
    /// Start with text processing switched on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Only text whose locale starts with this prefix is converted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale_prefix: Option<String>,

    /// English word → Kana reading.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub words: BTreeMap<String, String>,
}

// ---------------------------------------------------------------------------
// Dictionary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DictionaryConfig {
    /// Remove the builtin camel-case splitting rules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remove_default_patterns: Option<bool>,

    /// Additional builtin patterns to remove while running.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub remove_patterns: Vec<String>,
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    /// Level or `tracing` filter directive, e.g. `"debug"` or `"yomiage_speech=trace"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    /// Directory for rolling NDJSON log files; console only when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ansi: Option<bool>,
}
