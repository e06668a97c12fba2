//! Config validation: deep checks with user-friendly error messages.

use crate::schema::YomiageConfig;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use thiserror::Error;

/// Language tag prefix such as `ja`, `ja_JP` or `ja-JP`.
static LOCALE_PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z]{2,3}(?:[_-][A-Za-z0-9]+)*$").unwrap());

const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

/// A config validation error with field path and message.
#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// A collection of validation errors found in one pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Validate the config and return a report of all errors and warnings.
pub fn validate(config: &YomiageConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_reading(config, &mut report);
    validate_dictionary(config, &mut report);
    validate_logging(config, &mut report);
    report
}

fn validate_reading(config: &YomiageConfig, report: &mut ValidationReport) {
    let Some(reading) = &config.reading else { return };

    if let Some(prefix) = &reading.locale_prefix {
        if prefix.is_empty() {
            report.warn("reading.localePrefix", "Empty prefix converts text in every locale");
        } else if !LOCALE_PREFIX_RE.is_match(prefix) {
            report.error(
                "reading.localePrefix",
                format!("'{prefix}' is not a language tag (expected e.g. 'ja' or 'ja_JP')"),
            );
        }
    }

    for (word, reading) in &reading.words {
        if word.trim().is_empty() {
            report.error("reading.words", "Word cannot be empty");
        } else if reading.trim().is_empty() {
            report.warn(
                format!("reading.words.{word}"),
                "Empty reading; the word will be silenced",
            );
        }
    }
}

fn validate_dictionary(config: &YomiageConfig, report: &mut ValidationReport) {
    let Some(dictionary) = &config.dictionary else { return };
    let mut seen = HashSet::new();
    for (i, pattern) in dictionary.remove_patterns.iter().enumerate() {
        let path = format!("dictionary.removePatterns[{i}]");
        if let Err(e) = Regex::new(pattern) {
            report.error(&path, format!("Invalid pattern: {e}"));
        }
        if !seen.insert(pattern.as_str()) {
            report.warn(&path, format!("Duplicate pattern '{pattern}'"));
        }
    }
}

fn validate_logging(config: &YomiageConfig, report: &mut ValidationReport) {
    let Some(logging) = &config.logging else { return };
    let Some(level) = &logging.level else { return };
    // Filter directives (`target=level`) are left to the subscriber to parse.
    if !level.contains('=') && !LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
        report.error(
            "logging.level",
            format!("Unknown log level '{level}'. Use one of: {}", LOG_LEVELS.join(", ")),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::apply_all_defaults;
    use crate::schema::{DictionaryConfig, LoggingConfig, ReadingConfig};

    #[test]
    fn default_config_is_valid() {
        let report = validate(&apply_all_defaults(YomiageConfig::default()));
        assert!(report.is_valid(), "errors: {:?}", report.errors);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn invalid_removal_pattern_is_error() {
        let cfg = YomiageConfig {
            dictionary: Some(DictionaryConfig {
                remove_patterns: vec!["([a-z]".into(), "ok".into(), "ok".into()],
                ..Default::default()
            }),
            ..Default::default()
        };
        let report = validate(&cfg);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].path, "dictionary.removePatterns[0]");
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].message.contains("Duplicate"));
    }

    #[test]
    fn locale_prefix_must_look_like_a_tag() {
        let mut cfg = YomiageConfig {
            reading: Some(ReadingConfig {
                locale_prefix: Some("ja JP".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert!(!validate(&cfg).is_valid());

        cfg.reading.as_mut().unwrap().locale_prefix = Some("ja-JP".into());
        assert!(validate(&cfg).is_valid());

        cfg.reading.as_mut().unwrap().locale_prefix = Some(String::new());
        let report = validate(&cfg);
        assert!(report.is_valid());
        assert_eq!(report.warnings[0].path, "reading.localePrefix");
    }

    #[test]
    fn empty_word_is_error_and_empty_reading_is_warning() {
        let mut words = std::collections::BTreeMap::new();
        words.insert(" ".to_string(), "x".to_string());
        words.insert("git".to_string(), String::new());
        let cfg = YomiageConfig {
            reading: Some(ReadingConfig {
                words,
                ..Default::default()
            }),
            ..Default::default()
        };
        let report = validate(&cfg);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.warnings[0].path, "reading.words.git");
    }

    #[test]
    fn unknown_log_level_is_error_but_directives_pass() {
        let mut cfg = YomiageConfig {
            logging: Some(LoggingConfig {
                level: Some("loud".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert!(!validate(&cfg).is_valid());

        cfg.logging.as_mut().unwrap().level = Some("yomiage_speech=debug".into());
        assert!(validate(&cfg).is_valid());

        cfg.logging.as_mut().unwrap().level = Some("WARN".into());
        assert!(validate(&cfg).is_valid());
    }
}
