//! Config defaults: fills in values the user left out.

use crate::schema::{DictionaryConfig, LoggingConfig, ReadingConfig, YomiageConfig};

/// Default locale prefix for English → Kana conversion.
pub const DEFAULT_LOCALE_PREFIX: &str = "ja";

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Apply all defaults to a freshly loaded config.
pub fn apply_all_defaults(config: YomiageConfig) -> YomiageConfig {
    let config = apply_reading_defaults(config);
    let config = apply_dictionary_defaults(config);
    apply_logging_defaults(config)
}

fn apply_reading_defaults(mut config: YomiageConfig) -> YomiageConfig {
    let reading = config.reading.get_or_insert_with(ReadingConfig::default);
    reading.enabled.get_or_insert(true);
    if reading.locale_prefix.is_none() {
        reading.locale_prefix = Some(DEFAULT_LOCALE_PREFIX.to_string());
    }
    config
}

fn apply_dictionary_defaults(mut config: YomiageConfig) -> YomiageConfig {
    let dictionary = config.dictionary.get_or_insert_with(DictionaryConfig::default);
    dictionary.remove_default_patterns.get_or_insert(true);
    config
}

fn apply_logging_defaults(mut config: YomiageConfig) -> YomiageConfig {
    let logging = config.logging.get_or_insert_with(LoggingConfig::default);
    if logging.level.is_none() {
        logging.level = Some(DEFAULT_LOG_LEVEL.to_string());
    }
    logging.ansi.get_or_insert(true);
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_every_section() {
        let cfg = apply_all_defaults(YomiageConfig::default());
        let reading = cfg.reading.unwrap();
        assert_eq!(reading.enabled, Some(true));
        assert_eq!(reading.locale_prefix.as_deref(), Some("ja"));
        assert_eq!(cfg.dictionary.unwrap().remove_default_patterns, Some(true));
        assert_eq!(cfg.logging.unwrap().level.as_deref(), Some("info"));
    }

    #[test]
    fn does_not_override_user_values() {
        let cfg = YomiageConfig {
            reading: Some(ReadingConfig {
                enabled: Some(false),
                locale_prefix: Some("ja_JP".into()),
                ..Default::default()
            }),
            dictionary: Some(DictionaryConfig {
                remove_default_patterns: Some(false),
                ..Default::default()
            }),
            ..Default::default()
        };
        let cfg = apply_all_defaults(cfg);
        let reading = cfg.reading.unwrap();
        assert_eq!(reading.enabled, Some(false));
        assert_eq!(reading.locale_prefix.as_deref(), Some("ja_JP"));
        assert_eq!(cfg.dictionary.unwrap().remove_default_patterns, Some(false));
    }

    #[test]
    fn applying_twice_is_stable() {
        let once = apply_all_defaults(YomiageConfig::default());
        let twice = apply_all_defaults(once.clone());
        assert_eq!(once, twice);
    }
}
