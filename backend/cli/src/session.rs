//! Wires a demo speech host to a [`ReadingEnhancer`] from a loaded config.
//!
//! The host is in-memory: its engine runs text through its own builtin
//! speech dictionary, which is the part the enhancer modifies.

use anyhow::{Context, Result};
use std::sync::Arc;
use yomiage_config::YomiageConfig;
use yomiage_hooks::{processor_filter, FilterHandler, LoggingAction, TextContext};
use yomiage_speech::{
    process_text_fn, DictionaryEntry, EnglishToKanaProcessor, EnhancerSettings, EntryKind,
    InMemoryDictionary, InMemorySpeechHost, ReadingEnhancer, ReadingTable,
};

/// The demo host's builtin dictionary: camel-case splitting plus one symbol.
pub fn builtin_dictionary() -> Vec<DictionaryEntry> {
    vec![
        DictionaryEntry::new("([a-z])([A-Z])", r"\1 \2", EntryKind::Regex)
            .case_sensitive(true)
            .with_comment("split camelCase"),
        DictionaryEntry::new("([A-Z])([A-Z][a-z])", r"\1 \2", EntryKind::Regex)
            .case_sensitive(true)
            .with_comment("split ABCWord"),
        DictionaryEntry::new("&", " and ", EntryKind::Anywhere),
    ]
}

pub fn enhancer_settings(config: &YomiageConfig) -> EnhancerSettings {
    let dictionary = config.dictionary.clone().unwrap_or_default();
    EnhancerSettings {
        enabled: config.reading_enabled(),
        remove_default_patterns: dictionary.remove_default_patterns.unwrap_or(true),
        extra_pattern_removals: dictionary.remove_patterns,
    }
}

pub fn reading_processor(
    config: &YomiageConfig,
) -> Result<Arc<dyn FilterHandler<String, TextContext>>> {
    let words = config
        .reading
        .as_ref()
        .map(|r| r.words.clone())
        .unwrap_or_default();
    let table = ReadingTable::new(words).context("Failed to build reading table")?;
    let processor =
        EnglishToKanaProcessor::with_converter(table).with_locale_prefix(config.locale_prefix());
    Ok(processor_filter(processor))
}

pub struct Session {
    pub host: Arc<InMemorySpeechHost>,
    pub store: Arc<InMemoryDictionary>,
    pub enhancer: ReadingEnhancer,
}

impl Session {
    pub fn start(config: &YomiageConfig) -> Result<Self> {
        let store = Arc::new(InMemoryDictionary::new(builtin_dictionary()));
        let engine_store = store.clone();
        let host = Arc::new(InMemorySpeechHost::new(process_text_fn(
            move |_, text, _, _| engine_store.process(text),
        )));

        let enhancer = ReadingEnhancer::start(
            &enhancer_settings(config),
            host.clone(),
            store.clone(),
            reading_processor(config)?,
        )?;

        let points = &enhancer.context().text_processing;
        points.on_enabled.register_handler(LoggingAction::new("reading"));
        points.on_disabled.register_handler(LoggingAction::new("reading"));

        Ok(Self {
            host,
            store,
            enhancer,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use yomiage_config::{apply_all_defaults, DictionaryConfig, ReadingConfig};
    use yomiage_hooks::SymbolLevel;
    use yomiage_speech::{DictionaryStore, ExtraArgs};

    fn config() -> YomiageConfig {
        let mut words = BTreeMap::new();
        words.insert("javascript".to_string(), "ジャバスクリプト".to_string());
        apply_all_defaults(YomiageConfig {
            reading: Some(ReadingConfig {
                words,
                ..Default::default()
            }),
            ..Default::default()
        })
    }

    #[test]
    fn settings_follow_config() {
        let mut cfg = config();
        cfg.dictionary = Some(DictionaryConfig {
            remove_default_patterns: Some(false),
            remove_patterns: vec!["&".into()],
        });
        let settings = enhancer_settings(&cfg);
        assert!(settings.enabled);
        assert!(!settings.remove_default_patterns);
        assert_eq!(settings.extra_pattern_removals, ["&"]);
    }

    #[test]
    fn session_speaks_kana_and_restores_on_terminate() {
        let session = Session::start(&config()).unwrap();
        assert_eq!(session.store.len(), 1);

        let spoken = session
            .host
            .speak("ja_JP", "JavaScript", SymbolLevel::SOME, &ExtraArgs::new())
            .unwrap();
        assert_eq!(spoken, "ジャバスクリプト");

        let Session { store, enhancer, .. } = session;
        enhancer.terminate();
        assert_eq!(store.entries(), builtin_dictionary());
    }
}
