//! English → Kana text processing for Japanese synthesizers.
//!
//! The transliteration itself lives behind [`KanaConverter`]; this module
//! only gates it on locale and plugs it into the text pipeline.

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use regex::{Regex, RegexBuilder};
use std::collections::BTreeMap;
use tracing::debug;
use yomiage_hooks::{LocalePrefix, TextProcessor};

/// Locale prefix of text the Kana processor handles.
pub const JAPANESE_LOCALE_PREFIX: &str = "ja";

/// Turns English words in mixed text into Kana readings.
pub trait KanaConverter: Send + Sync {
    fn convert(&self, text: &str) -> Result<String>;
}

type ConverterFactory<C> = Box<dyn Fn() -> Result<C> + Send + Sync>;

/// [`TextProcessor`] that runs a [`KanaConverter`] on Japanese text.
///
/// The converter is built on first use, so a heavy converter costs nothing
/// until Japanese text is actually spoken.
pub struct EnglishToKanaProcessor<C> {
    gate: LocalePrefix,
    factory: ConverterFactory<C>,
    converter: OnceCell<C>,
}

impl<C: KanaConverter> EnglishToKanaProcessor<C> {
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn() -> Result<C> + Send + Sync + 'static,
    {
        Self {
            gate: LocalePrefix::new(JAPANESE_LOCALE_PREFIX),
            factory: Box::new(factory),
            converter: OnceCell::new(),
        }
    }

    /// Use an already-built converter.
    pub fn with_converter(converter: C) -> Self
    where
        C: 'static,
    {
        let processor = Self::new(|| anyhow::bail!("converter already initialised"));
        // A fresh cell cannot be full.
        let _ = processor.converter.set(converter);
        processor
    }

    /// Override the locale gate (default `"ja"`).
    pub fn with_locale_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.gate = LocalePrefix::new(prefix);
        self
    }

    pub fn is_initialized(&self) -> bool {
        self.converter.get().is_some()
    }

    fn converter(&self) -> Result<&C> {
        self.converter.get_or_try_init(|| {
            debug!("Initialising Kana converter");
            (self.factory)()
        })
    }
}

impl<C: KanaConverter> TextProcessor for EnglishToKanaProcessor<C> {
    fn name(&self) -> &str {
        "english_to_kana"
    }

    fn matches(&self, locale: &str) -> bool {
        self.gate.matches(locale)
    }

    fn transform(&self, text: &str) -> Result<String> {
        self.converter()?
            .convert(text)
            .context("English to Kana conversion failed")
    }
}

// ---------------------------------------------------------------------------
// Reading table
// ---------------------------------------------------------------------------

/// Word → reading table usable as a [`KanaConverter`].
///
/// Whole-word, case-insensitive; longer words win over their prefixes.
pub struct ReadingTable {
    readings: BTreeMap<String, String>,
    matcher: Option<Regex>,
}

impl ReadingTable {
    pub fn new<I, K, V>(readings: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let readings: BTreeMap<String, String> = readings
            .into_iter()
            .map(|(k, v)| (k.into().to_lowercase(), v.into()))
            .filter(|(k, _)| !k.trim().is_empty())
            .collect();

        let matcher = if readings.is_empty() {
            None
        } else {
            let mut words: Vec<&String> = readings.keys().collect();
            words.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
            let alternation = words
                .iter()
                .map(|w| regex::escape(w))
                .collect::<Vec<_>>()
                .join("|");
            let re = RegexBuilder::new(&format!(r"\b(?:{alternation})\b"))
                .case_insensitive(true)
                .build()
                .context("failed to build reading table matcher")?;
            Some(re)
        };

        Ok(Self { readings, matcher })
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    pub fn reading(&self, word: &str) -> Option<&str> {
        self.readings.get(&word.to_lowercase()).map(String::as_str)
    }
}

impl KanaConverter for ReadingTable {
    fn convert(&self, text: &str) -> Result<String> {
        let Some(matcher) = &self.matcher else {
            return Ok(text.to_string());
        };
        let out = matcher.replace_all(text, |caps: &regex::Captures| {
            let word = &caps[0];
            self.reading(word).unwrap_or(word).to_string()
        });
        Ok(out.into_owned())
    }
}
