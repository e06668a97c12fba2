//! The shared extension context.
//!
//! Built once by the composition root and handed to every component by
//! `Arc`, so tests get a fresh, isolated instance each time.

use std::sync::{Mutex, MutexGuard, PoisonError};
use yomiage_hooks::TextProcessingPoint;

use crate::dictionary::DictionaryModifier;

/// Camel-case splitting rules in the host's builtin dictionary. They break
/// English words apart before a Japanese synthesizer can read them whole.
pub const DEFAULT_PATTERN_REMOVALS: [&str; 2] = ["([a-z])([A-Z])", "([A-Z])([A-Z][a-z])"];

#[derive(Default)]
pub struct ExtensionContext {
    pub text_processing: TextProcessingPoint,
    dictionary: Mutex<DictionaryModifier>,
}

impl ExtensionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock the dictionary modification bookkeeping.
    pub fn dictionary(&self) -> MutexGuard<'_, DictionaryModifier> {
        self.dictionary.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn register_pattern_removal(&self, pattern: impl Into<String>) {
        self.dictionary().register_pattern_removal(pattern);
    }

    /// Clear every handler, modification record, and snapshot.
    pub fn reset_all(&self) {
        self.text_processing.clear();
        self.dictionary().clear();
    }
}

/// Register the builtin-dictionary removals every Japanese setup needs.
pub fn register_default_pattern_removals(context: &ExtensionContext) {
    for pattern in DEFAULT_PATTERN_REMOVALS {
        context.register_pattern_removal(pattern);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::{DictionarySnapshot, InMemoryDictionary, Modification};
    use yomiage_hooks::{filter_fn, TextContext};

    #[test]
    fn default_removals_are_registered_in_order() {
        let context = ExtensionContext::new();
        register_default_pattern_removals(&context);
        let mods = context.dictionary().modifications();
        assert_eq!(
            mods,
            vec![
                Modification::RemovePattern {
                    pattern: "([a-z])([A-Z])".into()
                },
                Modification::RemovePattern {
                    pattern: "([A-Z])([A-Z][a-z])".into()
                },
            ]
        );
    }

    #[test]
    fn reset_all_clears_everything() {
        let context = ExtensionContext::new();
        register_default_pattern_removals(&context);
        context
            .text_processing
            .pre_process_text
            .register(filter_fn("id", |v: &String, _: &TextContext| Ok(v.clone())));
        let store = InMemoryDictionary::default();
        context
            .dictionary()
            .set_snapshot(Some(DictionarySnapshot::capture(&store)));

        context.reset_all();

        assert_eq!(context.text_processing.handler_count(), 0);
        assert!(context.dictionary().modifications().is_empty());
        assert!(!context.dictionary().has_snapshot());
    }
}
