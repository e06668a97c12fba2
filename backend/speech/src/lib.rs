//! `yomiage-speech`: speech hook lifecycle for pre-speech text processing.
//!
//! Provides:
//! - Host boundary traits (process-text slot, dictionary store) with
//!   in-memory implementations
//! - `HookManager`: install/uninstall of the text-processing wrapper,
//!   enable/disable gating, reversible dictionary modification
//! - `ExtensionContext`: the shared extension points and modification records
//! - English → Kana processing for Japanese synthesizers
//! - `ReadingEnhancer`: one-call session setup and teardown

pub mod context;
pub mod dictionary;
pub mod enhancer;
pub mod error;
pub mod hook;
pub mod host;
pub mod kana;

pub use context::{register_default_pattern_removals, ExtensionContext, DEFAULT_PATTERN_REMOVALS};
pub use dictionary::{
    DictionaryEntry, DictionaryModifier, DictionarySnapshot, DictionaryStore, EntryKind,
    InMemoryDictionary, Modification,
};
pub use enhancer::{EnhancerSettings, ReadingEnhancer};
pub use error::SpeechError;
pub use hook::HookManager;
pub use host::{process_text_fn, ExtraArgs, InMemorySpeechHost, ProcessTextFn, SpeechHost};
pub use kana::{EnglishToKanaProcessor, KanaConverter, ReadingTable, JAPANESE_LOCALE_PREFIX};
