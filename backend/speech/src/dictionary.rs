//! Speech dictionary entries, the host's dictionary store, and the
//! bookkeeping for reversible modifications of that store.
//!
//! [`DictionaryModifier`] never touches a store itself: it records what
//! should change and holds at most one snapshot of what the store looked
//! like before. [`HookManager`](crate::HookManager) performs the mutation.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::{NoExpand, Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, MutexGuard, PoisonError};

// ---------------------------------------------------------------------------
// Entries
// ---------------------------------------------------------------------------

/// How an entry's pattern is matched against spoken text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// Literal match anywhere in the text.
    #[default]
    Anywhere,
    /// Literal match on whole words only.
    Word,
    /// Regular expression; the replacement may use `\1` group references.
    Regex,
}

/// One speech dictionary rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DictionaryEntry {
    pub pattern: String,
    pub replacement: String,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub case_sensitive: bool,
    #[serde(default, rename = "type")]
    pub kind: EntryKind,
}

/// `\1`-style group references as used by the host's dictionary files.
static BACKREF_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\(\d+)").expect("static regex"));

impl DictionaryEntry {
    pub fn new(
        pattern: impl Into<String>,
        replacement: impl Into<String>,
        kind: EntryKind,
    ) -> Self {
        Self {
            pattern: pattern.into(),
            replacement: replacement.into(),
            comment: String::new(),
            case_sensitive: false,
            kind,
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    pub fn case_sensitive(mut self, yes: bool) -> Self {
        self.case_sensitive = yes;
        self
    }

    /// Compile the entry's matcher.
    pub fn compile(&self) -> Result<Regex> {
        let source = match self.kind {
            EntryKind::Anywhere => regex::escape(&self.pattern),
            EntryKind::Word => format!(r"\b{}\b", regex::escape(&self.pattern)),
            EntryKind::Regex => self.pattern.clone(),
        };
        RegexBuilder::new(&source)
            .case_insensitive(!self.case_sensitive)
            .build()
            .with_context(|| format!("invalid dictionary pattern: {}", self.pattern))
    }

    /// Apply this rule to `text` the way the host's speech dictionary does.
    pub fn apply(&self, text: &str) -> Result<String> {
        let re = self.compile()?;
        let out = match self.kind {
            EntryKind::Regex => {
                // Only `\N` is a group reference; a bare `$` is literal text.
                let escaped = self.replacement.replace('$', "$$");
                let replacement = BACKREF_RE.replace_all(&escaped, "$${$1}");
                re.replace_all(text, replacement.as_ref()).into_owned()
            }
            _ => re.replace_all(text, NoExpand(&self.replacement)).into_owned(),
        };
        Ok(out)
    }
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// The host's mutable, ordered collection of dictionary entries.
pub trait DictionaryStore: Send + Sync {
    /// Copy of all entries in order.
    fn entries(&self) -> Vec<DictionaryEntry>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove and return the entry at `index`; `None` if out of range.
    fn remove_at(&self, index: usize) -> Option<DictionaryEntry>;

    /// Replace the whole collection in one step.
    fn replace_all(&self, entries: Vec<DictionaryEntry>);
}

/// In-memory [`DictionaryStore`].
#[derive(Default)]
pub struct InMemoryDictionary {
    entries: Mutex<Vec<DictionaryEntry>>,
}

impl InMemoryDictionary {
    pub fn new(entries: Vec<DictionaryEntry>) -> Self {
        Self {
            entries: Mutex::new(entries),
        }
    }

    /// Run `text` through every entry in order.
    pub fn process(&self, text: &str) -> Result<String> {
        self.lock()
            .iter()
            .try_fold(text.to_string(), |acc, entry| entry.apply(&acc))
    }

    fn lock(&self) -> MutexGuard<'_, Vec<DictionaryEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl DictionaryStore for InMemoryDictionary {
    fn entries(&self) -> Vec<DictionaryEntry> {
        self.lock().clone()
    }

    fn len(&self) -> usize {
        self.lock().len()
    }

    fn remove_at(&self, index: usize) -> Option<DictionaryEntry> {
        let mut entries = self.lock();
        (index < entries.len()).then(|| entries.remove(index))
    }

    fn replace_all(&self, entries: Vec<DictionaryEntry>) {
        *self.lock() = entries;
    }
}

// ---------------------------------------------------------------------------
// Modification bookkeeping
// ---------------------------------------------------------------------------

/// A declarative change to apply to the dictionary store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Modification {
    /// Remove every entry whose pattern equals `pattern`.
    RemovePattern { pattern: String },
}

/// Owned copy of the store's entries taken before modification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionarySnapshot {
    pub entries: Vec<DictionaryEntry>,
    pub taken_at: DateTime<Utc>,
}

impl DictionarySnapshot {
    pub fn capture(store: &dyn DictionaryStore) -> Self {
        Self {
            entries: store.entries(),
            taken_at: Utc::now(),
        }
    }
}

/// Records modification intents and holds at most one snapshot.
#[derive(Debug, Default)]
pub struct DictionaryModifier {
    modifications: Vec<Modification>,
    snapshot: Option<DictionarySnapshot>,
}

impl DictionaryModifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a removal. Duplicates are kept; applying them twice is harmless.
    pub fn register_pattern_removal(&mut self, pattern: impl Into<String>) {
        self.modifications.push(Modification::RemovePattern {
            pattern: pattern.into(),
        });
    }

    pub fn modifications(&self) -> Vec<Modification> {
        self.modifications.clone()
    }

    /// Store (or with `None`, clear) the live snapshot.
    pub fn set_snapshot(&mut self, snapshot: Option<DictionarySnapshot>) {
        self.snapshot = snapshot;
    }

    pub fn snapshot(&self) -> Option<&DictionarySnapshot> {
        self.snapshot.as_ref()
    }

    /// Remove and return the live snapshot.
    pub fn take_snapshot(&mut self) -> Option<DictionarySnapshot> {
        self.snapshot.take()
    }

    pub fn has_snapshot(&self) -> bool {
        self.snapshot.is_some()
    }

    /// Forget all modifications and any snapshot.
    pub fn clear(&mut self) {
        self.modifications.clear();
        self.snapshot = None;
    }
}
