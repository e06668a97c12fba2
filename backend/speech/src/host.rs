//! Boundary to the host screen reader's speech path.
//!
//! The host owns one "process text" slot; whoever installs a hook swaps the
//! function in that slot and must swap the original back.

use anyhow::Result;
use serde_json::{Map, Value};
use std::sync::{Arc, PoisonError, RwLock};
use yomiage_hooks::SymbolLevel;

/// Extra host arguments forwarded untouched through the hook.
pub type ExtraArgs = Map<String, Value>;

/// Signature of the host's process-text function:
/// `(locale, text, symbol_level, extra) -> text`.
pub type ProcessTextFn =
    Arc<dyn Fn(&str, &str, SymbolLevel, &ExtraArgs) -> Result<String> + Send + Sync>;

/// Wrap a closure as a [`ProcessTextFn`].
pub fn process_text_fn<F>(f: F) -> ProcessTextFn
where
    F: Fn(&str, &str, SymbolLevel, &ExtraArgs) -> Result<String> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// The host-side slot holding the active process-text function.
pub trait SpeechHost: Send + Sync {
    /// The function currently installed.
    fn process_text(&self) -> ProcessTextFn;

    /// Replace the installed function.
    fn set_process_text(&self, f: ProcessTextFn);
}

/// Host stand-in that keeps the slot in memory.
///
/// Used for tests and by the CLI.
pub struct InMemorySpeechHost {
    current: RwLock<ProcessTextFn>,
}

impl InMemorySpeechHost {
    pub fn new(engine: ProcessTextFn) -> Self {
        Self {
            current: RwLock::new(engine),
        }
    }

    /// Host whose engine returns the text unchanged.
    pub fn passthrough() -> Self {
        Self::new(process_text_fn(|_locale, text, _level, _extra| Ok(text.to_string())))
    }

    /// Run text through whatever function is currently installed.
    pub fn speak(
        &self,
        locale: &str,
        text: &str,
        level: SymbolLevel,
        extra: &ExtraArgs,
    ) -> Result<String> {
        let f = self.process_text();
        f(locale, text, level, extra)
    }
}

impl SpeechHost for InMemorySpeechHost {
    fn process_text(&self) -> ProcessTextFn {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set_process_text(&self, f: ProcessTextFn) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = f;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passthrough_host_returns_input() {
        let host = InMemorySpeechHost::passthrough();
        let out = host
            .speak("en", "hello", SymbolLevel::SOME, &ExtraArgs::new())
            .unwrap();
        assert_eq!(out, "hello");
    }

    #[test]
    fn set_process_text_swaps_slot() {
        let host = InMemorySpeechHost::passthrough();
        let replacement = process_text_fn(|_, text, _, _| Ok(format!("<{text}>")));
        host.set_process_text(replacement.clone());
        assert!(Arc::ptr_eq(&host.process_text(), &replacement));
        let out = host
            .speak("en", "x", SymbolLevel::SOME, &ExtraArgs::new())
            .unwrap();
        assert_eq!(out, "<x>");
    }
}
