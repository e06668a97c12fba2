//! Speech hook lifecycle.
//!
//! `HookManager` owns the only reference to the host's original
//! process-text function while the hook is installed:
//! `install` swaps the wrapper into the host slot, `uninstall` swaps the
//! original back. Enabling and disabling never touches the installation;
//! it only gates whether the pre/post Filters run.
//!
//! It also applies and reverts the dictionary modifications recorded in the
//! [`ExtensionContext`].

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};
use yomiage_hooks::{TextContext, ToggleEvent};

use crate::context::ExtensionContext;
use crate::dictionary::{DictionarySnapshot, DictionaryStore, Modification};
use crate::error::SpeechError;
use crate::host::{process_text_fn, ProcessTextFn, SpeechHost};

/// What is held while the hook is installed.
struct Installation {
    original: ProcessTextFn,
}

pub struct HookManager {
    context: Arc<ExtensionContext>,
    host: Arc<dyn SpeechHost>,
    store: Arc<dyn DictionaryStore>,
    enabled: Arc<AtomicBool>,
    installation: Mutex<Option<Installation>>,
}

impl HookManager {
    pub fn new(
        context: Arc<ExtensionContext>,
        host: Arc<dyn SpeechHost>,
        store: Arc<dyn DictionaryStore>,
    ) -> Self {
        Self {
            context,
            host,
            store,
            enabled: Arc::new(AtomicBool::new(false)),
            installation: Mutex::new(None),
        }
    }

    pub fn context(&self) -> &Arc<ExtensionContext> {
        &self.context
    }

    pub fn is_installed(&self) -> bool {
        self.installation().is_some()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    /// Flip the processing flag and fire `on_enabled` / `on_disabled`.
    ///
    /// Fires on every call, including when the state does not change.
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
        let event = ToggleEvent { enabled };
        let point = &self.context.text_processing;
        if enabled {
            point.on_enabled.notify(&event);
        } else {
            point.on_disabled.notify(&event);
        }
        debug!(enabled, "Text processing toggled");
    }

    /// Wrap the host's process-text function. No-op if already installed.
    ///
    /// Returns whether a wrapper was installed by this call.
    pub fn install(&self) -> bool {
        let mut installation = self.installation();
        if installation.is_some() {
            debug!("Speech hook already installed");
            return false;
        }

        let original = self.host.process_text();
        let wrapper =
            wrap_process_text(original.clone(), self.context.clone(), self.enabled.clone());
        self.host.set_process_text(wrapper);
        *installation = Some(Installation { original });

        info!("Speech hook installed");
        true
    }

    /// Put the original process-text function back. No-op if not installed.
    ///
    /// Also resets the enabled flag (without notifying).
    pub fn uninstall(&self) -> bool {
        let Some(Installation { original }) = self.installation().take() else {
            debug!("Speech hook not installed");
            return false;
        };

        self.host.set_process_text(original);
        self.enabled.store(false, Ordering::SeqCst);
        info!("Speech hook uninstalled");
        true
    }

    /// Apply every recorded modification to the dictionary store.
    ///
    /// Takes a snapshot first so [`restore_dictionary_modifications`] can undo
    /// it exactly. Returns the number of entries removed. Fails with
    /// [`SpeechError::InvalidState`] if a snapshot from an earlier apply is
    /// still held; the store is left untouched in that case.
    ///
    /// [`restore_dictionary_modifications`]: Self::restore_dictionary_modifications
    pub fn apply_dictionary_modifications(&self) -> Result<usize, SpeechError> {
        let mut modifier = self.context.dictionary();
        let modifications = modifier.modifications();
        if modifications.is_empty() {
            return Ok(0);
        }
        if modifier.has_snapshot() {
            return Err(SpeechError::InvalidState(
                "dictionary modifications already applied; restore before applying again".into(),
            ));
        }

        let snapshot = DictionarySnapshot::capture(self.store.as_ref());

        // Collect every index up front so deletions cannot shift later matches.
        let mut doomed = BTreeSet::new();
        for modification in &modifications {
            match modification {
                Modification::RemovePattern { pattern } => {
                    doomed.extend(
                        snapshot
                            .entries
                            .iter()
                            .enumerate()
                            .filter(|(_, entry)| entry.pattern == *pattern)
                            .map(|(index, _)| index),
                    );
                }
            }
        }

        modifier.set_snapshot(Some(snapshot));

        let mut removed = 0;
        for index in doomed.into_iter().rev() {
            match self.store.remove_at(index) {
                Some(entry) => {
                    debug!(pattern = %entry.pattern, "Removed dictionary pattern");
                    removed += 1;
                }
                None => warn!(index, "Could not remove dictionary entry"),
            }
        }

        info!(removed, records = modifications.len(), "Dictionary modifications applied");
        Ok(removed)
    }

    /// Put the snapshot back into the store. No-op without a snapshot.
    ///
    /// Returns whether a snapshot was restored.
    pub fn restore_dictionary_modifications(&self) -> bool {
        let Some(snapshot) = self.context.dictionary().take_snapshot() else {
            return false;
        };
        let count = snapshot.entries.len();
        self.store.replace_all(snapshot.entries);
        info!(entries = count, "Dictionary restored");
        true
    }

    fn installation(&self) -> MutexGuard<'_, Option<Installation>> {
        self.installation.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// The manager holds the only handle to the original function, so dropping
/// an installed manager puts it back.
impl Drop for HookManager {
    fn drop(&mut self) {
        self.uninstall();
    }
}

/// Build the function installed in the host slot.
///
/// Pre-filter, original, post-filter; the Filters only run while enabled.
/// Errors from the original function propagate unchanged.
fn wrap_process_text(
    original: ProcessTextFn,
    context: Arc<ExtensionContext>,
    enabled: Arc<AtomicBool>,
) -> ProcessTextFn {
    process_text_fn(move |locale, text, level, extra| {
        let ctx = TextContext::new(locale, level);
        let point = &context.text_processing;

        let text = if enabled.load(Ordering::SeqCst) {
            point.pre_process_text.apply(text.to_string(), &ctx)
        } else {
            text.to_string()
        };

        let text = original(locale, &text, level, extra)?;

        if enabled.load(Ordering::SeqCst) {
            Ok(point.post_process_text.apply(text, &ctx))
        } else {
            Ok(text)
        }
    })
}
