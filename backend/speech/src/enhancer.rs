//! Composition root: wires a text processor, the hook, and the dictionary
//! modifications together for the lifetime of one session.

use std::sync::Arc;
use tracing::{debug, info};
use yomiage_hooks::{FilterHandler, TextContext};

use crate::context::{register_default_pattern_removals, ExtensionContext};
use crate::dictionary::DictionaryStore;
use crate::error::SpeechError;
use crate::hook::HookManager;
use crate::host::SpeechHost;

/// Startup options for a [`ReadingEnhancer`].
#[derive(Debug, Clone)]
pub struct EnhancerSettings {
    /// Whether text processing starts switched on.
    pub enabled: bool,
    /// Remove the builtin camel-case splitting rules while running.
    pub remove_default_patterns: bool,
    /// Further builtin dictionary patterns to remove while running.
    pub extra_pattern_removals: Vec<String>,
}

impl Default for EnhancerSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            remove_default_patterns: true,
            extra_pattern_removals: Vec::new(),
        }
    }
}

/// A running session: hook installed, processor registered, dictionary
/// modified. Undone by [`terminate`](Self::terminate) or on drop.
pub struct ReadingEnhancer {
    manager: HookManager,
    processor: Arc<dyn FilterHandler<String, TextContext>>,
    terminated: bool,
}

impl ReadingEnhancer {
    pub fn start(
        settings: &EnhancerSettings,
        host: Arc<dyn SpeechHost>,
        store: Arc<dyn DictionaryStore>,
        processor: Arc<dyn FilterHandler<String, TextContext>>,
    ) -> Result<Self, SpeechError> {
        let context = Arc::new(ExtensionContext::new());
        if settings.remove_default_patterns {
            register_default_pattern_removals(&context);
        }
        for pattern in &settings.extra_pattern_removals {
            context.register_pattern_removal(pattern.as_str());
        }

        let manager = HookManager::new(context.clone(), host, store);
        manager.install();
        context
            .text_processing
            .post_process_text
            .register(processor.clone());

        let mut enhancer = Self {
            manager,
            processor,
            terminated: false,
        };
        if let Err(e) = enhancer.manager.apply_dictionary_modifications() {
            enhancer.shutdown();
            return Err(e);
        }
        enhancer.manager.set_enabled(settings.enabled);

        info!(
            processor = enhancer.processor.name(),
            enabled = settings.enabled,
            "Reading enhancer started"
        );
        Ok(enhancer)
    }

    pub fn context(&self) -> &Arc<ExtensionContext> {
        self.manager.context()
    }

    pub fn manager(&self) -> &HookManager {
        &self.manager
    }

    pub fn is_enabled(&self) -> bool {
        self.manager.is_enabled()
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.manager.set_enabled(enabled);
    }

    /// Flip processing on/off; returns the new state.
    pub fn toggle(&self) -> bool {
        let enabled = !self.is_enabled();
        self.set_enabled(enabled);
        enabled
    }

    /// Restore the dictionary, remove the hook, and drop the processor.
    pub fn terminate(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if self.terminated {
            return;
        }
        self.terminated = true;

        if !self.manager.restore_dictionary_modifications() {
            debug!("No dictionary snapshot to restore");
        }
        self.manager.uninstall();
        self.context()
            .text_processing
            .post_process_text
            .unregister(&self.processor);
        info!("Reading enhancer terminated");
    }
}

impl Drop for ReadingEnhancer {
    fn drop(&mut self) {
        self.shutdown();
    }
}
