/// Built-in handler implementations and adapters.
///
/// - closure adapters ([`filter_fn`], [`action_fn`])
/// - the [`TextProcessor`] strategy and its locale-gated Filter adapter
/// - a logging observer for enable/disable toggles
use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use crate::registry::{ActionHandler, FilterHandler};
use crate::types::{TextContext, ToggleEvent};

// ---------------------------------------------------------------------------
// Closure adapters
// ---------------------------------------------------------------------------

struct FnFilter<F> {
    name: String,
    f: F,
}

impl<V, C, F> FilterHandler<V, C> for FnFilter<F>
where
    F: Fn(&V, &C) -> Result<V> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn filter(&self, value: &V, ctx: &C) -> Result<V> {
        (self.f)(value, ctx)
    }
}

/// Wrap a closure as a named Filter handler.
pub fn filter_fn<V, C, F>(name: impl Into<String>, f: F) -> Arc<dyn FilterHandler<V, C>>
where
    F: Fn(&V, &C) -> Result<V> + Send + Sync + 'static,
{
    Arc::new(FnFilter {
        name: name.into(),
        f,
    })
}

struct FnAction<F> {
    name: String,
    f: F,
}

impl<C, F> ActionHandler<C> for FnAction<F>
where
    F: Fn(&C) -> Result<()> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn notify(&self, ctx: &C) -> Result<()> {
        (self.f)(ctx)
    }
}

/// Wrap a closure as a named Action handler.
pub fn action_fn<C, F>(name: impl Into<String>, f: F) -> Arc<dyn ActionHandler<C>>
where
    F: Fn(&C) -> Result<()> + Send + Sync + 'static,
{
    Arc::new(FnAction {
        name: name.into(),
        f,
    })
}

// ---------------------------------------------------------------------------
// Text processors
// ---------------------------------------------------------------------------

/// A text transformation that only applies to some locales.
pub trait TextProcessor: Send + Sync {
    fn name(&self) -> &str;

    /// Whether text in `locale` should be transformed at all.
    fn matches(&self, locale: &str) -> bool;

    fn transform(&self, text: &str) -> Result<String>;
}

/// Locale gate matching every locale that starts with a prefix.
///
/// An empty prefix matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalePrefix(String);

impl LocalePrefix {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self(prefix.into())
    }

    pub fn any() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn matches(&self, locale: &str) -> bool {
        self.0.is_empty() || locale.starts_with(self.0.as_str())
    }
}

/// Exposes a [`TextProcessor`] as a text Filter handler.
///
/// Text in a locale the processor does not match passes through unchanged.
pub struct ProcessorFilter<P> {
    processor: P,
}

impl<P: TextProcessor> ProcessorFilter<P> {
    pub fn new(processor: P) -> Self {
        Self { processor }
    }

    pub fn processor(&self) -> &P {
        &self.processor
    }
}

impl<P: TextProcessor> FilterHandler<String, TextContext> for ProcessorFilter<P> {
    fn name(&self) -> &str {
        self.processor.name()
    }

    fn filter(&self, value: &String, ctx: &TextContext) -> Result<String> {
        if !self.processor.matches(&ctx.locale) {
            return Ok(value.clone());
        }
        self.processor.transform(value)
    }
}

/// Shorthand for registering a processor on a text Filter.
pub fn processor_filter<P>(processor: P) -> Arc<dyn FilterHandler<String, TextContext>>
where
    P: TextProcessor + 'static,
{
    Arc::new(ProcessorFilter::new(processor))
}

// ---------------------------------------------------------------------------
// Logging observer
// ---------------------------------------------------------------------------

/// Logs every enable/disable toggle.
pub struct LoggingAction {
    pub prefix: String,
}

impl LoggingAction {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl ActionHandler<ToggleEvent> for LoggingAction {
    fn name(&self) -> &str {
        "logging_action"
    }

    fn notify(&self, ctx: &ToggleEvent) -> Result<()> {
        info!(prefix = %self.prefix, enabled = ctx.enabled, "Text processing toggled");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SymbolLevel;

    struct Shout {
        gate: LocalePrefix,
    }

    impl TextProcessor for Shout {
        fn name(&self) -> &str {
            "shout"
        }

        fn matches(&self, locale: &str) -> bool {
            self.gate.matches(locale)
        }

        fn transform(&self, text: &str) -> Result<String> {
            Ok(text.to_uppercase())
        }
    }

    #[test]
    fn locale_prefix_gate() {
        let ja = LocalePrefix::new("ja");
        assert!(ja.matches("ja"));
        assert!(ja.matches("ja_JP"));
        assert!(!ja.matches("en-US"));
        assert!(LocalePrefix::any().matches("en-US"));
    }

    #[test]
    fn processor_filter_skips_non_matching_locale() {
        let handler = processor_filter(Shout {
            gate: LocalePrefix::new("ja"),
        });

        let ja = TextContext::new("ja-JP", SymbolLevel::SOME);
        assert_eq!(handler.filter(&"hello".to_string(), &ja).unwrap(), "HELLO");

        let en = TextContext::new("en-US", SymbolLevel::SOME);
        assert_eq!(handler.filter(&"hello".to_string(), &en).unwrap(), "hello");
        assert_eq!(handler.name(), "shout");
    }

    #[test]
    fn logging_action_never_fails() {
        let action = LoggingAction::new("test");
        assert!(action.notify(&ToggleEvent { enabled: true }).is_ok());
    }
}
