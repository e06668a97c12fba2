/// Handler traits and the ordered, de-duplicated handler registry.
///
/// Handlers are shared trait objects (`Arc<dyn ...>`). Identity is pointer
/// identity: registering the same `Arc` twice is a no-op, while two separate
/// `Arc`s wrapping equal values are two handlers.
use anyhow::Result;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

// ---------------------------------------------------------------------------
// Handler traits
// ---------------------------------------------------------------------------

/// A handler in a [`Filter`](crate::Filter) pipeline.
///
/// Receives the current value and returns the next one. An `Err` (or a
/// panic) leaves the value as it was before this handler ran.
pub trait FilterHandler<V, C>: Send + Sync {
    /// Human-readable name for logging.
    fn name(&self) -> &str;

    fn filter(&self, value: &V, ctx: &C) -> Result<V>;
}

/// A handler notified by an [`Action`](crate::Action).
pub trait ActionHandler<C>: Send + Sync {
    /// Human-readable name for logging.
    fn name(&self) -> &str;

    fn notify(&self, ctx: &C) -> Result<()>;
}

/// Anything a registry can hold; only needs a name for log lines.
pub trait NamedHandler {
    fn handler_name(&self) -> &str;
}

impl<V, C> NamedHandler for dyn FilterHandler<V, C> {
    fn handler_name(&self) -> &str {
        self.name()
    }
}

impl<C> NamedHandler for dyn ActionHandler<C> {
    fn handler_name(&self) -> &str {
        self.name()
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Ordered set of handlers. Insertion order is execution order.
pub struct HandlerRegistry<H: ?Sized> {
    handlers: RwLock<Vec<Arc<H>>>,
}

impl<H: ?Sized + NamedHandler> HandlerRegistry<H> {
    pub fn new() -> Self {
        Self {
            handlers: RwLock::new(Vec::new()),
        }
    }

    /// Append `handler` unless it is already registered.
    pub fn register(&self, handler: Arc<H>) {
        let mut handlers = self.write();
        if handlers.iter().any(|h| Arc::ptr_eq(h, &handler)) {
            debug!(handler = handler.handler_name(), "Handler already registered");
            return;
        }
        debug!(handler = handler.handler_name(), "Handler registered");
        handlers.push(handler);
    }

    /// Remove `handler` if present, keeping the order of the rest.
    pub fn unregister(&self, handler: &Arc<H>) {
        let mut handlers = self.write();
        if let Some(pos) = handlers.iter().position(|h| Arc::ptr_eq(h, handler)) {
            let removed = handlers.remove(pos);
            debug!(handler = removed.handler_name(), "Handler unregistered");
        }
    }

    pub fn contains(&self, handler: &Arc<H>) -> bool {
        self.read().iter().any(|h| Arc::ptr_eq(h, handler))
    }

    /// Snapshot of the registered handlers in execution order.
    pub fn list(&self) -> Vec<Arc<H>> {
        self.read().clone()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    pub fn clear(&self) {
        self.write().clear();
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Arc<H>>> {
        self.handlers.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Arc<H>>> {
        self.handlers.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<H: ?Sized + NamedHandler> Default for HandlerRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Named(&'static str);

    impl ActionHandler<()> for Named {
        fn name(&self) -> &str {
            self.0
        }

        fn notify(&self, _ctx: &()) -> Result<()> {
            Ok(())
        }
    }

    fn handler(name: &'static str) -> Arc<dyn ActionHandler<()>> {
        Arc::new(Named(name))
    }

    fn names(registry: &HandlerRegistry<dyn ActionHandler<()>>) -> Vec<String> {
        registry.list().iter().map(|h| h.name().to_string()).collect()
    }

    #[test]
    fn register_preserves_insertion_order() {
        let registry = HandlerRegistry::new();
        for name in ["a", "b", "c"] {
            registry.register(handler(name));
        }
        assert_eq!(names(&registry), ["a", "b", "c"]);
    }

    #[test]
    fn register_same_handler_twice_is_noop() {
        let registry = HandlerRegistry::new();
        let h = handler("a");
        registry.register(h.clone());
        registry.register(h.clone());
        assert_eq!(registry.len(), 1);
        assert!(registry.contains(&h));
    }

    #[test]
    fn equal_but_distinct_handlers_are_both_kept() {
        let registry = HandlerRegistry::new();
        registry.register(handler("a"));
        registry.register(handler("a"));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn unregister_keeps_relative_order() {
        let registry = HandlerRegistry::new();
        let (a, b, c) = (handler("a"), handler("b"), handler("c"));
        registry.register(a.clone());
        registry.register(b.clone());
        registry.register(c.clone());

        registry.unregister(&b);
        assert_eq!(names(&registry), ["a", "c"]);
        assert!(!registry.contains(&b));

        // Unknown handler: no-op.
        registry.unregister(&b);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn list_is_a_copy() {
        let registry = HandlerRegistry::new();
        registry.register(handler("a"));
        let mut listed = registry.list();
        listed.clear();
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn clear_empties_registry() {
        let registry = HandlerRegistry::new();
        registry.register(handler("a"));
        registry.clear();
        assert!(registry.is_empty());
    }
}
