/// Filter and Action extension points.
///
/// Both run their handlers sequentially in registration order and isolate
/// failures: a handler that returns `Err` or panics is logged and skipped,
/// and the remaining handlers still run.
use std::any::Any;
use std::ops::Deref;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tracing::warn;

use crate::registry::{ActionHandler, FilterHandler, HandlerRegistry};

// ---------------------------------------------------------------------------
// Filter
// ---------------------------------------------------------------------------

/// Threads a value through every handler; each output feeds the next.
pub struct Filter<V, C> {
    registry: HandlerRegistry<dyn FilterHandler<V, C>>,
}

impl<V, C> Filter<V, C> {
    pub fn new() -> Self {
        Self {
            registry: HandlerRegistry::new(),
        }
    }

    /// Run all handlers over `value`.
    ///
    /// Returns the initial value when nothing is registered or every
    /// handler failed.
    pub fn apply(&self, value: V, ctx: &C) -> V {
        let mut value = value;
        for handler in self.registry.list() {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| handler.filter(&value, ctx)));
            match outcome {
                Ok(Ok(next)) => value = next,
                Ok(Err(e)) => {
                    warn!(handler = handler.name(), error = %e, "Filter handler failed");
                }
                Err(payload) => {
                    warn!(
                        handler = handler.name(),
                        panic = %panic_message(payload.as_ref()),
                        "Filter handler panicked"
                    );
                }
            }
        }
        value
    }

    /// Convenience for registering a concrete handler type.
    pub fn register_handler<H>(&self, handler: H) -> Arc<dyn FilterHandler<V, C>>
    where
        H: FilterHandler<V, C> + 'static,
    {
        let handler: Arc<dyn FilterHandler<V, C>> = Arc::new(handler);
        self.registry.register(handler.clone());
        handler
    }
}

impl<V, C> Default for Filter<V, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, C> Deref for Filter<V, C> {
    type Target = HandlerRegistry<dyn FilterHandler<V, C>>;

    fn deref(&self) -> &Self::Target {
        &self.registry
    }
}

// ---------------------------------------------------------------------------
// Action
// ---------------------------------------------------------------------------

/// Notifies every handler of an event; return values are discarded.
pub struct Action<C> {
    registry: HandlerRegistry<dyn ActionHandler<C>>,
}

impl<C> Action<C> {
    pub fn new() -> Self {
        Self {
            registry: HandlerRegistry::new(),
        }
    }

    pub fn notify(&self, ctx: &C) {
        for handler in self.registry.list() {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| handler.notify(ctx)));
            match outcome {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    warn!(handler = handler.name(), error = %e, "Action handler failed");
                }
                Err(payload) => {
                    warn!(
                        handler = handler.name(),
                        panic = %panic_message(payload.as_ref()),
                        "Action handler panicked"
                    );
                }
            }
        }
    }

    /// Convenience for registering a concrete handler type.
    pub fn register_handler<H>(&self, handler: H) -> Arc<dyn ActionHandler<C>>
    where
        H: ActionHandler<C> + 'static,
    {
        let handler: Arc<dyn ActionHandler<C>> = Arc::new(handler);
        self.registry.register(handler.clone());
        handler
    }
}

impl<C> Default for Action<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Deref for Action<C> {
    type Target = HandlerRegistry<dyn ActionHandler<C>>;

    fn deref(&self) -> &Self::Target {
        &self.registry
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
