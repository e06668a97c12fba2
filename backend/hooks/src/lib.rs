//! `yomiage-hooks`: ordered extension points for pre-speech text processing.
//!
//! Provides:
//! - `HandlerRegistry`: de-duplicated, order-preserving handler set
//! - `Filter` / `Action`: sequential pipelines with per-handler failure isolation
//! - `TextProcessingPoint`: the pre/post text Filters and enable/disable Actions
//! - Built-in handler adapters (closures, locale-gated text processors)

pub mod builtin;
pub mod pipeline;
pub mod point;
pub mod registry;
pub mod types;

pub use builtin::{
    action_fn, filter_fn, processor_filter, LocalePrefix, LoggingAction, ProcessorFilter,
    TextProcessor,
};
pub use pipeline::{Action, Filter};
pub use point::{TextFilter, TextProcessingPoint, ToggleAction};
pub use registry::{ActionHandler, FilterHandler, HandlerRegistry, NamedHandler};
pub use types::{SymbolLevel, TextContext, ToggleEvent, TEXT_CONTEXT_VERSION};
