//! The text-processing extension point.
//!
//! One instance is shared by everything that wants to rewrite text before it
//! reaches the speech engine, instead of each caller patching the host.

use crate::pipeline::{Action, Filter};
use crate::types::{TextContext, ToggleEvent};

/// Text Filter type used by both pre- and post-processing.
pub type TextFilter = Filter<String, TextContext>;

/// Toggle notification type used by `on_enabled` / `on_disabled`.
pub type ToggleAction = Action<ToggleEvent>;

/// Named extension surfaces around the host's text processing.
#[derive(Default)]
pub struct TextProcessingPoint {
    /// Runs before the host's process-text function.
    pub pre_process_text: TextFilter,
    /// Runs on the host's output.
    pub post_process_text: TextFilter,
    /// Fired when processing is switched on.
    pub on_enabled: ToggleAction,
    /// Fired when processing is switched off.
    pub on_disabled: ToggleAction,
}

impl TextProcessingPoint {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every registered handler on all four surfaces.
    pub fn clear(&self) {
        self.pre_process_text.clear();
        self.post_process_text.clear();
        self.on_enabled.clear();
        self.on_disabled.clear();
    }

    /// Total handlers across all surfaces.
    pub fn handler_count(&self) -> usize {
        self.pre_process_text.len()
            + self.post_process_text.len()
            + self.on_enabled.len()
            + self.on_disabled.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::{action_fn, filter_fn};
    use crate::types::SymbolLevel;

    #[test]
    fn fresh_points_are_independent() {
        let a = TextProcessingPoint::new();
        let b = TextProcessingPoint::new();
        a.pre_process_text
            .register(filter_fn("noop", |v: &String, _: &TextContext| Ok(v.clone())));
        assert_eq!(a.handler_count(), 1);
        assert_eq!(b.handler_count(), 0);
    }

    #[test]
    fn clear_removes_everything() {
        let point = TextProcessingPoint::new();
        point
            .post_process_text
            .register(filter_fn("upper", |v: &String, _: &TextContext| Ok(v.to_uppercase())));
        point.on_enabled.register(action_fn("on", |_: &ToggleEvent| Ok(())));
        point.on_disabled.register(action_fn("off", |_: &ToggleEvent| Ok(())));
        assert_eq!(point.handler_count(), 3);

        point.clear();
        assert_eq!(point.handler_count(), 0);
        let ctx = TextContext::new("ja", SymbolLevel::SOME);
        assert_eq!(point.post_process_text.apply("abc".into(), &ctx), "abc");
    }
}
