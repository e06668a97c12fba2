/// Context values handed to Filter and Action handlers.
///
/// The Filter context is a fixed, versioned structure rather than an open
/// bag of keyword arguments; handlers can check `version` if they care.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Current layout version of [`TextContext`].
pub const TEXT_CONTEXT_VERSION: u32 = 1;

// ---------------------------------------------------------------------------
// Symbol level
// ---------------------------------------------------------------------------

/// Punctuation/symbol verbosity level chosen by the host.
///
/// Opaque to this crate: it is forwarded to the host's text processing and
/// to handlers untouched. The associated constants are the host's
/// well-known values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolLevel(pub i32);

impl SymbolLevel {
    pub const NONE: Self = Self(0);
    pub const SOME: Self = Self(100);
    pub const MOST: Self = Self(200);
    pub const ALL: Self = Self(300);
    pub const CHAR: Self = Self(1000);
    pub const UNCHANGED: Self = Self(-1);

    pub fn name(&self) -> Option<&'static str> {
        match *self {
            Self::NONE => Some("none"),
            Self::SOME => Some("some"),
            Self::MOST => Some("most"),
            Self::ALL => Some("all"),
            Self::CHAR => Some("char"),
            Self::UNCHANGED => Some("unchanged"),
            _ => None,
        }
    }
}

impl Default for SymbolLevel {
    fn default() -> Self {
        Self::SOME
    }
}

impl fmt::Display for SymbolLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "{}", self.0),
        }
    }
}

impl FromStr for SymbolLevel {
    type Err = String;

    /// Accepts a level name (`"most"`) or its raw numeric value (`"200"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Self::NONE),
            "some" => Ok(Self::SOME),
            "most" => Ok(Self::MOST),
            "all" => Ok(Self::ALL),
            "char" | "character" => Ok(Self::CHAR),
            "unchanged" => Ok(Self::UNCHANGED),
            other => other
                .parse::<i32>()
                .map(Self)
                .map_err(|_| format!("unknown symbol level: {s}")),
        }
    }
}

// ---------------------------------------------------------------------------
// Handler contexts
// ---------------------------------------------------------------------------

/// Context passed to every pre/post text Filter handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextContext {
    pub version: u32,
    /// Locale of the text being spoken, e.g. `"ja-JP"` or `"ja_JP"`.
    pub locale: String,
    pub symbol_level: SymbolLevel,
}

impl TextContext {
    pub fn new(locale: impl Into<String>, symbol_level: SymbolLevel) -> Self {
        Self {
            version: TEXT_CONTEXT_VERSION,
            locale: locale.into(),
            symbol_level,
        }
    }
}

/// Context passed to `on_enabled` / `on_disabled` Action handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleEvent {
    /// The state processing was switched to.
    pub enabled: bool,
}
