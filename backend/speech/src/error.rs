use thiserror::Error;

/// Errors raised by the speech hook lifecycle.
#[derive(Debug, Error)]
pub enum SpeechError {
    /// An operation was called in a state that does not allow it,
    /// e.g. applying dictionary modifications while a snapshot is held.
    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
