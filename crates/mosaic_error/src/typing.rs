//! Typing indicator error types.

use derive_getters::Getters;

/// Ways a typing indicator can end without a graceful stop.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum TypingErrorKind {
    /// A keep-alive call failed; the indicator was cancelled.
    #[display("Keep-alive for channel {} failed: {}", channel_id, reason)]
    KeepAliveFailed {
        /// Channel the indicator was running for.
        channel_id: u64,
        /// Error reported by the REST collaborator.
        reason: String,
    },

    /// Started outside a tokio runtime, so no keep-alive could be spawned.
    #[display("No async runtime to type in channel {}", _0)]
    NoRuntime(u64),

    /// The indicator was dropped without being stopped.
    #[display("Typing indicator for channel {} was abandoned", _0)]
    Abandoned(u64),
}

/// Typing indicator error with source location tracking.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, Getters)]
#[display("Typing Error: {} at line {} in {}", kind, line, file)]
pub struct TypingError {
    kind: TypingErrorKind,
    line: u32,
    file: &'static str,
}

impl TypingError {
    /// Create a new TypingError with automatic location tracking.
    ///
    /// # Example
    /// ```
    /// use mosaic_error::{TypingError, TypingErrorKind};
    ///
    /// let err = TypingError::new(TypingErrorKind::Abandoned(10));
    /// assert_eq!(err.kind(), &TypingErrorKind::Abandoned(10));
    /// ```
    #[track_caller]
    pub fn new(kind: TypingErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
