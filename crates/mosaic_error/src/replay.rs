//! Replay input error types.

use derive_getters::Getters;

/// Ways reading recorded gateway traffic can fail.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ReplayErrorKind {
    /// The input file could not be opened
    #[display("Failed to open {}: {}", path, reason)]
    Open {
        /// Path given by the caller
        path: String,
        /// Reported I/O error
        reason: String,
    },
    /// Reading the next frame failed
    #[display("Failed to read frame: {}", _0)]
    Read(String),
}

/// Replay error with source location tracking.
///
/// # Examples
///
/// ```
/// use mosaic_error::{ReplayError, ReplayErrorKind};
///
/// let err = ReplayError::new(ReplayErrorKind::Read("unexpected EOF".to_string()));
/// assert!(format!("{}", err).contains("unexpected EOF"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, Getters)]
#[display("Replay Error: {} at line {} in {}", kind, line, file)]
pub struct ReplayError {
    kind: ReplayErrorKind,
    line: u32,
    file: &'static str,
}

impl ReplayError {
    /// Create a new ReplayError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ReplayErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
