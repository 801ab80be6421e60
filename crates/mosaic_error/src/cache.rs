//! Cache lookup errors for caller-initiated operations.
//!
//! Event handlers never raise these; they are reserved for explicit calls such
//! as bulk deletion, where the caller asked for something the cache cannot
//! satisfy.

use derive_getters::Getters;

/// Cache error variants.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum CacheErrorKind {
    /// Channel not found by ID.
    #[display("Channel not found: {_0}")]
    ChannelNotFound(u64),

    /// Channel exists but cannot hold messages.
    #[display("Channel {_0} is not text-based")]
    NotTextBased(u64),
}

/// Cache error with source location tracking.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, Getters)]
#[display("Cache Error: {} at line {} in {}", kind, line, file)]
pub struct CacheError {
    kind: CacheErrorKind,
    line: u32,
    file: &'static str,
}

impl CacheError {
    /// Create a new CacheError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: CacheErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
