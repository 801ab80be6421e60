//! Top-level error wrapper types.

use crate::{CacheError, ConfigError, HttpError, JsonError, ReplayError, TypingError};

/// The union of every failure domain in the workspace.
///
/// # Examples
///
/// ```
/// use mosaic_error::{HttpError, MosaicError};
///
/// let err: MosaicError = HttpError::new("Unknown Message").into();
/// assert!(format!("{}", err).contains("HTTP Error"));
/// ```
#[derive(Debug, Clone, PartialEq, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum MosaicErrorKind {
    /// REST call failed
    #[from(HttpError)]
    Http(HttpError),
    /// Payload decoding failed
    #[from(JsonError)]
    Json(JsonError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Typing indicator ended without a graceful stop
    #[from(TypingError)]
    Typing(TypingError),
    /// Caller-initiated cache operation could not proceed
    #[from(CacheError)]
    Cache(CacheError),
    /// Recorded traffic could not be read
    #[from(ReplayError)]
    Replay(ReplayError),
}

/// Mosaic error with kind discrimination.
///
/// Cloneable so one failure can be handed to every waiter of a shared
/// completion.
///
/// # Examples
///
/// ```
/// use mosaic_error::{ConfigError, ConfigErrorKind, MosaicErrorKind, MosaicResult};
///
/// fn might_fail() -> MosaicResult<()> {
///     Err(ConfigError::new(ConfigErrorKind::Invalid("missing field".into())))?
/// }
///
/// let err = might_fail().unwrap_err();
/// assert!(matches!(err.kind(), MosaicErrorKind::Config(_)));
/// ```
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
#[display("Mosaic Error: {}", _0)]
pub struct MosaicError(Box<MosaicErrorKind>);

impl MosaicError {
    /// Create a new error from a kind.
    pub fn new(kind: MosaicErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &MosaicErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to MosaicErrorKind
impl<T> From<T> for MosaicError
where
    T: Into<MosaicErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Mosaic operations.
pub type MosaicResult<T> = std::result::Result<T, MosaicError>;
