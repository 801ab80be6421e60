//! Configuration failures.

use derive_getters::Getters;

/// Where loading a configuration went wrong.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ConfigErrorKind {
    /// A required source could not be read or merged.
    #[display("Failed to load configuration: {_0}")]
    Load(String),

    /// The merged sources do not describe a valid configuration.
    #[display("Invalid configuration: {_0}")]
    Invalid(String),
}

/// Configuration error with source location tracking.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, Getters)]
#[display("Configuration Error: {} at line {} in {}", kind, line, file)]
pub struct ConfigError {
    kind: ConfigErrorKind,
    line: u32,
    file: &'static str,
}

impl ConfigError {
    /// Create a new ConfigError at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use mosaic_error::{ConfigError, ConfigErrorKind};
    ///
    /// let err = ConfigError::new(ConfigErrorKind::Invalid("unknown variant `EMOJI`".into()));
    /// assert!(matches!(err.kind(), ConfigErrorKind::Invalid(_)));
    /// ```
    #[track_caller]
    pub fn new(kind: ConfigErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
