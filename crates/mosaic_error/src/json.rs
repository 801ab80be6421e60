//! Payload decoding failures.

use derive_getters::Getters;
use std::fmt;

/// A routed event carried a payload that does not match its shape.
///
/// Unknown event names are not errors; they never reach the decoder.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Error, Getters)]
pub struct JsonError {
    event: Option<String>,
    message: String,
    line: u32,
    file: &'static str,
}

impl JsonError {
    /// Decoding failure outside any particular event.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            event: None,
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }

    /// Decoding failure of the payload of `event`.
    ///
    /// # Examples
    ///
    /// ```
    /// use mosaic_error::JsonError;
    ///
    /// let err = JsonError::for_event("MESSAGE_DELETE", "missing field `channel_id`");
    /// assert_eq!(err.event().as_deref(), Some("MESSAGE_DELETE"));
    /// assert!(err.to_string().contains("MESSAGE_DELETE payload: missing field"));
    /// ```
    #[track_caller]
    pub fn for_event(event: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            event: Some(event.into()),
            ..Self::new(message)
        }
    }
}

impl fmt::Display for JsonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.event {
            Some(event) => write!(f, "JSON Error: malformed {} payload: {}", event, self.message)?,
            None => write!(f, "JSON Error: {}", self.message)?,
        }
        write!(f, " at line {} in {}", self.line, self.file)
    }
}

#[cfg(feature = "json")]
impl From<serde_json::Error> for JsonError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        JsonError::new(err.to_string())
    }
}
