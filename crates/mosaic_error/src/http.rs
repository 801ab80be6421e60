//! REST failures.
//!
//! Only calls the engine makes on its own behalf produce these: the typing
//! keep-alive, message deletes and message fetches.

use derive_getters::Getters;
use std::fmt;

/// A REST call the engine initiated was rejected or never completed.
///
/// `status` is the response code when the remote answered at all.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Error, Getters)]
pub struct HttpError {
    message: String,
    status: Option<u16>,
    line: u32,
    file: &'static str,
}

impl HttpError {
    /// Failure without a response, e.g. a dropped connection.
    ///
    /// # Examples
    ///
    /// ```
    /// use mosaic_error::HttpError;
    ///
    /// let err = HttpError::new("connection reset");
    /// assert_eq!(*err.status(), None);
    /// assert!(err.to_string().starts_with("HTTP Error: connection reset"));
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            status: None,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Failure answered with `status`.
    ///
    /// ```
    /// use mosaic_error::HttpError;
    ///
    /// let err = HttpError::with_status(404, "Unknown Message");
    /// assert_eq!(*err.status(), Some(404));
    /// assert!(err.to_string().contains("404 Unknown Message"));
    /// ```
    #[track_caller]
    pub fn with_status(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            ..Self::new(message)
        }
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "HTTP Error: {} {}", status, self.message)?,
            None => write!(f, "HTTP Error: {}", self.message)?,
        }
        write!(f, " at line {} in {}", self.line, self.file)
    }
}
