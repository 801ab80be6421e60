//! Error types for the Mosaic gateway cache engine.
//!
//! Routine cache misses are never errors in Mosaic: a handler that cannot find
//! a guild, channel, user or member simply does nothing. The types here cover
//! the failures that do travel back to a caller:
//!
//! - REST calls the engine initiated itself (typing keep-alive, message deletes)
//! - Payloads of a known event kind that fail to decode
//! - Configuration loading
//! - Reading recorded traffic for replay
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - Constructors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use mosaic_error::{HttpError, MosaicResult};
//!
//! fn trigger() -> MosaicResult<()> {
//!     Err(HttpError::with_status(503, "Service Unavailable"))?
//! }
//!
//! assert!(trigger().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod cache;
mod config;
mod error;
mod http;
mod json;
mod replay;
mod typing;

pub use cache::{CacheError, CacheErrorKind};
pub use config::{ConfigError, ConfigErrorKind};
pub use error::{MosaicError, MosaicErrorKind, MosaicResult};
pub use http::HttpError;
pub use json::JsonError;
pub use replay::{ReplayError, ReplayErrorKind};
pub use typing::{TypingError, TypingErrorKind};
