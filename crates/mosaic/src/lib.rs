//! Mosaic - gateway cache reconciliation engine
//!
//! Mosaic keeps an in-memory mirror of a chat platform's guilds, channels,
//! members, messages, presences and voice states consistent with the stream
//! of gateway events, and turns each event into a notification carrying the
//! state before and after.
//!
//! # Architecture
//!
//! Mosaic is organized as a workspace with focused crates:
//!
//! - `mosaic_error` - Error types
//! - `mosaic_core` - Snowflakes, ordered collections, entity models, payloads
//! - `mosaic_interface` - Notifications and collaborator traits
//! - `mosaic_cache` - The entity store and its manager operations
//! - `mosaic_actions` - Event handlers, typing indicator, bulk delete
//!
//! This crate re-exports everything for convenience and adds layered
//! configuration, logging setup and the `mosaic` replay binary.
//!
//! # Example
//!
//! ```no_run
//! use mosaic::{MosaicConfig, OfflineRest, replay};
//! use std::sync::Arc;
//!
//! # async fn run() -> mosaic::MosaicResult<()> {
//! let config = MosaicConfig::load()?;
//! let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();
//! let client = config.build_client(Arc::new(tx), Arc::new(OfflineRest));
//!
//! let frames = br#"{"t":"CHANNEL_CREATE","d":{"id":"10","type":1}}"#;
//! let summary = replay(&client, &frames[..]).await?;
//! assert_eq!(*summary.handled(), 1);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod observability;
mod offline;
mod replay;

pub use config::{CacheSection, ClientSection, MosaicConfig, TypingSection};
pub use observability::{ObservabilityConfig, init_observability, init_observability_with_config};
pub use offline::OfflineRest;
pub use replay::{ReplaySummary, replay};

pub use mosaic_actions::*;
pub use mosaic_cache::*;
pub use mosaic_core::*;
pub use mosaic_error::*;
pub use mosaic_interface::*;
