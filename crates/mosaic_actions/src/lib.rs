//! Event handling for the Mosaic gateway cache engine.
//!
//! [`Actions`] folds decoded gateway events into the entity store, one at a
//! time, and announces what changed through a
//! [`NotificationSink`](mosaic_interface::NotificationSink). A cache miss is
//! never an error: the handler simply does nothing.
//!
//! [`Client`] wraps `Actions` for async callers and owns the outward actions
//! the engine initiates itself: the [`TypingIndicator`] keep-alive and bulk
//! message deletion.
//!
//! # Example
//!
//! ```
//! use mosaic_actions::Actions;
//! use mosaic_cache::Store;
//! use mosaic_core::{ChannelKind, ChannelPayload, Event, Snowflake};
//! use std::sync::Arc;
//!
//! let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
//! let mut actions = Actions::new(Store::default(), Arc::new(tx));
//!
//! let payload = ChannelPayload {
//!     id: Snowflake::new(10),
//!     kind: ChannelKind::Dm,
//!     ..Default::default()
//! };
//! let outcome = actions.dispatch(Event::ChannelCreate(payload));
//! assert!(*outcome.handled());
//! assert_eq!(rx.try_recv().map(|n| n.name()), Ok("CHANNEL_CREATE"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod actions;
mod client;
mod typing;

pub use actions::{ActionOutcome, Actions, EntityFragment};
pub use client::{BULK_DELETE_MAX_AGE_MS, BulkDeleteRequest, Client};
pub use typing::{DEFAULT_TYPING_INTERVAL, TypingCompletion, TypingIndicator, TypingStatus};
