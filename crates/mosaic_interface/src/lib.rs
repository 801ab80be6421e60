//! Outward interfaces of the Mosaic gateway cache engine.
//!
//! The engine talks to three collaborators it does not own:
//!
//! - [`RestClient`] for the network calls the engine initiates itself
//! - [`NotificationSink`] for announcing completed domain events
//! - [`VoiceTransport`] for forwarding the client's own voice state
//!
//! Every domain event is a variant of [`Notification`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod notification;
mod traits;

pub use notification::Notification;
pub use traits::{DetachedVoice, NotificationSink, RestClient, VoiceTransport};
