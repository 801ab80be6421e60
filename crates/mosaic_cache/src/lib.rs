//! Entity store for the Mosaic gateway cache engine.
//!
//! The [`Store`] owns every cached entity. Users, guilds and channels are
//! global collections; members, presences, voice states and roles live on
//! their guild; messages and typing users live on their channel.
//!
//! Manager operations (`upsert_*`, `remove_*`) keep the cross-collection
//! bookkeeping in one place: a guild's channel id list, the global user for
//! every member, the message cache limit of new channels.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod settings;
mod store;

pub use settings::{CacheSettings, CacheSettingsBuilder};
pub use store::Store;
