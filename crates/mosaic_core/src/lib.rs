//! Core data types for the Mosaic gateway cache engine.
//!
//! This crate provides:
//! - [`Snowflake`] ids with their embedded creation time
//! - [`Collection`], the insertion-ordered keyed map every cache is built on
//! - Entity models ([`Channel`], [`Guild`], [`User`], [`Member`], [`Message`],
//!   [`Presence`], [`VoiceState`], [`Role`], [`Reaction`])
//! - Typed payloads and the [`Event`] union decoded at the transport boundary
//! - The [`PartialsPolicy`] consulted before synthesizing placeholders

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod channel;
mod collection;
mod event;
mod guild;
mod member;
mod message;
mod partial;
mod payload;
mod presence;
mod role;
mod snowflake;
mod user;
mod voice;

pub use channel::{Channel, ChannelKind, TextState, TypingEntry};
pub use collection::Collection;
pub use event::{Event, EventKind};
pub use guild::Guild;
pub use member::Member;
pub use message::{Message, MessageRevision, Reaction};
pub use partial::{PartialKind, PartialsPolicy};
pub use payload::{
    Activity, ChannelPayload, EmojiPayload, GuildDeletePayload, GuildMemberRemovePayload,
    GuildPayload, GuildRoleDeletePayload, GuildRolePayload, MemberPayload,
    MessageDeleteBulkPayload, MessageDeletePayload, MessagePayload, PresencePayload,
    ReactionPayload, RolePayload, TypingStartPayload, UserPayload, VoiceStatePayload,
};
pub use presence::{Presence, Status};
pub use role::Role;
pub use snowflake::{
    ChannelId, DISCORD_EPOCH_MS, GuildId, MessageId, RoleId, Snowflake, UserId,
};
pub use user::User;
pub use voice::VoiceState;
