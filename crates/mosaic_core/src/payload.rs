//! Typed gateway payloads.
//!
//! One struct per inbound event shape. Fields the remote may omit are
//! `Option`s (or default to empty) so that a partial payload still decodes;
//! models decide what an absent field means when they patch themselves.

use crate::{ChannelId, ChannelKind, GuildId, MessageId, RoleId, Snowflake, Status, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User object or user summary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPayload {
    /// User snowflake (always present)
    pub id: UserId,
    /// Username (absent in presence summaries)
    pub username: Option<String>,
    /// Legacy 4-digit discriminator
    pub discriminator: Option<String>,
    /// Avatar hash
    pub avatar: Option<String>,
    /// True for bot accounts
    pub bot: Option<bool>,
    /// Public flag bitfield
    #[serde(alias = "public_flags")]
    pub flags: Option<u64>,
}

/// Channel object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelPayload {
    /// Channel snowflake
    pub id: ChannelId,
    /// Discriminating channel kind. Required: a channel object without one
    /// fails to decode rather than reading as text.
    #[serde(rename = "type")]
    pub kind: ChannelKind,
    /// Owning guild, absent for direct messages
    pub guild_id: Option<GuildId>,
    /// Channel name
    pub name: Option<String>,
    /// Channel topic
    pub topic: Option<String>,
    /// Sort position
    pub position: Option<i32>,
    /// Parent category
    pub parent_id: Option<ChannelId>,
    /// Age-restricted flag
    pub nsfw: Option<bool>,
    /// Voice bitrate
    pub bitrate: Option<u32>,
    /// Voice user limit
    pub user_limit: Option<u32>,
    /// Direct message recipients
    #[serde(default)]
    pub recipients: Vec<UserPayload>,
    /// Most recent message
    pub last_message_id: Option<MessageId>,
}

/// Role object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolePayload {
    /// Role snowflake
    pub id: RoleId,
    /// Role name
    #[serde(default)]
    pub name: String,
    /// RGB color as an integer
    #[serde(default)]
    pub color: u32,
    /// Hierarchy position
    #[serde(default)]
    pub position: i32,
    /// Permission bitfield, serialized as a decimal string
    pub permissions: Option<String>,
    /// Displayed separately in the member list
    #[serde(default)]
    pub hoist: bool,
    /// Can be mentioned
    #[serde(default)]
    pub mentionable: bool,
}

/// Guild member object, also the body of `GUILD_MEMBER_ADD`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberPayload {
    /// The wrapped user
    pub user: Option<UserPayload>,
    /// Owning guild (present on member events)
    pub guild_id: Option<GuildId>,
    /// Guild nickname
    pub nick: Option<String>,
    /// Assigned roles
    #[serde(default)]
    pub roles: Vec<RoleId>,
    /// When the user joined the guild
    pub joined_at: Option<DateTime<Utc>>,
    /// Server deafened
    pub deaf: Option<bool>,
    /// Server muted
    pub mute: Option<bool>,
}

/// One entry of a presence's activity list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    /// Activity name
    pub name: String,
    /// Activity type (playing, streaming, listening, ...)
    #[serde(rename = "type", default)]
    pub kind: u8,
    /// Stream URL
    pub url: Option<String>,
    /// Party status
    pub state: Option<String>,
    /// What the user is doing
    pub details: Option<String>,
}

/// `PRESENCE_UPDATE` body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresencePayload {
    /// User summary; often only the id
    pub user: UserPayload,
    /// Guild the presence applies to
    pub guild_id: Option<GuildId>,
    /// Reported status
    #[serde(default)]
    pub status: Status,
    /// Current activities
    #[serde(default)]
    pub activities: Vec<Activity>,
    /// Member roles, used when the member is first seen through a presence
    #[serde(default)]
    pub roles: Vec<RoleId>,
    /// Member nickname
    pub nick: Option<String>,
}

/// `VOICE_STATE_UPDATE` body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceStatePayload {
    /// Guild, absent for calls outside a guild
    pub guild_id: Option<GuildId>,
    /// Connected channel, absent after a disconnect
    pub channel_id: Option<ChannelId>,
    /// User the state belongs to
    pub user_id: UserId,
    /// Embedded member
    pub member: Option<MemberPayload>,
    /// Voice session
    pub session_id: Option<String>,
    /// Server deafened
    #[serde(default)]
    pub deaf: bool,
    /// Server muted
    #[serde(default)]
    pub mute: bool,
    /// Self deafened
    #[serde(default)]
    pub self_deaf: bool,
    /// Self muted
    #[serde(default)]
    pub self_mute: bool,
    /// Camera on
    #[serde(default)]
    pub self_video: bool,
    /// Suppressed by the server
    #[serde(default)]
    pub suppress: bool,
}

/// Message object, complete on create and partial on update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagePayload {
    /// Message snowflake
    pub id: MessageId,
    /// Channel the message lives in
    pub channel_id: ChannelId,
    /// Guild, absent for direct messages
    pub guild_id: Option<GuildId>,
    /// Author
    pub author: Option<UserPayload>,
    /// Text content
    pub content: Option<String>,
    /// When the message was sent
    pub timestamp: Option<DateTime<Utc>>,
    /// When the message was last edited
    pub edited_timestamp: Option<DateTime<Utc>>,
    /// Pinned flag
    pub pinned: Option<bool>,
    /// Text-to-speech flag
    pub tts: Option<bool>,
}

/// `MESSAGE_DELETE` body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageDeletePayload {
    /// Deleted message
    pub id: MessageId,
    /// Channel the message lived in
    pub channel_id: ChannelId,
    /// Guild, if any
    pub guild_id: Option<GuildId>,
}

/// `MESSAGE_DELETE_BULK` body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageDeleteBulkPayload {
    /// Deleted messages
    pub ids: Vec<MessageId>,
    /// Channel the messages lived in
    pub channel_id: ChannelId,
    /// Guild, if any
    pub guild_id: Option<GuildId>,
}

/// Emoji reference inside a reaction event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmojiPayload {
    /// Custom emoji snowflake
    pub id: Option<Snowflake>,
    /// Unicode character or custom emoji name
    pub name: Option<String>,
}

impl EmojiPayload {
    /// Key used to store the reaction: the custom id, else the name.
    pub fn key(&self) -> Option<String> {
        self.id
            .map(|id| id.to_string())
            .or_else(|| self.name.clone())
    }
}

/// `MESSAGE_REACTION_ADD` / `MESSAGE_REACTION_REMOVE` body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionPayload {
    /// Reacting user
    pub user_id: UserId,
    /// Channel of the message
    pub channel_id: ChannelId,
    /// Reacted message
    pub message_id: MessageId,
    /// Guild, if any
    pub guild_id: Option<GuildId>,
    /// Emoji used
    pub emoji: Option<EmojiPayload>,
}

/// `TYPING_START` body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypingStartPayload {
    /// Channel being typed in
    pub channel_id: ChannelId,
    /// Typing user
    pub user_id: UserId,
    /// Guild, if any
    pub guild_id: Option<GuildId>,
    /// Unix time in seconds
    pub timestamp: i64,
}

/// Guild object (`GUILD_CREATE` / `GUILD_UPDATE`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildPayload {
    /// Guild snowflake
    pub id: GuildId,
    /// Guild name
    pub name: Option<String>,
    /// Owner
    pub owner_id: Option<UserId>,
    /// Set while the guild is in an outage
    pub unavailable: Option<bool>,
    /// Total members
    pub member_count: Option<u64>,
    /// Roles
    #[serde(default)]
    pub roles: Vec<RolePayload>,
    /// Channels
    #[serde(default)]
    pub channels: Vec<ChannelPayload>,
    /// Members
    #[serde(default)]
    pub members: Vec<MemberPayload>,
    /// Presences
    #[serde(default)]
    pub presences: Vec<PresencePayload>,
    /// Voice states
    #[serde(default)]
    pub voice_states: Vec<VoiceStatePayload>,
}

/// `GUILD_DELETE` body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildDeletePayload {
    /// Guild snowflake
    pub id: GuildId,
    /// True when the guild went into an outage rather than being left
    pub unavailable: Option<bool>,
}

/// `GUILD_MEMBER_REMOVE` body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildMemberRemovePayload {
    /// Guild the member left
    pub guild_id: GuildId,
    /// The departed user
    pub user: UserPayload,
}

/// `GUILD_ROLE_CREATE` body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildRolePayload {
    /// Owning guild
    pub guild_id: GuildId,
    /// The role
    pub role: RolePayload,
}

/// `GUILD_ROLE_DELETE` body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildRoleDeletePayload {
    /// Owning guild
    pub guild_id: GuildId,
    /// Deleted role
    pub role_id: RoleId,
}
