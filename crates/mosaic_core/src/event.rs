//! Decoded gateway events.

use crate::{
    ChannelPayload, GuildDeletePayload, GuildMemberRemovePayload, GuildPayload,
    GuildRoleDeletePayload, GuildRolePayload, MemberPayload, MessageDeleteBulkPayload,
    MessageDeletePayload, MessagePayload, PresencePayload, ReactionPayload, TypingStartPayload,
    UserPayload, VoiceStatePayload,
};
use mosaic_error::{JsonError, MosaicResult};
use serde::de::DeserializeOwned;
use std::str::FromStr;
use tracing::{debug, instrument};

/// Event names the engine routes, spelled as the remote spells them.
///
/// # Examples
///
/// ```
/// use mosaic_core::EventKind;
///
/// assert_eq!("MESSAGE_DELETE_BULK".parse::<EventKind>().unwrap(), EventKind::MessageDeleteBulk);
/// assert_eq!(EventKind::VoiceStateUpdate.to_string(), "VOICE_STATE_UPDATE");
/// assert!("RESUMED".parse::<EventKind>().is_err());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    /// Channel created
    ChannelCreate,
    /// Channel updated
    ChannelUpdate,
    /// Channel deleted
    ChannelDelete,
    /// Guild joined or became available
    GuildCreate,
    /// Guild updated
    GuildUpdate,
    /// Guild left or became unavailable
    GuildDelete,
    /// Member joined
    GuildMemberAdd,
    /// Member left
    GuildMemberRemove,
    /// Role created
    GuildRoleCreate,
    /// Role deleted
    GuildRoleDelete,
    /// Message sent
    MessageCreate,
    /// Message edited
    MessageUpdate,
    /// Message deleted
    MessageDelete,
    /// Several messages deleted at once
    MessageDeleteBulk,
    /// Reaction added
    MessageReactionAdd,
    /// Reaction removed
    MessageReactionRemove,
    /// Presence changed
    PresenceUpdate,
    /// Remote user started typing
    TypingStart,
    /// User profile changed
    UserUpdate,
    /// Voice connection changed
    VoiceStateUpdate,
}

/// A decoded `(kind, payload)` pair.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// `CHANNEL_CREATE`
    ChannelCreate(ChannelPayload),
    /// `CHANNEL_UPDATE`
    ChannelUpdate(ChannelPayload),
    /// `CHANNEL_DELETE`
    ChannelDelete(ChannelPayload),
    /// `GUILD_CREATE`
    GuildCreate(GuildPayload),
    /// `GUILD_UPDATE`
    GuildUpdate(GuildPayload),
    /// `GUILD_DELETE`
    GuildDelete(GuildDeletePayload),
    /// `GUILD_MEMBER_ADD`
    GuildMemberAdd(MemberPayload),
    /// `GUILD_MEMBER_REMOVE`
    GuildMemberRemove(GuildMemberRemovePayload),
    /// `GUILD_ROLE_CREATE`
    GuildRoleCreate(GuildRolePayload),
    /// `GUILD_ROLE_DELETE`
    GuildRoleDelete(GuildRoleDeletePayload),
    /// `MESSAGE_CREATE`
    MessageCreate(MessagePayload),
    /// `MESSAGE_UPDATE`
    MessageUpdate(MessagePayload),
    /// `MESSAGE_DELETE`
    MessageDelete(MessageDeletePayload),
    /// `MESSAGE_DELETE_BULK`
    MessageDeleteBulk(MessageDeleteBulkPayload),
    /// `MESSAGE_REACTION_ADD`
    MessageReactionAdd(ReactionPayload),
    /// `MESSAGE_REACTION_REMOVE`
    MessageReactionRemove(ReactionPayload),
    /// `PRESENCE_UPDATE`
    PresenceUpdate(PresencePayload),
    /// `TYPING_START`
    TypingStart(TypingStartPayload),
    /// `USER_UPDATE`
    UserUpdate(UserPayload),
    /// `VOICE_STATE_UPDATE`
    VoiceStateUpdate(VoiceStatePayload),
}

impl Event {
    /// Decode a raw event.
    ///
    /// Returns `Ok(None)` for names the engine does not route.
    ///
    /// # Errors
    ///
    /// Returns a `JsonError` when a routed event's payload does not match its
    /// shape.
    ///
    /// # Examples
    ///
    /// ```
    /// use mosaic_core::Event;
    /// use serde_json::json;
    ///
    /// let event = Event::decode("CHANNEL_CREATE", json!({"id": "10", "type": 0})).unwrap();
    /// assert!(matches!(event, Some(Event::ChannelCreate(_))));
    /// assert_eq!(Event::decode("WEBHOOKS_UPDATE", json!({})).unwrap(), None);
    /// ```
    #[instrument(skip(data))]
    pub fn decode(name: &str, data: serde_json::Value) -> MosaicResult<Option<Self>> {
        let Ok(kind) = EventKind::from_str(name) else {
            debug!("Ignoring unroutable event");
            return Ok(None);
        };

        let event = match kind {
            EventKind::ChannelCreate => Self::ChannelCreate(parse(kind, data)?),
            EventKind::ChannelUpdate => Self::ChannelUpdate(parse(kind, data)?),
            EventKind::ChannelDelete => Self::ChannelDelete(parse(kind, data)?),
            EventKind::GuildCreate => Self::GuildCreate(parse(kind, data)?),
            EventKind::GuildUpdate => Self::GuildUpdate(parse(kind, data)?),
            EventKind::GuildDelete => Self::GuildDelete(parse(kind, data)?),
            EventKind::GuildMemberAdd => Self::GuildMemberAdd(parse(kind, data)?),
            EventKind::GuildMemberRemove => Self::GuildMemberRemove(parse(kind, data)?),
            EventKind::GuildRoleCreate => Self::GuildRoleCreate(parse(kind, data)?),
            EventKind::GuildRoleDelete => Self::GuildRoleDelete(parse(kind, data)?),
            EventKind::MessageCreate => Self::MessageCreate(parse(kind, data)?),
            EventKind::MessageUpdate => Self::MessageUpdate(parse(kind, data)?),
            EventKind::MessageDelete => Self::MessageDelete(parse(kind, data)?),
            EventKind::MessageDeleteBulk => Self::MessageDeleteBulk(parse(kind, data)?),
            EventKind::MessageReactionAdd => Self::MessageReactionAdd(parse(kind, data)?),
            EventKind::MessageReactionRemove => Self::MessageReactionRemove(parse(kind, data)?),
            EventKind::PresenceUpdate => Self::PresenceUpdate(parse(kind, data)?),
            EventKind::TypingStart => Self::TypingStart(parse(kind, data)?),
            EventKind::UserUpdate => Self::UserUpdate(parse(kind, data)?),
            EventKind::VoiceStateUpdate => Self::VoiceStateUpdate(parse(kind, data)?),
        };
        Ok(Some(event))
    }

    /// The kind this event was decoded as.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::ChannelCreate(_) => EventKind::ChannelCreate,
            Self::ChannelUpdate(_) => EventKind::ChannelUpdate,
            Self::ChannelDelete(_) => EventKind::ChannelDelete,
            Self::GuildCreate(_) => EventKind::GuildCreate,
            Self::GuildUpdate(_) => EventKind::GuildUpdate,
            Self::GuildDelete(_) => EventKind::GuildDelete,
            Self::GuildMemberAdd(_) => EventKind::GuildMemberAdd,
            Self::GuildMemberRemove(_) => EventKind::GuildMemberRemove,
            Self::GuildRoleCreate(_) => EventKind::GuildRoleCreate,
            Self::GuildRoleDelete(_) => EventKind::GuildRoleDelete,
            Self::MessageCreate(_) => EventKind::MessageCreate,
            Self::MessageUpdate(_) => EventKind::MessageUpdate,
            Self::MessageDelete(_) => EventKind::MessageDelete,
            Self::MessageDeleteBulk(_) => EventKind::MessageDeleteBulk,
            Self::MessageReactionAdd(_) => EventKind::MessageReactionAdd,
            Self::MessageReactionRemove(_) => EventKind::MessageReactionRemove,
            Self::PresenceUpdate(_) => EventKind::PresenceUpdate,
            Self::TypingStart(_) => EventKind::TypingStart,
            Self::UserUpdate(_) => EventKind::UserUpdate,
            Self::VoiceStateUpdate(_) => EventKind::VoiceStateUpdate,
        }
    }
}

fn parse<T: DeserializeOwned>(kind: EventKind, data: serde_json::Value) -> MosaicResult<T> {
    serde_json::from_value(data)
        .map_err(|e| JsonError::for_event(kind.to_string(), e.to_string()).into())
}
