//! Outward domain events.

use chrono::{DateTime, Utc};
use mosaic_core::{
    Channel, ChannelId, Collection, Guild, Member, Message, MessageId, Presence, Reaction, Role,
    User, UserId, VoiceState,
};

/// A completed change to the cache.
///
/// Every payload is an owned snapshot; none of them alias live cache state.
#[derive(Debug, Clone, PartialEq, strum::IntoStaticStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Notification {
    /// A channel was cached for the first time.
    ChannelCreate(Channel),
    /// A cached channel was deleted.
    ChannelDelete(Channel),
    /// A cached channel changed.
    ChannelUpdate {
        /// Snapshot before the update
        old: Channel,
        /// The channel after the update (possibly a replacement)
        new: Channel,
    },
    /// The client joined a guild.
    GuildCreate(Guild),
    /// A guild came back from an outage.
    GuildAvailable(Guild),
    /// A guild went into an outage.
    GuildUnavailable(Guild),
    /// The client left a guild, or it was deleted.
    GuildDelete(Guild),
    /// A guild's settings changed.
    GuildUpdate {
        /// Snapshot before the update
        old: Guild,
        /// The guild after the update
        new: Guild,
    },
    /// A user joined a guild.
    GuildMemberAdd(Member),
    /// A member was first seen online through a presence.
    GuildMemberAvailable(Member),
    /// A member left a guild.
    GuildMemberRemove(Member),
    /// A role was created.
    RoleCreate(Role),
    /// A role was deleted.
    RoleDelete(Role),
    /// A message was cached for the first time.
    MessageCreate(Message),
    /// A message was edited.
    MessageUpdate {
        /// Snapshot before the edit
        old: Message,
        /// The message after the edit
        new: Message,
    },
    /// A message was deleted.
    MessageDelete(Message),
    /// Several messages were deleted at once.
    MessageDeleteBulk(Collection<MessageId, Message>),
    /// A user reacted to a message.
    ReactionAdd {
        /// The reaction after the user was added
        reaction: Reaction,
        /// Reacted message
        message_id: MessageId,
        /// Channel of the message
        channel_id: ChannelId,
        /// Reacting user
        user_id: UserId,
    },
    /// A user withdrew a reaction.
    ReactionRemove {
        /// The reaction after the user was removed
        reaction: Reaction,
        /// Reacted message
        message_id: MessageId,
        /// Channel of the message
        channel_id: ChannelId,
        /// User whose reaction was withdrawn
        user_id: UserId,
    },
    /// A user's profile changed.
    UserUpdate {
        /// Snapshot before the update
        old: User,
        /// The user after the update
        new: User,
    },
    /// A member's presence changed.
    PresenceUpdate {
        /// The previous presence, if one was cached
        old: Option<Presence>,
        /// The new presence
        new: Presence,
    },
    /// A voice state changed.
    VoiceStateUpdate {
        /// The previous state, or a placeholder
        old: VoiceState,
        /// The new state
        new: VoiceState,
    },
    /// A remote user started typing.
    TypingStart {
        /// Channel being typed in
        channel_id: ChannelId,
        /// Typing user
        user_id: UserId,
        /// When the user started typing
        since: DateTime<Utc>,
    },
}

impl Notification {
    /// Stable name of this notification, e.g. `CHANNEL_CREATE`.
    ///
    /// # Examples
    ///
    /// ```
    /// use mosaic_core::{Channel, Snowflake};
    /// use mosaic_interface::Notification;
    ///
    /// let channel = Channel::placeholder(Snowflake::new(10), None, Vec::new());
    /// assert_eq!(Notification::ChannelCreate(channel).name(), "CHANNEL_CREATE");
    /// ```
    pub fn name(&self) -> &'static str {
        self.into()
    }
}
