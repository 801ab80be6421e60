//! Resolve an entity from the cache, or synthesize a placeholder when the
//! partial-structure policy allows it.
//!
//! A `None` result means the caller cannot proceed; it is never an error.

use super::Actions;
use mosaic_core::{
    ChannelId, ChannelPayload, EmojiPayload, GuildId, Message, MessageId, PartialKind, Reaction,
    Snowflake, UserId, UserPayload,
};
use tracing::{debug, instrument};

/// The identifying fields an event carries about the entities it touches.
///
/// Channel ids are taken from `channel_id` first, then `id`; message ids from
/// `message_id` first, then `id`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityFragment {
    /// A complete channel object embedded in the event
    pub channel: Option<ChannelPayload>,
    /// Channel-scoped id field
    pub channel_id: Option<ChannelId>,
    /// Message-scoped id field
    pub message_id: Option<MessageId>,
    /// Generic id field
    pub id: Option<Snowflake>,
    /// Owning guild
    pub guild_id: Option<GuildId>,
    /// Author reference
    pub author_id: Option<UserId>,
    /// Bare user id
    pub user_id: Option<UserId>,
}

impl Actions {
    /// Resolve the channel an event refers to, returning its id.
    ///
    /// Placeholders carry the guild id if any and a single recipient taken
    /// from the author, else the bare user id. They are registered in the
    /// store.
    #[instrument(skip(self, fragment))]
    pub fn resolve_channel(&mut self, fragment: &EntityFragment) -> Option<ChannelId> {
        if let Some(channel) = &fragment.channel {
            return self.store.upsert_channel(channel).map(|c| *c.id());
        }

        let id = fragment.channel_id.or(fragment.id)?;
        if self.store.channel(id).is_some() {
            return Some(id);
        }
        if !self.partials.allows(PartialKind::Channel) {
            debug!(channel_id = %id, "Channel not cached and partial channels disabled");
            return None;
        }

        let recipients = fragment.author_id.or(fragment.user_id).into_iter().collect();
        self.store
            .insert_partial_channel(id, fragment.guild_id, recipients);
        debug!(channel_id = %id, "Synthesized partial channel");
        Some(id)
    }

    /// Resolve a message inside an already resolved channel.
    ///
    /// With `cache` false a synthesized placeholder is returned without being
    /// registered, as delete paths require.
    #[instrument(skip(self, fragment))]
    pub fn resolve_message(
        &mut self,
        channel_id: ChannelId,
        fragment: &EntityFragment,
        cache: bool,
    ) -> Option<Message> {
        let message_id = fragment.message_id.or(fragment.id)?;
        let channel = self.store.channel(channel_id)?;
        if let Some(message) = channel.messages()?.get(&message_id) {
            return Some(message.clone());
        }
        if !self.partials.allows(PartialKind::Message) {
            debug!(message_id = %message_id, "Message not cached and partial messages disabled");
            return None;
        }

        let guild_id = fragment.guild_id.or(*channel.guild_id());
        let placeholder = Message::placeholder(message_id, channel_id, guild_id);
        if cache {
            self.store
                .channel_mut(channel_id)?
                .messages_mut()?
                .insert(message_id, placeholder.clone());
        }
        Some(placeholder)
    }

    /// Resolve a user, registering a placeholder when allowed.
    pub fn resolve_user(&mut self, user_id: UserId) -> Option<UserId> {
        if self.store.user(user_id).is_some() {
            return Some(user_id);
        }
        if !self.partials.allows(PartialKind::User) {
            debug!(user_id = %user_id, "User not cached and partial users disabled");
            return None;
        }
        self.store.upsert_user(&UserPayload {
            id: user_id,
            ..Default::default()
        });
        Some(user_id)
    }

    /// Resolve a reaction on a cached message, registering a zero-count
    /// placeholder when allowed.
    pub fn resolve_reaction(
        &mut self,
        channel_id: ChannelId,
        message_id: MessageId,
        emoji: &EmojiPayload,
    ) -> Option<Reaction> {
        let key = emoji.key()?;
        let allow_partial = self.partials.allows(PartialKind::Reaction);
        let reactions = self
            .store
            .channel_mut(channel_id)?
            .messages_mut()?
            .get_mut(&message_id)?
            .reactions_mut();

        if let Some(reaction) = reactions.get(&key) {
            return Some(reaction.clone());
        }
        if !allow_partial {
            debug!(emoji = %key, "Reaction not cached and partial reactions disabled");
            return None;
        }
        let placeholder = Reaction::new(key.clone());
        reactions.insert(key, placeholder.clone());
        Some(placeholder)
    }
}
