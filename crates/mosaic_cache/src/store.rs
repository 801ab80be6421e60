//! The entity store and its manager operations.

use crate::CacheSettings;
use derive_getters::Getters;
use mosaic_core::{
    Channel, ChannelId, ChannelKind, ChannelPayload, Collection, Guild, GuildId, GuildPayload,
    Member, MemberPayload, Message, MessagePayload, Presence, PresencePayload, Role, RolePayload,
    User, UserId, UserPayload, VoiceState, VoiceStatePayload,
};
use tracing::{debug, instrument, warn};

/// Every cached entity, keyed by id.
///
/// The id is the stable handle: callers re-resolve through the store rather
/// than hold references across a dispatch.
///
/// # Examples
///
/// ```
/// use mosaic_cache::Store;
/// use mosaic_core::{ChannelKind, ChannelPayload, Snowflake};
///
/// let mut store = Store::default();
/// let payload = ChannelPayload {
///     id: Snowflake::new(10),
///     kind: ChannelKind::Dm,
///     ..Default::default()
/// };
/// assert!(store.upsert_channel(&payload).is_some());
/// assert!(store.channel(Snowflake::new(10)).is_some());
/// ```
#[derive(Debug, Clone, Default, Getters)]
pub struct Store {
    settings: CacheSettings,
    users: Collection<UserId, User>,
    guilds: Collection<GuildId, Guild>,
    channels: Collection<ChannelId, Channel>,
}

impl Store {
    /// Empty store with the given bounds.
    pub fn new(settings: CacheSettings) -> Self {
        Self {
            settings,
            ..Default::default()
        }
    }

    /// Cached channel by id.
    pub fn channel(&self, id: ChannelId) -> Option<&Channel> {
        self.channels.get(&id)
    }

    /// Mutable cached channel by id.
    pub fn channel_mut(&mut self, id: ChannelId) -> Option<&mut Channel> {
        self.channels.get_mut(&id)
    }

    /// Cached guild by id.
    pub fn guild(&self, id: GuildId) -> Option<&Guild> {
        self.guilds.get(&id)
    }

    /// Mutable cached guild by id.
    pub fn guild_mut(&mut self, id: GuildId) -> Option<&mut Guild> {
        self.guilds.get_mut(&id)
    }

    /// Cached user by id.
    pub fn user(&self, id: UserId) -> Option<&User> {
        self.users.get(&id)
    }

    /// Mutable cached user by id.
    pub fn user_mut(&mut self, id: UserId) -> Option<&mut User> {
        self.users.get_mut(&id)
    }

    /// Cached member of a guild.
    pub fn member(&self, guild_id: GuildId, user_id: UserId) -> Option<&Member> {
        self.guilds.get(&guild_id)?.members().get(&user_id)
    }

    /// Channels of a guild, in the guild's order.
    pub fn guild_channels(&self, guild_id: GuildId) -> Vec<&Channel> {
        self.guilds
            .get(&guild_id)
            .map(|guild| {
                guild
                    .channel_ids()
                    .iter()
                    .filter_map(|id| self.channels.get(id))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Insert or patch the global user.
    #[instrument(skip(self, payload), fields(user_id = %payload.id))]
    pub fn upsert_user(&mut self, payload: &UserPayload) -> &mut User {
        let user = self
            .users
            .get_or_insert_with(payload.id, || User::from_payload(payload));
        user.patch(payload);
        user
    }

    /// Insert or patch a channel.
    ///
    /// Yields nothing for an unknown kind, or when the payload names a guild
    /// that is not cached. Recipients are cached as users.
    #[instrument(skip(self, payload), fields(channel_id = %payload.id, kind = %payload.kind))]
    pub fn upsert_channel(&mut self, payload: &ChannelPayload) -> Option<&mut Channel> {
        if let ChannelKind::Unknown(raw) = payload.kind {
            warn!(raw, "Unknown channel kind; not caching");
            return None;
        }

        if let Some(guild_id) = payload.guild_id {
            let Some(guild) = self.guilds.get_mut(&guild_id) else {
                debug!(guild_id = %guild_id, "Guild not cached; not caching channel");
                return None;
            };
            guild.add_channel_id(payload.id);
        }

        for recipient in &payload.recipients {
            self.upsert_user(recipient);
        }

        let limit = *self.settings.message_cache_limit();
        let channel = self.channels.get_or_insert_with(payload.id, || {
            Channel::from_payload(payload).with_message_limit(limit)
        });
        channel.patch(payload);
        Some(channel)
    }

    /// Register a placeholder channel known only by id.
    #[instrument(skip(self, recipients))]
    pub fn insert_partial_channel(
        &mut self,
        id: ChannelId,
        guild_id: Option<GuildId>,
        recipients: Vec<UserId>,
    ) -> &mut Channel {
        if let Some(guild) = guild_id.and_then(|g| self.guilds.get_mut(&g)) {
            guild.add_channel_id(id);
        }
        let limit = *self.settings.message_cache_limit();
        self.channels.get_or_insert_with(id, || {
            Channel::placeholder(id, guild_id, recipients).with_message_limit(limit)
        })
    }

    /// Swap the value stored under a channel's id, keeping its position.
    pub fn replace_channel(&mut self, channel: Channel) {
        self.channels.insert(*channel.id(), channel);
    }

    /// Remove a channel from the store and from its guild's channel list.
    #[instrument(skip(self))]
    pub fn remove_channel(&mut self, id: ChannelId) -> Option<Channel> {
        let channel = self.channels.remove(&id)?;
        if let Some(guild) = channel.guild_id().and_then(|g| self.guilds.get_mut(&g)) {
            guild.remove_channel_id(id);
        }
        Some(channel)
    }

    /// Insert or refresh a guild together with everything the payload embeds.
    #[instrument(skip(self, payload), fields(guild_id = %payload.id))]
    pub fn upsert_guild(&mut self, payload: &GuildPayload) -> &mut Guild {
        let guild_id = payload.id;
        {
            let guild = self
                .guilds
                .get_or_insert_with(guild_id, || Guild::from_payload(payload));
            guild.patch(payload);
            for role in &payload.roles {
                let role_entry = guild
                    .roles_mut()
                    .get_or_insert_with(role.id, || Role::from_payload(guild_id, role));
                role_entry.patch(role);
            }
        }

        for channel in &payload.channels {
            let mut channel = channel.clone();
            channel.guild_id.get_or_insert(guild_id);
            self.upsert_channel(&channel);
        }
        for member in &payload.members {
            self.upsert_member(guild_id, member);
        }
        for presence in &payload.presences {
            self.upsert_presence(guild_id, presence);
        }
        for voice_state in &payload.voice_states {
            self.upsert_voice_state(guild_id, voice_state);
        }

        debug!(
            channels = payload.channels.len(),
            members = payload.members.len(),
            "Guild cached"
        );
        self.guilds
            .get_or_insert_with(guild_id, || Guild::from_payload(payload))
    }

    /// Remove a guild and every channel it owns.
    ///
    /// Users stay; members, presences, voice states and roles leave with the
    /// guild. Returned channels have not been flagged deleted.
    #[instrument(skip(self))]
    pub fn remove_guild(&mut self, id: GuildId) -> Option<(Guild, Vec<Channel>)> {
        let guild = self.guilds.remove(&id)?;
        let channels = guild
            .channel_ids()
            .iter()
            .filter_map(|channel_id| self.channels.remove(channel_id))
            .collect();
        Some((guild, channels))
    }

    /// Insert or patch a member, caching its user globally.
    ///
    /// Yields nothing when the payload carries no user or the guild is not
    /// cached.
    #[instrument(skip(self, payload))]
    pub fn upsert_member(&mut self, guild_id: GuildId, payload: &MemberPayload) -> Option<&mut Member> {
        let user = payload.user.as_ref()?;
        if !self.guilds.contains_key(&guild_id) {
            return None;
        }
        self.upsert_user(user);
        let guild = self.guilds.get_mut(&guild_id)?;
        let member = guild
            .members_mut()
            .get_or_insert_with(user.id, || Member::new(guild_id, user.id, Vec::new(), None));
        member.patch(payload);
        Some(member)
    }

    /// Replace a user's presence in a guild.
    pub fn upsert_presence(
        &mut self,
        guild_id: GuildId,
        payload: &PresencePayload,
    ) -> Option<&mut Presence> {
        let guild = self.guilds.get_mut(&guild_id)?;
        let presence = Presence::from_payload(guild_id, payload);
        let presences = guild.presences_mut();
        presences.insert(payload.user.id, presence);
        presences.get_mut(&payload.user.id)
    }

    /// Replace a user's voice state in a guild.
    pub fn upsert_voice_state(
        &mut self,
        guild_id: GuildId,
        payload: &VoiceStatePayload,
    ) -> Option<&mut VoiceState> {
        let guild = self.guilds.get_mut(&guild_id)?;
        let voice_states = guild.voice_states_mut();
        voice_states.insert(payload.user_id, VoiceState::from_payload(guild_id, payload));
        voice_states.get_mut(&payload.user_id)
    }

    /// Insert or patch a role.
    pub fn upsert_role(&mut self, guild_id: GuildId, payload: &RolePayload) -> Option<&mut Role> {
        let guild = self.guilds.get_mut(&guild_id)?;
        let role = guild
            .roles_mut()
            .get_or_insert_with(payload.id, || Role::from_payload(guild_id, payload));
        role.patch(payload);
        Some(role)
    }

    /// Cache a message in its channel, caching its author globally.
    ///
    /// An already cached message is refreshed without recording a revision.
    /// Yields nothing when the channel is not cached or holds no messages.
    #[instrument(skip(self, payload), fields(message_id = %payload.id, channel_id = %payload.channel_id))]
    pub fn upsert_message(&mut self, payload: &MessagePayload) -> Option<&mut Message> {
        if !self
            .channels
            .get(&payload.channel_id)
            .is_some_and(Channel::is_text_based)
        {
            return None;
        }
        if let Some(author) = &payload.author {
            self.upsert_user(author);
        }

        let channel = self.channels.get_mut(&payload.channel_id)?;
        let guild_id = *channel.guild_id();
        let messages = channel.messages_mut()?;
        let message = messages.get_or_insert_with(payload.id, || {
            Message::from_payload(payload, guild_id)
        });
        message.patch(payload, 0);
        Some(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mosaic_core::Snowflake;

    #[test]
    fn test_remove_channel_updates_guild_list() {
        let mut store = Store::default();
        store.upsert_guild(&GuildPayload {
            id: Snowflake::new(1),
            channels: vec![ChannelPayload {
                id: Snowflake::new(10),
                ..Default::default()
            }],
            ..Default::default()
        });
        assert_eq!(store.guild(Snowflake::new(1)).map(|g| g.channel_ids().len()), Some(1));

        let removed = store.remove_channel(Snowflake::new(10));
        assert!(removed.is_some());
        assert_eq!(store.guild(Snowflake::new(1)).map(|g| g.channel_ids().len()), Some(0));
    }
}
