use super::{Actions, EntityFragment};
use mosaic_core::{ChannelId, ChannelKind, Reaction, ReactionPayload, UserId};
use mosaic_interface::Notification;
use tracing::{debug, instrument};

impl Actions {
    /// Resolve user, channel and message of a reaction event.
    fn reaction_target(&mut self, payload: &ReactionPayload) -> Option<(UserId, ChannelId)> {
        let user_id = self.resolve_user(payload.user_id)?;
        let fragment = EntityFragment {
            channel_id: Some(payload.channel_id),
            message_id: Some(payload.message_id),
            guild_id: payload.guild_id,
            user_id: Some(payload.user_id),
            ..Default::default()
        };
        let channel_id = self.resolve_channel(&fragment)?;
        if *self.store.channel(channel_id)?.kind() == ChannelKind::Voice {
            debug!("Reaction in a voice channel");
            return None;
        }
        self.resolve_message(channel_id, &fragment, true)?;
        Some((user_id, channel_id))
    }

    /// Record a user's reaction on a message.
    #[instrument(skip(self, payload), fields(message_id = %payload.message_id, user_id = %payload.user_id))]
    pub fn reaction_add(&mut self, payload: &ReactionPayload) -> Option<Reaction> {
        let emoji = payload.emoji.as_ref()?.key()?;
        let (user_id, channel_id) = self.reaction_target(payload)?;
        let is_self = self.self_user == Some(user_id);

        let reaction = self
            .store
            .channel_mut(channel_id)?
            .messages_mut()?
            .get_mut(&payload.message_id)?
            .reactions_mut()
            .get_or_insert_with(emoji.clone(), || Reaction::new(&emoji));
        if !reaction.add_user(user_id, is_self) {
            debug!("Reaction already recorded");
            return Some(reaction.clone());
        }
        let reaction = reaction.clone();

        self.emit(Notification::ReactionAdd {
            reaction: reaction.clone(),
            message_id: payload.message_id,
            channel_id,
            user_id,
        });
        Some(reaction)
    }

    /// Withdraw a user's reaction, dropping the reaction once nobody is left.
    #[instrument(skip(self, payload), fields(message_id = %payload.message_id, user_id = %payload.user_id))]
    pub fn reaction_remove(&mut self, payload: &ReactionPayload) -> Option<Reaction> {
        let emoji_payload = payload.emoji.as_ref()?;
        let emoji = emoji_payload.key()?;
        let (user_id, channel_id) = self.reaction_target(payload)?;
        self.resolve_reaction(channel_id, payload.message_id, emoji_payload)?;
        let is_self = self.self_user == Some(user_id);

        let reactions = self
            .store
            .channel_mut(channel_id)?
            .messages_mut()?
            .get_mut(&payload.message_id)?
            .reactions_mut();
        let reaction = reactions.get_mut(&emoji)?;
        reaction.remove_user(user_id, is_self);
        let reaction = reaction.clone();
        if *reaction.count() == 0 {
            reactions.remove(&emoji);
        }

        self.emit(Notification::ReactionRemove {
            reaction: reaction.clone(),
            message_id: payload.message_id,
            channel_id,
            user_id,
        });
        Some(reaction)
    }
}
