use super::{Actions, EntityFragment};
use mosaic_core::{
    Collection, Message, MessageDeleteBulkPayload, MessageDeletePayload, MessageId,
    MessagePayload,
};
use mosaic_interface::Notification;
use tracing::{debug, instrument};

impl Actions {
    /// Cache a new message and announce it.
    ///
    /// A message that is already cached is returned as is.
    #[instrument(skip(self, payload), fields(message_id = %payload.id, channel_id = %payload.channel_id))]
    pub fn message_create(&mut self, payload: &MessagePayload) -> Option<Message> {
        let channel_id = self.resolve_channel(&EntityFragment {
            channel_id: Some(payload.channel_id),
            guild_id: payload.guild_id,
            author_id: payload.author.as_ref().map(|a| a.id),
            ..Default::default()
        })?;

        if let Some(existing) = self.store.channel(channel_id)?.messages()?.get(&payload.id) {
            debug!("Message already cached");
            return Some(existing.clone());
        }

        let message = self.store.upsert_message(payload)?.clone();
        if let Some(channel) = self.store.channel_mut(channel_id) {
            channel.set_last_message_id(payload.id);
        }
        self.emit(Notification::MessageCreate(message.clone()));
        Some(message)
    }

    /// Patch a message, keeping its previous content in the edit history.
    #[instrument(skip(self, payload), fields(message_id = %payload.id, channel_id = %payload.channel_id))]
    pub fn message_update(&mut self, payload: &MessagePayload) -> Option<(Message, Message)> {
        let fragment = EntityFragment {
            channel_id: Some(payload.channel_id),
            id: Some(payload.id),
            guild_id: payload.guild_id,
            author_id: payload.author.as_ref().map(|a| a.id),
            ..Default::default()
        };
        let channel_id = self.resolve_channel(&fragment)?;
        let old = self.resolve_message(channel_id, &fragment, true)?;

        let history_limit = *self.store.settings().edit_history_limit();
        let message = self
            .store
            .channel_mut(channel_id)?
            .messages_mut()?
            .get_mut(&payload.id)?;
        message.patch(payload, history_limit);
        let new = message.clone();

        self.emit(Notification::MessageUpdate {
            old: old.clone(),
            new: new.clone(),
        });
        Some((old, new))
    }

    /// Remove a message from its channel's cache and flag it deleted.
    #[instrument(skip(self, payload), fields(message_id = %payload.id, channel_id = %payload.channel_id))]
    pub fn message_delete(&mut self, payload: &MessageDeletePayload) -> Option<Message> {
        let fragment = EntityFragment {
            channel_id: Some(payload.channel_id),
            id: Some(payload.id),
            guild_id: payload.guild_id,
            ..Default::default()
        };
        let channel_id = self.resolve_channel(&fragment)?;
        let mut message = self.resolve_message(channel_id, &fragment, false)?;

        if let Some(messages) = self
            .store
            .channel_mut(channel_id)
            .and_then(|c| c.messages_mut())
        {
            messages.remove(&payload.id);
        }
        message.mark_deleted();
        self.emit(Notification::MessageDelete(message.clone()));
        Some(message)
    }

    /// Remove several messages of a cached channel, announcing them together.
    ///
    /// Ids that resolve to nothing are left out of the result.
    #[instrument(skip(self, payload), fields(channel_id = %payload.channel_id, count = payload.ids.len()))]
    pub fn message_delete_bulk(
        &mut self,
        payload: &MessageDeleteBulkPayload,
    ) -> Option<Collection<MessageId, Message>> {
        let channel_id = payload.channel_id;
        if self.store.channel(channel_id).is_none() {
            debug!("Channel not cached");
            return None;
        }

        let mut deleted = Collection::new();
        for id in &payload.ids {
            let fragment = EntityFragment {
                message_id: Some(*id),
                guild_id: payload.guild_id,
                ..Default::default()
            };
            let Some(mut message) = self.resolve_message(channel_id, &fragment, false) else {
                continue;
            };
            message.mark_deleted();
            if let Some(messages) = self
                .store
                .channel_mut(channel_id)
                .and_then(|c| c.messages_mut())
            {
                messages.remove(id);
            }
            deleted.insert(*id, message);
        }

        if !deleted.is_empty() {
            self.emit(Notification::MessageDeleteBulk(deleted.clone()));
        }
        Some(deleted)
    }
}
