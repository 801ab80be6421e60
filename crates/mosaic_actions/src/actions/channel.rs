use super::Actions;
use mosaic_core::{Channel, ChannelPayload};
use mosaic_interface::Notification;
use tracing::{debug, instrument, warn};

impl Actions {
    /// Cache a channel; announce it only if it was not cached before.
    ///
    /// Re-sending a cached id patches it in place.
    #[instrument(skip(self, payload), fields(channel_id = %payload.id))]
    pub fn channel_create(&mut self, payload: &ChannelPayload) -> Option<Channel> {
        let existed = self.store.channel(payload.id).is_some();
        let channel = self.store.upsert_channel(payload)?.clone();
        if existed {
            debug!("Channel already cached; patched in place");
        } else {
            self.emit(Notification::ChannelCreate(channel.clone()));
        }
        Some(channel)
    }

    /// Remove a channel and soft-delete it and its messages.
    #[instrument(skip(self, payload), fields(channel_id = %payload.id))]
    pub fn channel_delete(&mut self, payload: &ChannelPayload) -> Option<Channel> {
        let Some(mut channel) = self.store.remove_channel(payload.id) else {
            debug!("Channel not cached");
            return None;
        };
        channel.mark_deleted();
        self.emit(Notification::ChannelDelete(channel.clone()));
        Some(channel)
    }

    /// Patch a cached channel, replacing it when its kind changes.
    ///
    /// Returns the pre-patch snapshot and the final channel. Announcing is
    /// left to the dispatcher.
    #[instrument(skip(self, payload), fields(channel_id = %payload.id, kind = %payload.kind))]
    pub fn channel_update(&mut self, payload: &ChannelPayload) -> Option<(Channel, Channel)> {
        let limit = *self.store.settings().message_cache_limit();
        let channel = self.store.channel_mut(payload.id)?;
        let old = channel.clone();
        channel.patch(payload);

        if payload.kind != *channel.kind() {
            match channel.replacement(payload.kind) {
                Some(replacement) => {
                    let mut replacement = replacement.with_message_limit(limit);
                    if let Some(state) = channel.take_text_state() {
                        replacement.adopt_text_state(state);
                    }
                    debug!(from = %old.kind(), "Channel kind changed; replacing");
                    self.store.replace_channel(replacement);
                }
                None => warn!(
                    from = %old.kind(),
                    "Unsupported channel kind migration; keeping patched channel"
                ),
            }
        }

        let new = self.store.channel(payload.id)?.clone();
        Some((old, new))
    }
}
