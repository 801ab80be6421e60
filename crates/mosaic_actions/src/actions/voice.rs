use super::Actions;
use mosaic_core::{VoiceState, VoiceStatePayload};
use mosaic_interface::Notification;
use tracing::{debug, instrument};

impl Actions {
    /// Replace a user's voice state and announce the change.
    ///
    /// The old state is a placeholder when none was cached. Voice states of
    /// the client's own user are also forwarded to the voice transport.
    #[instrument(skip(self, payload), fields(user_id = %payload.user_id))]
    pub fn voice_state_update(
        &mut self,
        payload: &VoiceStatePayload,
    ) -> Option<(VoiceState, VoiceState)> {
        let guild_id = payload.guild_id?;
        let user_id = payload.user_id;
        let old = self
            .store
            .guild(guild_id)?
            .voice_states()
            .get(&user_id)
            .cloned()
            .unwrap_or_else(|| VoiceState::placeholder(guild_id, user_id));
        let new = self.store.upsert_voice_state(guild_id, payload)?.clone();

        let member_resolved = match &payload.member {
            Some(data) => {
                if let Some(member) = self
                    .store
                    .guild_mut(guild_id)
                    .and_then(|g| g.members_mut().get_mut(&user_id))
                {
                    member.patch(data);
                    true
                } else if data.user.is_some() && data.joined_at.is_some() {
                    self.store.upsert_member(guild_id, data).is_some()
                } else {
                    false
                }
            }
            None => self.store.member(guild_id, user_id).is_some(),
        };

        if member_resolved && self.self_user == Some(user_id) {
            debug!("Forwarding own voice state");
            self.voice.forward(payload);
        }

        self.emit(Notification::VoiceStateUpdate {
            old: old.clone(),
            new: new.clone(),
        });
        Some((old, new))
    }
}
