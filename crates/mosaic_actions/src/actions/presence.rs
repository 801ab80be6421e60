use super::Actions;
use mosaic_core::{Member, Presence, PresencePayload, Status};
use mosaic_interface::Notification;
use tracing::{debug, instrument};

impl Actions {
    /// Fold a presence change into its guild.
    ///
    /// A presence may be the first sign of a member; one that is not offline
    /// creates the member and announces it as available.
    #[instrument(skip(self, payload), fields(user_id = %payload.user.id))]
    pub fn presence_update(&mut self, payload: &PresencePayload) -> Option<Presence> {
        let summary = &payload.user;
        let has_username = summary.username.as_deref().is_some_and(|n| !n.is_empty());

        if self.store.user(summary.id).is_none() {
            if !has_username {
                debug!("Unknown user without a usable summary");
                return None;
            }
            self.store.upsert_user(summary);
        }
        if has_username {
            self.user_update(summary);
        }

        let guild_id = payload.guild_id?;
        let guild = self.store.guild(guild_id)?;
        let old = guild.presences().get(&summary.id).cloned();
        let mut member = guild.members().get(&summary.id).cloned();

        if member.is_none() && payload.status != Status::Offline {
            let synthesized = Member::new(
                guild_id,
                summary.id,
                payload.roles.clone(),
                payload.nick.clone(),
            );
            self.store
                .guild_mut(guild_id)?
                .members_mut()
                .insert(summary.id, synthesized.clone());
            self.emit(Notification::GuildMemberAvailable(synthesized.clone()));
            member = Some(synthesized);
        }

        let new = self.store.upsert_presence(guild_id, payload)?.clone();
        if member.is_some() {
            self.emit(Notification::PresenceUpdate {
                old,
                new: new.clone(),
            });
        }
        Some(new)
    }
}
