use super::Actions;
use mosaic_core::{Channel, Guild, GuildDeletePayload, GuildPayload};
use mosaic_interface::Notification;
use tracing::{debug, info, instrument};

impl Actions {
    /// Cache a joined guild, or refresh one coming back from an outage.
    #[instrument(skip(self, payload), fields(guild_id = %payload.id))]
    pub fn guild_create(&mut self, payload: &GuildPayload) -> Option<Guild> {
        let was_unavailable = self.store.guild(payload.id).map(|g| *g.unavailable());
        let still_unavailable = payload.unavailable == Some(true);

        let guild = self.store.upsert_guild(payload);
        match was_unavailable {
            None => {
                let guild = guild.clone();
                info!(name = ?guild.name(), "Joined guild");
                self.emit(Notification::GuildCreate(guild.clone()));
                Some(guild)
            }
            Some(true) if !still_unavailable => {
                guild.set_unavailable(false);
                let guild = guild.clone();
                info!("Guild available again");
                self.emit(Notification::GuildAvailable(guild.clone()));
                Some(guild)
            }
            Some(_) => {
                debug!("Guild refreshed");
                Some(guild.clone())
            }
        }
    }

    /// Patch a cached guild and its roles.
    #[instrument(skip(self, payload), fields(guild_id = %payload.id))]
    pub fn guild_update(&mut self, payload: &GuildPayload) -> Option<(Guild, Guild)> {
        let old = self.store.guild(payload.id)?.clone();
        for role in &payload.roles {
            self.store.upsert_role(payload.id, role);
        }
        let guild = self.store.guild_mut(payload.id)?;
        guild.patch(payload);
        let new = guild.clone();

        self.emit(Notification::GuildUpdate {
            old: old.clone(),
            new: new.clone(),
        });
        Some((old, new))
    }

    /// Handle leaving a guild, or the guild going into an outage.
    ///
    /// An outage only flags the guild. Leaving removes the guild and
    /// soft-deletes every channel it owned, without announcing them one by
    /// one; members, presences, voice states and roles go with it while users
    /// stay cached. Returns the guild and the channels removed.
    #[instrument(skip(self, payload), fields(guild_id = %payload.id))]
    pub fn guild_delete(&mut self, payload: &GuildDeletePayload) -> Option<(Guild, Vec<Channel>)> {
        if payload.unavailable == Some(true) {
            let guild = self.store.guild_mut(payload.id)?;
            guild.set_unavailable(true);
            let guild = guild.clone();
            info!("Guild became unavailable");
            self.emit(Notification::GuildUnavailable(guild.clone()));
            return Some((guild, Vec::new()));
        }

        let (mut guild, mut channels) = self.store.remove_guild(payload.id)?;
        for channel in &mut channels {
            channel.mark_deleted();
        }
        guild.mark_deleted();
        info!(channels = channels.len(), "Left guild");
        self.emit(Notification::GuildDelete(guild.clone()));
        Some((guild, channels))
    }
}
