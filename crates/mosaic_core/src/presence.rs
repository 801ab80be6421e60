//! Presence model.

use crate::{Activity, GuildId, PresencePayload, UserId};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Online status reported for a user.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Status {
    /// Online
    Online,
    /// Away
    Idle,
    /// Do not disturb
    Dnd,
    /// Offline or unknown
    #[default]
    Offline,
    /// Shown as offline to others (self only)
    Invisible,
}

/// A user's presence inside one guild.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Presence {
    user_id: UserId,
    guild_id: GuildId,
    status: Status,
    activities: Vec<Activity>,
}

impl Presence {
    /// Build a presence from a payload, replacing whatever was there.
    pub fn from_payload(guild_id: GuildId, payload: &PresencePayload) -> Self {
        Self {
            user_id: payload.user.id,
            guild_id,
            status: payload.status,
            activities: payload.activities.clone(),
        }
    }
}
