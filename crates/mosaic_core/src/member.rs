//! Guild member model.

use crate::{GuildId, MemberPayload, RoleId, UserId};
use chrono::{DateTime, Utc};
use derive_getters::Getters;

/// A user's guild-scoped membership. The user itself is referenced by id.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Member {
    user_id: UserId,
    guild_id: GuildId,
    nick: Option<String>,
    roles: Vec<RoleId>,
    joined_at: Option<DateTime<Utc>>,
    deaf: bool,
    mute: bool,
    deleted: bool,
}

impl Member {
    /// Member with only roles and nickname known, as surfaced by a presence.
    pub fn new(guild_id: GuildId, user_id: UserId, roles: Vec<RoleId>, nick: Option<String>) -> Self {
        Self {
            user_id,
            guild_id,
            nick,
            roles,
            joined_at: None,
            deaf: false,
            mute: false,
            deleted: false,
        }
    }

    /// Build a member from a full member payload.
    pub fn from_payload(guild_id: GuildId, user_id: UserId, payload: &MemberPayload) -> Self {
        let mut member = Self::new(guild_id, user_id, Vec::new(), None);
        member.patch(payload);
        member
    }

    /// Apply a member payload. Roles are always replaced.
    pub fn patch(&mut self, payload: &MemberPayload) {
        if payload.nick.is_some() {
            self.nick = payload.nick.clone();
        }
        self.roles = payload.roles.clone();
        if payload.joined_at.is_some() {
            self.joined_at = payload.joined_at;
        }
        if let Some(deaf) = payload.deaf {
            self.deaf = deaf;
        }
        if let Some(mute) = payload.mute {
            self.mute = mute;
        }
    }

    /// Flag the member as having left.
    pub fn mark_deleted(&mut self) {
        self.deleted = true;
    }
}
