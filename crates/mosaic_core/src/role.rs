//! Role model.

use crate::{GuildId, RoleId, RolePayload};
use derive_getters::Getters;

/// A guild role.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Role {
    id: RoleId,
    guild_id: GuildId,
    name: String,
    color: u32,
    position: i32,
    permissions: u64,
    hoist: bool,
    mentionable: bool,
    deleted: bool,
}

impl Role {
    /// Build a role from a payload.
    pub fn from_payload(guild_id: GuildId, payload: &RolePayload) -> Self {
        let mut role = Self {
            id: payload.id,
            guild_id,
            name: String::new(),
            color: 0,
            position: 0,
            permissions: 0,
            hoist: false,
            mentionable: false,
            deleted: false,
        };
        role.patch(payload);
        role
    }

    /// Replace every field with the payload's.
    pub fn patch(&mut self, payload: &RolePayload) {
        self.name = payload.name.clone();
        self.color = payload.color;
        self.position = payload.position;
        // Malformed bitfields read as no permissions
        self.permissions = payload
            .permissions
            .as_deref()
            .and_then(|p| p.parse().ok())
            .unwrap_or(0);
        self.hoist = payload.hoist;
        self.mentionable = payload.mentionable;
    }

    /// Flag the role as deleted.
    pub fn mark_deleted(&mut self) {
        self.deleted = true;
    }
}
