//! Guild model.

use crate::{
    ChannelId, Collection, GuildId, GuildPayload, Member, Presence, Role, RoleId, UserId,
    VoiceState,
};
use derive_getters::Getters;

/// A cached guild and the collections it owns.
///
/// Channels themselves live in the global channel store; the guild keeps their
/// ids in insertion order.
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct Guild {
    id: GuildId,
    name: Option<String>,
    owner_id: Option<UserId>,
    member_count: Option<u64>,
    unavailable: bool,
    deleted: bool,
    channel_ids: Vec<ChannelId>,
    roles: Collection<RoleId, Role>,
    members: Collection<UserId, Member>,
    presences: Collection<UserId, Presence>,
    voice_states: Collection<UserId, VoiceState>,
}

impl Guild {
    /// Guild with the payload's scalar fields and empty collections.
    pub fn from_payload(payload: &GuildPayload) -> Self {
        Self {
            id: payload.id,
            name: payload.name.clone(),
            owner_id: payload.owner_id,
            member_count: payload.member_count,
            unavailable: payload.unavailable.unwrap_or(false),
            deleted: false,
            channel_ids: Vec::new(),
            roles: Collection::new(),
            members: Collection::new(),
            presences: Collection::new(),
            voice_states: Collection::new(),
        }
    }

    /// Apply the scalar fields present in `payload`.
    pub fn patch(&mut self, payload: &GuildPayload) {
        if payload.name.is_some() {
            self.name = payload.name.clone();
        }
        if payload.owner_id.is_some() {
            self.owner_id = payload.owner_id;
        }
        if payload.member_count.is_some() {
            self.member_count = payload.member_count;
        }
        if let Some(unavailable) = payload.unavailable {
            self.unavailable = unavailable;
        }
    }

    /// Track a channel as belonging to this guild.
    pub fn add_channel_id(&mut self, id: ChannelId) {
        if !self.channel_ids.contains(&id) {
            self.channel_ids.push(id);
        }
    }

    /// Stop tracking a channel.
    pub fn remove_channel_id(&mut self, id: ChannelId) {
        self.channel_ids.retain(|c| *c != id);
    }

    /// Mark the guild as in or out of an outage.
    pub fn set_unavailable(&mut self, unavailable: bool) {
        self.unavailable = unavailable;
    }

    /// Flag the guild as deleted.
    pub fn mark_deleted(&mut self) {
        self.deleted = true;
    }

    /// Shift the member count when members join or leave.
    pub fn adjust_member_count(&mut self, delta: i64) {
        if let Some(count) = self.member_count.as_mut() {
            *count = count.saturating_add_signed(delta);
        }
    }

    /// Mutable roles.
    pub fn roles_mut(&mut self) -> &mut Collection<RoleId, Role> {
        &mut self.roles
    }

    /// Mutable members.
    pub fn members_mut(&mut self) -> &mut Collection<UserId, Member> {
        &mut self.members
    }

    /// Mutable presences.
    pub fn presences_mut(&mut self) -> &mut Collection<UserId, Presence> {
        &mut self.presences
    }

    /// Mutable voice states.
    pub fn voice_states_mut(&mut self) -> &mut Collection<UserId, VoiceState> {
        &mut self.voice_states
    }
}
