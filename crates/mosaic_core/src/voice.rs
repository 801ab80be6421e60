//! Voice state model.

use crate::{ChannelId, GuildId, UserId, VoiceStatePayload};
use derive_getters::Getters;

/// A user's voice connection state inside one guild.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct VoiceState {
    guild_id: GuildId,
    user_id: UserId,
    channel_id: Option<ChannelId>,
    session_id: Option<String>,
    deaf: bool,
    mute: bool,
    self_deaf: bool,
    self_mute: bool,
    self_video: bool,
    suppress: bool,
}

impl VoiceState {
    /// State for a user with no known connection.
    pub fn placeholder(guild_id: GuildId, user_id: UserId) -> Self {
        Self {
            guild_id,
            user_id,
            channel_id: None,
            session_id: None,
            deaf: false,
            mute: false,
            self_deaf: false,
            self_mute: false,
            self_video: false,
            suppress: false,
        }
    }

    /// Build a voice state from a payload.
    pub fn from_payload(guild_id: GuildId, payload: &VoiceStatePayload) -> Self {
        Self {
            guild_id,
            user_id: payload.user_id,
            channel_id: payload.channel_id,
            session_id: payload.session_id.clone(),
            deaf: payload.deaf,
            mute: payload.mute,
            self_deaf: payload.self_deaf,
            self_mute: payload.self_mute,
            self_video: payload.self_video,
            suppress: payload.suppress,
        }
    }
}
