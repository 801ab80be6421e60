//! Message and reaction models.

use crate::{ChannelId, Collection, GuildId, MessageId, MessagePayload, UserId};
use chrono::{DateTime, Utc};
use derive_getters::Getters;

/// Content a message carried before an edit.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct MessageRevision {
    content: String,
    edited_timestamp: Option<DateTime<Utc>>,
}

/// Reactions on one message with one emoji.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Reaction {
    emoji: String,
    count: u32,
    me: bool,
    users: Vec<UserId>,
}

impl Reaction {
    /// Reaction with no recorded users.
    pub fn new(emoji: impl Into<String>) -> Self {
        Self {
            emoji: emoji.into(),
            count: 0,
            me: false,
            users: Vec::new(),
        }
    }

    /// Record `user_id` reacting. Returns false if already recorded.
    pub fn add_user(&mut self, user_id: UserId, is_self: bool) -> bool {
        if is_self {
            self.me = true;
        }
        if self.users.contains(&user_id) {
            return false;
        }
        self.users.push(user_id);
        self.count += 1;
        true
    }

    /// Forget `user_id`'s reaction. Returns false if it was not recorded.
    pub fn remove_user(&mut self, user_id: UserId, is_self: bool) -> bool {
        if is_self {
            self.me = false;
        }
        let Some(pos) = self.users.iter().position(|u| *u == user_id) else {
            return false;
        };
        self.users.remove(pos);
        self.count = self.count.saturating_sub(1);
        true
    }
}

/// A cached message.
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct Message {
    id: MessageId,
    channel_id: ChannelId,
    guild_id: Option<GuildId>,
    author_id: Option<UserId>,
    content: String,
    timestamp: Option<DateTime<Utc>>,
    edited_timestamp: Option<DateTime<Utc>>,
    pinned: bool,
    tts: bool,
    deleted: bool,
    partial: bool,
    /// Previous revisions, newest first.
    edits: Vec<MessageRevision>,
    reactions: Collection<String, Reaction>,
}

impl Message {
    /// Build a message from a create payload.
    ///
    /// `guild_id` fills in when the payload does not name a guild.
    pub fn from_payload(payload: &MessagePayload, guild_id: Option<GuildId>) -> Self {
        Self {
            id: payload.id,
            channel_id: payload.channel_id,
            guild_id: payload.guild_id.or(guild_id),
            author_id: payload.author.as_ref().map(|a| a.id),
            content: payload.content.clone().unwrap_or_default(),
            timestamp: payload.timestamp,
            edited_timestamp: payload.edited_timestamp,
            pinned: payload.pinned.unwrap_or(false),
            tts: payload.tts.unwrap_or(false),
            deleted: false,
            partial: false,
            edits: Vec::new(),
            reactions: Collection::new(),
        }
    }

    /// Minimal placeholder known only by id.
    pub fn placeholder(id: MessageId, channel_id: ChannelId, guild_id: Option<GuildId>) -> Self {
        let payload = MessagePayload {
            id,
            channel_id,
            guild_id,
            ..Default::default()
        };
        Self {
            partial: true,
            ..Self::from_payload(&payload, None)
        }
    }

    /// Apply an update payload, keeping at most `history_limit` revisions.
    pub fn patch(&mut self, payload: &MessagePayload, history_limit: usize) {
        if let Some(content) = &payload.content {
            if *content != self.content && !self.partial && history_limit > 0 {
                self.edits.insert(
                    0,
                    MessageRevision {
                        content: self.content.clone(),
                        edited_timestamp: self.edited_timestamp,
                    },
                );
                self.edits.truncate(history_limit);
            }
            self.content = content.clone();
        }
        if let Some(author) = &payload.author {
            self.author_id = Some(author.id);
        }
        if payload.guild_id.is_some() {
            self.guild_id = payload.guild_id;
        }
        if payload.timestamp.is_some() {
            self.timestamp = payload.timestamp;
        }
        if payload.edited_timestamp.is_some() {
            self.edited_timestamp = payload.edited_timestamp;
        }
        if let Some(pinned) = payload.pinned {
            self.pinned = pinned;
        }
        if let Some(tts) = payload.tts {
            self.tts = tts;
        }
        self.partial = false;
    }

    /// Flag the message as deleted.
    pub fn mark_deleted(&mut self) {
        self.deleted = true;
    }

    /// Mutable reactions keyed by emoji.
    pub fn reactions_mut(&mut self) -> &mut Collection<String, Reaction> {
        &mut self.reactions
    }
}
