//! Channel model.

use crate::{
    ChannelId, ChannelPayload, Collection, GuildId, Message, MessageId, UserId,
};
use chrono::{DateTime, Utc};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Discriminating channel kind, carried as an integer on the wire.
///
/// # Examples
///
/// ```
/// use mosaic_core::ChannelKind;
///
/// assert_eq!(ChannelKind::from(5), ChannelKind::News);
/// assert!(ChannelKind::News.is_text_based());
/// assert!(!ChannelKind::Store.is_text_based());
/// assert_eq!(u8::from(ChannelKind::Unknown(13)), 13);
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[serde(from = "u8", into = "u8")]
#[strum(serialize_all = "snake_case")]
pub enum ChannelKind {
    /// Guild text channel
    #[default]
    Text,
    /// Direct message
    Dm,
    /// Guild voice channel
    Voice,
    /// Group direct message
    GroupDm,
    /// Guild category
    Category,
    /// Guild announcement channel
    News,
    /// Guild store page
    Store,
    /// A kind this engine does not model
    Unknown(u8),
}

impl ChannelKind {
    /// Kinds that own a message cache.
    pub fn is_text_based(self) -> bool {
        matches!(self, Self::Text | Self::Dm | Self::GroupDm | Self::News)
    }

    /// Kinds that live outside any guild.
    pub fn is_direct(self) -> bool {
        matches!(self, Self::Dm | Self::GroupDm)
    }

    /// Guild kinds an existing channel can be converted into.
    pub fn is_guild_kind(self) -> bool {
        matches!(
            self,
            Self::Category | Self::News | Self::Store | Self::Text | Self::Voice
        )
    }
}

impl From<u8> for ChannelKind {
    fn from(value: u8) -> Self {
        match value {
            0 => Self::Text,
            1 => Self::Dm,
            2 => Self::Voice,
            3 => Self::GroupDm,
            4 => Self::Category,
            5 => Self::News,
            6 => Self::Store,
            other => Self::Unknown(other),
        }
    }
}

impl From<ChannelKind> for u8 {
    fn from(kind: ChannelKind) -> Self {
        match kind {
            ChannelKind::Text => 0,
            ChannelKind::Dm => 1,
            ChannelKind::Voice => 2,
            ChannelKind::GroupDm => 3,
            ChannelKind::Category => 4,
            ChannelKind::News => 5,
            ChannelKind::Store => 6,
            ChannelKind::Unknown(other) => other,
        }
    }
}

/// A remote user currently typing in a channel.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct TypingEntry {
    user_id: UserId,
    since: DateTime<Utc>,
    last_timestamp: DateTime<Utc>,
}

impl TypingEntry {
    /// Start tracking a user at `at`.
    pub fn new(user_id: UserId, at: DateTime<Utc>) -> Self {
        Self {
            user_id,
            since: at,
            last_timestamp: at,
        }
    }

    /// Record another typing signal.
    pub fn refresh(&mut self, at: DateTime<Utc>) {
        self.last_timestamp = at;
    }
}

/// State owned only by text-based channels.
///
/// Moves as a unit when a channel is replaced by one of another text kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextState {
    messages: Collection<MessageId, Message>,
    typing: Collection<UserId, TypingEntry>,
}

impl TextState {
    /// Empty state whose message cache holds at most `limit` messages.
    pub fn with_message_limit(limit: Option<usize>) -> Self {
        Self {
            messages: limit.map(Collection::with_limit).unwrap_or_default(),
            typing: Collection::new(),
        }
    }
}

/// A cached channel of any kind.
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct Channel {
    id: ChannelId,
    kind: ChannelKind,
    guild_id: Option<GuildId>,
    name: Option<String>,
    topic: Option<String>,
    position: Option<i32>,
    parent_id: Option<ChannelId>,
    nsfw: bool,
    bitrate: Option<u32>,
    user_limit: Option<u32>,
    recipients: Vec<UserId>,
    last_message_id: Option<MessageId>,
    deleted: bool,
    partial: bool,
    #[getter(skip)]
    text: Option<TextState>,
}

impl Channel {
    /// Build a channel of the payload's kind.
    pub fn from_payload(payload: &ChannelPayload) -> Self {
        Self {
            id: payload.id,
            kind: payload.kind,
            guild_id: payload.guild_id,
            name: payload.name.clone(),
            topic: payload.topic.clone(),
            position: payload.position,
            parent_id: payload.parent_id,
            nsfw: payload.nsfw.unwrap_or(false),
            bitrate: payload.bitrate,
            user_limit: payload.user_limit,
            recipients: payload.recipients.iter().map(|u| u.id).collect(),
            last_message_id: payload.last_message_id,
            deleted: false,
            partial: false,
            text: payload.kind.is_text_based().then(TextState::default),
        }
    }

    /// Build the object that replaces this channel once its kind changes.
    ///
    /// Every field but the kind carries over from `self`, which should already
    /// be patched. The message cache and typing table start empty. Returns
    /// `None` when the target kind cannot be constructed for a guild.
    pub fn replacement(&self, kind: ChannelKind) -> Option<Self> {
        kind.is_guild_kind().then(|| Self {
            id: self.id,
            kind,
            guild_id: self.guild_id,
            name: self.name.clone(),
            topic: self.topic.clone(),
            position: self.position,
            parent_id: self.parent_id,
            nsfw: self.nsfw,
            bitrate: self.bitrate,
            user_limit: self.user_limit,
            recipients: self.recipients.clone(),
            last_message_id: self.last_message_id,
            deleted: self.deleted,
            partial: self.partial,
            text: kind.is_text_based().then(TextState::default),
        })
    }

    /// Minimal placeholder known only by id.
    ///
    /// With a guild it is a text channel, otherwise a direct message.
    pub fn placeholder(id: ChannelId, guild_id: Option<GuildId>, recipients: Vec<UserId>) -> Self {
        let kind = if guild_id.is_some() {
            ChannelKind::Text
        } else {
            ChannelKind::Dm
        };
        let payload = ChannelPayload {
            id,
            kind,
            guild_id,
            ..Default::default()
        };
        Self {
            recipients,
            partial: true,
            ..Self::from_payload(&payload)
        }
    }

    /// Cap the message cache of a freshly built channel.
    pub fn with_message_limit(mut self, limit: Option<usize>) -> Self {
        if self.text.is_some() {
            self.text = Some(TextState::with_message_limit(limit));
        }
        self
    }

    /// Apply the fields present in `payload`. Id and kind never change here.
    pub fn patch(&mut self, payload: &ChannelPayload) {
        if payload.guild_id.is_some() {
            self.guild_id = payload.guild_id;
        }
        if payload.name.is_some() {
            self.name = payload.name.clone();
        }
        if payload.topic.is_some() {
            self.topic = payload.topic.clone();
        }
        if payload.position.is_some() {
            self.position = payload.position;
        }
        if payload.parent_id.is_some() {
            self.parent_id = payload.parent_id;
        }
        if let Some(nsfw) = payload.nsfw {
            self.nsfw = nsfw;
        }
        if payload.bitrate.is_some() {
            self.bitrate = payload.bitrate;
        }
        if payload.user_limit.is_some() {
            self.user_limit = payload.user_limit;
        }
        if !payload.recipients.is_empty() {
            self.recipients = payload.recipients.iter().map(|u| u.id).collect();
        }
        if payload.last_message_id.is_some() {
            self.last_message_id = payload.last_message_id;
        }
        self.partial = false;
    }

    /// Whether this channel owns a message cache.
    pub fn is_text_based(&self) -> bool {
        self.text.is_some()
    }

    /// Whether this is a direct or group message channel.
    pub fn is_direct(&self) -> bool {
        self.kind.is_direct()
    }

    /// Cached messages, for text-based channels.
    pub fn messages(&self) -> Option<&Collection<MessageId, Message>> {
        self.text.as_ref().map(|t| &t.messages)
    }

    /// Mutable cached messages, for text-based channels.
    pub fn messages_mut(&mut self) -> Option<&mut Collection<MessageId, Message>> {
        self.text.as_mut().map(|t| &mut t.messages)
    }

    /// Users typing here, for text-based channels.
    pub fn typing(&self) -> Option<&Collection<UserId, TypingEntry>> {
        self.text.as_ref().map(|t| &t.typing)
    }

    /// Mutable typing table, for text-based channels.
    pub fn typing_mut(&mut self) -> Option<&mut Collection<UserId, TypingEntry>> {
        self.text.as_mut().map(|t| &mut t.typing)
    }

    /// Detach the message cache and typing table.
    pub fn take_text_state(&mut self) -> Option<TextState> {
        self.text.take()
    }

    /// Install a message cache and typing table taken from a predecessor.
    ///
    /// Ignored unless this channel is text-based itself.
    pub fn adopt_text_state(&mut self, state: TextState) {
        if self.kind.is_text_based() {
            self.text = Some(state);
        }
    }

    /// Record the most recent message.
    pub fn set_last_message_id(&mut self, id: MessageId) {
        self.last_message_id = Some(id);
    }

    /// Soft delete: flag the channel and, outside direct messages, every cached
    /// message. Nothing is removed from the message cache.
    pub fn mark_deleted(&mut self) {
        self.deleted = true;
        if self.kind.is_direct() {
            return;
        }
        if let Some(messages) = self.messages_mut() {
            for message in messages.values_mut() {
                message.mark_deleted();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MessagePayload, Snowflake};

    fn text_channel(kind: ChannelKind) -> Channel {
        Channel::from_payload(&ChannelPayload {
            id: Snowflake::new(10),
            kind,
            guild_id: Some(Snowflake::new(1)),
            ..Default::default()
        })
    }

    fn cache_message(channel: &mut Channel, id: u64) {
        let payload = MessagePayload {
            id: Snowflake::new(id),
            channel_id: *channel.id(),
            ..Default::default()
        };
        let message = Message::from_payload(&payload, *channel.guild_id());
        channel
            .messages_mut()
            .unwrap()
            .insert(payload.id, message);
    }

    #[test]
    fn test_mark_deleted_cascades_outside_direct_messages() {
        let mut channel = text_channel(ChannelKind::Text);
        cache_message(&mut channel, 100);
        cache_message(&mut channel, 101);
        channel.mark_deleted();
        assert!(*channel.deleted());
        assert!(channel.messages().unwrap().values().all(|m| *m.deleted()));
    }

    #[test]
    fn test_mark_deleted_spares_direct_message_history() {
        let mut channel = Channel::placeholder(Snowflake::new(10), None, vec![Snowflake::new(7)]);
        assert_eq!(*channel.kind(), ChannelKind::Dm);
        cache_message(&mut channel, 100);
        channel.mark_deleted();
        assert!(*channel.deleted());
        assert!(!channel.messages().unwrap().values().any(|m| *m.deleted()));
    }

    #[test]
    fn test_patch_keeps_kind_and_unset_fields() {
        let mut channel = text_channel(ChannelKind::Text);
        channel.patch(&ChannelPayload {
            id: Snowflake::new(10),
            kind: ChannelKind::Voice,
            name: Some("general".into()),
            ..Default::default()
        });
        assert_eq!(*channel.kind(), ChannelKind::Text);
        assert_eq!(channel.name().as_deref(), Some("general"));
        assert_eq!(*channel.guild_id(), Some(Snowflake::new(1)));
    }

    #[test]
    fn test_replacement_refuses_direct_kinds() {
        let channel = text_channel(ChannelKind::Text);
        assert!(channel.replacement(ChannelKind::GroupDm).is_none());
        let store = channel.replacement(ChannelKind::Store).unwrap();
        assert!(!store.is_text_based());
    }

    #[test]
    fn test_replacement_keeps_guild_and_settings() {
        let mut channel = text_channel(ChannelKind::Text);
        channel.patch(&ChannelPayload {
            id: Snowflake::new(10),
            name: Some("announcements".into()),
            topic: Some("read only".into()),
            ..Default::default()
        });
        cache_message(&mut channel, 100);

        let news = channel.replacement(ChannelKind::News).unwrap();
        assert_eq!(*news.kind(), ChannelKind::News);
        assert_eq!(*news.guild_id(), Some(Snowflake::new(1)));
        assert_eq!(news.name().as_deref(), Some("announcements"));
        assert_eq!(news.topic().as_deref(), Some("read only"));
        assert!(news.messages().unwrap().is_empty());
    }

    #[test]
    fn test_placeholder_is_flagged_partial() {
        let channel = Channel::placeholder(Snowflake::new(10), Some(Snowflake::new(1)), Vec::new());
        assert!(*channel.partial());
        assert_eq!(*channel.kind(), ChannelKind::Text);
    }
}
