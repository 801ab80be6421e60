//! Collaborator traits.

use crate::Notification;
use async_trait::async_trait;
use mosaic_core::{ChannelId, MessageId, MessagePayload, VoiceStatePayload};
use mosaic_error::MosaicResult;
use tokio::sync::mpsc;
use tracing::debug;

/// The rate-limited request client, seen only through the calls the engine
/// initiates itself.
///
/// Failures surface to whoever started the action: the typing indicator, a
/// bulk delete, or a fetch.
#[async_trait]
pub trait RestClient: Send + Sync {
    /// Show the client as typing in a channel for a few seconds.
    async fn trigger_typing(&self, channel_id: ChannelId) -> MosaicResult<()>;

    /// Delete one message.
    async fn delete_message(&self, channel_id: ChannelId, message_id: MessageId)
    -> MosaicResult<()>;

    /// Delete between 2 and 100 messages in one call.
    async fn bulk_delete_messages(
        &self,
        channel_id: ChannelId,
        message_ids: &[MessageId],
    ) -> MosaicResult<()>;

    /// Fetch the most recent `limit` messages of a channel.
    async fn fetch_messages(
        &self,
        channel_id: ChannelId,
        limit: u8,
    ) -> MosaicResult<Vec<MessagePayload>>;
}

/// Receives every domain event the engine produces. Fire-and-forget.
pub trait NotificationSink: Send + Sync {
    /// Announce one domain event.
    fn emit(&self, notification: Notification);
}

impl NotificationSink for mpsc::UnboundedSender<Notification> {
    fn emit(&self, notification: Notification) {
        if let Err(e) = self.send(notification) {
            debug!(name = e.0.name(), "Notification receiver dropped");
        }
    }
}

/// One-way path to the voice connection layer.
pub trait VoiceTransport: Send + Sync {
    /// Forward a voice state update concerning the client's own user.
    fn forward(&self, payload: &VoiceStatePayload);
}

/// Voice transport for clients without a voice connection layer.
#[derive(Debug, Clone, Copy, Default)]
pub struct DetachedVoice;

impl VoiceTransport for DetachedVoice {
    fn forward(&self, payload: &VoiceStatePayload) {
        debug!(user_id = %payload.user_id, "No voice transport attached; dropping state");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mosaic_core::{Channel, Snowflake};

    #[tokio::test]
    async fn test_unbounded_sender_delivers_in_order() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let first = Channel::placeholder(Snowflake::new(1), None, Vec::new());
        let second = Channel::placeholder(Snowflake::new(2), None, Vec::new());

        tx.emit(Notification::ChannelCreate(first.clone()));
        tx.emit(Notification::ChannelDelete(second.clone()));

        assert_eq!(rx.recv().await, Some(Notification::ChannelCreate(first)));
        assert_eq!(rx.recv().await, Some(Notification::ChannelDelete(second)));
    }

    #[test]
    fn test_emit_after_receiver_dropped_is_silent() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        tx.emit(Notification::ChannelCreate(Channel::placeholder(
            Snowflake::new(1),
            None,
            Vec::new(),
        )));
    }
}
