//! REST client for runs without a network connection.

use async_trait::async_trait;
use mosaic_core::{ChannelId, MessageId, MessagePayload};
use mosaic_error::MosaicResult;
use mosaic_interface::RestClient;
use tracing::info;

/// Accepts every call and logs it. Fetches return nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineRest;

#[async_trait]
impl RestClient for OfflineRest {
    async fn trigger_typing(&self, channel_id: ChannelId) -> MosaicResult<()> {
        info!(channel_id = %channel_id, "Offline: trigger typing");
        Ok(())
    }

    async fn delete_message(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
    ) -> MosaicResult<()> {
        info!(channel_id = %channel_id, message_id = %message_id, "Offline: delete message");
        Ok(())
    }

    async fn bulk_delete_messages(
        &self,
        channel_id: ChannelId,
        message_ids: &[MessageId],
    ) -> MosaicResult<()> {
        info!(channel_id = %channel_id, count = message_ids.len(), "Offline: bulk delete");
        Ok(())
    }

    async fn fetch_messages(
        &self,
        channel_id: ChannelId,
        limit: u8,
    ) -> MosaicResult<Vec<MessagePayload>> {
        info!(channel_id = %channel_id, limit, "Offline: fetch messages");
        Ok(Vec::new())
    }
}
