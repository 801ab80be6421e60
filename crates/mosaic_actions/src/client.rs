//! Async front end over [`Actions`].

use crate::{ActionOutcome, Actions, EntityFragment, TypingCompletion, TypingIndicator};
use chrono::Utc;
use mosaic_cache::Store;
use mosaic_core::{ChannelId, Collection, Event, Message, MessageId};
use mosaic_error::{CacheError, CacheErrorKind, MosaicResult};
use mosaic_interface::RestClient;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

/// The remote refuses to bulk delete messages older than two weeks.
pub const BULK_DELETE_MAX_AGE_MS: u64 = 1_209_600_000;

/// Messages to delete in one call to [`Client::bulk_delete`].
#[derive(Debug, Clone, PartialEq)]
pub enum BulkDeleteRequest {
    /// Explicit message ids
    Ids(Vec<MessageId>),
    /// Message objects, deleted by id
    Messages(Vec<Message>),
    /// The most recent messages of the channel, fetched first
    Fetch(u8),
}

/// Serializes event dispatch and owns the actions the engine initiates.
///
/// The store lock is held only for the synchronous body of one dispatch, never
/// across a REST call.
#[derive(Clone)]
pub struct Client {
    actions: Arc<Mutex<Actions>>,
    rest: Arc<dyn RestClient>,
    typing: TypingIndicator,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("typing", &self.typing)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Client over `actions`, calling `rest` for outward actions and keeping
    /// typing indicators alive every `typing_interval`.
    pub fn new(actions: Actions, rest: Arc<dyn RestClient>, typing_interval: Duration) -> Self {
        let typing = TypingIndicator::new(Arc::clone(&rest), typing_interval);
        Self {
            actions: Arc::new(Mutex::new(actions)),
            rest,
            typing,
        }
    }

    /// Fold one event into the cache.
    ///
    /// Typing indicators of channels the event removed are force-stopped.
    pub async fn dispatch(&self, event: Event) -> ActionOutcome {
        let outcome = self.actions.lock().await.dispatch(event);
        for channel_id in outcome.removed_channels() {
            self.typing.stop(*channel_id, true);
        }
        outcome
    }

    /// Decode and fold one raw event. Unroutable names yield `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns a `JsonError` when the payload of a routed event is malformed.
    pub async fn dispatch_raw(
        &self,
        name: &str,
        data: serde_json::Value,
    ) -> MosaicResult<Option<ActionOutcome>> {
        let Some(event) = Event::decode(name, data)? else {
            return Ok(None);
        };
        Ok(Some(self.dispatch(event).await))
    }

    /// Read the store under the lock.
    pub async fn with_store<R>(&self, f: impl FnOnce(&Store) -> R) -> R {
        let actions = self.actions.lock().await;
        f(actions.store())
    }

    /// The typing indicator.
    pub fn typing(&self) -> &TypingIndicator {
        &self.typing
    }

    /// Start typing in a channel. See [`TypingIndicator::start`].
    pub fn start_typing(&self, channel_id: ChannelId, count: Option<u32>) -> TypingCompletion {
        self.typing.start(channel_id, count)
    }

    /// Stop typing in a channel. See [`TypingIndicator::stop`].
    pub fn stop_typing(&self, channel_id: ChannelId, force: bool) {
        self.typing.stop(channel_id, force);
    }

    /// Delete messages of a cached text channel.
    ///
    /// With `filter_old`, ids older than [`BULK_DELETE_MAX_AGE_MS`] are
    /// dropped first. No ids means no call, one id uses the single delete
    /// endpoint and more use one bulk call. Afterwards every deleted id is
    /// resolved against the cache without touching it; removal and
    /// announcement are left to the gateway's own delete events. The result
    /// maps each deleted id to its message, `None` when it cannot be resolved.
    ///
    /// # Errors
    ///
    /// Returns a `CacheError` when the channel is unknown or has no messages,
    /// and the REST failure when a fetch or delete call fails.
    #[instrument(skip(self, request))]
    pub async fn bulk_delete(
        &self,
        channel_id: ChannelId,
        request: BulkDeleteRequest,
        filter_old: bool,
    ) -> MosaicResult<Collection<MessageId, Option<Message>>> {
        self.ensure_text_channel(channel_id).await?;

        let mut ids: Vec<MessageId> = match request {
            BulkDeleteRequest::Ids(ids) => ids,
            BulkDeleteRequest::Messages(messages) => messages.iter().map(|m| *m.id()).collect(),
            BulkDeleteRequest::Fetch(limit) => {
                let fetched = self.rest.fetch_messages(channel_id, limit).await?;
                let mut actions = self.actions.lock().await;
                for payload in &fetched {
                    actions.store_mut().upsert_message(payload);
                }
                fetched.iter().map(|p| p.id).collect()
            }
        };

        if filter_old {
            let now_ms = u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default();
            let before = ids.len();
            ids.retain(|id| now_ms.saturating_sub(id.timestamp_ms()) < BULK_DELETE_MAX_AGE_MS);
            debug!(dropped = before - ids.len(), "Filtered old messages");
        }

        match ids.len() {
            0 => {
                debug!("Nothing to delete");
                return Ok(Collection::new());
            }
            1 => {
                self.rest.delete_message(channel_id, ids[0]).await?;
                info!(message_id = %ids[0], "Deleted message");
            }
            count => {
                self.rest.bulk_delete_messages(channel_id, &ids).await?;
                info!(count, "Deleted messages");
            }
        }

        let mut actions = self.actions.lock().await;
        let mut resolved = Collection::new();
        for id in ids {
            let fragment = EntityFragment {
                message_id: Some(id),
                ..Default::default()
            };
            resolved.insert(id, actions.resolve_message(channel_id, &fragment, false));
        }
        Ok(resolved)
    }

    async fn ensure_text_channel(&self, channel_id: ChannelId) -> MosaicResult<()> {
        let problem = self
            .with_store(|store| match store.channel(channel_id) {
                None => Some(CacheErrorKind::ChannelNotFound(channel_id.get())),
                Some(channel) if !channel.is_text_based() => {
                    Some(CacheErrorKind::NotTextBased(channel_id.get()))
                }
                Some(_) => None,
            })
            .await;
        match problem {
            Some(kind) => Err(CacheError::new(kind).into()),
            None => Ok(()),
        }
    }
}
