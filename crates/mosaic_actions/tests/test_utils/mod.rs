//! Test utilities for Mosaic action tests.
//!
//! This module provides recording collaborators and payload helpers.

#![allow(dead_code)]

use async_trait::async_trait;
use mosaic_actions::Actions;
use mosaic_cache::Store;
use mosaic_core::{
    ChannelId, ChannelKind, ChannelPayload, GuildPayload, MessageId, MessagePayload,
    PartialsPolicy, Snowflake, UserPayload, VoiceStatePayload,
};
use mosaic_error::{HttpError, MosaicResult};
use mosaic_interface::{Notification, NotificationSink, RestClient, VoiceTransport};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Sink that keeps every notification.
#[derive(Debug, Default)]
pub struct RecordingSink {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingSink {
    pub fn take(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.seen.lock().unwrap())
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.seen.lock().unwrap().iter().map(|n| n.name()).collect()
    }
}

impl NotificationSink for RecordingSink {
    fn emit(&self, notification: Notification) {
        self.seen.lock().unwrap().push(notification);
    }
}

/// Voice transport that keeps every forwarded payload.
#[derive(Debug, Default)]
pub struct RecordingVoice {
    pub forwarded: Mutex<Vec<VoiceStatePayload>>,
}

impl VoiceTransport for RecordingVoice {
    fn forward(&self, payload: &VoiceStatePayload) {
        self.forwarded.lock().unwrap().push(payload.clone());
    }
}

/// One outward call made through [`ScriptedRest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestCall {
    TriggerTyping(ChannelId),
    DeleteMessage(ChannelId, MessageId),
    BulkDelete(ChannelId, Vec<MessageId>),
    FetchMessages(ChannelId, u8),
}

/// REST client that records calls and fails on demand.
#[derive(Debug, Default)]
pub struct ScriptedRest {
    calls: Mutex<Vec<RestCall>>,
    fail_typing: AtomicBool,
    fail_deletes: AtomicBool,
    fetch_result: Mutex<Vec<MessagePayload>>,
}

impl ScriptedRest {
    pub fn calls(&self) -> Vec<RestCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn typing_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, RestCall::TriggerTyping(_)))
            .count()
    }

    pub fn fail_typing(&self, fail: bool) {
        self.fail_typing.store(fail, Ordering::SeqCst);
    }

    pub fn fail_deletes(&self, fail: bool) {
        self.fail_deletes.store(fail, Ordering::SeqCst);
    }

    pub fn set_fetch_result(&self, messages: Vec<MessagePayload>) {
        *self.fetch_result.lock().unwrap() = messages;
    }

    fn record(&self, call: RestCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl RestClient for ScriptedRest {
    async fn trigger_typing(&self, channel_id: ChannelId) -> MosaicResult<()> {
        self.record(RestCall::TriggerTyping(channel_id));
        if self.fail_typing.load(Ordering::SeqCst) {
            return Err(HttpError::with_status(503, "Service Unavailable").into());
        }
        Ok(())
    }

    async fn delete_message(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
    ) -> MosaicResult<()> {
        self.record(RestCall::DeleteMessage(channel_id, message_id));
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(HttpError::with_status(404, "Unknown Message").into());
        }
        Ok(())
    }

    async fn bulk_delete_messages(
        &self,
        channel_id: ChannelId,
        message_ids: &[MessageId],
    ) -> MosaicResult<()> {
        self.record(RestCall::BulkDelete(channel_id, message_ids.to_vec()));
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(HttpError::with_status(400, "Bad Request").into());
        }
        Ok(())
    }

    async fn fetch_messages(
        &self,
        channel_id: ChannelId,
        limit: u8,
    ) -> MosaicResult<Vec<MessagePayload>> {
        self.record(RestCall::FetchMessages(channel_id, limit));
        let mut messages = self.fetch_result.lock().unwrap().clone();
        messages.truncate(usize::from(limit));
        Ok(messages)
    }
}

pub fn id(n: u64) -> Snowflake {
    Snowflake::new(n)
}

/// Actions with a recording sink and the given partials.
pub fn actions_with(partials: PartialsPolicy) -> (Actions, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::default());
    let actions = Actions::new(Store::default(), sink.clone()).with_partials(partials);
    (actions, sink)
}

/// Actions with a recording sink and no partials.
pub fn actions() -> (Actions, Arc<RecordingSink>) {
    actions_with(PartialsPolicy::none())
}

pub fn user(n: u64, name: &str) -> UserPayload {
    UserPayload {
        id: id(n),
        username: Some(name.to_string()),
        discriminator: Some("0001".to_string()),
        ..Default::default()
    }
}

pub fn guild(n: u64) -> GuildPayload {
    GuildPayload {
        id: id(n),
        name: Some(format!("guild-{}", n)),
        member_count: Some(0),
        ..Default::default()
    }
}

pub fn channel(n: u64, kind: ChannelKind, guild_id: Option<u64>) -> ChannelPayload {
    ChannelPayload {
        id: id(n),
        kind,
        guild_id: guild_id.map(id),
        ..Default::default()
    }
}

pub fn message(n: u64, channel_id: u64, author: u64, content: &str) -> MessagePayload {
    MessagePayload {
        id: id(n),
        channel_id: id(channel_id),
        author: Some(user(author, "author")),
        content: Some(content.to_string()),
        ..Default::default()
    }
}

/// A guild `1` with text channel `10`, cached without notifications.
pub fn seeded() -> (Actions, Arc<RecordingSink>) {
    seeded_with(PartialsPolicy::none())
}

/// Like [`seeded`] with the given partials.
pub fn seeded_with(partials: PartialsPolicy) -> (Actions, Arc<RecordingSink>) {
    let (mut actions, sink) = actions_with(partials);
    let mut payload = guild(1);
    payload.channels = vec![channel(10, ChannelKind::Text, None)];
    actions.store_mut().upsert_guild(&payload);
    (actions, sink)
}
