mod test_utils;

use chrono::Utc;
use mosaic_actions::{BULK_DELETE_MAX_AGE_MS, BulkDeleteRequest, Client, DEFAULT_TYPING_INTERVAL};
use mosaic_core::{
    ChannelKind, Event, MessageDeleteBulkPayload, MessageId, MessagePayload, PartialKind,
    PartialsPolicy, Snowflake,
};
use mosaic_error::{CacheErrorKind, MosaicErrorKind};
use std::sync::Arc;
use test_utils::{RecordingSink, RestCall, ScriptedRest, channel, id, message, seeded, seeded_with};

fn now_ms() -> u64 {
    u64::try_from(Utc::now().timestamp_millis()).unwrap()
}

/// A message id minted `age_ms` ago.
fn aged(age_ms: u64) -> MessageId {
    Snowflake::from_timestamp_ms(now_ms() - age_ms)
}

fn recent_message(message_id: MessageId) -> MessagePayload {
    MessagePayload {
        id: message_id,
        ..message(0, 10, 100, "recent")
    }
}

/// Client over guild `1` with text channel `10` holding `cached` messages.
fn client_with(
    partials: PartialsPolicy,
    cached: &[MessageId],
) -> (Client, Arc<ScriptedRest>, Arc<RecordingSink>) {
    let (mut actions, sink) = seeded_with(partials);
    for message_id in cached {
        actions.message_create(&recent_message(*message_id));
    }
    sink.take();
    let rest = Arc::new(ScriptedRest::default());
    let client = Client::new(actions, rest.clone(), DEFAULT_TYPING_INTERVAL);
    (client, rest, sink)
}

fn client(cached: &[MessageId]) -> (Client, Arc<ScriptedRest>) {
    let (client, rest, _sink) = client_with(PartialsPolicy::none(), cached);
    (client, rest)
}

async fn cached_count(client: &Client) -> usize {
    client
        .with_store(|store| {
            store
                .channel(id(10))
                .and_then(|c| c.messages())
                .map_or(0, |m| m.len())
        })
        .await
}

#[tokio::test]
async fn test_nothing_to_delete_makes_no_call() {
    let (client, rest) = client(&[]);
    let deleted = client
        .bulk_delete(id(10), BulkDeleteRequest::Ids(Vec::new()), true)
        .await
        .expect("no-op");

    assert!(deleted.is_empty());
    assert!(rest.calls().is_empty());
}

#[tokio::test]
async fn test_single_id_uses_single_delete() {
    let recent = aged(1_000);
    let (client, rest) = client(&[recent]);

    let deleted = client
        .bulk_delete(id(10), BulkDeleteRequest::Ids(vec![recent]), false)
        .await
        .expect("deleted");

    assert_eq!(rest.calls(), vec![RestCall::DeleteMessage(id(10), recent)]);
    assert_eq!(deleted.keys().copied().collect::<Vec<_>>(), vec![recent]);
    assert_eq!(cached_count(&client).await, 1);
}

#[tokio::test]
async fn test_single_uncached_id_resolves_to_none() {
    let cached = aged(2_000);
    let uncached = aged(1_000);
    let (client, rest) = client(&[cached]);

    let deleted = client
        .bulk_delete(id(10), BulkDeleteRequest::Ids(vec![uncached]), true)
        .await
        .expect("deleted");

    assert_eq!(rest.calls(), vec![RestCall::DeleteMessage(id(10), uncached)]);
    assert_eq!(deleted.len(), 1);
    assert_eq!(deleted.get(&uncached), Some(&None));
}

#[tokio::test]
async fn test_several_ids_use_one_bulk_call() {
    let a = aged(3_000);
    let b = aged(2_000);
    let c = aged(1_000);
    let (client, rest, sink) = client_with(PartialsPolicy::none(), &[a, b]);

    let deleted = client
        .bulk_delete(id(10), BulkDeleteRequest::Ids(vec![a, b, c]), true)
        .await
        .expect("deleted");

    assert_eq!(rest.calls(), vec![RestCall::BulkDelete(id(10), vec![a, b, c])]);
    assert_eq!(deleted.keys().copied().collect::<Vec<_>>(), vec![a, b, c]);
    assert!(deleted.get(&a).is_some_and(|m| m.is_some()));
    assert!(deleted.get(&b).is_some_and(|m| m.is_some()));
    assert_eq!(deleted.get(&c), Some(&None));
    assert_eq!(cached_count(&client).await, 2);
    assert!(sink.take().is_empty());
}

#[tokio::test]
async fn test_gateway_bulk_event_after_the_call_is_announced_once() {
    let a = aged(2_000);
    let b = aged(1_000);
    let partials: PartialsPolicy = [PartialKind::Message].into_iter().collect();
    let (client, _rest, sink) = client_with(partials, &[a, b]);

    client
        .bulk_delete(id(10), BulkDeleteRequest::Ids(vec![a, b]), true)
        .await
        .expect("deleted");
    client
        .dispatch(Event::MessageDeleteBulk(MessageDeleteBulkPayload {
            ids: vec![a, b],
            channel_id: id(10),
            guild_id: Some(id(1)),
        }))
        .await;

    assert_eq!(sink.names(), vec!["MESSAGE_DELETE_BULK"]);
    assert_eq!(cached_count(&client).await, 0);
}

#[tokio::test]
async fn test_old_ids_are_filtered_before_choosing_the_call() {
    let old = aged(BULK_DELETE_MAX_AGE_MS + 60_000);
    let recent = aged(1_000);
    let (client, rest) = client(&[recent]);

    let deleted = client
        .bulk_delete(id(10), BulkDeleteRequest::Ids(vec![old, recent]), true)
        .await
        .expect("deleted");

    assert_eq!(rest.calls(), vec![RestCall::DeleteMessage(id(10), recent)]);
    assert_eq!(deleted.len(), 1);
}

#[tokio::test]
async fn test_old_ids_are_kept_without_filtering() {
    let old = aged(BULK_DELETE_MAX_AGE_MS + 60_000);
    let recent = aged(1_000);
    let (client, rest) = client(&[]);

    client
        .bulk_delete(id(10), BulkDeleteRequest::Ids(vec![old, recent]), false)
        .await
        .expect("deleted");

    assert_eq!(
        rest.calls(),
        vec![RestCall::BulkDelete(id(10), vec![old, recent])]
    );
}

#[tokio::test]
async fn test_message_objects_are_deleted_by_id() {
    let a = aged(2_000);
    let b = aged(1_000);
    let (client, rest) = client(&[a, b]);
    let messages = client
        .with_store(|store| {
            store
                .channel(id(10))
                .and_then(|c| c.messages())
                .map(|m| m.values().cloned().collect::<Vec<_>>())
                .unwrap_or_default()
        })
        .await;

    client
        .bulk_delete(id(10), BulkDeleteRequest::Messages(messages), true)
        .await
        .expect("deleted");

    assert_eq!(rest.calls(), vec![RestCall::BulkDelete(id(10), vec![a, b])]);
}

#[tokio::test]
async fn test_fetch_caches_then_deletes() {
    let a = aged(2_000);
    let b = aged(1_000);
    let (client, rest) = client(&[]);
    rest.set_fetch_result(vec![recent_message(a), recent_message(b)]);

    let deleted = client
        .bulk_delete(id(10), BulkDeleteRequest::Fetch(50), true)
        .await
        .expect("deleted");

    assert_eq!(
        rest.calls(),
        vec![
            RestCall::FetchMessages(id(10), 50),
            RestCall::BulkDelete(id(10), vec![a, b]),
        ]
    );
    assert_eq!(deleted.len(), 2);
}

#[tokio::test]
async fn test_unknown_or_voice_channel_is_an_error() {
    let (client, rest) = client(&[]);

    let missing = client
        .bulk_delete(id(99), BulkDeleteRequest::Ids(vec![aged(1_000)]), true)
        .await
        .expect_err("unknown channel");
    assert!(matches!(
        missing.kind(),
        MosaicErrorKind::Cache(e) if *e.kind() == CacheErrorKind::ChannelNotFound(99)
    ));

    let (mut actions, _sink) = seeded();
    actions
        .store_mut()
        .upsert_channel(&channel(20, ChannelKind::Voice, Some(1)));
    let voice_client = Client::new(actions, rest.clone(), DEFAULT_TYPING_INTERVAL);
    let voice = voice_client
        .bulk_delete(id(20), BulkDeleteRequest::Ids(vec![aged(1_000)]), true)
        .await
        .expect_err("voice channel");
    assert!(matches!(
        voice.kind(),
        MosaicErrorKind::Cache(e) if *e.kind() == CacheErrorKind::NotTextBased(20)
    ));

    assert!(rest.calls().is_empty());
}

#[tokio::test]
async fn test_rest_failure_propagates() {
    let recent = aged(1_000);
    let (client, rest) = client(&[recent]);
    rest.fail_deletes(true);

    let error = client
        .bulk_delete(id(10), BulkDeleteRequest::Ids(vec![recent]), true)
        .await
        .expect_err("delete failed");

    assert!(matches!(
        error.kind(),
        MosaicErrorKind::Http(e) if *e.status() == Some(404)
    ));
    assert_eq!(cached_count(&client).await, 1);
}
