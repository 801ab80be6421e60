mod test_utils;

use mosaic_actions::Actions;
use mosaic_cache::Store;
use mosaic_core::{
    ChannelKind, Event, MemberPayload, PresencePayload, Status, UserPayload, VoiceStatePayload,
};
use mosaic_interface::Notification;
use std::sync::Arc;
use test_utils::{RecordingSink, RecordingVoice, channel, guild, id, seeded, user};

#[test]
fn test_identical_user_patch_emits_nothing() {
    let (mut actions, sink) = seeded();
    actions.store_mut().upsert_user(&user(100, "ada"));

    let outcome = actions.dispatch(Event::UserUpdate(user(100, "ada")));
    assert!(!*outcome.handled());
    assert!(sink.take().is_empty());
}

#[test]
fn test_changed_user_emits_once_with_detached_snapshot() {
    let (mut actions, sink) = seeded();
    actions.store_mut().upsert_user(&user(100, "ada"));

    let (old, new) = actions
        .user_update(&user(100, "lovelace"))
        .expect("user changed");
    assert_eq!(old.username(), "ada");
    assert_eq!(new.username(), "lovelace");
    assert_eq!(
        actions.store().user(id(100)).map(|u| u.username().clone()),
        Some("lovelace".to_string())
    );

    let notifications = sink.take();
    assert_eq!(notifications.len(), 1);
    assert!(matches!(
        &notifications[0],
        Notification::UserUpdate { old, .. } if old.username() == "ada"
    ));
}

#[test]
fn test_update_of_unknown_user_is_silent() {
    let (mut actions, sink) = seeded();
    assert!(actions.user_update(&user(100, "ada")).is_none());
    assert!(sink.take().is_empty());
}

fn presence(user_id: u64, status: Status) -> PresencePayload {
    PresencePayload {
        user: UserPayload {
            id: id(user_id),
            ..Default::default()
        },
        guild_id: Some(id(1)),
        status,
        roles: vec![id(500)],
        nick: Some("nick".to_string()),
        ..Default::default()
    }
}

#[test]
fn test_presence_for_unknown_user_without_summary_aborts() {
    let (mut actions, sink) = seeded();
    let outcome = actions.dispatch(Event::PresenceUpdate(presence(100, Status::Online)));

    assert!(!*outcome.handled());
    assert!(actions.store().user(id(100)).is_none());
    assert!(sink.take().is_empty());
}

#[test]
fn test_presence_with_summary_adds_user_and_member() {
    let (mut actions, sink) = seeded();
    let mut payload = presence(100, Status::Online);
    payload.user = user(100, "ada");

    actions.presence_update(&payload).expect("presence stored");

    assert!(actions.store().user(id(100)).is_some());
    let member = actions.store().member(id(1), id(100)).expect("synthesized");
    assert_eq!(member.roles(), &vec![id(500)]);
    assert_eq!(member.nick().as_deref(), Some("nick"));
    assert_eq!(
        sink.names(),
        vec!["GUILD_MEMBER_AVAILABLE", "PRESENCE_UPDATE"]
    );
}

#[test]
fn test_presence_with_changed_summary_updates_user() {
    let (mut actions, sink) = seeded();
    actions.store_mut().upsert_user(&user(100, "ada"));
    let mut payload = presence(100, Status::Offline);
    payload.user = user(100, "lovelace");

    actions.presence_update(&payload);

    assert_eq!(sink.names(), vec!["USER_UPDATE"]);
}

#[test]
fn test_offline_presence_of_non_member_is_stored_silently() {
    let (mut actions, sink) = seeded();
    actions.store_mut().upsert_user(&user(100, "ada"));

    let stored = actions
        .presence_update(&presence(100, Status::Offline))
        .expect("guild cached");

    assert_eq!(*stored.status(), Status::Offline);
    assert!(actions.store().member(id(1), id(100)).is_none());
    assert!(sink.take().is_empty());
}

#[test]
fn test_presence_of_known_member_reports_old_and_new() {
    let (mut actions, sink) = seeded();
    actions.store_mut().upsert_member(
        id(1),
        &MemberPayload {
            user: Some(user(100, "ada")),
            ..Default::default()
        },
    );

    actions.presence_update(&presence(100, Status::Idle));
    actions.presence_update(&presence(100, Status::Dnd));

    let notifications = sink.take();
    assert_eq!(notifications.len(), 2);
    let Notification::PresenceUpdate { old, new } = &notifications[1] else {
        panic!("expected a presence update");
    };
    assert_eq!(old.as_ref().map(|p| *p.status()), Some(Status::Idle));
    assert_eq!(*new.status(), Status::Dnd);
    assert!(matches!(
        &notifications[0],
        Notification::PresenceUpdate { old: None, .. }
    ));
}

#[test]
fn test_presence_for_uncached_guild_aborts_after_user_step() {
    let (mut actions, sink) = seeded();
    let mut payload = presence(100, Status::Online);
    payload.user = user(100, "ada");
    payload.guild_id = Some(id(2));

    assert!(actions.presence_update(&payload).is_none());
    assert!(actions.store().user(id(100)).is_some());
    assert!(sink.take().is_empty());
}

fn voice_actions() -> (Actions, Arc<RecordingSink>, Arc<RecordingVoice>) {
    let sink = Arc::new(RecordingSink::default());
    let voice = Arc::new(RecordingVoice::default());
    let mut actions = Actions::new(Store::default(), sink.clone())
        .with_voice(voice.clone())
        .with_self_user(id(100));
    let mut payload = guild(1);
    payload.channels = vec![channel(20, ChannelKind::Voice, None)];
    actions.store_mut().upsert_guild(&payload);
    (actions, sink, voice)
}

fn voice_state(user_id: u64, member: Option<MemberPayload>) -> VoiceStatePayload {
    VoiceStatePayload {
        guild_id: Some(id(1)),
        channel_id: Some(id(20)),
        user_id: id(user_id),
        member,
        session_id: Some("session".to_string()),
        self_mute: true,
        ..Default::default()
    }
}

#[test]
fn test_voice_update_without_prior_state_reports_placeholder() {
    let (mut actions, sink, voice) = voice_actions();

    let (old, new) = actions
        .voice_state_update(&voice_state(200, None))
        .expect("guild cached");

    assert_eq!(*old.channel_id(), None);
    assert_eq!(*new.channel_id(), Some(id(20)));
    assert!(*new.self_mute());
    assert_eq!(sink.names(), vec!["VOICE_STATE_UPDATE"]);
    assert!(voice.forwarded.lock().unwrap().is_empty());
}

#[test]
fn test_voice_update_creates_member_from_full_payload() {
    let (mut actions, _sink, _voice) = voice_actions();
    let member = MemberPayload {
        user: Some(user(200, "grace")),
        joined_at: Some(chrono::Utc::now()),
        deaf: Some(true),
        ..Default::default()
    };

    actions.voice_state_update(&voice_state(200, Some(member)));

    let cached = actions.store().member(id(1), id(200)).expect("member created");
    assert!(*cached.deaf());
}

#[test]
fn test_voice_update_with_partial_member_does_not_create_it() {
    let (mut actions, _sink, _voice) = voice_actions();
    let member = MemberPayload {
        user: Some(user(200, "grace")),
        ..Default::default()
    };

    actions.voice_state_update(&voice_state(200, Some(member)));
    assert!(actions.store().member(id(1), id(200)).is_none());
}

#[test]
fn test_own_voice_state_is_forwarded() {
    let (mut actions, _sink, voice) = voice_actions();
    actions.store_mut().upsert_member(
        id(1),
        &MemberPayload {
            user: Some(user(100, "me")),
            ..Default::default()
        },
    );

    actions.dispatch(Event::VoiceStateUpdate(voice_state(100, None)));
    actions.dispatch(Event::VoiceStateUpdate(voice_state(100, None)));

    assert_eq!(voice.forwarded.lock().unwrap().len(), 2);
}

#[test]
fn test_voice_update_without_guild_is_ignored() {
    let (mut actions, sink, _voice) = voice_actions();
    let mut payload = voice_state(200, None);
    payload.guild_id = None;

    assert!(actions.voice_state_update(&payload).is_none());
    assert!(sink.take().is_empty());
}
