mod test_utils;

use mosaic_core::{
    ChannelKind, Event, GuildDeletePayload, GuildMemberRemovePayload, GuildRoleDeletePayload,
    GuildRolePayload, MemberPayload, PartialKind, PartialsPolicy, RolePayload, VoiceStatePayload,
};
use mosaic_interface::Notification;
use test_utils::{actions, actions_with, channel, guild, id, message, seeded, user};

#[test]
fn test_new_guild_is_cached_with_embedded_entities() {
    let (mut actions, sink) = actions();
    let mut payload = guild(1);
    payload.channels = vec![
        channel(10, ChannelKind::Text, None),
        channel(11, ChannelKind::Category, None),
    ];
    payload.members = vec![MemberPayload {
        user: Some(user(100, "ada")),
        ..Default::default()
    }];
    payload.roles = vec![RolePayload {
        id: id(500),
        name: "mods".to_string(),
        permissions: Some("8".to_string()),
        ..Default::default()
    }];

    actions.dispatch(Event::GuildCreate(payload));

    let cached = actions.store().guild(id(1)).expect("cached");
    assert_eq!(cached.channel_ids(), &vec![id(10), id(11)]);
    assert_eq!(
        cached.roles().get(&id(500)).map(|r| *r.permissions()),
        Some(8)
    );
    assert!(actions.store().user(id(100)).is_some());
    assert_eq!(sink.names(), vec!["GUILD_CREATE"]);
}

#[test]
fn test_returning_guild_becomes_available() {
    let (mut actions, sink) = seeded();
    actions.dispatch(Event::GuildDelete(GuildDeletePayload {
        id: id(1),
        unavailable: Some(true),
    }));
    assert!(*actions.store().guild(id(1)).expect("kept").unavailable());

    let mut back = guild(1);
    back.unavailable = Some(false);
    actions.dispatch(Event::GuildCreate(back));

    assert!(!*actions.store().guild(id(1)).expect("kept").unavailable());
    assert_eq!(sink.names(), vec!["GUILD_UNAVAILABLE", "GUILD_AVAILABLE"]);
}

#[test]
fn test_refreshing_an_available_guild_is_silent() {
    let (mut actions, sink) = seeded();
    let mut refreshed = guild(1);
    refreshed.name = Some("renamed".to_string());

    actions.dispatch(Event::GuildCreate(refreshed));

    assert_eq!(
        actions.store().guild(id(1)).and_then(|g| g.name().clone()),
        Some("renamed".to_string())
    );
    assert!(sink.take().is_empty());
}

#[test]
fn test_guild_update_reports_old_and_new() {
    let (mut actions, sink) = seeded();
    let mut payload = guild(1);
    payload.name = Some("renamed".to_string());

    let (old, new) = actions.guild_update(&payload).expect("cached");

    assert_eq!(old.name().as_deref(), Some("guild-1"));
    assert_eq!(new.name().as_deref(), Some("renamed"));
    assert_eq!(sink.names(), vec!["GUILD_UPDATE"]);
}

#[test]
fn test_leaving_a_guild_cascades_to_its_channels() {
    let (mut actions, sink) = seeded();
    actions.message_create(&message(1, 10, 100, "hello"));
    sink.take();

    let outcome = actions.dispatch(Event::GuildDelete(GuildDeletePayload {
        id: id(1),
        unavailable: None,
    }));

    assert_eq!(outcome.removed_channels(), &vec![id(10)]);
    assert!(actions.store().guild(id(1)).is_none());
    assert!(actions.store().channel(id(10)).is_none());
    assert!(actions.store().user(id(100)).is_some());

    let notifications = sink.take();
    assert_eq!(notifications.len(), 1);
    let Notification::GuildDelete(deleted) = &notifications[0] else {
        panic!("expected a guild delete");
    };
    assert!(*deleted.deleted());
}

#[test]
fn test_removed_channels_are_soft_deleted() {
    let (mut actions, _sink) = seeded();
    actions.message_create(&message(1, 10, 100, "hello"));

    let (_, channels) = actions
        .guild_delete(&GuildDeletePayload {
            id: id(1),
            unavailable: None,
        })
        .expect("cached");

    assert_eq!(channels.len(), 1);
    assert!(*channels[0].deleted());
    assert!(channels[0].messages().expect("text").values().all(|m| *m.deleted()));
}

#[test]
fn test_member_add_and_remove_track_count() {
    let (mut actions, sink) = seeded();
    actions.dispatch(Event::GuildMemberAdd(MemberPayload {
        user: Some(user(100, "ada")),
        guild_id: Some(id(1)),
        ..Default::default()
    }));
    assert_eq!(*actions.store().guild(id(1)).expect("cached").member_count(), Some(1));

    actions.store_mut().upsert_voice_state(
        id(1),
        &VoiceStatePayload {
            guild_id: Some(id(1)),
            user_id: id(100),
            ..Default::default()
        },
    );
    let removed = actions
        .guild_member_remove(&GuildMemberRemovePayload {
            guild_id: id(1),
            user: user(100, "ada"),
        })
        .expect("member cached");

    assert!(*removed.deleted());
    let cached = actions.store().guild(id(1)).expect("cached");
    assert_eq!(*cached.member_count(), Some(0));
    assert!(cached.members().is_empty());
    assert!(cached.voice_states().is_empty());
    assert_eq!(sink.names(), vec!["GUILD_MEMBER_ADD", "GUILD_MEMBER_REMOVE"]);
}

#[test]
fn test_removing_an_uncached_member_needs_partials() {
    let payload = GuildMemberRemovePayload {
        guild_id: id(1),
        user: user(100, "ada"),
    };

    let (mut strict, sink) = seeded();
    assert!(strict.guild_member_remove(&payload).is_none());
    assert!(sink.take().is_empty());

    let (mut lenient, _) = actions_with([PartialKind::GuildMember].into_iter().collect());
    lenient.store_mut().upsert_guild(&guild(1));
    let member = lenient.guild_member_remove(&payload).expect("placeholder");
    assert!(*member.deleted());
}

#[test]
fn test_role_create_announces_only_new_roles() {
    let (mut actions, sink) = seeded();
    let payload = GuildRolePayload {
        guild_id: id(1),
        role: RolePayload {
            id: id(500),
            name: "mods".to_string(),
            ..Default::default()
        },
    };

    actions.dispatch(Event::GuildRoleCreate(payload.clone()));
    actions.dispatch(Event::GuildRoleCreate(payload));
    assert_eq!(sink.names(), vec!["ROLE_CREATE"]);

    let role = actions
        .guild_role_delete(&GuildRoleDeletePayload {
            guild_id: id(1),
            role_id: id(500),
        })
        .expect("cached");
    assert!(*role.deleted());
    assert_eq!(sink.names(), vec!["ROLE_CREATE", "ROLE_DELETE"]);
}

#[test]
fn test_events_for_uncached_guilds_are_ignored() {
    let (mut actions, sink) = actions_with(PartialsPolicy::all());
    let outcomes = [
        actions.dispatch(Event::GuildUpdate(guild(9))),
        actions.dispatch(Event::GuildDelete(GuildDeletePayload {
            id: id(9),
            unavailable: None,
        })),
        actions.dispatch(Event::GuildMemberAdd(MemberPayload {
            user: Some(user(100, "ada")),
            guild_id: Some(id(9)),
            ..Default::default()
        })),
        actions.dispatch(Event::GuildRoleDelete(GuildRoleDeletePayload {
            guild_id: id(9),
            role_id: id(500),
        })),
    ];

    assert!(outcomes.iter().all(|o| !*o.handled()));
    assert!(sink.take().is_empty());
}
