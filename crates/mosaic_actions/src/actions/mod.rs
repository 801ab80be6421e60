//! The action dispatcher and its change handlers.
//!
//! Each handler lives in the module named after the entity it changes. Every
//! handler follows the same discipline: resolve what it needs, abort silently
//! on a miss, mutate the store, then emit.

mod channel;
mod guild;
mod member;
mod message;
mod partials;
mod presence;
mod reaction;
mod typing_start;
mod user;
mod voice;

pub use partials::EntityFragment;

use derive_getters::Getters;
use mosaic_cache::Store;
use mosaic_core::{ChannelId, Event, EventKind, PartialsPolicy, UserId};
use mosaic_interface::{DetachedVoice, Notification, NotificationSink, VoiceTransport};
use std::sync::Arc;
use tracing::{debug, instrument};

/// What one dispatch did.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct ActionOutcome {
    /// Kind of the dispatched event
    kind: EventKind,
    /// False when the handler aborted or found nothing to change
    handled: bool,
    /// Channels this event removed from the store
    removed_channels: Vec<ChannelId>,
}

/// Owns the entity store and folds events into it.
pub struct Actions {
    store: Store,
    sink: Arc<dyn NotificationSink>,
    voice: Arc<dyn VoiceTransport>,
    partials: PartialsPolicy,
    self_user: Option<UserId>,
}

impl std::fmt::Debug for Actions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Actions")
            .field("store", &self.store)
            .field("partials", &self.partials)
            .field("self_user", &self.self_user)
            .finish_non_exhaustive()
    }
}

impl Actions {
    /// Actions over `store` announcing to `sink`, with no partials enabled and
    /// no voice transport.
    pub fn new(store: Store, sink: Arc<dyn NotificationSink>) -> Self {
        Self {
            store,
            sink,
            voice: Arc::new(DetachedVoice),
            partials: PartialsPolicy::none(),
            self_user: None,
        }
    }

    /// Use `policy` when synthesizing placeholders.
    pub fn with_partials(mut self, policy: PartialsPolicy) -> Self {
        self.partials = policy;
        self
    }

    /// Forward the client's own voice states to `voice`.
    pub fn with_voice(mut self, voice: Arc<dyn VoiceTransport>) -> Self {
        self.voice = voice;
        self
    }

    /// Identify the client's own user.
    pub fn with_self_user(mut self, user_id: UserId) -> Self {
        self.self_user = Some(user_id);
        self
    }

    /// The entity store.
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Mutable entity store, for folding in data fetched outside the event
    /// stream.
    pub fn store_mut(&mut self) -> &mut Store {
        &mut self.store
    }

    /// The partial-structure policy.
    pub fn partials(&self) -> &PartialsPolicy {
        &self.partials
    }

    /// The client's own user, if known.
    pub fn self_user(&self) -> Option<UserId> {
        self.self_user
    }

    fn emit(&self, notification: Notification) {
        debug!(name = notification.name(), "Emitting notification");
        self.sink.emit(notification);
    }

    /// Route one event to its handler.
    #[instrument(skip(self, event), fields(kind = %event.kind()))]
    pub fn dispatch(&mut self, event: Event) -> ActionOutcome {
        let kind = event.kind();
        let mut removed_channels = Vec::new();

        let handled = match &event {
            Event::ChannelCreate(p) => self.channel_create(p).is_some(),
            Event::ChannelUpdate(p) => match self.channel_update(p) {
                Some((old, new)) => {
                    self.emit(Notification::ChannelUpdate { old, new });
                    true
                }
                None => false,
            },
            Event::ChannelDelete(p) => match self.channel_delete(p) {
                Some(channel) => {
                    removed_channels.push(*channel.id());
                    true
                }
                None => false,
            },
            Event::GuildCreate(p) => self.guild_create(p).is_some(),
            Event::GuildUpdate(p) => self.guild_update(p).is_some(),
            Event::GuildDelete(p) => match self.guild_delete(p) {
                Some((_, channels)) => {
                    removed_channels.extend(channels.iter().map(|c| *c.id()));
                    true
                }
                None => false,
            },
            Event::GuildMemberAdd(p) => self.guild_member_add(p).is_some(),
            Event::GuildMemberRemove(p) => self.guild_member_remove(p).is_some(),
            Event::GuildRoleCreate(p) => self.guild_role_create(p).is_some(),
            Event::GuildRoleDelete(p) => self.guild_role_delete(p).is_some(),
            Event::MessageCreate(p) => self.message_create(p).is_some(),
            Event::MessageUpdate(p) => self.message_update(p).is_some(),
            Event::MessageDelete(p) => self.message_delete(p).is_some(),
            Event::MessageDeleteBulk(p) => self
                .message_delete_bulk(p)
                .is_some_and(|messages| !messages.is_empty()),
            Event::MessageReactionAdd(p) => self.reaction_add(p).is_some(),
            Event::MessageReactionRemove(p) => self.reaction_remove(p).is_some(),
            Event::PresenceUpdate(p) => self.presence_update(p).is_some(),
            Event::TypingStart(p) => self.typing_start(p).is_some(),
            Event::UserUpdate(p) => self.user_update(p).is_some(),
            Event::VoiceStateUpdate(p) => self.voice_state_update(p).is_some(),
        };

        if !handled {
            debug!("Event changed nothing");
        }
        ActionOutcome {
            kind,
            handled,
            removed_channels,
        }
    }
}
