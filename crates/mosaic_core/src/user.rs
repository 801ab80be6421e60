//! User model.

use crate::{UserId, UserPayload};
use derive_getters::Getters;

/// A process-global user.
///
/// Compared by value to decide whether an update changed anything.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct User {
    id: UserId,
    username: String,
    discriminator: String,
    avatar: Option<String>,
    bot: bool,
    flags: u64,
    partial: bool,
}

impl User {
    /// Build a user from a payload. Without a username the user is partial.
    pub fn from_payload(payload: &UserPayload) -> Self {
        Self {
            id: payload.id,
            username: payload.username.clone().unwrap_or_default(),
            discriminator: payload.discriminator.clone().unwrap_or_default(),
            avatar: payload.avatar.clone(),
            bot: payload.bot.unwrap_or(false),
            flags: payload.flags.unwrap_or(0),
            partial: payload.username.is_none(),
        }
    }

    /// Minimal placeholder known only by id.
    pub fn placeholder(id: UserId) -> Self {
        Self::from_payload(&UserPayload {
            id,
            ..Default::default()
        })
    }

    /// Apply the fields present in `payload`.
    pub fn patch(&mut self, payload: &UserPayload) {
        if let Some(username) = &payload.username {
            self.username = username.clone();
            self.partial = false;
        }
        if let Some(discriminator) = &payload.discriminator {
            self.discriminator = discriminator.clone();
        }
        if payload.avatar.is_some() {
            self.avatar = payload.avatar.clone();
        }
        if let Some(bot) = payload.bot {
            self.bot = bot;
        }
        if let Some(flags) = payload.flags {
            self.flags = flags;
        }
    }

    /// `username#discriminator`.
    pub fn tag(&self) -> String {
        format!("{}#{}", self.username, self.discriminator)
    }
}
