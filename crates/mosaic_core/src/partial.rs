//! Partial-structure policy.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Entity kinds that may be synthesized from an id alone.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum PartialKind {
    /// Channels
    Channel,
    /// Users
    User,
    /// Guild members
    GuildMember,
    /// Messages
    Message,
    /// Reactions
    Reaction,
}

/// The set of partial kinds the client has opted into. Read-only once built.
///
/// # Examples
///
/// ```
/// use mosaic_core::{PartialKind, PartialsPolicy};
///
/// let policy: PartialsPolicy = [PartialKind::Channel].into_iter().collect();
/// assert!(policy.allows(PartialKind::Channel));
/// assert!(!policy.allows(PartialKind::Message));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialsPolicy {
    #[serde(default)]
    enabled: HashSet<PartialKind>,
}

impl PartialsPolicy {
    /// Policy that never synthesizes anything.
    pub fn none() -> Self {
        Self::default()
    }

    /// Policy that synthesizes every kind.
    pub fn all() -> Self {
        <PartialKind as strum::IntoEnumIterator>::iter().collect()
    }

    /// Whether `kind` may be synthesized.
    pub fn allows(&self, kind: PartialKind) -> bool {
        self.enabled.contains(&kind)
    }
}

impl FromIterator<PartialKind> for PartialsPolicy {
    fn from_iter<I: IntoIterator<Item = PartialKind>>(iter: I) -> Self {
        Self {
            enabled: iter.into_iter().collect(),
        }
    }
}
