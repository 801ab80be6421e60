//! Snowflake identifiers.

use chrono::{DateTime, Utc};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Milliseconds between the Unix epoch and the first second of 2015.
pub const DISCORD_EPOCH_MS: u64 = 1_420_070_400_000;

/// A 64-bit remote identifier with its creation time in the upper 42 bits.
///
/// Serialized as a decimal string; deserialized from either a string or an
/// integer.
///
/// # Examples
///
/// ```
/// use mosaic_core::Snowflake;
///
/// let id = Snowflake::from_timestamp_ms(1_600_000_000_000);
/// assert_eq!(id.timestamp_ms(), 1_600_000_000_000);
/// assert_eq!("175928847299117063".parse::<Snowflake>().unwrap().get(), 175928847299117063);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    derive_more::Display,
    derive_more::From,
)]
#[display("{}", _0)]
pub struct Snowflake(u64);

/// Channel identifier.
pub type ChannelId = Snowflake;
/// Guild identifier.
pub type GuildId = Snowflake;
/// User identifier.
pub type UserId = Snowflake;
/// Message identifier.
pub type MessageId = Snowflake;
/// Role identifier.
pub type RoleId = Snowflake;

impl Snowflake {
    /// Wrap a raw value.
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Raw value.
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Creation time in Unix milliseconds.
    pub fn timestamp_ms(self) -> u64 {
        (self.0 >> 22) + DISCORD_EPOCH_MS
    }

    /// Creation time.
    pub fn created_at(self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(i64::try_from(self.timestamp_ms()).ok()?)
    }

    /// Smallest id that could have been generated at `ms` (Unix milliseconds).
    pub fn from_timestamp_ms(ms: u64) -> Self {
        Self(ms.saturating_sub(DISCORD_EPOCH_MS) << 22)
    }
}

impl FromStr for Snowflake {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

impl Serialize for Snowflake {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Snowflake {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SnowflakeVisitor;

        impl Visitor<'_> for SnowflakeVisitor {
            type Value = Snowflake;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a snowflake as a decimal string or integer")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Snowflake, E> {
                Ok(Snowflake(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Snowflake, E> {
                u64::try_from(v)
                    .map(Snowflake)
                    .map_err(|_| E::custom("snowflake cannot be negative"))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Snowflake, E> {
                v.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_any(SnowflakeVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snowflake_accepts_string_and_integer() {
        let from_str: Snowflake = serde_json::from_str("\"80351110224678912\"").unwrap();
        let from_int: Snowflake = serde_json::from_str("80351110224678912").unwrap();
        assert_eq!(from_str, from_int);
        assert_eq!(serde_json::to_string(&from_str).unwrap(), "\"80351110224678912\"");
    }

    #[test]
    fn test_snowflake_timestamp() {
        // 175928847299117063 was created at 2016-04-30T11:18:25.796Z
        let id = Snowflake::new(175928847299117063);
        assert_eq!(id.timestamp_ms(), 1_462_015_105_796);
        assert_eq!(
            id.created_at().unwrap().to_rfc3339(),
            "2016-04-30T11:18:25.796+00:00"
        );
    }
}
