//! Cache sizing settings.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Bounds applied to the entity store.
///
/// # Examples
///
/// ```
/// use mosaic_cache::CacheSettings;
///
/// let settings = CacheSettings::default().with_edit_history_limit(3);
/// assert_eq!(*settings.message_cache_limit(), Some(200));
/// assert_eq!(*settings.edit_history_limit(), 3);
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Getters,
    derive_setters::Setters,
    derive_builder::Builder,
)]
#[setters(prefix = "with_")]
pub struct CacheSettings {
    /// Messages kept per channel; `None` keeps everything
    #[serde(default = "default_message_cache_limit")]
    #[builder(default = "default_message_cache_limit()")]
    message_cache_limit: Option<usize>,

    /// Previous revisions kept per message
    #[serde(default = "default_edit_history_limit")]
    #[builder(default = "default_edit_history_limit()")]
    edit_history_limit: usize,
}

fn default_message_cache_limit() -> Option<usize> {
    Some(200)
}

fn default_edit_history_limit() -> usize {
    10
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            message_cache_limit: default_message_cache_limit(),
            edit_history_limit: default_edit_history_limit(),
        }
    }
}
