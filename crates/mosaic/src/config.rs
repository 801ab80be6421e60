//! Layered configuration.
//!
//! Sources, later overriding earlier:
//! 1. Bundled defaults (`mosaic.toml` shipped with the crate)
//! 2. `~/.config/mosaic/mosaic.toml`
//! 3. `./mosaic.toml`
//!
//! User files are optional and silently skipped when absent.

use config::{Config, File, FileFormat};
use derive_getters::Getters;
use mosaic_actions::{Actions, Client, DEFAULT_TYPING_INTERVAL};
use mosaic_cache::{CacheSettings, Store};
use mosaic_core::{PartialsPolicy, UserId};
use mosaic_error::{ConfigError, ConfigErrorKind, MosaicError, MosaicResult};
use mosaic_interface::{NotificationSink, RestClient};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument};

const DEFAULT_CONFIG: &str = include_str!("../mosaic.toml");

/// `[cache]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct CacheSection {
    /// Messages kept per channel; 0 keeps everything
    #[serde(default = "default_message_cache_limit")]
    message_cache_limit: usize,
    /// Previous revisions kept per message
    #[serde(default = "default_edit_history_limit")]
    edit_history_limit: usize,
}

fn default_message_cache_limit() -> usize {
    200
}

fn default_edit_history_limit() -> usize {
    10
}

impl Default for CacheSection {
    fn default() -> Self {
        Self {
            message_cache_limit: default_message_cache_limit(),
            edit_history_limit: default_edit_history_limit(),
        }
    }
}

impl CacheSection {
    /// Store bounds described by this section.
    pub fn settings(&self) -> CacheSettings {
        let limit = (self.message_cache_limit > 0).then_some(self.message_cache_limit);
        CacheSettings::default()
            .with_message_cache_limit(limit)
            .with_edit_history_limit(self.edit_history_limit)
    }
}

/// `[typing]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct TypingSection {
    /// Keep-alive cadence in milliseconds
    #[serde(default = "default_interval_ms")]
    interval_ms: u64,
}

fn default_interval_ms() -> u64 {
    u64::try_from(DEFAULT_TYPING_INTERVAL.as_millis()).unwrap_or(9_000)
}

impl Default for TypingSection {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
        }
    }
}

/// `[client]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ClientSection {
    /// The client's own user
    #[serde(default)]
    self_user_id: Option<UserId>,
}

/// Top-level configuration.
///
/// # Examples
///
/// ```
/// use mosaic::MosaicConfig;
///
/// let config = MosaicConfig::bundled().unwrap();
/// assert_eq!(*config.cache().message_cache_limit(), 200);
/// assert_eq!(config.typing_interval().as_millis(), 9000);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Getters)]
pub struct MosaicConfig {
    /// Store bounds
    #[serde(default)]
    cache: CacheSection,
    /// Partial structures the client opts into
    #[serde(default)]
    partials: PartialsPolicy,
    /// Own typing indicator
    #[serde(default)]
    typing: TypingSection,
    /// Client identity
    #[serde(default)]
    client: ClientSection,
}

impl MosaicConfig {
    /// The defaults shipped with the crate.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the bundled file does not parse.
    pub fn bundled() -> MosaicResult<Self> {
        finish(Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml)))
    }

    /// Load configuration from one file, with serde defaults for anything it
    /// leaves out.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> MosaicResult<Self> {
        debug!("Loading configuration from file");
        finish(Config::builder().add_source(File::from(path.as_ref())))
    }

    /// Load bundled defaults, then the user files.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if any present source fails to parse.
    #[instrument]
    pub fn load() -> MosaicResult<Self> {
        Self::load_with(None)
    }

    /// Like [`load`](Self::load), with `path` as the highest-precedence
    /// source. The file must exist.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if `path` is missing or any source fails to
    /// parse.
    #[instrument]
    pub fn load_with(path: Option<&Path>) -> MosaicResult<Self> {
        debug!("Loading configuration with precedence: explicit > current dir > home dir > bundled");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));
        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/mosaic/mosaic.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }
        builder = builder.add_source(File::with_name("mosaic").required(false));
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }
        finish(builder)
    }

    /// Keep-alive cadence of the typing indicator.
    pub fn typing_interval(&self) -> Duration {
        Duration::from_millis(self.typing.interval_ms)
    }

    /// An empty store sized by `[cache]` behind a dispatcher honoring
    /// `[partials]` and `[client]`.
    pub fn actions(&self, sink: Arc<dyn NotificationSink>) -> Actions {
        let actions = Actions::new(Store::new(self.cache.settings()), sink)
            .with_partials(self.partials.clone());
        match self.client.self_user_id {
            Some(user_id) => actions.with_self_user(user_id),
            None => actions,
        }
    }

    /// A client over [`actions`](Self::actions) using `rest`.
    pub fn build_client(&self, sink: Arc<dyn NotificationSink>, rest: Arc<dyn RestClient>) -> Client {
        Client::new(self.actions(sink), rest, self.typing_interval())
    }
}

fn finish(builder: config::ConfigBuilder<config::builder::DefaultState>) -> MosaicResult<MosaicConfig> {
    builder
        .build()
        .map_err(|e| {
            MosaicError::from(ConfigError::new(ConfigErrorKind::Load(e.to_string())))
        })?
        .try_deserialize()
        .map_err(|e| {
            MosaicError::from(ConfigError::new(ConfigErrorKind::Invalid(e.to_string())))
        })
}
