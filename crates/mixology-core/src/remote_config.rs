//! Remote configuration with local defaults.
//!
//! Values are fetched from a [`ConfigSource`] and activated over a set of
//! defaults. Fetches closer together than the minimum interval are skipped,
//! and a failed fetch leaves the active values as they were.

use std::future::Future;
use std::time::Duration;

use mixology_api::{ConfigClient, ConfigValues};
use serde::Serialize;
use serde_json::Value;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::{debug, info};

use crate::Result;

/// Key of the accent color, as an ARGB hex string.
pub const KEY_PRIMARY_COLOR: &str = "primary_color";
/// Key of the greeting shown on the home screen.
pub const KEY_WELCOME_MESSAGE: &str = "welcome_message";
/// Key of the experimental feature switch.
pub const KEY_FEATURE_ENABLED: &str = "feature_enabled";

/// Default accent color.
pub const DEFAULT_PRIMARY_COLOR: &str = "#FF6200EE";
/// Default greeting.
pub const DEFAULT_WELCOME_MESSAGE: &str = "Bienvenue sur MixologyCloud";
/// Default feature switch.
pub const DEFAULT_FEATURE_ENABLED: bool = true;

/// Minimum time between two fetches unless configured otherwise.
pub const DEFAULT_MIN_FETCH_INTERVAL: Duration = Duration::from_secs(60);

/// Typed view of the active configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoteConfigData {
    /// Accent color.
    pub primary_color: String,
    /// Greeting.
    pub welcome_message: String,
    /// Feature switch.
    pub feature_enabled: bool,
}

impl Default for RemoteConfigData {
    fn default() -> Self {
        Self {
            primary_color: DEFAULT_PRIMARY_COLOR.to_string(),
            welcome_message: DEFAULT_WELCOME_MESSAGE.to_string(),
            feature_enabled: DEFAULT_FEATURE_ENABLED,
        }
    }
}

/// A provider of remote configuration values.
pub trait ConfigSource: Send + Sync {
    /// Downloads the current key/value set.
    fn fetch_values(&self) -> impl Future<Output = Result<ConfigValues>> + Send;
}

impl ConfigSource for ConfigClient {
    async fn fetch_values(&self) -> Result<ConfigValues> {
        Ok(self.fetch().await?)
    }
}

struct Activated {
    values: ConfigValues,
    last_fetch: Option<Instant>,
}

/// Remote configuration store.
pub struct RemoteConfig {
    defaults: ConfigValues,
    min_fetch_interval: Duration,
    activated: RwLock<Activated>,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_FETCH_INTERVAL)
    }
}

impl RemoteConfig {
    /// Creates a store with the built-in defaults active.
    #[must_use]
    pub fn new(min_fetch_interval: Duration) -> Self {
        let mut defaults = ConfigValues::new();
        defaults.insert(KEY_PRIMARY_COLOR.into(), DEFAULT_PRIMARY_COLOR.into());
        defaults.insert(KEY_WELCOME_MESSAGE.into(), DEFAULT_WELCOME_MESSAGE.into());
        defaults.insert(KEY_FEATURE_ENABLED.into(), DEFAULT_FEATURE_ENABLED.into());
        Self::with_defaults(defaults, min_fetch_interval)
    }

    /// Creates a store with custom defaults.
    #[must_use]
    pub fn with_defaults(defaults: ConfigValues, min_fetch_interval: Duration) -> Self {
        Self {
            activated: RwLock::new(Activated {
                values: defaults.clone(),
                last_fetch: None,
            }),
            defaults,
            min_fetch_interval,
        }
    }

    /// Minimum time between two fetches.
    #[must_use]
    pub const fn min_fetch_interval(&self) -> Duration {
        self.min_fetch_interval
    }

    /// Fetches fresh values and activates them over the defaults.
    ///
    /// Returns `Ok(false)` without contacting the source when the last
    /// successful fetch is younger than the minimum interval.
    ///
    /// # Errors
    ///
    /// Returns an error if the source fails. The active values are unchanged.
    pub async fn fetch_and_activate<C: ConfigSource>(&self, source: &C) -> Result<bool> {
        let mut activated = self.activated.write().await;

        if activated
            .last_fetch
            .is_some_and(|last| last.elapsed() < self.min_fetch_interval)
        {
            debug!("Remote configuration fetched recently, keeping active values");
            return Ok(false);
        }

        let fetched = source.fetch_values().await?;
        let mut values = self.defaults.clone();
        values.extend(fetched);

        activated.values = values;
        activated.last_fetch = Some(Instant::now());
        info!(keys = activated.values.len(), "Remote configuration activated");
        Ok(true)
    }

    /// Active value of a key as a string.
    pub async fn get_string(&self, key: &str) -> Option<String> {
        let activated = self.activated.read().await;
        activated.values.get(key).and_then(value_as_string)
    }

    /// Active value of a key as a boolean.
    pub async fn get_bool(&self, key: &str) -> Option<bool> {
        let activated = self.activated.read().await;
        activated.values.get(key).and_then(value_as_bool)
    }

    /// Typed snapshot of the active values.
    ///
    /// A missing or unreadable value falls back to its default.
    pub async fn data(&self) -> RemoteConfigData {
        let defaults = RemoteConfigData::default();
        RemoteConfigData {
            primary_color: self
                .get_string(KEY_PRIMARY_COLOR)
                .await
                .unwrap_or(defaults.primary_color),
            welcome_message: self
                .get_string(KEY_WELCOME_MESSAGE)
                .await
                .unwrap_or(defaults.welcome_message),
            feature_enabled: self
                .get_bool(KEY_FEATURE_ENABLED)
                .await
                .unwrap_or(defaults.feature_enabled),
        }
    }
}

fn value_as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn value_as_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Some(true),
            "false" | "0" | "no" | "off" => Some(false),
            _ => None,
        },
        Value::Number(n) => n.as_i64().map(|n| n != 0),
        _ => None,
    }
}
