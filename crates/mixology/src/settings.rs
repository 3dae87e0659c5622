//! Persistent application settings.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use mixology_api::{DEFAULT_BASE_URL, HttpOptions};
use serde::{Deserialize, Serialize};

/// Application settings that persist across sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Base URL of the recipe API.
    pub api_base_url: String,
    /// Endpoint serving the remote configuration, if any.
    pub remote_config_url: Option<String>,
    /// Minimum seconds between two remote configuration fetches.
    pub min_fetch_interval_secs: u64,
    /// Timeout applied to every HTTP request, in seconds.
    pub request_timeout_secs: u64,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            remote_config_url: None,
            min_fetch_interval_secs: 60,
            request_timeout_secs: 30,
        }
    }
}

impl AppSettings {
    pub const fn http_options(&self) -> HttpOptions {
        HttpOptions::with_timeout(Duration::from_secs(self.request_timeout_secs))
    }

    pub const fn min_fetch_interval(&self) -> Duration {
        Duration::from_secs(self.min_fetch_interval_secs)
    }
}

fn app_dir(base: Option<PathBuf>) -> PathBuf {
    base.unwrap_or_else(|| PathBuf::from(".")).join("mixology")
}

/// Location of the settings file.
pub fn settings_path() -> PathBuf {
    app_dir(dirs::config_dir()).join("settings.json")
}

/// Location of the cache database when none is given on the command line.
pub fn default_database_path() -> PathBuf {
    app_dir(dirs::data_dir()).join("mixology.db")
}

/// Load application settings from the user's config directory.
pub async fn load_settings() -> anyhow::Result<AppSettings> {
    load_settings_from(&settings_path()).await
}

/// Load application settings from a file. A missing file yields the defaults.
pub async fn load_settings_from(path: &Path) -> anyhow::Result<AppSettings> {
    if !path.exists() {
        return Ok(AppSettings::default());
    }

    let contents = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read settings from {}", path.display()))?;

    serde_json::from_str(&contents)
        .with_context(|| format!("Invalid settings file {}", path.display()))
}
