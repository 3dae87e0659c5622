//! Remote configuration endpoint.

use reqwest::Client;
use serde_json::{Map, Value};
use tracing::debug;
use url::Url;

use crate::error::{Error, Result};
use crate::http::HttpOptions;

/// Flat key/value settings as served by the remote configuration endpoint.
pub type ConfigValues = Map<String, Value>;

/// Client for a remote configuration document.
///
/// The endpoint must answer `GET` with a JSON object, e.g.
/// `{"welcome_message": "Hello", "feature_enabled": false}`.
#[derive(Debug, Clone)]
pub struct ConfigClient {
    url: Url,
    http_client: Client,
}

impl ConfigClient {
    /// Creates a client for the given document URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the HTTP client cannot be built.
    pub fn new(url: impl AsRef<str>, options: HttpOptions) -> Result<Self> {
        Ok(Self {
            url: Url::parse(url.as_ref())?,
            http_client: options.build()?,
        })
    }

    /// Document URL.
    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    /// Downloads the current configuration values.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the status is not a success, or
    /// the body is not a JSON object.
    pub async fn fetch(&self) -> Result<ConfigValues> {
        debug!(url = %self.url, "Fetching remote configuration");

        let response = self.http_client.get(self.url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status(status.as_u16()));
        }

        let values: ConfigValues = response.json().await?;
        debug!(keys = values.len(), "Remote configuration received");
        Ok(values)
    }
}
