//! Shared HTTP client construction.

use std::time::Duration;

use reqwest::Client;

use crate::error::Result;

/// Timeouts applied to every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpOptions {
    /// Time allowed to establish the connection.
    pub connect_timeout: Duration,
    /// Time allowed for the whole request, body included.
    pub timeout: Duration,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(30),
            timeout: Duration::from_secs(30),
        }
    }
}

impl HttpOptions {
    /// Uses the same timeout for connecting and for the whole request.
    #[must_use]
    pub const fn with_timeout(timeout: Duration) -> Self {
        Self {
            connect_timeout: timeout,
            timeout,
        }
    }

    /// Builds a `reqwest` client with these timeouts.
    pub(crate) fn build(self) -> Result<Client> {
        let client = Client::builder()
            .connect_timeout(self.connect_timeout)
            .timeout(self.timeout)
            .build()?;
        Ok(client)
    }
}
