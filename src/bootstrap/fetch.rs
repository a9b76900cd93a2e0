//! HTTP module fetching.

use crate::error::{DiagError, Result};
use reqwest::blocking::Client;
use std::time::Duration;

/// Fetches module source over HTTP/HTTPS.
pub struct HttpFetcher {
    timeout: Duration,
}

impl HttpFetcher {
    /// Create a fetcher with the default timeout.
    pub fn new() -> Self {
        Self::with_timeout(crate::config::FETCH_TIMEOUT)
    }

    /// Create a fetcher with a custom timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Get the configured timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Fetch `url` and decode the body as UTF-8.
    ///
    /// Connect errors, timeouts and non-2xx statuses are
    /// [`DiagError::NetworkFailure`]; a body that is not UTF-8 is
    /// [`DiagError::DecodeFailure`].
    pub fn fetch(&self, url: &str) -> Result<String> {
        let network = |reason: String| DiagError::NetworkFailure {
            url: url.to_string(),
            reason,
        };

        let client = Client::builder()
            .user_agent(concat!("nwdiag/", env!("CARGO_PKG_VERSION")))
            .timeout(self.timeout)
            .build()
            .map_err(|e| network(e.to_string()))?;

        tracing::debug!("GET {}", url);
        let response = client.get(url).send().map_err(|e| network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(network(format!("HTTP {}", status)));
        }

        let body = response.bytes().map_err(|e| network(e.to_string()))?;
        String::from_utf8(body.to_vec()).map_err(|e| DiagError::DecodeFailure {
            source_name: url.to_string(),
            message: e.to_string(),
        })
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[test]
    fn default_timeout_is_30_seconds() {
        let fetcher = HttpFetcher::new();
        assert_eq!(fetcher.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn custom_timeout() {
        let fetcher = HttpFetcher::with_timeout(Duration::from_secs(5));
        assert_eq!(fetcher.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn fetch_returns_body() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/module.yml");
            then.status(200).body("functions: {}\n");
        });

        let body = HttpFetcher::new().fetch(&server.url("/module.yml")).unwrap();
        assert_eq!(body, "functions: {}\n");
        mock.assert();
    }

    #[test]
    fn non_success_status_is_network_failure() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/missing.yml");
            then.status(404);
        });

        let err = HttpFetcher::new()
            .fetch(&server.url("/missing.yml"))
            .unwrap_err();
        match err {
            DiagError::NetworkFailure { reason, .. } => assert!(reason.contains("404")),
            other => panic!("Expected NetworkFailure, got {:?}", other),
        }
    }

    #[test]
    fn invalid_utf8_is_decode_failure() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/binary");
            then.status(200).body(vec![0xff_u8, 0xfe, 0xfd]);
        });

        let err = HttpFetcher::new().fetch(&server.url("/binary")).unwrap_err();
        assert!(matches!(err, DiagError::DecodeFailure { .. }));
    }

    #[test]
    fn unreachable_host_is_network_failure() {
        let err = HttpFetcher::with_timeout(Duration::from_secs(2))
            .fetch("http://127.0.0.1:1/module.yml")
            .unwrap_err();
        assert!(matches!(err, DiagError::NetworkFailure { .. }));
    }
}
