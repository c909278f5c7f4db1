//! reqwest-backed upstream client.
//!
//! Plain GET with no authentication. A response that arrives is an
//! `UpstreamError` unless it is 2xx with a JSON body; no response at all is a
//! `TransportFailure`. Nothing is retried.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use lexref_core::constants::DEFAULT_TIMEOUT_SECONDS;
use lexref_core::error::{LexrefError, Result};
use lexref_core::traits::Upstream;

/// Longest upstream error body quoted back in an error message.
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Upstream client configuration.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct UpstreamConfig {
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            user_agent: concat!("lexref/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl UpstreamConfig {
    /// Overrides the request timeout.
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }
}

/// Upstream client for JSON document GETs.
pub struct HttpUpstream {
    http_client: reqwest::Client,
}

impl HttpUpstream {
    /// Creates a client with the given config.
    pub fn with_config(config: UpstreamConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| LexrefError::ConfigError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { http_client })
    }
}

#[async_trait]
impl Upstream for HttpUpstream {
    #[instrument(skip(self))]
    async fn get_json(&self, url: &str) -> Result<Value> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| send_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = if text.trim().is_empty() {
                status.canonical_reason().unwrap_or("request failed").to_string()
            } else {
                truncate(text.trim(), MAX_ERROR_BODY_CHARS)
            };
            warn!(url, status = status.as_u16(), "Upstream returned error status");
            return Err(LexrefError::UpstreamError {
                url: url.to_string(),
                status: Some(status.as_u16()),
                message,
            });
        }

        let body = response.bytes().await.map_err(|e| {
            warn!(url, error = %e, "Upstream body read failed");
            LexrefError::TransportFailure {
                url: url.to_string(),
                reason: e.to_string(),
            }
        })?;

        let data: Value = serde_json::from_slice(&body).map_err(|e| {
            warn!(url, error = %e, "Upstream returned non-JSON body");
            LexrefError::UpstreamError {
                url: url.to_string(),
                status: Some(status.as_u16()),
                message: format!("invalid JSON body: {}", e),
            }
        })?;

        debug!(url, bytes = body.len(), "Fetched from upstream");
        Ok(data)
    }
}

/// Every send failure means no response arrived, including URLs reqwest
/// refuses to send (unsupported scheme, unparsable host).
fn send_error(url: &str, err: reqwest::Error) -> LexrefError {
    warn!(
        url,
        error = %err,
        timeout = err.is_timeout(),
        rejected = err.is_builder(),
        "Upstream request failed"
    );
    LexrefError::TransportFailure {
        url: url.to_string(),
        reason: if err.is_timeout() {
            "request timed out".to_string()
        } else {
            err.to_string()
        },
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;
    use wiremock::matchers::{header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client() -> HttpUpstream {
        HttpUpstream::with_config(UpstreamConfig::default().with_timeout(5)).unwrap()
    }

    #[tokio::test]
    async fn test_get_json_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/abc"))
            .and(header_exists("user-agent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1}])))
            .expect(1)
            .mount(&server)
            .await;

        let data = client()
            .get_json(&format!("{}/abc", server.uri()))
            .await
            .unwrap();
        assert_eq!(data, json!([{"id": 1}]));
    }

    #[tokio::test]
    async fn test_get_json_preserves_upstream_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404).set_body_string("document not found"))
            .mount(&server)
            .await;

        let url = format!("{}/missing", server.uri());
        let err = client().get_json(&url).await.unwrap_err();
        match err {
            LexrefError::UpstreamError { url: u, status, message } => {
                assert_eq!(u, url);
                assert_eq!(status, Some(404));
                assert_eq!(message, "document not found");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_get_json_empty_error_body_uses_reason() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = client().get_json(&server.uri()).await.unwrap_err();
        assert_eq!(err.upstream_status(), Some(503));
        assert!(err.to_string().contains("Service Unavailable"));
    }

    #[tokio::test]
    async fn test_get_json_invalid_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = client().get_json(&server.uri()).await.unwrap_err();
        assert!(matches!(err, LexrefError::UpstreamError { status: Some(200), .. }));
    }

    #[tokio::test]
    async fn test_get_json_transport_failure() {
        // Nothing listens on port 1.
        let err = client().get_json("http://127.0.0.1:1/abc").await.unwrap_err();
        assert!(matches!(err, LexrefError::TransportFailure { .. }));
        assert!(err.is_upstream_failure());
    }

    #[test_case("ftp://127.0.0.1:1/x" ; "unsupported scheme")]
    #[test_case("http://exa mple.org/x" ; "unparsable host")]
    #[tokio::test]
    async fn test_get_json_unsendable_url_is_transport_failure(url: &str) {
        let err = client().get_json(url).await.unwrap_err();
        assert_eq!(err.kind(), "transport_failure");
        assert!(matches!(err, LexrefError::TransportFailure { url: ref u, .. } if u == url));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdef", 3), "abc...");
    }

    #[test]
    fn test_default_user_agent() {
        assert!(UpstreamConfig::default().user_agent.starts_with("lexref/"));
    }
}
