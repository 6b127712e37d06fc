//! HTTP Transport Adapter
//!
//! Implements the `Transport` port over reqwest. Owns authentication,
//! request correlation and the retry policy; the typed clients above it
//! never retry. GETs are repeated after any retryable failure. POSTs are
//! repeated only after 429 or 503, since after a timeout, a dropped
//! connection or a gateway error the record may already be stored.

use crate::config::ClientConfig;
use crate::domain::{AuthMode, ConfigError, Method, Request, Response, TransportError};
use crate::ports::outbound::Transport;
use async_trait::async_trait;
use reqwest::Url;
use std::time::Duration;
use tracing::{debug, warn};
use uuid::Uuid;

/// Header carrying the per-attempt correlation ID.
pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// Error bodies are cut to this many characters.
const MAX_ERROR_MESSAGE_CHARS: usize = 256;

/// reqwest-backed registry transport.
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
    max_retries: u32,
    retry_backoff: Duration,
}

impl HttpTransport {
    /// Build a transport from validated configuration.
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.registry_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
            max_retries: config.max_retries,
            retry_backoff: config.retry_backoff,
        })
    }

    /// Absolute URL for `request`, query included.
    pub fn url_for(&self, request: &Request) -> Result<Url, TransportError> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, request.path))
            .map_err(|e| TransportError::InvalidRequest(e.to_string()))?;
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(request.query.iter());
        }
        Ok(url)
    }

    async fn send_once(
        &self,
        request: &Request,
        url: &Url,
        token: Option<&str>,
    ) -> Result<Response, TransportError> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
        };
        let request_id = Uuid::new_v4();

        let mut builder = self
            .client
            .request(method, url.clone())
            .header(REQUEST_ID_HEADER, request_id.to_string());
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        debug!(
            %request_id,
            method = %request.method,
            url = %url,
            "[registry] Sending request"
        );

        let response = builder.send().await.map_err(classify)?;
        let status = response.status();
        let body = response.bytes().await.map_err(classify)?;

        if !status.is_success() {
            let message: String = String::from_utf8_lossy(&body)
                .chars()
                .take(MAX_ERROR_MESSAGE_CHARS)
                .collect();
            return Err(TransportError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(Response {
            status: status.as_u16(),
            body: body.to_vec(),
        })
    }

    fn backoff_for(&self, attempt: u32) -> Duration {
        self.retry_backoff
            .saturating_mul(2u32.saturating_pow(attempt))
    }
}

fn classify(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_builder() {
        TransportError::InvalidRequest(err.to_string())
    } else {
        TransportError::Connection(err.to_string())
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: Request) -> Result<Response, TransportError> {
        let token = match request.auth {
            AuthMode::Authenticated => Some(
                self.token
                    .as_deref()
                    .ok_or(TransportError::Unauthenticated)?,
            ),
            AuthMode::Anonymous => None,
        };
        let url = self.url_for(&request)?;

        let mut attempt = 0;
        loop {
            match self.send_once(&request, &url, token).await {
                Ok(response) => return Ok(response),
                Err(err) if err.is_retryable_for(request.method) && attempt < self.max_retries => {
                    let delay = self.backoff_for(attempt);
                    warn!(
                        attempt = attempt + 1,
                        max_retries = self.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "[registry] Retrying {} {}",
                        request.method,
                        request.path
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::QueryParams;

    fn transport(url: &str) -> HttpTransport {
        HttpTransport::new(&ClientConfig::default().with_registry_url(url)).unwrap()
    }

    #[test]
    fn test_url_joins_base_path() {
        let transport = transport("https://registry.example.com/v1/");
        let request = Request::new(Method::Get, "/services", AuthMode::Authenticated);
        assert_eq!(
            transport.url_for(&request).unwrap().as_str(),
            "https://registry.example.com/v1/services"
        );
    }

    #[test]
    fn test_url_encodes_query() {
        let transport = transport("https://registry.example.com/v1");
        let mut query = QueryParams::new();
        query.set("name", "my service");
        query.set("org_id", "0103");
        let request =
            Request::new(Method::Get, "/services", AuthMode::Authenticated).with_query(query);
        assert_eq!(
            transport.url_for(&request).unwrap().as_str(),
            "https://registry.example.com/v1/services?name=my+service&org_id=0103"
        );
    }

    #[test]
    fn test_backoff_doubles() {
        let transport = HttpTransport::new(
            &ClientConfig::default().with_retry_backoff(Duration::from_millis(100)),
        )
        .unwrap();
        assert_eq!(transport.backoff_for(0), Duration::from_millis(100));
        assert_eq!(transport.backoff_for(1), Duration::from_millis(200));
        assert_eq!(transport.backoff_for(3), Duration::from_millis(800));
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let result = HttpTransport::new(&ClientConfig::default().with_max_retries(99));
        assert!(matches!(result, Err(ConfigError::TooManyRetries { .. })));
    }

    #[tokio::test]
    async fn test_authenticated_request_without_token_fails_fast() {
        let transport = transport("http://127.0.0.1:9");
        let request = Request::new(Method::Get, "/services", AuthMode::Authenticated);
        assert_eq!(
            transport.execute(request).await,
            Err(TransportError::Unauthenticated)
        );
    }
}
