//! Request dispatcher shared by every Purview resource client
//!
//! Builds and sends HTTP requests against a base endpoint, attaching the
//! current bearer token and the `api-version` query parameter, and applies
//! the shared retry policy for 429/5xx/transport failures. Resource clients
//! never implement their own retry loop; this is the only one.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};
use reqwest::Method;
use serde_json::Value;
use uuid::Uuid;

use super::auth::TokenProvider;
use super::constants::{API_VERSION_PARAM, headers};
use super::error::{ApiError, ApiResult};
use super::models::ApiResponse;
use super::resilience::{FailureClass, RetryConfig, RetryPolicy, parse_retry_after};

/// Default request timeout. Deliberately generous: profiling triggers and
/// bulk entity operations routinely exceed short timeouts, and a timed-out
/// call burns a retry attempt.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// HTTP client bound to one Purview endpoint.
///
/// Holds no mutable state of its own; the token provider (shared via `Arc`
/// across all clients built from one credential set) owns the only shared
/// mutable value. Cloning is cheap and clones share the connection pool.
#[derive(Clone)]
pub struct PurviewClient {
    base_url: String,
    http_client: reqwest::Client,
    tokens: Arc<TokenProvider>,
    retry_policy: RetryPolicy,
}

impl PurviewClient {
    pub fn new(base_url: impl Into<String>, tokens: Arc<TokenProvider>) -> Self {
        Self::with_retry_config(base_url, tokens, RetryConfig::default())
    }

    pub fn with_retry_config(
        base_url: impl Into<String>,
        tokens: Arc<TokenProvider>,
        retry_config: RetryConfig,
    ) -> Self {
        Self::with_timeout(base_url, tokens, retry_config, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(
        base_url: impl Into<String>,
        tokens: Arc<TokenProvider>,
        retry_config: RetryConfig,
        timeout: Duration,
    ) -> Self {
        let http_client = reqwest::Client::builder()
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent("purview-cli/0.1")
            .build()
            .expect("failed to build HTTP client");

        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http_client,
            tokens,
            retry_policy: RetryPolicy::new(retry_config),
        }
    }

    /// Create a client reusing an externally configured reqwest client
    pub fn with_custom_client(
        base_url: impl Into<String>,
        tokens: Arc<TokenProvider>,
        http_client: reqwest::Client,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http_client,
            tokens,
            retry_policy: RetryPolicy::default(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Token provider shared with every client built from the same credentials
    pub fn token_provider(&self) -> &Arc<TokenProvider> {
        &self.tokens
    }

    pub async fn get(
        &self,
        path: &str,
        api_version: &str,
        query: &[(&str, &str)],
    ) -> ApiResult<ApiResponse> {
        self.send(Method::GET, path, api_version, query, None).await
    }

    pub async fn post(
        &self,
        path: &str,
        api_version: &str,
        query: &[(&str, &str)],
        body: Option<&Value>,
    ) -> ApiResult<ApiResponse> {
        self.send(Method::POST, path, api_version, query, body).await
    }

    pub async fn put(
        &self,
        path: &str,
        api_version: &str,
        query: &[(&str, &str)],
        body: Option<&Value>,
    ) -> ApiResult<ApiResponse> {
        self.send(Method::PUT, path, api_version, query, body).await
    }

    pub async fn delete(
        &self,
        path: &str,
        api_version: &str,
        query: &[(&str, &str)],
    ) -> ApiResult<ApiResponse> {
        self.send(Method::DELETE, path, api_version, query, None).await
    }

    /// Execute one request with the shared retry policy.
    ///
    /// The bearer token is read from the provider on every attempt, so a
    /// refresh happening mid-retry is picked up without special handling.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        api_version: &str,
        query: &[(&str, &str)],
        body: Option<&Value>,
    ) -> ApiResult<ApiResponse> {
        let url = self.build_url(path);
        let max_attempts = self.retry_policy.max_attempts();

        let mut last_status: Option<u16> = None;
        let mut last_body = String::new();

        for attempt in 1..=max_attempts {
            let token = self.tokens.get_token().await?;
            let request_id = Uuid::new_v4().to_string();

            let mut request = self
                .http_client
                .request(method.clone(), &url)
                .bearer_auth(&token)
                .header("Content-Type", headers::CONTENT_TYPE_JSON)
                .header(headers::CLIENT_REQUEST_ID, &request_id)
                .query(&[(API_VERSION_PARAM, api_version)])
                .query(query);

            if let Some(json) = body {
                request = request.json(json);
            }

            debug!("{method} {url} (attempt {attempt}/{max_attempts}, request id {request_id})");

            match request.send().await {
                Ok(response) => {
                    let status = response.status().as_u16();

                    if response.status().is_success() {
                        if attempt > 1 {
                            debug!("{method} {url} succeeded after {attempt} attempts");
                        }
                        return Self::parse_success(status, response).await;
                    }

                    let retry_after = parse_retry_after(
                        response
                            .headers()
                            .get(headers::RETRY_AFTER)
                            .and_then(|v| v.to_str().ok()),
                    );
                    let text = response.text().await.unwrap_or_default();

                    if !FailureClass::from_status_code(status).should_retry() {
                        let parsed = serde_json::from_str::<Value>(&text)
                            .unwrap_or(Value::String(text));
                        return Err(ApiError::from_client_status(status, parsed));
                    }

                    last_status = Some(status);
                    last_body = text;

                    if attempt < max_attempts {
                        let wait = self.retry_policy.delay_after(attempt, retry_after);
                        warn!(
                            "HTTP {status} on attempt {attempt}/{max_attempts} for {method} {url}, \
                             retrying in {:.1}s",
                            wait.as_secs_f64()
                        );
                        tokio::time::sleep(wait).await;
                    }
                }
                Err(e) => {
                    if !FailureClass::from_reqwest_error(&e).should_retry() {
                        return Err(ApiError::Transport(e));
                    }

                    last_status = e.status().map(|s| s.as_u16());
                    last_body = e.to_string();

                    if attempt < max_attempts {
                        let wait = self.retry_policy.delay_after(attempt, None);
                        warn!(
                            "Transport error on attempt {attempt}/{max_attempts} for {method} {url}: {e}, \
                             retrying in {:.1}s",
                            wait.as_secs_f64()
                        );
                        tokio::time::sleep(wait).await;
                    }
                }
            }
        }

        Err(ApiError::RetryExhausted {
            attempts: max_attempts,
            status: last_status,
            body: last_body,
        })
    }

    async fn parse_success(status: u16, response: reqwest::Response) -> ApiResult<ApiResponse> {
        let text = response.text().await?;
        let body = if text.is_empty() {
            Value::Null
        } else {
            serde_json::from_str::<Value>(&text).unwrap_or(Value::String(text))
        };
        Ok(ApiResponse { status, body })
    }

    fn build_url(&self, path: &str) -> String {
        if path.starts_with("http") {
            path.to_string()
        } else if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::Credentials;

    fn test_client() -> PurviewClient {
        let tokens = Arc::new(TokenProvider::new(Credentials {
            tenant_id: "t".into(),
            client_id: "c".into(),
            client_secret: "s".into(),
        }));
        PurviewClient::new("https://account.purview.azure.com/", tokens)
    }

    #[test]
    fn test_build_url_strips_trailing_slash() {
        let client = test_client();
        assert_eq!(client.base_url(), "https://account.purview.azure.com");
        assert_eq!(
            client.build_url("/workflow/workflows"),
            "https://account.purview.azure.com/workflow/workflows"
        );
        assert_eq!(
            client.build_url("workflow/workflows"),
            "https://account.purview.azure.com/workflow/workflows"
        );
    }

    #[test]
    fn test_build_url_passes_absolute_urls_through() {
        let client = test_client();
        assert_eq!(
            client.build_url("https://other.example.com/page2"),
            "https://other.example.com/page2"
        );
    }
}
