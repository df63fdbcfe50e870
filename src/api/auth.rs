//! Service principal authentication for Purview APIs
//!
//! Acquires bearer tokens through the OAuth2 client-credentials grant and
//! caches them until they come within a safety margin of expiry. Refresh is
//! demand-driven but proactive: a caller observing a stale token triggers one
//! exchange, never a reactive retry after a 401.

use std::time::Duration;

use log::{debug, info, warn};
use serde::Deserialize;
use serde_json::Value;
use tokio::sync::Mutex;

use super::constants::{self, DEFAULT_AUTHORITY, PURVIEW_SCOPE};
use super::error::{ApiError, ApiResult};
use super::models::{Credentials, TokenInfo};

/// Default safety margin: refresh when less than 5 minutes of lifetime remain
pub const DEFAULT_REFRESH_MARGIN: Duration = Duration::from_secs(300);

/// Bounded retry attempts for the credential exchange itself
const EXCHANGE_MAX_ATTEMPTS: u32 = 3;
const EXCHANGE_RETRY_DELAY: Duration = Duration::from_secs(2);

/// Successful response from the identity endpoint
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
}

fn default_expires_in() -> u64 {
    3600
}

impl TokenResponse {
    fn into_token_info(self) -> TokenInfo {
        info!("Acquired access token (expires in {}s)", self.expires_in);
        TokenInfo::new(self.access_token, Duration::from_secs(self.expires_in))
    }
}

/// Acquires and caches bearer tokens for one credential set.
///
/// All resource clients built from the same credentials share one provider
/// (behind an `Arc`), so they observe the same token value after a refresh.
/// The cache lock is held across the exchange, which gives single-flight
/// semantics for free: concurrent callers that detect staleness serialize on
/// the lock, the first performs the exchange, the rest find a fresh token.
pub struct TokenProvider {
    credentials: Credentials,
    authority: String,
    scope: String,
    refresh_margin: Duration,
    http_client: reqwest::Client,
    cached: Mutex<Option<TokenInfo>>,
}

impl TokenProvider {
    pub fn new(credentials: Credentials) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("purview-cli/0.1")
            .build()
            .expect("failed to build HTTP client");

        Self {
            credentials,
            authority: DEFAULT_AUTHORITY.to_string(),
            scope: PURVIEW_SCOPE.to_string(),
            refresh_margin: DEFAULT_REFRESH_MARGIN,
            http_client,
            cached: Mutex::new(None),
        }
    }

    /// Override the Azure AD authority (tests point this at a local server)
    pub fn with_authority(mut self, authority: impl Into<String>) -> Self {
        self.authority = authority.into();
        self
    }

    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }

    pub fn with_refresh_margin(mut self, margin: Duration) -> Self {
        self.refresh_margin = margin;
        self
    }

    /// Return a valid bearer token, exchanging credentials only when the
    /// cached token is stale or absent.
    pub async fn get_token(&self) -> ApiResult<String> {
        let mut cached = self.cached.lock().await;

        if let Some(token) = cached.as_ref() {
            if token.is_fresh(self.refresh_margin) {
                debug!(
                    "Using cached token ({}s remaining)",
                    token.remaining().as_secs()
                );
                return Ok(token.access_token.clone());
            }
            debug!("Cached token within refresh margin, exchanging credentials");
        }

        let fresh = self.exchange().await?;
        let access_token = fresh.access_token.clone();
        *cached = Some(fresh);
        Ok(access_token)
    }

    /// Discard any cached token and exchange credentials on the next call
    pub async fn invalidate(&self) {
        let mut cached = self.cached.lock().await;
        *cached = None;
    }

    /// Perform the client-credentials exchange with bounded retries for
    /// transient identity endpoint failures. Rejected credentials fail
    /// immediately; they will not become valid by retrying.
    async fn exchange(&self) -> ApiResult<TokenInfo> {
        let url = constants::token_endpoint(&self.authority, &self.credentials.tenant_id);
        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", self.credentials.client_id.as_str()),
            ("client_secret", self.credentials.client_secret.as_str()),
            ("scope", self.scope.as_str()),
        ];

        let mut last_error = String::new();

        for attempt in 1..=EXCHANGE_MAX_ATTEMPTS {
            let result = self.http_client.post(&url).form(&form).send().await;

            match result {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        let token: TokenResponse =
                            response.json().await.map_err(|e| ApiError::InvalidResponse {
                                message: format!("malformed token response: {e}"),
                            })?;
                        return Ok(token.into_token_info());
                    }

                    let body = response.text().await.unwrap_or_default();
                    if status.is_server_error() {
                        last_error = format!("HTTP {status}: {body}");
                        if attempt < EXCHANGE_MAX_ATTEMPTS {
                            warn!(
                                "Identity endpoint returned {} on attempt {}/{}, retrying",
                                status, attempt, EXCHANGE_MAX_ATTEMPTS
                            );
                            tokio::time::sleep(EXCHANGE_RETRY_DELAY).await;
                        }
                        continue;
                    }

                    // 400/401 from Azure AD: invalid secret, unknown tenant,
                    // bad scope. Surface the error_description when present.
                    let description = serde_json::from_str::<Value>(&body)
                        .ok()
                        .and_then(|v| v["error_description"].as_str().map(str::to_string))
                        .unwrap_or(body);
                    return Err(ApiError::Auth {
                        message: format!(
                            "credential exchange rejected with HTTP {status}: {description}. \
                             Verify your service principal credentials and RBAC roles."
                        ),
                    });
                }
                Err(e) => {
                    if attempt < EXCHANGE_MAX_ATTEMPTS {
                        warn!(
                            "Identity endpoint unreachable on attempt {}/{}: {}",
                            attempt, EXCHANGE_MAX_ATTEMPTS, e
                        );
                        last_error = e.to_string();
                        tokio::time::sleep(EXCHANGE_RETRY_DELAY).await;
                        continue;
                    }
                    last_error = e.to_string();
                }
            }
        }

        // Transient failures (5xx, transport) on every attempt end up here
        Err(ApiError::Auth {
            message: format!(
                "identity endpoint unavailable after {EXCHANGE_MAX_ATTEMPTS} attempts: {last_error}"
            ),
        })
    }
}
