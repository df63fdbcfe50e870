//! Environment-based configuration
//!
//! Credentials and endpoints come from the environment (optionally seeded
//! from a `.env` file); the library never persists them.

use std::sync::Arc;
use std::time::Duration;

use crate::api::{
    Credentials, DataMapClient, DataQualityClient, CatalogClient, PurviewClient, RetryConfig,
    TokenProvider, WorkflowClient, constants,
};

/// Process configuration, loaded once at startup
#[derive(Debug, Clone)]
pub struct Config {
    /// Purview account endpoint, e.g. https://account.purview.azure.com
    pub endpoint: String,
    /// Data Quality service endpoint (separate host, same token)
    pub quality_endpoint: String,
    pub credentials: Credentials,
    /// Request timeout; overridable because a short timeout shows up as
    /// spurious transient failures under latency
    pub timeout: Duration,
}

impl Config {
    /// Load configuration from the environment, reading `.env` first when
    /// present. Reports every missing variable at once rather than failing
    /// on the first.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut missing = Vec::new();
        let mut require = |key: &'static str| match lookup(key) {
            Some(value) if !value.is_empty() => value,
            _ => {
                missing.push(key);
                String::new()
            }
        };

        let endpoint = require("PURVIEW_ENDPOINT");
        let tenant_id = require("TENANT_ID");
        let client_id = require("CLIENT_ID");
        let client_secret = require("CLIENT_SECRET");

        if !missing.is_empty() {
            anyhow::bail!(
                "Missing required environment variables: {}. \
                 Please set them in your .env file or environment.",
                missing.join(", ")
            );
        }

        let quality_endpoint = lookup("PURVIEW_QUALITY_ENDPOINT")
            .unwrap_or_else(|| constants::QUALITY_DEFAULT_ENDPOINT.to_string());
        let timeout = lookup("PURVIEW_TIMEOUT_SECS")
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(crate::api::client::DEFAULT_TIMEOUT);

        Ok(Self {
            endpoint,
            quality_endpoint,
            credentials: Credentials { tenant_id, client_id, client_secret },
            timeout,
        })
    }

    /// Build one resource client per API surface, all sharing a single token
    /// provider so a refresh is observed by every surface at once.
    pub fn clients(&self) -> Clients {
        let tokens = Arc::new(TokenProvider::new(self.credentials.clone()));
        let account = PurviewClient::with_timeout(
            &self.endpoint,
            Arc::clone(&tokens),
            RetryConfig::default(),
            self.timeout,
        );
        let quality = PurviewClient::with_timeout(
            &self.quality_endpoint,
            Arc::clone(&tokens),
            RetryConfig::default(),
            self.timeout,
        );

        Clients {
            datamap: DataMapClient::new(account.clone()),
            catalog: CatalogClient::new(account.clone()),
            quality: DataQualityClient::new(quality),
            workflow: WorkflowClient::new(account),
            tokens,
        }
    }
}

/// The four resource clients plus the shared token provider
pub struct Clients {
    pub datamap: DataMapClient,
    pub catalog: CatalogClient,
    pub quality: DataQualityClient,
    pub workflow: WorkflowClient,
    pub tokens: Arc<TokenProvider>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_from_lookup_complete() {
        let env = vars(&[
            ("PURVIEW_ENDPOINT", "https://acct.purview.azure.com"),
            ("TENANT_ID", "t"),
            ("CLIENT_ID", "c"),
            ("CLIENT_SECRET", "s"),
        ]);
        let config = Config::from_lookup(|k| env.get(k).cloned()).unwrap();
        assert_eq!(config.endpoint, "https://acct.purview.azure.com");
        assert_eq!(config.quality_endpoint, constants::QUALITY_DEFAULT_ENDPOINT);
        assert_eq!(config.timeout, crate::api::client::DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_missing_variables_all_reported() {
        let env = vars(&[("PURVIEW_ENDPOINT", "https://acct.purview.azure.com")]);
        let err = Config::from_lookup(|k| env.get(k).cloned()).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("TENANT_ID"));
        assert!(message.contains("CLIENT_ID"));
        assert!(message.contains("CLIENT_SECRET"));
        assert!(!message.contains("PURVIEW_ENDPOINT"));
    }

    #[test]
    fn test_overrides() {
        let env = vars(&[
            ("PURVIEW_ENDPOINT", "https://acct.purview.azure.com"),
            ("TENANT_ID", "t"),
            ("CLIENT_ID", "c"),
            ("CLIENT_SECRET", "s"),
            ("PURVIEW_QUALITY_ENDPOINT", "http://localhost:9000"),
            ("PURVIEW_TIMEOUT_SECS", "15"),
        ]);
        let config = Config::from_lookup(|k| env.get(k).cloned()).unwrap();
        assert_eq!(config.quality_endpoint, "http://localhost:9000");
        assert_eq!(config.timeout, Duration::from_secs(15));
    }
}
