//! Shared data types for the Purview API core

use std::time::{Duration, SystemTime};

use serde_json::Value;

/// Service principal credentials for the client-credentials grant.
/// Immutable for the process lifetime; supplied from environment/config.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub tenant_id: String,
    pub client_id: String,
    pub client_secret: String,
}

/// Cached bearer token with its expiry instant. Replaced wholesale on
/// refresh, never edited in place.
#[derive(Debug, Clone)]
pub struct TokenInfo {
    pub access_token: String,
    pub expires_at: SystemTime,
}

impl TokenInfo {
    pub fn new(access_token: String, expires_in: Duration) -> Self {
        Self { access_token, expires_at: SystemTime::now() + expires_in }
    }

    /// Remaining lifetime, zero when already expired
    pub fn remaining(&self) -> Duration {
        self.expires_at
            .duration_since(SystemTime::now())
            .unwrap_or(Duration::ZERO)
    }

    /// A token is fresh while its remaining lifetime exceeds the safety margin
    pub fn is_fresh(&self, margin: Duration) -> bool {
        self.remaining() > margin
    }
}

/// Parsed response from the dispatcher: status code plus JSON body.
/// Callers extract fields immediately; field naming is inconsistent across
/// endpoints, so no unified typed model is attempted.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    /// Extract the `value` array most list endpoints wrap results in.
    /// Returns an empty vec when the field is absent (e.g. 204 responses).
    pub fn value_items(&self) -> Vec<Value> {
        self.body["value"].as_array().cloned().unwrap_or_default()
    }
}

/// Options for a catalog search query
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Search keywords, `*` for everything
    pub keywords: String,
    /// Optional entity type filter (e.g. "azure_sql_table")
    pub entity_type: Option<String>,
    /// Page size
    pub limit: u32,
    /// Offset into the result set, for pagination
    pub offset: u32,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self { keywords: "*".to_string(), entity_type: None, limit: 50, offset: 0 }
    }
}

impl SearchOptions {
    pub fn keywords(keywords: impl Into<String>) -> Self {
        Self { keywords: keywords.into(), ..Self::default() }
    }

    /// Request body for POST /datamap/api/search/query
    pub fn to_body(&self) -> Value {
        let mut body = serde_json::json!({
            "keywords": self.keywords,
            "limit": self.limit,
        });
        if self.offset > 0 {
            body["offset"] = Value::from(self.offset);
        }
        if let Some(entity_type) = &self.entity_type {
            body["filter"] = serde_json::json!({ "entityType": entity_type });
        }
        body
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_token_freshness_margin() {
        let token = TokenInfo::new("t".into(), Duration::from_secs(3600));
        assert!(token.is_fresh(Duration::from_secs(300)));
        assert!(!token.is_fresh(Duration::from_secs(7200)));

        let stale = TokenInfo::new("t".into(), Duration::from_secs(10));
        assert!(!stale.is_fresh(Duration::from_secs(300)));
    }

    #[test]
    fn test_expired_token_has_zero_remaining() {
        let token = TokenInfo { access_token: "t".into(), expires_at: SystemTime::now() - Duration::from_secs(5) };
        assert_eq!(token.remaining(), Duration::ZERO);
        assert!(!token.is_fresh(Duration::ZERO));
    }

    #[test]
    fn test_value_items_extraction() {
        let response = ApiResponse { status: 200, body: json!({"value": [{"id": 1}, {"id": 2}]}) };
        assert_eq!(response.value_items().len(), 2);

        let empty = ApiResponse { status: 200, body: json!({"count": 0}) };
        assert!(empty.value_items().is_empty());
    }

    #[test]
    fn test_search_body_omits_empty_filter_and_offset() {
        let body = SearchOptions::keywords("sales").to_body();
        assert_eq!(body["keywords"], "sales");
        assert_eq!(body["limit"], 50);
        assert!(body.get("filter").is_none());
        assert!(body.get("offset").is_none());
    }

    #[test]
    fn test_search_body_with_filter_and_offset() {
        let opts = SearchOptions {
            keywords: "customer".into(),
            entity_type: Some("azure_sql_table".into()),
            limit: 25,
            offset: 50,
        };
        let body = opts.to_body();
        assert_eq!(body["filter"]["entityType"], "azure_sql_table");
        assert_eq!(body["offset"], 50);
        assert_eq!(body["limit"], 25);
    }
}
