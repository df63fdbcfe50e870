//! Client for the Purview Data Quality / Data Governance surface
//!
//! Quality rules, profiling triggers and run monitoring. This surface lives
//! on a shared service endpoint (`api.purview-service.microsoft.com`) rather
//! than the account endpoint, but accepts the same bearer token.
//!
//! Known backend limitation: profiling statistics are not retrievable through
//! this surface at all; only run metadata is. Results live in the portal UI.

use chrono::{DateTime, Utc};
use serde_json::Value;

use super::client::PurviewClient;
use super::constants::{self, QUALITY_API_VERSION};
use super::error::{ApiError, ApiResult};

pub struct DataQualityClient {
    client: PurviewClient,
    api_version: String,
}

impl DataQualityClient {
    pub fn new(client: PurviewClient) -> Self {
        Self { client, api_version: QUALITY_API_VERSION.to_string() }
    }

    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// List all business (governance) domains in the account
    pub async fn list_domains(&self) -> ApiResult<Vec<Value>> {
        let response = self
            .client
            .get(&constants::domains_path(), &self.api_version, &[])
            .await?;
        Ok(response.value_items())
    }

    pub async fn get_domain(&self, domain_id: &str) -> ApiResult<Value> {
        let response = self
            .client
            .get(&constants::domain_path(domain_id), &self.api_version, &[])
            .await?;
        Ok(response.body)
    }

    pub async fn list_data_products(&self, domain_id: &str) -> ApiResult<Vec<Value>> {
        let response = self
            .client
            .get(&constants::data_products_path(domain_id), &self.api_version, &[])
            .await?;
        Ok(response.value_items())
    }

    /// Create a quality rule. The rule body must include a `columns` array in
    /// `typeProperties` or the backend rejects it, and `data_asset_id` is the
    /// Catalog asset id, not the Data Map guid.
    pub async fn create_rule(
        &self,
        domain_id: &str,
        product_id: &str,
        asset_id: &str,
        rule_id: &str,
        rule_body: &Value,
    ) -> ApiResult<Value> {
        self.put_rule(domain_id, product_id, asset_id, rule_id, rule_body).await
    }

    /// Update an existing rule. Create and update are the same idempotent PUT
    /// against the same resource path; only the body differs.
    pub async fn update_rule(
        &self,
        domain_id: &str,
        product_id: &str,
        asset_id: &str,
        rule_id: &str,
        rule_body: &Value,
    ) -> ApiResult<Value> {
        self.put_rule(domain_id, product_id, asset_id, rule_id, rule_body).await
    }

    async fn put_rule(
        &self,
        domain_id: &str,
        product_id: &str,
        asset_id: &str,
        rule_id: &str,
        rule_body: &Value,
    ) -> ApiResult<Value> {
        let path = constants::rule_path(domain_id, product_id, asset_id, rule_id);
        let response = self
            .client
            .put(&path, &self.api_version, &[], Some(rule_body))
            .await?;
        Ok(response.body)
    }

    pub async fn get_rule(
        &self,
        domain_id: &str,
        product_id: &str,
        asset_id: &str,
        rule_id: &str,
    ) -> ApiResult<Value> {
        let path = constants::rule_path(domain_id, product_id, asset_id, rule_id);
        let response = self.client.get(&path, &self.api_version, &[]).await?;
        Ok(response.body)
    }

    pub async fn list_rules(
        &self,
        domain_id: &str,
        product_id: &str,
        asset_id: &str,
    ) -> ApiResult<Vec<Value>> {
        let path = constants::rules_path(domain_id, product_id, asset_id);
        let response = self.client.get(&path, &self.api_version, &[]).await?;
        Ok(response.value_items())
    }

    pub async fn delete_rule(
        &self,
        domain_id: &str,
        product_id: &str,
        asset_id: &str,
        rule_id: &str,
    ) -> ApiResult<()> {
        let path = constants::rule_path(domain_id, product_id, asset_id, rule_id);
        self.client.delete(&path, &self.api_version, &[]).await?;
        Ok(())
    }

    /// Trigger a profiling job for a data asset and return the run id.
    ///
    /// The run id comes back in `result.value`, not the top-level `id` field
    /// (which holds an unrelated operation id). Compare with
    /// [`WorkflowClient::submit_user_request`], where the id IS top-level —
    /// the inconsistency is the backend's, documented per endpoint.
    pub async fn profile_asset(
        &self,
        asset_id: &str,
        profile_config: &Value,
    ) -> ApiResult<String> {
        let response = self
            .client
            .post(&constants::profile_path(asset_id), &self.api_version, &[], Some(profile_config))
            .await?;

        extract_profile_run_id(&response.body).ok_or_else(|| ApiError::InvalidResponse {
            message: format!(
                "profile response missing result.value run id: {}",
                response.body
            ),
        })
    }

    /// Get run metadata: status, submission/end times, message. Profiling
    /// statistics are NOT included; the backend does not expose them.
    pub async fn get_run_status(&self, domain_id: &str, run_id: &str) -> ApiResult<Value> {
        let response = self
            .client
            .get(&constants::run_path(domain_id, run_id), &self.api_version, &[])
            .await?;
        Ok(response.body)
    }

    /// List run history for a data asset, newest first.
    ///
    /// The server does not guarantee any ordering, so results are sorted
    /// client-side by `submissionTime` descending.
    pub async fn list_runs(&self, asset_id: &str, run_type: &str) -> ApiResult<Vec<Value>> {
        let response = self
            .client
            .get(&constants::runs_path(asset_id), &self.api_version, &[("runType", run_type)])
            .await?;

        let mut runs = response.value_items();
        sort_runs_newest_first(&mut runs);
        Ok(runs)
    }
}

/// The profiling trigger buries the run id under `result.value`
fn extract_profile_run_id(body: &Value) -> Option<String> {
    body["result"]["value"].as_str().map(str::to_string)
}

fn sort_runs_newest_first(runs: &mut [Value]) {
    runs.sort_by_key(|run| {
        let submitted = run["submissionTime"]
            .as_str()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc));
        // Unparseable or missing timestamps sort last
        std::cmp::Reverse(submitted)
    });
}
