//! Client for the Purview Data Map and Catalog (Atlas) search surface
//!
//! Covers asset search, entity get/update, classifications, labels, business
//! metadata and glossary terms. Methods are pure request/response translation;
//! the retry and auth behaviour lives in [`PurviewClient`].

use log::info;
use serde_json::{Value, json};

use super::client::PurviewClient;
use super::constants::{self, DATAMAP_API_VERSION};
use super::error::{ApiError, ApiResult};
use super::models::SearchOptions;

pub struct DataMapClient {
    client: PurviewClient,
    api_version: String,
}

impl DataMapClient {
    pub fn new(client: PurviewClient) -> Self {
        Self { client, api_version: DATAMAP_API_VERSION.to_string() }
    }

    /// Override the API version for this surface (versions differ per
    /// surface and must never be shared globally)
    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// Search the catalog. Returns the `value` array of matching assets.
    pub async fn search(&self, options: &SearchOptions) -> ApiResult<Vec<Value>> {
        let body = options.to_body();
        let response = self
            .client
            .post(&constants::search_query_path(), &self.api_version, &[], Some(&body))
            .await?;
        Ok(response.value_items())
    }

    /// Keyword search with an optional entity type filter
    pub async fn search_assets(
        &self,
        keywords: &str,
        entity_type: Option<&str>,
        limit: u32,
    ) -> ApiResult<Vec<Value>> {
        let options = SearchOptions {
            keywords: keywords.to_string(),
            entity_type: entity_type.map(str::to_string),
            limit,
            offset: 0,
        };
        self.search(&options).await
    }

    /// Fetch every page of search results by advancing the offset until a
    /// short page comes back. `max_pages` bounds the walk.
    pub async fn search_all(
        &self,
        options: &SearchOptions,
        max_pages: u32,
    ) -> ApiResult<Vec<Value>> {
        let mut all_results = Vec::new();
        let mut page_options = options.clone();

        for page in 0..max_pages {
            page_options.offset = options.offset + page * options.limit;
            let page_results = self.search(&page_options).await?;
            let count = page_results.len() as u32;
            all_results.extend(page_results);
            if count < options.limit {
                break;
            }
        }

        info!("Paged search returned {} assets", all_results.len());
        Ok(all_results)
    }

    /// Find an entity by exact qualified name. Search is keyword-based, so
    /// results are filtered down to an exact `qualifiedName` match.
    pub async fn find_entity_by_qualified_name(
        &self,
        qualified_name: &str,
        entity_type: Option<&str>,
    ) -> ApiResult<Option<Value>> {
        let results = self.search_assets(qualified_name, entity_type, 50).await?;
        Ok(results
            .into_iter()
            .find(|r| r["qualifiedName"].as_str() == Some(qualified_name)))
    }

    /// Get full entity details by GUID, including referred entities (columns)
    pub async fn get_entity(&self, guid: &str) -> ApiResult<Value> {
        let response = self
            .client
            .get(&constants::entity_guid_path(guid), &self.api_version, &[])
            .await?;
        Ok(response.body)
    }

    /// Create or update an entity. There is no partial update endpoint;
    /// callers fetch the full entity, modify it, and send it back whole.
    pub async fn create_or_update_entity(&self, entity: &Value) -> ApiResult<Value> {
        let body = json!({ "entity": entity });
        let response = self
            .client
            .post(&constants::entity_path(), &self.api_version, &[], Some(&body))
            .await?;
        Ok(response.body)
    }

    /// Set an entity's description via the get-modify-put cycle
    pub async fn set_description(&self, guid: &str, description: &str) -> ApiResult<Value> {
        let full = self.get_entity(guid).await?;
        let mut entity = full["entity"].clone();
        if entity.is_null() {
            return Err(ApiError::InvalidResponse {
                message: format!("entity response for {guid} missing 'entity' object"),
            });
        }
        entity["attributes"]["description"] = Value::String(description.to_string());
        self.create_or_update_entity(&entity).await
    }

    /// Add classification tags (e.g. "PII", "Confidential") to an entity.
    /// The backend rejects classifications that are already associated, so
    /// check [`get_classifications`](Self::get_classifications) first.
    pub async fn add_classifications(
        &self,
        guid: &str,
        classification_names: &[&str],
    ) -> ApiResult<()> {
        let body = Value::Array(
            classification_names
                .iter()
                .map(|name| json!({ "typeName": name }))
                .collect(),
        );
        self.client
            .post(&constants::classifications_path(guid), &self.api_version, &[], Some(&body))
            .await?;
        Ok(())
    }

    pub async fn get_classifications(&self, guid: &str) -> ApiResult<Value> {
        let response = self
            .client
            .get(&constants::classifications_path(guid), &self.api_version, &[])
            .await?;
        Ok(response.body)
    }

    /// Replace the free-text labels on an entity
    pub async fn add_labels(&self, guid: &str, labels: &[&str]) -> ApiResult<()> {
        let body = Value::Array(labels.iter().map(|l| Value::String(l.to_string())).collect());
        self.client
            .put(&constants::labels_path(guid), &self.api_version, &[], Some(&body))
            .await?;
        Ok(())
    }

    /// Remove labels from an entity
    pub async fn remove_labels(&self, guid: &str, labels: &[&str]) -> ApiResult<()> {
        let body = Value::Array(labels.iter().map(|l| Value::String(l.to_string())).collect());
        self.client
            .send(
                reqwest::Method::DELETE,
                &constants::labels_path(guid),
                &self.api_version,
                &[],
                Some(&body),
            )
            .await?;
        Ok(())
    }

    /// Set business metadata attributes on an entity. The business metadata
    /// type must already exist and be applicable to the entity's type.
    pub async fn set_business_metadata(
        &self,
        guid: &str,
        business_metadata_name: &str,
        attributes: &Value,
    ) -> ApiResult<()> {
        let body = json!({ business_metadata_name: attributes });
        self.client
            .post(&constants::business_metadata_path(guid), &self.api_version, &[], Some(&body))
            .await?;
        Ok(())
    }

    /// Create a glossary term anchored to a glossary
    pub async fn create_glossary_term(
        &self,
        name: &str,
        glossary_guid: &str,
        description: Option<&str>,
        parent_term_guid: Option<&str>,
    ) -> ApiResult<Value> {
        let mut body = json!({
            "name": name,
            "anchor": { "glossaryGuid": glossary_guid },
        });
        if let Some(description) = description {
            body["longDescription"] = Value::String(description.to_string());
        }
        if let Some(parent) = parent_term_guid {
            body["parentTerm"] = json!({ "termGuid": parent });
        }

        let response = self
            .client
            .post(&constants::glossary_term_path(), &self.api_version, &[], Some(&body))
            .await?;
        Ok(response.body)
    }

    /// List all glossaries in the account. This endpoint returns a bare JSON
    /// array, not a `value` wrapper like the list endpoints elsewhere.
    pub async fn list_glossaries(&self) -> ApiResult<Vec<Value>> {
        let response = self
            .client
            .get(&constants::glossary_path(), &self.api_version, &[])
            .await?;
        Ok(response.body.as_array().cloned().unwrap_or_default())
    }
}
