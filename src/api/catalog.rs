//! Client for the Purview Catalog (Atlas) entity surface
//!
//! Entity CRUD, bulk operations, lineage, relationships and type definitions.

use serde_json::{Value, json};

use super::client::PurviewClient;
use super::constants::{self, CATALOG_API_VERSION};
use super::error::ApiResult;

/// Lineage walk direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineageDirection {
    Input,
    Output,
    Both,
}

impl LineageDirection {
    fn as_str(self) -> &'static str {
        match self {
            LineageDirection::Input => "INPUT",
            LineageDirection::Output => "OUTPUT",
            LineageDirection::Both => "BOTH",
        }
    }
}

pub struct CatalogClient {
    client: PurviewClient,
    api_version: String,
}

impl CatalogClient {
    pub fn new(client: PurviewClient) -> Self {
        Self { client, api_version: CATALOG_API_VERSION.to_string() }
    }

    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// Create a new entity. The response's `guidAssignments` maps the
    /// negative placeholder guid in the request to the assigned one.
    pub async fn create_entity(&self, entity: &Value) -> ApiResult<Value> {
        let body = json!({ "entity": entity });
        let response = self
            .client
            .post(&constants::entity_path(), &self.api_version, &[], Some(&body))
            .await?;
        Ok(response.body)
    }

    pub async fn get_entity(&self, guid: &str) -> ApiResult<Value> {
        let response = self
            .client
            .get(&constants::entity_guid_path(guid), &self.api_version, &[])
            .await?;
        Ok(response.body)
    }

    pub async fn delete_entity(&self, guid: &str) -> ApiResult<Value> {
        let response = self
            .client
            .delete(&constants::entity_guid_path(guid), &self.api_version, &[])
            .await?;
        Ok(response.body)
    }

    /// Create or update many entities in one call
    pub async fn bulk_create_entities(&self, entities: &[Value]) -> ApiResult<Value> {
        let body = json!({ "entities": entities });
        let response = self
            .client
            .post(&constants::entity_bulk_path(), &self.api_version, &[], Some(&body))
            .await?;
        Ok(response.body)
    }

    /// Delete many entities by guid. Guids are passed as repeated `guid`
    /// query parameters, not a body.
    pub async fn bulk_delete_entities(&self, guids: &[&str]) -> ApiResult<Value> {
        let query: Vec<(&str, &str)> = guids.iter().map(|g| ("guid", *g)).collect();
        let response = self
            .client
            .delete(&constants::entity_bulk_path(), &self.api_version, &query)
            .await?;
        Ok(response.body)
    }

    /// Fetch lineage around an entity up to `depth` hops
    pub async fn get_lineage(
        &self,
        guid: &str,
        direction: LineageDirection,
        depth: u32,
    ) -> ApiResult<Value> {
        let depth = depth.to_string();
        let query = [("direction", direction.as_str()), ("depth", depth.as_str())];
        let response = self
            .client
            .get(&constants::lineage_path(guid), &self.api_version, &query)
            .await?;
        Ok(response.body)
    }

    pub async fn create_relationship(&self, relationship: &Value) -> ApiResult<Value> {
        let response = self
            .client
            .post(&constants::relationship_path(), &self.api_version, &[], Some(relationship))
            .await?;
        Ok(response.body)
    }

    pub async fn get_relationship(&self, guid: &str) -> ApiResult<Value> {
        let response = self
            .client
            .get(&constants::relationship_guid_path(guid), &self.api_version, &[])
            .await?;
        Ok(response.body)
    }

    pub async fn delete_relationship(&self, guid: &str) -> ApiResult<()> {
        self.client
            .delete(&constants::relationship_guid_path(guid), &self.api_version, &[])
            .await?;
        Ok(())
    }

    /// List all type definitions (entity defs, classification defs, business
    /// metadata defs) registered in the account
    pub async fn list_type_defs(&self) -> ApiResult<Value> {
        let response = self
            .client
            .get(&constants::typedefs_path(), &self.api_version, &[])
            .await?;
        Ok(response.body)
    }

    pub async fn get_type_def_by_name(&self, name: &str) -> ApiResult<Value> {
        let response = self
            .client
            .get(&constants::typedef_by_name_path(name), &self.api_version, &[])
            .await?;
        Ok(response.body)
    }
}
