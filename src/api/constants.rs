//! API constants and endpoint path builders for the Purview REST surfaces

/// Default Azure AD authority used for the client-credentials exchange
pub const DEFAULT_AUTHORITY: &str = "https://login.microsoftonline.com";

/// OAuth2 scope for all Purview data-plane APIs
pub const PURVIEW_SCOPE: &str = "https://purview.azure.net/.default";

/// Default API version for Data Map (search/discovery) endpoints
pub const DATAMAP_API_VERSION: &str = "2023-09-01";

/// Default API version for Catalog (Atlas) endpoints
pub const CATALOG_API_VERSION: &str = "2023-09-01";

/// Default API version for Data Quality / Data Governance endpoints
pub const QUALITY_API_VERSION: &str = "2025-09-01-preview";

/// Default API version for Workflow endpoints
pub const WORKFLOW_API_VERSION: &str = "2023-10-01-preview";

/// Data Quality APIs live on a shared service endpoint, not the account
/// endpoint, but accept the same bearer token.
pub const QUALITY_DEFAULT_ENDPOINT: &str = "https://api.purview-service.microsoft.com";

/// Query parameter carrying the API version on every request
pub const API_VERSION_PARAM: &str = "api-version";

/// Standard headers for Purview requests
pub mod headers {
    /// Content type for JSON requests
    pub const CONTENT_TYPE_JSON: &str = "application/json";

    /// Per-request correlation id, echoed back by the service
    pub const CLIENT_REQUEST_ID: &str = "x-ms-client-request-id";

    /// Rate-limit hint on 429 responses, integer seconds
    pub const RETRY_AFTER: &str = "retry-after";
}

/// Build the token endpoint URL for a tenant
pub fn token_endpoint(authority: &str, tenant_id: &str) -> String {
    format!("{}/{}/oauth2/v2.0/token", authority.trim_end_matches('/'), tenant_id)
}

/// Search endpoint (POST only; the basic search endpoint returns 400 in some
/// environments)
pub fn search_query_path() -> String {
    "/datamap/api/search/query".to_string()
}

/// Atlas entity endpoint by GUID
pub fn entity_guid_path(guid: &str) -> String {
    format!("/catalog/api/atlas/v2/entity/guid/{guid}")
}

/// Atlas entity create-or-update endpoint
pub fn entity_path() -> String {
    "/catalog/api/atlas/v2/entity".to_string()
}

/// Atlas bulk entity endpoint
pub fn entity_bulk_path() -> String {
    "/catalog/api/atlas/v2/entity/bulk".to_string()
}

/// Classifications collection for an entity
pub fn classifications_path(guid: &str) -> String {
    format!("/catalog/api/atlas/v2/entity/guid/{guid}/classifications")
}

/// Labels collection for an entity
pub fn labels_path(guid: &str) -> String {
    format!("/catalog/api/atlas/v2/entity/guid/{guid}/labels")
}

/// Business metadata collection for an entity
pub fn business_metadata_path(guid: &str) -> String {
    format!("/catalog/api/atlas/v2/entity/guid/{guid}/businessmetadata")
}

/// Glossary collection endpoint
pub fn glossary_path() -> String {
    "/catalog/api/atlas/v2/glossary".to_string()
}

/// Glossary term creation endpoint
pub fn glossary_term_path() -> String {
    "/catalog/api/atlas/v2/glossary/term".to_string()
}

/// Lineage endpoint for an entity
pub fn lineage_path(guid: &str) -> String {
    format!("/catalog/api/atlas/v2/lineage/{guid}")
}

/// Relationship collection endpoint
pub fn relationship_path() -> String {
    "/catalog/api/atlas/v2/relationship".to_string()
}

/// Relationship endpoint by GUID
pub fn relationship_guid_path(guid: &str) -> String {
    format!("/catalog/api/atlas/v2/relationship/guid/{guid}")
}

/// Type definitions endpoint
pub fn typedefs_path() -> String {
    "/catalog/api/atlas/v2/types/typedefs".to_string()
}

/// Type definition by name
pub fn typedef_by_name_path(name: &str) -> String {
    format!("/catalog/api/atlas/v2/types/typedef/name/{name}")
}

/// Business domains collection
pub fn domains_path() -> String {
    "/datagov/quality/business-domains".to_string()
}

/// Business domain by id
pub fn domain_path(domain_id: &str) -> String {
    format!("/datagov/quality/business-domains/{domain_id}")
}

/// Data products in a business domain
pub fn data_products_path(domain_id: &str) -> String {
    format!("/datagov/quality/business-domains/{domain_id}/data-products")
}

/// Quality rules collection for a data asset
pub fn rules_path(domain_id: &str, product_id: &str, asset_id: &str) -> String {
    format!(
        "/datagov/quality/business-domains/{domain_id}/data-products/{product_id}/data-assets/{asset_id}/rules"
    )
}

/// One quality rule. Create and update are both PUT against this same path;
/// only the body differs.
pub fn rule_path(domain_id: &str, product_id: &str, asset_id: &str, rule_id: &str) -> String {
    format!("{}/{rule_id}", rules_path(domain_id, product_id, asset_id))
}

/// Profiling trigger for a data asset
pub fn profile_path(asset_id: &str) -> String {
    format!("/datagov/quality/data-assets/{asset_id}:profile")
}

/// Profiling/quality run status
pub fn run_path(domain_id: &str, run_id: &str) -> String {
    format!("/datagov/quality/business-domains/{domain_id}/runs/{run_id}")
}

/// Run history for a data asset
pub fn runs_path(asset_id: &str) -> String {
    format!("/datagov/quality/data-assets/{asset_id}/runs")
}

/// Workflow collection endpoint
pub fn workflows_path() -> String {
    "/workflow/workflows".to_string()
}

/// Workflow by id
pub fn workflow_path(workflow_id: &str) -> String {
    format!("/workflow/workflows/{workflow_id}")
}

/// User request submission endpoint
pub fn user_requests_path() -> String {
    "/workflow/userrequests".to_string()
}

/// Workflow task collection endpoint
pub fn workflow_tasks_path() -> String {
    "/workflow/workflowtasks".to_string()
}

/// Workflow task by id
pub fn workflow_task_path(task_id: &str) -> String {
    format!("/workflow/workflowtasks/{task_id}")
}

/// Task approval endpoint
pub fn task_approve_path(task_id: &str) -> String {
    format!("/workflow/workflowtasks/{task_id}/approve")
}

/// Task rejection endpoint
pub fn task_reject_path(task_id: &str) -> String {
    format!("/workflow/workflowtasks/{task_id}/reject")
}

/// Workflow run collection endpoint
pub fn workflow_runs_path() -> String {
    "/workflow/workflowruns".to_string()
}

/// Workflow run by id
pub fn workflow_run_path(run_id: &str) -> String {
    format!("/workflow/workflowruns/{run_id}")
}

/// Workflow run cancellation endpoint
pub fn workflow_run_cancel_path(run_id: &str) -> String {
    format!("/workflow/workflowruns/{run_id}/cancel")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_endpoint() {
        assert_eq!(
            token_endpoint("https://login.microsoftonline.com", "my-tenant"),
            "https://login.microsoftonline.com/my-tenant/oauth2/v2.0/token"
        );
        // Trailing slash on the authority must not double up
        assert_eq!(
            token_endpoint("http://localhost:9999/", "t"),
            "http://localhost:9999/t/oauth2/v2.0/token"
        );
    }

    #[test]
    fn test_rule_path_shares_collection_prefix() {
        let collection = rules_path("d", "p", "a");
        let rule = rule_path("d", "p", "a", "check_nulls");
        assert!(rule.starts_with(&collection));
        assert_eq!(
            rule,
            "/datagov/quality/business-domains/d/data-products/p/data-assets/a/rules/check_nulls"
        );
    }

    #[test]
    fn test_profile_path_uses_colon_action() {
        assert_eq!(profile_path("asset-1"), "/datagov/quality/data-assets/asset-1:profile");
    }

    #[test]
    fn test_workflow_task_action_paths() {
        assert_eq!(task_approve_path("t1"), "/workflow/workflowtasks/t1/approve");
        assert_eq!(task_reject_path("t1"), "/workflow/workflowtasks/t1/reject");
    }
}
