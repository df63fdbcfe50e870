//! Resource client behaviour against mocked Purview surfaces

use std::sync::Arc;

use purview_cli::api::{
    Credentials, DataMapClient, DataQualityClient, PurviewClient, SearchOptions, TokenProvider,
    WorkflowClient,
};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN_PATH: &str = "/test-tenant/oauth2/v2.0/token";

async fn mount_token_mock(server: &MockServer) -> wiremock::MockGuard {
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token_type": "Bearer",
            "expires_in": 3600,
            "access_token": "token-1",
        })))
        .expect(1)
        .mount_as_scoped(server)
        .await
}

fn dispatcher(server: &MockServer) -> PurviewClient {
    let tokens = Arc::new(
        TokenProvider::new(Credentials {
            tenant_id: "test-tenant".to_string(),
            client_id: "client-1".to_string(),
            client_secret: "hunter2".to_string(),
        })
        .with_authority(server.uri()),
    );
    PurviewClient::new(server.uri(), tokens)
}

#[tokio::test]
async fn surfaces_share_one_token_but_send_their_own_api_version() {
    let server = MockServer::start().await;
    let _token_guard = mount_token_mock(&server).await;

    Mock::given(method("POST"))
        .and(path("/datamap/api/search/query"))
        .and(query_param("api-version", "2023-09-01"))
        .and(header("Authorization", "Bearer token-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"value": []})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/workflow/workflows"))
        .and(query_param("api-version", "2023-10-01-preview"))
        .and(header("Authorization", "Bearer token-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"value": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = dispatcher(&server);
    let datamap = DataMapClient::new(client.clone());
    let workflow = WorkflowClient::new(client);

    datamap.search(&SearchOptions::default()).await.unwrap();
    workflow.list_workflows().await.unwrap();
    // The scoped token mock verifies exactly one exchange served both surfaces
}

#[tokio::test]
async fn rule_create_and_update_put_the_same_path() {
    let server = MockServer::start().await;
    let _token_guard = mount_token_mock(&server).await;

    Mock::given(method("PUT"))
        .and(path(
            "/datagov/quality/business-domains/dom-1/data-products/prod-1/data-assets/asset-1/rules/row_count",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "row_count"})))
        .expect(2)
        .mount(&server)
        .await;

    let quality = DataQualityClient::new(dispatcher(&server));

    let rule = json!({
        "name": "row_count",
        "typeProperties": { "columns": [], "minRows": 1 },
    });
    quality
        .create_rule("dom-1", "prod-1", "asset-1", "row_count", &rule)
        .await
        .unwrap();

    let updated = json!({
        "name": "row_count",
        "typeProperties": { "columns": [], "minRows": 100 },
    });
    quality
        .update_rule("dom-1", "prod-1", "asset-1", "row_count", &updated)
        .await
        .unwrap();
}

#[tokio::test]
async fn profiling_run_id_is_read_from_result_value() {
    let server = MockServer::start().await;
    let _token_guard = mount_token_mock(&server).await;

    // Top-level id is an unrelated operation id; the run id is nested
    Mock::given(method("POST"))
        .and(path("/datagov/quality/data-assets/asset-1:profile"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "operation-9",
            "result": { "value": "run-42" },
        })))
        .expect(1)
        .mount(&server)
        .await;

    let quality = DataQualityClient::new(dispatcher(&server));
    let run_id = quality
        .profile_asset("asset-1", &json!({"profileType": "Full"}))
        .await
        .unwrap();
    assert_eq!(run_id, "run-42");
}

#[tokio::test]
async fn user_request_id_is_read_from_top_level() {
    let server = MockServer::start().await;
    let _token_guard = mount_token_mock(&server).await;

    Mock::given(method("POST"))
        .and(path("/workflow/userrequests"))
        .and(body_partial_json(json!({"workflowId": "wf-1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "req-7",
            "status": "Pending",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let workflow = WorkflowClient::new(dispatcher(&server));
    let request_id = workflow
        .submit_user_request("wf-1", &json!({"comment": "please approve"}))
        .await
        .unwrap();
    assert_eq!(request_id, "req-7");
}

#[tokio::test]
async fn run_history_comes_back_newest_first() {
    let server = MockServer::start().await;
    let _token_guard = mount_token_mock(&server).await;

    // Server returns runs unordered; the client sorts them
    Mock::given(method("GET"))
        .and(path("/datagov/quality/data-assets/asset-1/runs"))
        .and(query_param("runType", "Profile"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [
                {"runId": "old", "submissionTime": "2026-01-01T00:00:00Z"},
                {"runId": "newest", "submissionTime": "2026-08-01T12:00:00Z"},
                {"runId": "middle", "submissionTime": "2026-04-15T06:30:00Z"},
            ],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let quality = DataQualityClient::new(dispatcher(&server));
    let runs = quality.list_runs("asset-1", "Profile").await.unwrap();

    let order: Vec<_> = runs.iter().map(|r| r["runId"].as_str().unwrap()).collect();
    assert_eq!(order, ["newest", "middle", "old"]);
}

#[tokio::test]
async fn glossary_list_handles_bare_array_response() {
    let server = MockServer::start().await;
    let _token_guard = mount_token_mock(&server).await;

    // Unlike other list endpoints this one returns a bare array
    Mock::given(method("GET"))
        .and(path("/catalog/api/atlas/v2/glossary"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"guid": "g1", "name": "Glossary"},
            {"guid": "g2", "name": "Finance"},
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let datamap = DataMapClient::new(dispatcher(&server));
    let glossaries = datamap.list_glossaries().await.unwrap();
    assert_eq!(glossaries.len(), 2);
    assert_eq!(glossaries[1]["name"], "Finance");
}

#[tokio::test]
async fn paged_search_walks_offsets_until_a_short_page() {
    let server = MockServer::start().await;
    let _token_guard = mount_token_mock(&server).await;

    // Second page: offset 2, short page ends the walk
    Mock::given(method("POST"))
        .and(path("/datamap/api/search/query"))
        .and(body_partial_json(json!({"offset": 2})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [{"name": "asset-3"}],
        })))
        .expect(1)
        .mount(&server)
        .await;
    // First page: no offset field, full page of `limit` results
    Mock::given(method("POST"))
        .and(path("/datamap/api/search/query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [{"name": "asset-1"}, {"name": "asset-2"}],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let datamap = DataMapClient::new(dispatcher(&server));
    let options = SearchOptions { limit: 2, ..SearchOptions::default() };
    let results = datamap.search_all(&options, 10).await.unwrap();

    assert_eq!(results.len(), 3);
    assert_eq!(results[2]["name"], "asset-3");
}

#[tokio::test]
async fn exact_qualified_name_match_filters_keyword_noise() {
    let server = MockServer::start().await;
    let _token_guard = mount_token_mock(&server).await;

    Mock::given(method("POST"))
        .and(path("/datamap/api/search/query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [
                {"qualifiedName": "mssql://srv/db/dbo/customers_archive", "name": "customers_archive"},
                {"qualifiedName": "mssql://srv/db/dbo/customers", "name": "customers"},
            ],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let datamap = DataMapClient::new(dispatcher(&server));
    let found = datamap
        .find_entity_by_qualified_name("mssql://srv/db/dbo/customers", None)
        .await
        .unwrap();

    assert_eq!(found.unwrap()["name"], "customers");
}
