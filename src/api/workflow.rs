//! Client for the Purview Workflow surface
//!
//! Workflow CRUD, user request submission and approval task management. The
//! action DAG inside a workflow definition is executed server-side; this
//! client only ships the definition across.

use serde_json::{Value, json};

use super::client::PurviewClient;
use super::constants::{self, WORKFLOW_API_VERSION};
use super::error::{ApiError, ApiResult};

pub struct WorkflowClient {
    client: PurviewClient,
    api_version: String,
}

impl WorkflowClient {
    pub fn new(client: PurviewClient) -> Self {
        Self { client, api_version: WORKFLOW_API_VERSION.to_string() }
    }

    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    pub async fn list_workflows(&self) -> ApiResult<Vec<Value>> {
        let response = self
            .client
            .get(&constants::workflows_path(), &self.api_version, &[])
            .await?;
        Ok(response.value_items())
    }

    pub async fn get_workflow(&self, workflow_id: &str) -> ApiResult<Value> {
        let response = self
            .client
            .get(&constants::workflow_path(workflow_id), &self.api_version, &[])
            .await?;
        Ok(response.body)
    }

    /// Create or replace a workflow definition. The caller supplies the
    /// workflow id; generate a fresh GUID for new workflows.
    pub async fn create_or_replace_workflow(
        &self,
        workflow_id: &str,
        workflow_config: &Value,
    ) -> ApiResult<Value> {
        let response = self
            .client
            .put(&constants::workflow_path(workflow_id), &self.api_version, &[], Some(workflow_config))
            .await?;
        Ok(response.body)
    }

    pub async fn delete_workflow(&self, workflow_id: &str) -> ApiResult<()> {
        self.client
            .delete(&constants::workflow_path(workflow_id), &self.api_version, &[])
            .await?;
        Ok(())
    }

    /// Submit a user request that triggers a workflow and return its id.
    /// Here the id is top-level, unlike the profiling trigger where it hides
    /// under `result.value`.
    pub async fn submit_user_request(
        &self,
        workflow_id: &str,
        request_payload: &Value,
    ) -> ApiResult<String> {
        let body = json!({ "workflowId": workflow_id, "payload": request_payload });
        let response = self
            .client
            .post(&constants::user_requests_path(), &self.api_version, &[], Some(&body))
            .await?;

        response.body["id"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| ApiError::InvalidResponse {
                message: format!("user request response missing id: {}", response.body),
            })
    }

    /// List pending approval tasks, optionally filtered by workflow or run
    pub async fn list_tasks(
        &self,
        workflow_id: Option<&str>,
        workflow_run_id: Option<&str>,
    ) -> ApiResult<Vec<Value>> {
        let mut query = Vec::new();
        if let Some(id) = workflow_id {
            query.push(("workflowId", id));
        }
        if let Some(id) = workflow_run_id {
            query.push(("workflowRunId", id));
        }

        let response = self
            .client
            .get(&constants::workflow_tasks_path(), &self.api_version, &query)
            .await?;
        Ok(response.value_items())
    }

    pub async fn get_task(&self, task_id: &str) -> ApiResult<Value> {
        let response = self
            .client
            .get(&constants::workflow_task_path(task_id), &self.api_version, &[])
            .await?;
        Ok(response.body)
    }

    pub async fn approve_task(&self, task_id: &str, comment: Option<&str>) -> ApiResult<Value> {
        let body = comment_body(comment);
        let response = self
            .client
            .post(&constants::task_approve_path(task_id), &self.api_version, &[], Some(&body))
            .await?;
        Ok(response.body)
    }

    pub async fn reject_task(&self, task_id: &str, comment: Option<&str>) -> ApiResult<Value> {
        let body = comment_body(comment);
        let response = self
            .client
            .post(&constants::task_reject_path(task_id), &self.api_version, &[], Some(&body))
            .await?;
        Ok(response.body)
    }

    pub async fn list_workflow_runs(&self, workflow_id: Option<&str>) -> ApiResult<Vec<Value>> {
        let mut query = Vec::new();
        if let Some(id) = workflow_id {
            query.push(("workflowId", id));
        }

        let response = self
            .client
            .get(&constants::workflow_runs_path(), &self.api_version, &query)
            .await?;
        Ok(response.value_items())
    }

    pub async fn get_workflow_run(&self, run_id: &str) -> ApiResult<Value> {
        let response = self
            .client
            .get(&constants::workflow_run_path(run_id), &self.api_version, &[])
            .await?;
        Ok(response.body)
    }

    pub async fn cancel_workflow_run(
        &self,
        run_id: &str,
        comment: Option<&str>,
    ) -> ApiResult<Value> {
        let body = comment_body(comment);
        let response = self
            .client
            .post(&constants::workflow_run_cancel_path(run_id), &self.api_version, &[], Some(&body))
            .await?;
        Ok(response.body)
    }
}

fn comment_body(comment: Option<&str>) -> Value {
    match comment {
        Some(comment) => json!({ "comment": comment }),
        None => json!({}),
    }
}
