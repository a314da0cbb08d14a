//! HTTP client for the workflow store and auth endpoint

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};

use super::{Credentials, StagePayload, WorkflowBackend};
use crate::errors::{DesignerError, Result};
use crate::schemas::{
    Config, Role, Session, Stage, StageId, User, WorkflowDraft, WorkflowId, WorkflowMeta,
    WorkflowRecord, WorkflowSummary,
};

/// Fallback message when the store gives no usable error payload
const GENERIC_FAILURE: &str = "Network error";

/// Workflow store reached over JSON/HTTP
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

fn transport(error: reqwest::Error) -> DesignerError {
    DesignerError::Network(error.to_string())
}

/// Pull the most useful message out of an error body
fn error_message(body: &str) -> String {
    let from_json = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("message")
                .or_else(|| v.get("error"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        });
    match from_json {
        Some(message) if !message.trim().is_empty() => message,
        _ if !body.trim().is_empty() && !body.trim_start().starts_with('{') => {
            body.trim().to_string()
        }
        _ => GENERIC_FAILURE.to_string(),
    }
}

impl HttpBackend {
    /// Build a client; `None` keeps reqwest's default of no request timeout
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| DesignerError::ConfigError(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            &config.api_base_url,
            config
                .timeout_seconds
                .map(|secs| Duration::from_secs(u64::from(secs))),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        tracing::debug!(path, "GET");
        let response = self.client.get(self.url(path)).send().await.map_err(transport)?;
        Self::handle_response(response).await
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        tracing::debug!(path, "POST");
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(transport)?;
        Self::handle_response(response).await
    }

    async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        tracing::debug!(path, "PUT");
        let response = self
            .client
            .put(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(transport)?;
        Self::handle_response(response).await
    }

    async fn delete(&self, path: &str) -> Result<()> {
        tracing::debug!(path, "DELETE");
        let response = self.client.delete(self.url(path)).send().await.map_err(transport)?;
        Self::check_status(response).await.map(|_| ())
    }

    async fn check_status(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = error_message(&body);
        tracing::debug!(status = status.as_u16(), %message, "store returned an error");
        if status == StatusCode::NOT_FOUND {
            return Err(DesignerError::NotFound(message));
        }
        Err(DesignerError::Backend {
            status: status.as_u16(),
            message,
        })
    }

    async fn handle_response<T: DeserializeOwned>(response: Response) -> Result<T> {
        let response = Self::check_status(response).await?;
        let body = response.text().await.map_err(transport)?;
        serde_json::from_str(&body).map_err(|e| DesignerError::InvalidJson(e.to_string()))
    }
}

#[async_trait]
impl WorkflowBackend for HttpBackend {
    async fn login(&self, credentials: &Credentials) -> Result<Session> {
        self.post("/auth/login", credentials).await
    }

    async fn list_roles(&self) -> Result<Vec<Role>> {
        self.get("/api/roles").await
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        self.get("/api/users").await
    }

    async fn list_workflows(&self) -> Result<Vec<WorkflowSummary>> {
        self.get("/api/workflows").await
    }

    async fn get_workflow(&self, id: WorkflowId) -> Result<WorkflowDraft> {
        self.get(&format!("/api/workflows/{}", id)).await
    }

    async fn create_workflow(&self, meta: &WorkflowMeta) -> Result<WorkflowRecord> {
        self.post("/api/workflows", meta).await
    }

    async fn update_workflow(&self, id: WorkflowId, meta: &WorkflowMeta) -> Result<WorkflowRecord> {
        self.put(&format!("/api/workflows/{}", id), meta).await
    }

    async fn delete_workflow(&self, id: WorkflowId) -> Result<()> {
        self.delete(&format!("/api/workflows/{}", id)).await
    }

    async fn create_stage(&self, workflow: WorkflowId, stage: &StagePayload) -> Result<Stage> {
        self.post(&format!("/api/workflows/{}/stages", workflow), stage)
            .await
    }

    async fn update_stage(
        &self,
        workflow: WorkflowId,
        stage_id: StageId,
        stage: &StagePayload,
    ) -> Result<Stage> {
        self.put(&format!("/api/workflows/{}/stages/{}", workflow, stage_id), stage)
            .await
    }

    async fn delete_stage(&self, workflow: WorkflowId, stage_id: StageId) -> Result<()> {
        self.delete(&format!("/api/workflows/{}/stages/{}", workflow, stage_id))
            .await
    }
}
