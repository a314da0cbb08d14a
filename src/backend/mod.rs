//! Workflow store collaborators
//!
//! The designer talks to the store only through [`WorkflowBackend`]. Stages are
//! written one request at a time and always carry their full action list;
//! actions have no endpoint of their own.

mod http;
mod memory;

pub use http::HttpBackend;
pub use memory::{InMemoryBackend, Operation};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::schemas::{
    Quorum, ResultType, Role, RoleId, Session, Stage, StageId, User, UserId, WorkflowDraft,
    WorkflowId, WorkflowMeta, WorkflowRecord, WorkflowSummary,
};
use crate::schemas::ActorType;

/// Username/password pair sent to the auth endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// An action as sent inside a stage write
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionPayload {
    #[serde(rename = "actionName")]
    pub name: String,
    #[serde(rename = "actionDesc")]
    pub description: Option<String>,
    #[serde(rename = "nextStageType")]
    pub result_type: ResultType,
    #[serde(rename = "nextStageId")]
    pub specific_target: Option<StageId>,
    pub required_count: u32,
}

/// Body of a stage create/update request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StagePayload {
    pub seq_no: u32,
    #[serde(rename = "stageName")]
    pub name: String,
    #[serde(rename = "stageDesc")]
    pub description: String,
    #[serde(rename = "noOfUploads")]
    pub document_count: u32,
    pub actor_type: ActorType,
    pub role_id: Option<RoleId>,
    pub user_id: Option<UserId>,
    pub actor_count: u32,
    #[serde(rename = "anyAllFlag")]
    pub quorum: Quorum,
    pub conflict_check: u8,
    #[serde(rename = "documentRequired")]
    pub documents_required: u8,
    pub actions: Vec<ActionPayload>,
}

impl From<&Stage> for StagePayload {
    fn from(stage: &Stage) -> Self {
        StagePayload {
            seq_no: stage.seq_no,
            name: stage.name.clone(),
            description: stage.description.clone(),
            document_count: stage.document_count,
            actor_type: stage.actor_type,
            role_id: match stage.actor_type {
                ActorType::Role => stage.role_id,
                ActorType::User => None,
            },
            user_id: match stage.actor_type {
                ActorType::Role => None,
                ActorType::User => stage.user_id,
            },
            actor_count: stage.actor_count,
            quorum: stage.quorum,
            conflict_check: u8::from(stage.conflict_check),
            documents_required: u8::from(stage.documents_required),
            actions: stage
                .actions
                .iter()
                .map(|a| ActionPayload {
                    name: a.name.clone(),
                    description: a.description.clone().filter(|d| !d.is_empty()),
                    result_type: a.result_type,
                    specific_target: match a.result_type {
                        ResultType::Specific => a.specific_target,
                        _ => None,
                    },
                    required_count: a.required_count.max(1),
                })
                .collect(),
        }
    }
}

/// Request/response operations offered by the workflow store and auth endpoint
#[async_trait]
pub trait WorkflowBackend: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> Result<Session>;

    async fn list_roles(&self) -> Result<Vec<Role>>;

    async fn list_users(&self) -> Result<Vec<User>>;

    async fn list_workflows(&self) -> Result<Vec<WorkflowSummary>>;

    /// Full hydration including stages and actions
    async fn get_workflow(&self, id: WorkflowId) -> Result<WorkflowDraft>;

    async fn create_workflow(&self, meta: &WorkflowMeta) -> Result<WorkflowRecord>;

    async fn update_workflow(&self, id: WorkflowId, meta: &WorkflowMeta) -> Result<WorkflowRecord>;

    async fn delete_workflow(&self, id: WorkflowId) -> Result<()>;

    async fn create_stage(&self, workflow: WorkflowId, stage: &StagePayload) -> Result<Stage>;

    async fn update_stage(
        &self,
        workflow: WorkflowId,
        stage_id: StageId,
        stage: &StagePayload,
    ) -> Result<Stage>;

    async fn delete_stage(&self, workflow: WorkflowId, stage_id: StageId) -> Result<()>;
}

#[async_trait]
impl<T: WorkflowBackend + ?Sized> WorkflowBackend for std::sync::Arc<T> {
    async fn login(&self, credentials: &Credentials) -> Result<Session> {
        (**self).login(credentials).await
    }

    async fn list_roles(&self) -> Result<Vec<Role>> {
        (**self).list_roles().await
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        (**self).list_users().await
    }

    async fn list_workflows(&self) -> Result<Vec<WorkflowSummary>> {
        (**self).list_workflows().await
    }

    async fn get_workflow(&self, id: WorkflowId) -> Result<WorkflowDraft> {
        (**self).get_workflow(id).await
    }

    async fn create_workflow(&self, meta: &WorkflowMeta) -> Result<WorkflowRecord> {
        (**self).create_workflow(meta).await
    }

    async fn update_workflow(&self, id: WorkflowId, meta: &WorkflowMeta) -> Result<WorkflowRecord> {
        (**self).update_workflow(id, meta).await
    }

    async fn delete_workflow(&self, id: WorkflowId) -> Result<()> {
        (**self).delete_workflow(id).await
    }

    async fn create_stage(&self, workflow: WorkflowId, stage: &StagePayload) -> Result<Stage> {
        (**self).create_stage(workflow, stage).await
    }

    async fn update_stage(
        &self,
        workflow: WorkflowId,
        stage_id: StageId,
        stage: &StagePayload,
    ) -> Result<Stage> {
        (**self).update_stage(workflow, stage_id, stage).await
    }

    async fn delete_stage(&self, workflow: WorkflowId, stage_id: StageId) -> Result<()> {
        (**self).delete_stage(workflow, stage_id).await
    }
}
