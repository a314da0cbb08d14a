//! In-process workflow store
//!
//! Behaves like the HTTP store: assigns ids, echoes stored stages back and
//! answers unknown ids with NotFound. Used by tests.

use std::collections::{BTreeMap, HashSet};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use super::{Credentials, StagePayload, WorkflowBackend};
use crate::errors::{DesignerError, Result};
use crate::schemas::{
    Action, ActionId, Role, Session, Stage, StageId, User, WorkflowDraft, WorkflowId,
    WorkflowMeta, WorkflowRecord, WorkflowSummary,
};

/// Store operations, for failure injection and call accounting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Login,
    ListRoles,
    ListUsers,
    ListWorkflows,
    GetWorkflow,
    CreateWorkflow,
    UpdateWorkflow,
    DeleteWorkflow,
    CreateStage,
    UpdateStage,
    DeleteStage,
}

#[derive(Debug, Default)]
struct State {
    workflows: BTreeMap<WorkflowId, WorkflowDraft>,
    roles: Vec<Role>,
    users: Vec<User>,
    accounts: Vec<(Credentials, Session)>,
    next_id: u64,
    failing: HashSet<Operation>,
    calls: Vec<Operation>,
    omit_workflow_id: bool,
}

impl State {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn workflow_mut(&mut self, id: WorkflowId) -> Result<&mut WorkflowDraft> {
        self.workflows
            .get_mut(&id)
            .ok_or_else(|| DesignerError::NotFound(format!("Workflow {} not found", id)))
    }

    /// Turn a payload into a stored stage, assigning ids
    fn store_stage(&mut self, workflow: WorkflowId, id: StageId, payload: &StagePayload) -> Stage {
        let actions = payload
            .actions
            .iter()
            .map(|a| Action {
                id: Some(ActionId(self.next_id())),
                stage_id: Some(id),
                name: a.name.clone(),
                description: a.description.clone(),
                result_type: a.result_type,
                specific_target: a.specific_target,
                required_count: a.required_count,
                ..Action::new()
            })
            .collect();

        Stage {
            id: Some(id),
            workflow_id: Some(workflow),
            seq_no: payload.seq_no,
            name: payload.name.clone(),
            description: payload.description.clone(),
            actor_type: payload.actor_type,
            role_id: payload.role_id,
            user_id: payload.user_id,
            actor_count: payload.actor_count,
            quorum: payload.quorum,
            conflict_check: payload.conflict_check != 0,
            documents_required: payload.documents_required != 0,
            document_count: payload.document_count,
            actions,
        }
    }
}

/// A [`WorkflowBackend`] held entirely in memory
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    state: Mutex<State>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_role(self, id: u64, name: &str) -> Self {
        self.lock().roles.push(Role {
            id: id.into(),
            name: name.to_string(),
        });
        self
    }

    pub fn with_user(self, id: u64, name: &str) -> Self {
        self.lock().users.push(User {
            id: id.into(),
            name: name.to_string(),
        });
        self
    }

    /// Register credentials that log in as `session`
    pub fn with_account(self, username: &str, password: &str, session: Session) -> Self {
        self.lock().accounts.push((
            Credentials {
                username: username.to_string(),
                password: password.to_string(),
            },
            session,
        ));
        self
    }

    /// Seed a persisted workflow; returns its id
    pub fn insert_workflow(&self, mut draft: WorkflowDraft) -> WorkflowId {
        let mut state = self.lock();
        let id = WorkflowId(state.next_id());
        draft.id = Some(id);
        state.workflows.insert(id, draft);
        id
    }

    /// Make every call to `operation` fail with a network error
    pub fn fail(&self, operation: Operation) {
        self.lock().failing.insert(operation);
    }

    pub fn recover(&self, operation: Operation) {
        self.lock().failing.remove(&operation);
    }

    /// Answer workflow creation without an id, like a misbehaving store
    pub fn omit_workflow_ids(&self) {
        self.lock().omit_workflow_id = true;
    }

    /// Every operation received so far, in order
    pub fn calls(&self) -> Vec<Operation> {
        self.lock().calls.clone()
    }

    pub fn call_count(&self, operation: Operation) -> usize {
        self.lock().calls.iter().filter(|c| **c == operation).count()
    }

    /// Snapshot of a stored workflow
    pub fn workflow(&self, id: WorkflowId) -> Option<WorkflowDraft> {
        self.lock().workflows.get(&id).cloned()
    }

    pub fn workflow_count(&self) -> usize {
        self.lock().workflows.len()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        // A poisoned lock only means another test thread panicked mid-call
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Record the call and apply failure injection
    fn enter(&self, operation: Operation) -> Result<MutexGuard<'_, State>> {
        let mut state = self.lock();
        state.calls.push(operation);
        if state.failing.contains(&operation) {
            return Err(DesignerError::Network(format!("{:?} unavailable", operation)));
        }
        Ok(state)
    }
}

#[async_trait]
impl WorkflowBackend for InMemoryBackend {
    async fn login(&self, credentials: &Credentials) -> Result<Session> {
        let state = self.enter(Operation::Login)?;
        state
            .accounts
            .iter()
            .find(|(c, _)| c.username == credentials.username && c.password == credentials.password)
            .map(|(_, session)| session.clone())
            .ok_or(DesignerError::Backend {
                status: 401,
                message: "Invalid username or password".to_string(),
            })
    }

    async fn list_roles(&self) -> Result<Vec<Role>> {
        Ok(self.enter(Operation::ListRoles)?.roles.clone())
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        Ok(self.enter(Operation::ListUsers)?.users.clone())
    }

    async fn list_workflows(&self) -> Result<Vec<WorkflowSummary>> {
        let state = self.enter(Operation::ListWorkflows)?;
        Ok(state
            .workflows
            .iter()
            .map(|(id, draft)| WorkflowSummary {
                id: *id,
                meta: draft.meta.clone(),
                stages: draft.stages.clone(),
            })
            .collect())
    }

    async fn get_workflow(&self, id: WorkflowId) -> Result<WorkflowDraft> {
        let mut state = self.enter(Operation::GetWorkflow)?;
        state.workflow_mut(id).map(|draft| draft.clone())
    }

    async fn create_workflow(&self, meta: &WorkflowMeta) -> Result<WorkflowRecord> {
        let mut state = self.enter(Operation::CreateWorkflow)?;
        let id = WorkflowId(state.next_id());
        let mut draft = WorkflowDraft::new(meta.clone());
        draft.id = Some(id);
        state.workflows.insert(id, draft);
        Ok(WorkflowRecord {
            id: (!state.omit_workflow_id).then_some(id),
            meta: meta.clone(),
        })
    }

    async fn update_workflow(&self, id: WorkflowId, meta: &WorkflowMeta) -> Result<WorkflowRecord> {
        let mut state = self.enter(Operation::UpdateWorkflow)?;
        let draft = state.workflow_mut(id)?;
        draft.meta = meta.clone();
        Ok(WorkflowRecord {
            id: Some(id),
            meta: meta.clone(),
        })
    }

    async fn delete_workflow(&self, id: WorkflowId) -> Result<()> {
        let mut state = self.enter(Operation::DeleteWorkflow)?;
        state
            .workflows
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DesignerError::NotFound(format!("Workflow {} not found", id)))
    }

    async fn create_stage(&self, workflow: WorkflowId, stage: &StagePayload) -> Result<Stage> {
        let mut state = self.enter(Operation::CreateStage)?;
        state.workflow_mut(workflow)?;
        let id = StageId(state.next_id());
        let stored = state.store_stage(workflow, id, stage);
        state.workflow_mut(workflow)?.stages.push(stored.clone());
        Ok(stored)
    }

    async fn update_stage(
        &self,
        workflow: WorkflowId,
        stage_id: StageId,
        stage: &StagePayload,
    ) -> Result<Stage> {
        let mut state = self.enter(Operation::UpdateStage)?;
        let existing: Vec<Option<ActionId>> = state
            .workflow_mut(workflow)?
            .stages
            .iter()
            .find(|s| s.id == Some(stage_id))
            .ok_or_else(|| DesignerError::NotFound(format!("Stage {} not found", stage_id)))?
            .actions
            .iter()
            .map(|a| a.id)
            .collect();

        // Actions keep their ids positionally; extra actions get new ones
        let mut stored = state.store_stage(workflow, stage_id, stage);
        for (action, id) in stored.actions.iter_mut().zip(existing) {
            action.id = id;
        }

        if let Some(slot) = state
            .workflow_mut(workflow)?
            .stages
            .iter_mut()
            .find(|s| s.id == Some(stage_id))
        {
            *slot = stored.clone();
        }
        Ok(stored)
    }

    async fn delete_stage(&self, workflow: WorkflowId, stage_id: StageId) -> Result<()> {
        let mut state = self.enter(Operation::DeleteStage)?;
        let draft = state.workflow_mut(workflow)?;
        let before = draft.stages.len();
        draft.stages.retain(|s| s.id != Some(stage_id));
        if draft.stages.len() == before {
            return Err(DesignerError::NotFound(format!("Stage {} not found", stage_id)));
        }
        draft.renumber();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::{ResultType, RoleId, UserId};

    fn payload(name: &str) -> StagePayload {
        let stage = Stage::for_role(name, "desc", RoleId(1))
            .with_action(Action::named("Done", ResultType::Complete));
        StagePayload::from(&stage)
    }

    #[tokio::test]
    async fn test_assigns_ids() {
        let backend = InMemoryBackend::new();
        let record = backend
            .create_workflow(&WorkflowMeta::new("A", "B"))
            .await
            .unwrap();
        let wf = record.id.unwrap();

        let stage = backend.create_stage(wf, &payload("One")).await.unwrap();
        assert!(stage.id.is_some());
        assert_eq!(stage.workflow_id, Some(wf));
        assert!(stage.actions[0].id.is_some());
        assert_eq!(stage.actions[0].stage_id, stage.id);

        let stored = backend.get_workflow(wf).await.unwrap();
        assert_eq!(stored.stages.len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_ids_are_not_found() {
        let backend = InMemoryBackend::new();
        assert!(matches!(
            backend.get_workflow(WorkflowId(5)).await,
            Err(DesignerError::NotFound(_))
        ));
        assert!(matches!(
            backend.create_stage(WorkflowId(5), &payload("x")).await,
            Err(DesignerError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_failure_injection_and_calls() {
        let backend = InMemoryBackend::new().with_role(1, "Manager");
        backend.fail(Operation::ListRoles);
        assert!(matches!(backend.list_roles().await, Err(DesignerError::Network(_))));

        backend.recover(Operation::ListRoles);
        assert_eq!(backend.list_roles().await.unwrap().len(), 1);
        assert_eq!(backend.call_count(Operation::ListRoles), 2);
    }

    #[tokio::test]
    async fn test_login() {
        let backend = InMemoryBackend::new().with_account(
            "dana",
            "pw",
            Session::new(UserId(3), vec!["workflow-designer".into()]),
        );
        let ok = backend
            .login(&Credentials {
                username: "dana".into(),
                password: "pw".into(),
            })
            .await
            .unwrap();
        assert_eq!(ok.user_id, UserId(3));

        let err = backend
            .login(&Credentials {
                username: "dana".into(),
                password: "nope".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DesignerError::Backend { status: 401, .. }));
    }

    #[tokio::test]
    async fn test_delete_stage_renumbers() {
        let backend = InMemoryBackend::new();
        let wf = backend
            .create_workflow(&WorkflowMeta::new("A", "B"))
            .await
            .unwrap()
            .id
            .unwrap();
        let mut ids = Vec::new();
        for (i, name) in ["One", "Two", "Three"].iter().enumerate() {
            let mut p = payload(name);
            p.seq_no = i as u32 + 1;
            ids.push(backend.create_stage(wf, &p).await.unwrap().id.unwrap());
        }

        backend.delete_stage(wf, ids[0]).await.unwrap();
        let stored = backend.workflow(wf).unwrap();
        let seqs: Vec<u32> = stored.stages.iter().map(|s| s.seq_no).collect();
        assert_eq!(seqs, vec![1, 2]);
        assert!(matches!(
            backend.delete_stage(wf, ids[0]).await,
            Err(DesignerError::NotFound(_))
        ));
    }
}
