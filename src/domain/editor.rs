//! Stage/action editor state machine
//!
//! The editor owns a single buffer. It moves between three modes:
//!
//! ```text
//! Idle --begin_new--> ComposingNew ----commit----> Idle
//! Idle --begin_edit--> ComposingEdit(i) --commit--> Idle
//! ```
//!
//! Committing is split in two halves so the caller can round-trip the stage
//! through the store in between: `prepare_commit` validates and produces the
//! stage to send, `complete_commit` applies whatever the store returned.

use crate::errors::{DesignerError, Result};
use crate::schemas::{
    Action, ActorType, Quorum, ResultType, RoleId, Stage, StageId, UserId, WorkflowDraft,
};

use super::validation::validate_stage_buffer;

/// Current editor mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    /// No stage being authored
    Idle,
    /// Blank buffer for a stage that will be appended
    ComposingNew,
    /// Buffer pre-filled from `stages[index]`
    ComposingEdit { index: usize },
}

/// A single stage-level edit
#[derive(Debug, Clone, PartialEq)]
pub enum StageField {
    Name(String),
    Description(String),
    ActorType(ActorType),
    Role(Option<RoleId>),
    User(Option<UserId>),
    ActorCount(u32),
    Quorum(Quorum),
    ConflictCheck(bool),
    DocumentsRequired(bool),
    DocumentCount(u32),
}

/// A single action-level edit
#[derive(Debug, Clone, PartialEq)]
pub enum ActionField {
    Name(String),
    Description(Option<String>),
    ResultType(ResultType),
    SpecificTarget(Option<StageId>),
    RequiredCount(u32),
}

/// Where a validated buffer lands in the draft
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitTarget {
    Append,
    Replace { index: usize },
}

/// A validated buffer ready to be sent to the store
#[derive(Debug, Clone, PartialEq)]
pub struct PendingCommit {
    pub target: CommitTarget,
    pub stage: Stage,
}

/// The add/edit-in-place buffer for one stage
#[derive(Debug, Clone)]
pub struct StageEditor {
    mode: EditorMode,
    buffer: Stage,
}

impl Default for StageEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl StageEditor {
    pub fn new() -> Self {
        StageEditor {
            mode: EditorMode::Idle,
            buffer: Stage::new(),
        }
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn is_composing(&self) -> bool {
        self.mode != EditorMode::Idle
    }

    /// The stage being authored, if any
    pub fn buffer(&self) -> Option<&Stage> {
        self.is_composing().then_some(&self.buffer)
    }

    /// Start a blank stage, discarding any buffer in progress.
    pub fn begin_new(&mut self) {
        self.buffer = Stage::new();
        self.mode = EditorMode::ComposingNew;
    }

    /// Load `stages[index]` into the buffer.
    ///
    /// Only stages that have round-tripped through the store (and so carry an
    /// id) can be edited. Actions get fresh temporary ids.
    pub fn begin_edit(&mut self, stages: &[Stage], index: usize) -> Result<()> {
        let stage = stages
            .get(index)
            .filter(|s| s.id.is_some())
            .ok_or(DesignerError::InvalidIndex {
                index,
                len: stages.len(),
            })?;

        self.buffer = stage.clone().with_fresh_temp_ids();
        self.mode = EditorMode::ComposingEdit { index };
        Ok(())
    }

    /// Drop the buffer and return to idle.
    pub fn cancel(&mut self) {
        self.buffer = Stage::new();
        self.mode = EditorMode::Idle;
    }

    fn composing_buffer(&mut self) -> Result<&mut Stage> {
        if !self.is_composing() {
            return Err(DesignerError::NotComposing);
        }
        Ok(&mut self.buffer)
    }

    pub fn update_stage(&mut self, field: StageField) -> Result<()> {
        let buffer = self.composing_buffer()?;
        match field {
            StageField::Name(name) => buffer.name = name,
            StageField::Description(description) => buffer.description = description,
            StageField::ActorType(actor_type) => buffer.actor_type = actor_type,
            StageField::Role(role) => buffer.role_id = role,
            StageField::User(user) => buffer.user_id = user,
            StageField::ActorCount(count) => buffer.actor_count = count,
            StageField::Quorum(quorum) => buffer.quorum = quorum,
            StageField::ConflictCheck(flag) => buffer.conflict_check = flag,
            StageField::DocumentsRequired(flag) => buffer.documents_required = flag,
            StageField::DocumentCount(count) => buffer.document_count = count,
        }
        Ok(())
    }

    /// Append a blank action; returns its index.
    pub fn add_action(&mut self) -> Result<usize> {
        let buffer = self.composing_buffer()?;
        buffer.actions.push(Action::new());
        Ok(buffer.actions.len() - 1)
    }

    /// Edit one field of the action at `index`.
    ///
    /// Switching the result type away from `specific` clears the target.
    pub fn update_action(&mut self, index: usize, field: ActionField) -> Result<()> {
        let buffer = self.composing_buffer()?;
        let len = buffer.actions.len();
        let action = buffer
            .actions
            .get_mut(index)
            .ok_or(DesignerError::InvalidIndex { index, len })?;

        match field {
            ActionField::Name(name) => action.name = name,
            ActionField::Description(description) => action.description = description,
            ActionField::ResultType(result_type) => {
                action.result_type = result_type;
                if result_type != ResultType::Specific {
                    action.specific_target = None;
                }
            }
            ActionField::SpecificTarget(target) => action.specific_target = target,
            ActionField::RequiredCount(count) => action.required_count = count,
        }
        Ok(())
    }

    pub fn remove_action(&mut self, index: usize) -> Result<Action> {
        let buffer = self.composing_buffer()?;
        if index >= buffer.actions.len() {
            return Err(DesignerError::InvalidIndex {
                index,
                len: buffer.actions.len(),
            });
        }
        Ok(buffer.actions.remove(index))
    }

    /// Validate the buffer against the committed stages.
    ///
    /// On failure the buffer is left untouched.
    pub fn prepare_commit(&self, committed: &[Stage]) -> Result<PendingCommit> {
        let (target, mut stage) = match self.mode {
            EditorMode::Idle => return Err(DesignerError::NotComposing),
            EditorMode::ComposingNew => {
                let mut stage = self.buffer.clone();
                stage.id = None;
                stage.seq_no = (committed.len() + 1) as u32;
                (CommitTarget::Append, stage)
            }
            EditorMode::ComposingEdit { index } => {
                let original = committed
                    .get(index)
                    .filter(|s| s.id.is_some() && s.id == self.buffer.id)
                    .ok_or(DesignerError::InvalidIndex {
                        index,
                        len: committed.len(),
                    })?;
                let mut stage = self.buffer.clone();
                stage.seq_no = original.seq_no;
                (CommitTarget::Replace { index }, stage)
            }
        };

        validate_stage_buffer(&stage, committed)?;

        if stage.actor_type == ActorType::User {
            stage.role_id = None;
        }
        Ok(PendingCommit { target, stage })
    }

    /// Apply a stored stage to the draft, reset to idle and renumber.
    pub fn complete_commit(
        &mut self,
        draft: &mut WorkflowDraft,
        target: CommitTarget,
        stored: Stage,
    ) -> Result<()> {
        match target {
            CommitTarget::Append => draft.stages.push(stored),
            CommitTarget::Replace { index } => {
                let len = draft.stages.len();
                let slot = draft
                    .stages
                    .get_mut(index)
                    .ok_or(DesignerError::InvalidIndex { index, len })?;
                *slot = stored;
            }
        }
        draft.renumber();
        self.cancel();
        Ok(())
    }

    /// Commit the buffer straight into the draft without a store round trip.
    pub fn commit_stage(&mut self, draft: &mut WorkflowDraft) -> Result<()> {
        let pending = self.prepare_commit(&draft.stages)?;
        self.complete_commit(draft, pending.target, pending.stage)
    }

    /// Delete `stages[index]` and renumber the rest.
    ///
    /// `specific` targets elsewhere that pointed at the removed stage are left
    /// as they are; the next validation pass reports them.
    pub fn remove_stage(&mut self, draft: &mut WorkflowDraft, index: usize) -> Result<Stage> {
        if index >= draft.stages.len() {
            return Err(DesignerError::InvalidIndex {
                index,
                len: draft.stages.len(),
            });
        }
        let removed = draft.stages.remove(index);
        draft.renumber();

        if let EditorMode::ComposingEdit { index: editing } = self.mode {
            if editing == index {
                self.cancel();
            } else if editing > index {
                self.mode = EditorMode::ComposingEdit { index: editing - 1 };
            }
        }
        Ok(removed)
    }
}
