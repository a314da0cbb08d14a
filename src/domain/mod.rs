//! Domain logic for workflow drafts: editing, validation and transitions

mod capability;
mod editor;
mod summary;
mod transitions;
mod validation;


pub use capability::{Capabilities, WORKFLOW_DESIGNER};
pub use editor::{ActionField, CommitTarget, EditorMode, PendingCommit, StageEditor, StageField};
pub use summary::{summarize, ActionSummary, ReviewSummary, StageSummary};
pub use transitions::{outgoing, resolve_next, InvalidTransition, Transition};
pub use validation::{
    validate_actor_in_catalog, validate_draft, validate_stage_buffer, validate_stage_list,
    validate_workflow_meta, ValidationError, ValidationResult,
};
