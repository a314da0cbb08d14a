//! Schema types for the workflow designer
//!
//! Field names follow the workflow store's JSON so these types go on the wire as-is.

mod action;
mod catalog;
mod config;
mod ids;
mod session;
mod stage;
mod workflow;

pub use action::{new_temp_id, Action, ResultType};
pub use catalog::{Catalog, Role, User, NOT_APPLICABLE};
pub use config::Config;
pub use ids::{ActionId, RoleId, StageId, UserId, WorkflowId};
pub use session::Session;
pub use stage::{ActorRef, ActorType, Quorum, Stage};
pub use workflow::{WorkflowDraft, WorkflowMeta, WorkflowRecord, WorkflowStatus, WorkflowSummary};
