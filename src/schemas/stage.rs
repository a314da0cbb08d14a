//! Stage schema - One step of a workflow and the actions available in it

use serde::{Deserialize, Deserializer, Serialize};

use super::{Action, RoleId, StageId, UserId, WorkflowId};

/// Who acts at a stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ActorType {
    /// Anyone holding a catalog role
    #[default]
    Role,
    /// One specific user
    User,
}

impl std::fmt::Display for ActorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActorType::Role => write!(f, "role"),
            ActorType::User => write!(f, "user"),
        }
    }
}

impl std::str::FromStr for ActorType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "role" => Ok(ActorType::Role),
            "user" => Ok(ActorType::User),
            _ => Err(format!("Actor type must be either \"role\" or \"user\", got: {}", s)),
        }
    }
}

/// Whether one or all assigned actors must act
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Quorum {
    #[default]
    Any,
    All,
}

impl std::fmt::Display for Quorum {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Quorum::Any => write!(f, "any"),
            Quorum::All => write!(f, "all"),
        }
    }
}

impl std::str::FromStr for Quorum {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "any" => Ok(Quorum::Any),
            "all" => Ok(Quorum::All),
            _ => Err(format!("Any/All flag must be either \"any\" or \"all\", got: {}", s)),
        }
    }
}

/// The actor a stage is assigned to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorRef {
    Role(RoleId),
    User(UserId),
}

/// The store encodes booleans as 0/1.
mod flag {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(u8::from(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Flag {
            Bool(bool),
            Int(i64),
        }

        Ok(match Option::<Flag>::deserialize(deserializer)? {
            Some(Flag::Bool(b)) => b,
            Some(Flag::Int(n)) => n != 0,
            None => false,
        })
    }
}

/// Accept `null` where a list is expected.
pub(crate) fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

fn default_actor_count() -> u32 {
    1
}

/// A workflow stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stage {
    /// Store-assigned identifier (None until persisted)
    #[serde(rename = "idwfdStages", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<StageId>,

    #[serde(rename = "wfId", default, skip_serializing_if = "Option::is_none")]
    pub workflow_id: Option<WorkflowId>,

    /// 1-based position in the workflow
    #[serde(default)]
    pub seq_no: u32,

    #[serde(rename = "stageName")]
    pub name: String,

    #[serde(rename = "stageDesc", default)]
    pub description: String,

    #[serde(default)]
    pub actor_type: ActorType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_id: Option<RoleId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,

    #[serde(default = "default_actor_count")]
    pub actor_count: u32,

    #[serde(rename = "anyAllFlag", default)]
    pub quorum: Quorum,

    #[serde(with = "flag", default)]
    pub conflict_check: bool,

    #[serde(rename = "documentRequired", with = "flag", default)]
    pub documents_required: bool,

    #[serde(rename = "noOfUploads", default)]
    pub document_count: u32,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub actions: Vec<Action>,
}

impl Stage {
    /// Create a blank stage with editor defaults
    pub fn new() -> Self {
        Stage {
            id: None,
            workflow_id: None,
            seq_no: 0,
            name: String::new(),
            description: String::new(),
            actor_type: ActorType::Role,
            role_id: None,
            user_id: None,
            actor_count: 1,
            quorum: Quorum::Any,
            conflict_check: false,
            documents_required: false,
            document_count: 0,
            actions: Vec::new(),
        }
    }

    /// Create a named stage assigned to a role
    pub fn for_role(name: impl Into<String>, description: impl Into<String>, role: RoleId) -> Self {
        Stage {
            name: name.into(),
            description: description.into(),
            role_id: Some(role),
            ..Stage::new()
        }
    }

    /// Create a named stage assigned to a user
    pub fn for_user(name: impl Into<String>, description: impl Into<String>, user: UserId) -> Self {
        Stage {
            name: name.into(),
            description: description.into(),
            actor_type: ActorType::User,
            user_id: Some(user),
            ..Stage::new()
        }
    }

    // ===== BUILDER METHODS =====

    pub fn with_id(mut self, id: StageId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_actor_count(mut self, count: u32) -> Self {
        self.actor_count = count;
        self
    }

    pub fn with_documents(mut self, count: u32) -> Self {
        self.documents_required = count > 0;
        self.document_count = count;
        self
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    /// The assigned actor, if one has been chosen for the current actor type
    pub fn actor_ref(&self) -> Option<ActorRef> {
        match self.actor_type {
            ActorType::Role => self.role_id.map(ActorRef::Role),
            ActorType::User => self.user_id.map(ActorRef::User),
        }
    }

    /// Whether any action in this stage completes the workflow
    pub fn has_complete_action(&self) -> bool {
        self.actions
            .iter()
            .any(|a| a.result_type == super::ResultType::Complete)
    }

    /// Return a copy whose actions carry freshly generated temporary ids
    pub fn with_fresh_temp_ids(mut self) -> Self {
        self.actions = self
            .actions
            .into_iter()
            .map(Action::with_fresh_temp_id)
            .collect();
        self
    }

    /// Compare every field, ignoring the actions' temporary identifiers
    pub fn same_definition(&self, other: &Stage) -> bool {
        let mut left = self.clone();
        let mut right = other.clone();
        let left_actions = std::mem::take(&mut left.actions);
        let right_actions = std::mem::take(&mut right.actions);

        left == right
            && left_actions.len() == right_actions.len()
            && left_actions
                .iter()
                .zip(&right_actions)
                .all(|(a, b)| a.same_definition(b))
    }
}

impl Default for Stage {
    fn default() -> Self {
        Self::new()
    }
}
