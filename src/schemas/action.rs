//! Action schema - A decision available at a stage

use serde::{Deserialize, Serialize};

use super::{ActionId, StageId};

/// Where an action sends the workflow once it is taken
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultType {
    /// The following stage in list order
    Next,
    /// The preceding stage in list order
    Prev,
    /// Terminal; the workflow finishes
    Complete,
    /// A stage chosen by id
    Specific,
    /// A value the store sent that this client does not recognise
    #[serde(other)]
    Unknown,
}

impl ResultType {
    pub fn is_known(self) -> bool {
        self != ResultType::Unknown
    }
}

impl Default for ResultType {
    fn default() -> Self {
        ResultType::Next
    }
}

impl std::fmt::Display for ResultType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResultType::Next => write!(f, "next"),
            ResultType::Prev => write!(f, "prev"),
            ResultType::Complete => write!(f, "complete"),
            ResultType::Specific => write!(f, "specific"),
            ResultType::Unknown => write!(f, "unknown"),
        }
    }
}

impl std::str::FromStr for ResultType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "next" => Ok(ResultType::Next),
            "prev" => Ok(ResultType::Prev),
            "complete" => Ok(ResultType::Complete),
            "specific" => Ok(ResultType::Specific),
            _ => Err(format!("Unknown result type: {}", s)),
        }
    }
}

/// Generate a client-side identifier used until the store assigns one.
pub fn new_temp_id() -> String {
    format!("action-{}", uuid::Uuid::new_v4())
}

fn default_required_count() -> u32 {
    1
}

/// An action owned by a stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    /// Store-assigned identifier (None until persisted)
    #[serde(rename = "idwfdStagesActions", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ActionId>,

    /// Owning stage, as reported by the store
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage_id: Option<StageId>,

    /// Client-side identifier for stable list rendering; never sent
    #[serde(skip, default = "new_temp_id")]
    pub temp_id: String,

    #[serde(rename = "actionName")]
    pub name: String,

    #[serde(rename = "actionDesc", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "nextStageType", default)]
    pub result_type: ResultType,

    /// Target stage, required iff `result_type` is `Specific`
    #[serde(rename = "nextStageId", default, skip_serializing_if = "Option::is_none")]
    pub specific_target: Option<StageId>,

    /// How many actors must take this action; 1..=actor_count
    #[serde(default = "default_required_count")]
    pub required_count: u32,
}

impl Action {
    /// Create a blank action as the editor adds it
    pub fn new() -> Self {
        Action {
            id: None,
            stage_id: None,
            temp_id: new_temp_id(),
            name: String::new(),
            description: None,
            result_type: ResultType::Next,
            specific_target: None,
            required_count: 1,
        }
    }

    /// Create a named action with the given result type
    pub fn named(name: impl Into<String>, result_type: ResultType) -> Self {
        Action {
            name: name.into(),
            result_type,
            ..Action::new()
        }
    }

    // ===== BUILDER METHODS =====

    pub fn with_target(mut self, target: StageId) -> Self {
        self.specific_target = Some(target);
        self
    }

    pub fn with_required_count(mut self, count: u32) -> Self {
        self.required_count = count;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Return a copy carrying a freshly generated temporary id
    pub fn with_fresh_temp_id(mut self) -> Self {
        self.temp_id = new_temp_id();
        self
    }

    /// Compare every field except the temporary identifier
    pub fn same_definition(&self, other: &Action) -> bool {
        self.id == other.id
            && self.stage_id == other.stage_id
            && self.name == other.name
            && self.description == other.description
            && self.result_type == other.result_type
            && self.specific_target == other.specific_target
            && self.required_count == other.required_count
    }
}

impl Default for Action {
    fn default() -> Self {
        Self::new()
    }
}
