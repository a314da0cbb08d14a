//! Capability gate consulted at the start of every mutating operation

use std::collections::HashSet;

use crate::errors::{DesignerError, Result};
use crate::schemas::Session;

/// Role name that grants workflow design rights
pub const WORKFLOW_DESIGNER: &str = "workflow-designer";

/// The set of capabilities held by the current session.
#[derive(Debug, Clone, Default)]
pub struct Capabilities {
    granted: HashSet<String>,
    designer: String,
}

impl Capabilities {
    /// Capabilities derived from a role list, gating on the default designer role
    pub fn new<I, S>(roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Capabilities {
            granted: roles.into_iter().map(Into::into).collect(),
            designer: WORKFLOW_DESIGNER.to_string(),
        }
    }

    /// Capabilities for a logged-in session
    pub fn from_session(session: &Session) -> Self {
        Self::new(session.roles.iter().cloned())
    }

    /// A session with no capabilities
    pub fn none() -> Self {
        Self::new(Vec::<String>::new())
    }

    /// Use a different role name as the designer capability
    pub fn with_designer_role(mut self, role: impl Into<String>) -> Self {
        self.designer = role.into();
        self
    }

    pub fn has(&self, capability: &str) -> bool {
        self.granted.contains(capability)
    }

    /// Whether the session may create or edit workflows
    pub fn can_design(&self) -> bool {
        self.has(&self.designer)
    }

    /// Refuse `operation` unless the session may design workflows.
    pub fn require_designer(&self, operation: &str) -> Result<()> {
        if self.can_design() {
            return Ok(());
        }
        tracing::warn!(operation, "refused: missing {} capability", self.designer);
        Err(DesignerError::AccessDenied(format!(
            "Only Workflow Designers can {}.",
            operation
        )))
    }
}
