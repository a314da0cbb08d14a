//! CLI command implementations

pub mod apply;
pub mod catalog;
pub mod copy;
pub mod delete;
pub mod init;
pub mod list;
pub mod session;
pub mod show;
pub mod validate;

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::backend::HttpBackend;
use crate::config::load_config;
use crate::domain::Capabilities;
use crate::errors::{DesignerError, Result};
use crate::fs;
use crate::schemas::{Config, Session, WorkflowId};

/// A located project with its loaded config
pub struct Project {
    pub root: PathBuf,
    pub config: Config,
}

impl Project {
    /// Find the project above `cwd` and load its config
    pub fn locate(cwd: Option<&Path>) -> Result<Self> {
        let root = fs::find_project_root(&fs::resolve_cwd(cwd))?;
        let config = load_config(&root)?;
        tracing::debug!(root = %root.display(), api = %config.api_base_url, "using project");
        Ok(Project { root, config })
    }

    pub fn backend(&self) -> Result<HttpBackend> {
        HttpBackend::from_config(&self.config)
    }

    pub fn session(&self) -> Result<Session> {
        fs::read_session(&self.root)
    }

    /// Capabilities of the stored session, gated on the configured designer role
    pub fn capabilities(&self) -> Result<Capabilities> {
        let session = self.session()?;
        Ok(Capabilities::from_session(&session)
            .with_designer_role(self.config.designer_capability.clone()))
    }
}

pub(crate) fn parse_workflow_id(id: &str) -> Result<WorkflowId> {
    id.trim()
        .parse::<WorkflowId>()
        .map_err(|e| DesignerError::wrap(e, format!("Invalid workflow ID '{}'", id)))
}

pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| DesignerError::InvalidJson(e.to_string()))?;
    println!("{}", json);
    Ok(())
}
