//! Delete command - Remove a workflow from the store

use std::path::Path;

use super::{parse_workflow_id, Project};
use crate::designer;
use crate::errors::Result;

pub async fn run(cwd: Option<&Path>, id: &str) -> Result<()> {
    let id = parse_workflow_id(id)?;
    let project = Project::locate(cwd)?;
    let caps = project.capabilities()?;

    designer::delete_workflow(&project.backend()?, &caps, id).await?;
    println!("Deleted workflow {}", id);
    Ok(())
}
