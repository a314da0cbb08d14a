//! Apply command - Create a workflow from a draft file

use std::path::Path;

use super::Project;
use crate::designer;
use crate::errors::Result;
use crate::fs;

pub async fn run(cwd: Option<&Path>, file: &Path) -> Result<()> {
    let draft = fs::read_draft(file)?;
    let project = Project::locate(cwd)?;
    let caps = project.capabilities()?;

    let id = designer::apply_draft(project.backend()?, caps, &draft).await?;
    println!(
        "Created workflow {} '{}' with {} stages",
        id,
        draft.meta.name,
        draft.stages.len()
    );
    Ok(())
}
