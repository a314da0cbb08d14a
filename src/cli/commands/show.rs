//! Show command - Display a workflow with resolved actors and transitions

use std::path::Path;

use super::{parse_workflow_id, print_json, Project};
use crate::backend::WorkflowBackend;
use crate::designer::fetch_catalog;
use crate::domain::summarize;
use crate::errors::Result;

/// Show details of a specific workflow
pub async fn run(cwd: Option<&Path>, id: &str, json: bool) -> Result<()> {
    let id = parse_workflow_id(id)?;
    let project = Project::locate(cwd)?;
    project.session()?;
    let backend = project.backend()?;

    let draft = backend
        .get_workflow(id)
        .await
        .map_err(|e| e.during("load workflow data"))?;
    let (catalog, warnings) = fetch_catalog(&backend).await;
    for warning in &warnings {
        eprintln!("Warning: {}", warning);
    }

    let summary = summarize(&draft, &catalog);
    if json {
        return print_json(&summary);
    }
    print!("{}", summary);
    Ok(())
}
