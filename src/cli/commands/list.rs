//! List command - List workflows in the store

use std::path::Path;

use super::{print_json, Project};
use crate::designer;
use crate::errors::Result;
use crate::schemas::WorkflowSummary;

fn format_row(workflow: &WorkflowSummary) -> String {
    format!(
        "{:>6}  {:<8}  {:>3} stages  {}",
        workflow.id,
        workflow.meta.status.to_string(),
        workflow.stage_count(),
        workflow.meta.name
    )
}

/// List workflows
pub async fn run(cwd: Option<&Path>, json: bool) -> Result<()> {
    let project = Project::locate(cwd)?;
    project.session()?;
    let workflows = designer::list_workflows(&project.backend()?).await?;

    if json {
        return print_json(&workflows);
    }
    if workflows.is_empty() {
        println!("No workflows found");
        return Ok(());
    }
    for workflow in &workflows {
        println!("{}", format_row(workflow));
    }
    Ok(())
}
