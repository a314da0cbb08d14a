//! Catalog commands - roles and users available as actors

use std::path::Path;

use super::{print_json, Project};
use crate::backend::WorkflowBackend;
use crate::errors::Result;

pub async fn roles(cwd: Option<&Path>, json: bool) -> Result<()> {
    let project = Project::locate(cwd)?;
    project.session()?;
    let roles = project
        .backend()?
        .list_roles()
        .await
        .map_err(|e| e.during("fetch roles"))?;

    if json {
        return print_json(&roles);
    }
    for role in &roles {
        println!("{:>6}  {}", role.id, role.name);
    }
    Ok(())
}

pub async fn users(cwd: Option<&Path>, json: bool) -> Result<()> {
    let project = Project::locate(cwd)?;
    project.session()?;
    let users = project
        .backend()?
        .list_users()
        .await
        .map_err(|e| e.during("fetch users"))?;

    if json {
        return print_json(&users);
    }
    for user in &users {
        println!("{:>6}  {}", user.id, user.name);
    }
    Ok(())
}
