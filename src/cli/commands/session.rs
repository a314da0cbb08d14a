//! Session commands - login, logout, whoami

use std::path::Path;

use super::Project;
use crate::designer;
use crate::errors::{DesignerError, Result};
use crate::fs;

/// Log in against the auth endpoint and store the session
pub async fn login(
    cwd: Option<&Path>,
    username: &str,
    password: &str,
    role: Option<&str>,
) -> Result<()> {
    let project = Project::locate(cwd)?;
    let backend = project.backend()?;
    let mut session = designer::login(&backend, username, password).await?;

    if let Some(role) = role {
        session = session.with_selected_role(role).ok_or_else(|| {
            DesignerError::AccessDenied(format!("Role '{}' is not assigned to {}", role, username))
        })?;
    }

    session.logged_in_at = Some(chrono::Utc::now());
    fs::write_session(&project.root, &session)?;
    println!("Logged in as user {} ({})", session.user_id, session.roles.join(", "));
    Ok(())
}

pub async fn logout(cwd: Option<&Path>) -> Result<()> {
    let project = Project::locate(cwd)?;
    if fs::remove_session(&project.root)? {
        println!("Logged out");
    } else {
        println!("Not logged in");
    }
    Ok(())
}

pub async fn whoami(cwd: Option<&Path>) -> Result<()> {
    let project = Project::locate(cwd)?;
    let session = project.session()?;
    let caps = project.capabilities()?;

    println!("User:     {}", session.user_id);
    println!("Roles:    {}", session.roles.join(", "));
    if let Some(at) = session.logged_in_at {
        println!("Since:    {}", at.to_rfc3339());
    }
    println!(
        "Designer: {}",
        if caps.can_design() { "yes" } else { "no" }
    );
    Ok(())
}
