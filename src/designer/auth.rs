//! Login against the auth endpoint

use crate::backend::{Credentials, WorkflowBackend};
use crate::domain::ValidationError;
use crate::errors::Result;
use crate::schemas::Session;

/// Authenticate, rejecting blank credentials before any request is made
pub async fn login<B: WorkflowBackend + ?Sized>(
    backend: &B,
    username: &str,
    password: &str,
) -> Result<Session> {
    if username.trim().is_empty() {
        return Err(ValidationError::MissingField { field: "Username" }.into());
    }
    if password.is_empty() {
        return Err(ValidationError::MissingField { field: "Password" }.into());
    }

    let credentials = Credentials {
        username: username.trim().to_string(),
        password: password.to_string(),
    };
    let session = backend
        .login(&credentials)
        .await
        .map_err(|e| e.during("log in"))?;
    tracing::info!(user = %session.user_id, roles = ?session.roles, "logged in");
    Ok(session)
}
