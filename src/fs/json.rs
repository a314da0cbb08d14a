//! JSON file operations with schema validation
//!
//! Provides functions to read and write JSON files with serde validation.

use std::fs;
use std::io::Write;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::{DesignerError, Result};
use crate::schemas::{Config, Session, WorkflowDraft};

use super::paths::{get_config_path, get_session_path};

/// Read and deserialize a JSON file.
///
/// # Errors
/// * `FileNotFound` - If the file does not exist
/// * `InvalidJson` - If the file contains invalid JSON or does not match the schema
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            DesignerError::FileNotFound(path.display().to_string())
        } else {
            DesignerError::Io(e)
        }
    })?;

    serde_json::from_str(&content).map_err(|e| {
        DesignerError::InvalidJson(format!("{}: {}", path.display(), e))
    })
}

/// Write a value to a JSON file with pretty formatting.
///
/// Uses atomic write (write to temp file, then rename) to avoid partial writes.
pub fn write_json<T: Serialize>(path: &Path, data: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(data)
        .map_err(|e| DesignerError::InvalidJson(e.to_string()))?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let temp_path = path.with_extension("json.tmp");
    let mut file = fs::File::create(&temp_path)?;
    file.write_all(content.as_bytes())?;
    file.write_all(b"\n")?;
    file.sync_all()?;
    drop(file);

    fs::rename(&temp_path, path)?;

    Ok(())
}

/// Read the config.json file for a project.
///
/// Returns the default config if the file doesn't exist.
pub fn read_config(root: &Path) -> Result<Config> {
    let path = get_config_path(root);
    if !path.exists() {
        return Ok(Config::default());
    }
    read_json(&path)
}

pub fn write_config(root: &Path, config: &Config) -> Result<()> {
    write_json(&get_config_path(root), config)
}

/// Read the stored login session.
///
/// # Errors
/// * `NotLoggedIn` - If no session has been stored
pub fn read_session(root: &Path) -> Result<Session> {
    match read_json(&get_session_path(root)) {
        Err(DesignerError::FileNotFound(_)) => Err(DesignerError::NotLoggedIn),
        other => other,
    }
}

pub fn write_session(root: &Path, session: &Session) -> Result<()> {
    write_json(&get_session_path(root), session)
}

/// Remove the stored session. Returns whether one existed.
pub fn remove_session(root: &Path) -> Result<bool> {
    match fs::remove_file(get_session_path(root)) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}

/// Read a workflow draft file (store JSON shape).
pub fn read_draft(path: &Path) -> Result<WorkflowDraft> {
    read_json(path)
}

pub fn write_draft(path: &Path, draft: &WorkflowDraft) -> Result<()> {
    write_json(path, draft)
}
