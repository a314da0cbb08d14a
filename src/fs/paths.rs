//! Path resolution utilities for the designer
//!
//! Provides functions to locate the project root and construct paths
//! to the files kept under `.wfdesigner`.

use std::path::{Path, PathBuf};

use crate::errors::{DesignerError, Result};

/// Name of the per-project state directory
pub const DESIGNER_DIR: &str = ".wfdesigner";

/// Find the project root containing a .wfdesigner directory.
///
/// Walks up the directory tree from the starting directory.
///
/// # Errors
/// * `ProjectNotFound` - If no directory on the way up contains .wfdesigner
pub fn find_project_root(start_cwd: &Path) -> Result<PathBuf> {
    let mut current = start_cwd
        .canonicalize()
        .map_err(|e| DesignerError::ProjectNotFound(format!("Cannot resolve path: {}", e)))?;

    loop {
        if current.join(DESIGNER_DIR).is_dir() {
            return Ok(current);
        }

        match current.parent() {
            Some(parent) if parent != current => {
                current = parent.to_path_buf();
            }
            _ => {
                return Err(DesignerError::ProjectNotFound(format!(
                    "Could not find a {} directory; run `wfd init` first",
                    DESIGNER_DIR
                )));
            }
        }
    }
}

/// Resolve the current working directory, optionally using an override.
pub fn resolve_cwd(cwd_option: Option<&Path>) -> PathBuf {
    match cwd_option {
        Some(path) => path.to_path_buf(),
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    }
}

/// Get the path to the .wfdesigner directory.
pub fn get_designer_dir(root: &Path) -> PathBuf {
    root.join(DESIGNER_DIR)
}

/// Get the path to the config.json file.
pub fn get_config_path(root: &Path) -> PathBuf {
    get_designer_dir(root).join("config.json")
}

/// Get the path to the session.json file written by `wfd login`.
pub fn get_session_path(root: &Path) -> PathBuf {
    get_designer_dir(root).join("session.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_project() -> TempDir {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join(DESIGNER_DIR)).unwrap();
        temp
    }

    #[test]
    fn test_find_project_root_from_root() {
        let temp = setup_project();
        let root = find_project_root(temp.path()).unwrap();
        assert_eq!(root.canonicalize().unwrap(), temp.path().canonicalize().unwrap());
    }

    #[test]
    fn test_find_project_root_from_subdir() {
        let temp = setup_project();
        let subdir = temp.path().join("flows").join("drafts");
        std::fs::create_dir_all(&subdir).unwrap();

        let root = find_project_root(&subdir).unwrap();
        assert_eq!(root.canonicalize().unwrap(), temp.path().canonicalize().unwrap());
    }

    #[test]
    fn test_find_project_root_ignores_plain_file() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(DESIGNER_DIR), "").unwrap();

        let result = find_project_root(temp.path());
        assert!(matches!(result, Err(DesignerError::ProjectNotFound(_))));
    }

    #[test]
    fn test_find_project_root_missing_path() {
        let temp = TempDir::new().unwrap();
        let result = find_project_root(&temp.path().join("gone"));
        assert!(result.unwrap_err().to_string().contains("Cannot resolve path"));
    }

    #[test]
    fn test_paths() {
        let root = PathBuf::from("/project");
        assert_eq!(get_designer_dir(&root), PathBuf::from("/project/.wfdesigner"));
        assert_eq!(get_config_path(&root), PathBuf::from("/project/.wfdesigner/config.json"));
        assert_eq!(get_session_path(&root), PathBuf::from("/project/.wfdesigner/session.json"));
    }

    #[test]
    fn test_resolve_cwd_with_override() {
        let path = PathBuf::from("/custom/path");
        let resolved = resolve_cwd(Some(&path));
        assert_eq!(resolved, path);
    }

    #[test]
    fn test_resolve_cwd_without_override() {
        let resolved = resolve_cwd(None);
        assert!(!resolved.as_os_str().is_empty());
    }
}
