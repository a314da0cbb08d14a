//! File system utilities for the designer
//!
//! Provides path resolution and JSON file operations.

mod json;
mod paths;

pub use json::{
    read_config, read_draft, read_json, read_session, remove_session, write_config, write_draft,
    write_json, write_session,
};
pub use paths::{
    find_project_root, get_config_path, get_designer_dir, get_session_path, resolve_cwd,
    DESIGNER_DIR,
};
