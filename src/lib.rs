//! wfdesigner - Author multi-stage approval workflows
//!
//! This library provides the core functionality for the wfd CLI, including:
//! - Schema definitions for workflows, stages, actions, catalogs and sessions
//! - Domain logic: the stage editor, validation rules and transition resolution
//! - Store collaborators (HTTP and in-memory)
//! - The designer session with its incremental commit protocol
//! - File system utilities for project config, sessions and draft files

pub mod backend;
pub mod cli;
pub mod config;
pub mod designer;
pub mod domain;
pub mod errors;
pub mod fs;
pub mod schemas;

// Re-export commonly used types
pub use designer::Designer;
pub use errors::{DesignerError, Result};
pub use schemas::{Action, Config, Stage, WorkflowDraft};
