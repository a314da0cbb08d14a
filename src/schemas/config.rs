//! Config schema - Configuration for the designer client

use serde::{Deserialize, Serialize};

/// Main configuration for the designer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Schema version for forward compatibility
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Base URL of the workflow store (e.g., "http://localhost:5000")
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Request timeout in seconds; unset leaves the transport default (no timeout)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<u32>,

    /// Session role that grants design rights
    #[serde(default = "default_designer_capability")]
    pub designer_capability: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_api_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_designer_capability() -> String {
    crate::domain::WORKFLOW_DESIGNER.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            schema_version: default_schema_version(),
            api_base_url: default_api_base_url(),
            timeout_seconds: None,
            designer_capability: default_designer_capability(),
        }
    }
}
