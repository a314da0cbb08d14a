//! CLI module for wfd
//!
//! Provides the command-line interface using clap.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// wfd - Design multi-stage approval workflows against a workflow store
#[derive(Parser, Debug)]
#[command(name = "wfd")]
#[command(version)]
#[command(about = "Design multi-stage approval workflows against a workflow store")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress info-level output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Override the working directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a .wfdesigner directory with a default config
    Init {
        /// Overwrite an existing config.json
        #[arg(long)]
        force: bool,

        /// Base URL of the workflow store
        #[arg(long)]
        api_url: Option<String>,
    },

    /// Log in and store the session
    Login {
        /// Account name
        username: String,

        /// Password (or set WFD_PASSWORD)
        #[arg(long, env = "WFD_PASSWORD", hide_env_values = true)]
        password: String,

        /// Narrow the session to one of its roles
        #[arg(long)]
        role: Option<String>,
    },

    /// Forget the stored session
    Logout,

    /// Show the stored session
    Whoami,

    /// List roles available as stage actors
    Roles {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List users available as stage actors
    Users {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List workflows in the store
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a workflow with resolved actors and transitions
    Show {
        /// Workflow ID
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a workflow
    Delete {
        /// Workflow ID
        id: String,
    },

    /// Copy a workflow and all its stages
    Copy {
        /// Workflow ID
        id: String,
    },

    /// Check a draft file without contacting the store
    Validate {
        /// Path to the draft JSON file
        file: PathBuf,
    },

    /// Create a workflow from a draft file, one stage at a time
    Apply {
        /// Path to the draft JSON file
        file: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_show() {
        let cli = Cli::try_parse_from(["wfd", "--verbose", "show", "12", "--json"]).unwrap();
        assert!(cli.verbose);
        match cli.command {
            Some(Commands::Show { id, json }) => {
                assert_eq!(id, "12");
                assert!(json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_login() {
        let cli = Cli::try_parse_from([
            "wfd", "login", "dana", "--password", "pw", "--role", "workflow-designer",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Login { username, password, role }) => {
                assert_eq!(username, "dana");
                assert_eq!(password, "pw");
                assert_eq!(role.as_deref(), Some("workflow-designer"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
