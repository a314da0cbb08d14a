//! wfd - Design multi-stage approval workflows against a workflow store

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use wfdesigner::cli::commands;
use wfdesigner::cli::{Cli, Commands};
use wfdesigner::errors::to_exit_code;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // RUST_LOG wins over the verbosity flags
    let default_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let result = run(cli).await;

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            tracing::debug!(code = e.code(), "command failed");
            eprintln!("Error: {}", e);
            std::process::exit(to_exit_code(&e));
        }
    }
}

async fn run(cli: Cli) -> wfdesigner::Result<()> {
    let cwd = cli.cwd.as_deref();
    match cli.command {
        Some(Commands::Init { force, api_url }) => {
            commands::init::run(cwd, force, api_url.as_deref()).await
        }
        Some(Commands::Login {
            username,
            password,
            role,
        }) => commands::session::login(cwd, &username, &password, role.as_deref()).await,
        Some(Commands::Logout) => commands::session::logout(cwd).await,
        Some(Commands::Whoami) => commands::session::whoami(cwd).await,
        Some(Commands::Roles { json }) => commands::catalog::roles(cwd, json).await,
        Some(Commands::Users { json }) => commands::catalog::users(cwd, json).await,
        Some(Commands::List { json }) => commands::list::run(cwd, json).await,
        Some(Commands::Show { id, json }) => commands::show::run(cwd, &id, json).await,
        Some(Commands::Delete { id }) => commands::delete::run(cwd, &id).await,
        Some(Commands::Copy { id }) => commands::copy::run(cwd, &id).await,
        Some(Commands::Validate { file }) => commands::validate::run(&file).await,
        Some(Commands::Apply { file }) => commands::apply::run(cwd, &file).await,
        None => {
            // Default to showing help - clap handles this
            println!("Use --help for usage information");
            Ok(())
        }
    }
}
