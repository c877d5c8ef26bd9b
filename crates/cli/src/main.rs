//! `playbook` -- terminal client for the playbook dashboard backend.
//!
//! Plays are ordered sequences of steps; job descriptions (roles) can be
//! assigned to steps. All data is scoped to this device by a lazily
//! created owner token.
//!
//! # Environment variables
//!
//! | Variable               | Required | Description                                  |
//! |------------------------|----------|----------------------------------------------|
//! | `PLAYBOOK_PROJECT_URL` | yes      | Backend base URL, e.g. `https://x.example`   |
//! | `PLAYBOOK_API_KEY`     | yes      | Static API key attached to every request     |
//! | `PLAYBOOK_GENERATE_URL`| no       | Step-generation service base URL             |
//! | `PLAYBOOK_STATE_DIR`   | no       | Override for the owner-token state directory |

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use playbook_gateway::{Gateway, GatewayConfig, TokenStore};

mod commands;

use commands::{diag, plays, roles, steps};

#[derive(Parser)]
#[command(name = "playbook", version, about = "Business-process playbook dashboard client")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check connectivity to the backend.
    Ping,
    /// Show this device's owner token and where it is stored.
    Identity,
    /// Manage plays.
    Plays {
        #[command(subcommand)]
        command: PlaysCommand,
    },
    /// Manage job descriptions.
    Roles {
        #[command(subcommand)]
        command: RolesCommand,
    },
    /// Edit the steps of a play.
    Steps {
        #[command(subcommand)]
        command: StepsCommand,
    },
}

#[derive(Subcommand)]
enum PlaysCommand {
    /// List this device's plays.
    List,
    /// Show one play with its steps.
    Show { play_id: String },
    /// Create a play, optionally drafting its steps from a goal.
    Create {
        /// Name of the new play.
        #[arg(long)]
        name: String,
        /// Natural-language goal to auto-generate steps from.
        #[arg(long)]
        goal: Option<String>,
    },
    /// Rename a play.
    Rename {
        play_id: String,
        #[arg(long)]
        name: String,
    },
    /// Delete a play.
    Delete { play_id: String },
}

#[derive(Subcommand)]
enum RolesCommand {
    /// List this device's job descriptions.
    List,
    /// Create a job description.
    Create {
        name: String,
        description: String,
    },
    /// Update a job description's text (the name is its identity).
    Update {
        name: String,
        description: String,
    },
    /// Delete a job description.
    Delete { name: String },
}

#[derive(Subcommand)]
enum StepsCommand {
    /// Open an interactive editing session for a play's steps.
    Edit { play_id: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "playbook=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Ping => diag::ping(&gateway()?).await,
        Command::Identity => diag::identity(),
        Command::Plays { command } => match command {
            PlaysCommand::List => plays::list(&gateway()?).await,
            PlaysCommand::Show { play_id } => plays::show(&gateway()?, &play_id).await,
            PlaysCommand::Create { name, goal } => {
                plays::create(&gateway()?, &name, goal.as_deref()).await
            }
            PlaysCommand::Rename { play_id, name } => {
                plays::rename(&gateway()?, &play_id, &name).await
            }
            PlaysCommand::Delete { play_id } => plays::delete(&gateway()?, &play_id).await,
        },
        Command::Roles { command } => match command {
            RolesCommand::List => roles::list(&gateway()?).await,
            RolesCommand::Create { name, description } => {
                roles::create(&gateway()?, &name, &description).await
            }
            RolesCommand::Update { name, description } => {
                roles::update(&gateway()?, &name, &description).await
            }
            RolesCommand::Delete { name } => roles::delete(&gateway()?, &name).await,
        },
        Command::Steps { command } => match command {
            StepsCommand::Edit { play_id } => steps::edit(&gateway()?, &play_id).await,
        },
    }
}

/// Build a gateway from environment configuration and the device's owner
/// token. Missing configuration or an unavailable token is fatal: no
/// command may operate unscoped.
fn gateway() -> anyhow::Result<Gateway> {
    let config = GatewayConfig::from_env()?;
    let token = TokenStore::from_env()?.get_or_create()?;
    Ok(Gateway::new(config, token))
}
