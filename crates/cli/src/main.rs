//! `repostats` CLI entry-point.
//!
//! Available sub-commands:
//! - `run`    — interactive flow: import a user, show the top repository, look one up.
//! - `import` — fetch a user's repositories and store them.
//! - `top`    — print the most popular stored repository.
//! - `find`   — print a stored repository by exact title.
//! - `export` — dump every stored repository as JSON.

mod config;
mod prompt;

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use db::Store;
use engine::{describe, export_pretty, import_user, ImportOutcome};
use fetcher::GitHubClient;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Settings;

#[derive(Parser)]
#[command(
    name = "repostats",
    about = "Collect GitHub repository statistics into PostgreSQL",
    version
)]
struct Cli {
    #[command(flatten)]
    settings: Settings,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Import a user, print the most popular repository, then look one up.
    /// Missing values are prompted for.
    Run {
        #[arg(long)]
        database: Option<String>,
        /// GitHub login.
        #[arg(long)]
        user: Option<String>,
        /// Also write the JSON dump to this file.
        #[arg(long)]
        export: Option<PathBuf>,
    },
    /// Fetch a user's repositories and store them.
    Import {
        #[arg(long)]
        database: String,
        #[arg(long)]
        user: String,
    },
    /// Print the most popular stored repository.
    Top {
        #[arg(long)]
        database: String,
    },
    /// Print the stored repository with this exact title.
    Find {
        #[arg(long)]
        database: String,
        title: String,
    },
    /// Print (or write) every stored repository as JSON.
    Export {
        #[arg(long)]
        database: String,
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn init_tracing(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let settings = cli.settings;

    match cli.command {
        Command::Run {
            database,
            user,
            export,
        } => {
            let database = prompt::value_or_ask(database, "Database name: ")?;
            let user = prompt::value_or_ask(user, "GitHub username: ")?;

            let store = import(&settings, &database, &user).await?;

            let top = store.most_popular().await?;
            println!("{}", describe(top.as_ref()));

            if let Some(path) = export {
                write_export(&store, Some(&path)).await?;
            }

            let title = prompt::ask(
                &mut std::io::stdin().lock(),
                &mut std::io::stdout(),
                "Repository name to look up: ",
            )?;
            let found = store.find_by_name(&title).await?;
            println!("{}", describe(found.as_ref()));

            store.close().await;
        }
        Command::Import { database, user } => {
            let store = import(&settings, &database, &user).await?;
            store.close().await;
        }
        Command::Top { database } => {
            let store = open_store(&settings, &database).await?;
            let top = store.most_popular().await?;
            println!("{}", describe(top.as_ref()));
            store.close().await;
        }
        Command::Find { database, title } => {
            let store = open_store(&settings, &database).await?;
            let found = store.find_by_name(&title).await?;
            println!("{}", describe(found.as_ref()));
            store.close().await;
        }
        Command::Export { database, output } => {
            let store = open_store(&settings, &database).await?;
            write_export(&store, output.as_deref()).await?;
            store.close().await;
        }
    }

    Ok(())
}

async fn open_store(settings: &Settings, database: &str) -> Result<Store> {
    Store::open(&settings.store_config(database))
        .await
        .with_context(|| format!("failed to open database {database}"))
}

/// Fetch every page, then open the store and write the batch.
async fn import(settings: &Settings, database: &str, user: &str) -> Result<Store> {
    let client = GitHubClient::new(settings.fetcher_config())?;
    let config = settings.store_config(database);

    let (store, outcome) = import_user(&client, user, || Store::open(&config))
        .await
        .with_context(|| format!("failed to import repositories of {user} into {database}"))?;

    match outcome {
        ImportOutcome::Imported { repositories, .. } => {
            println!("Stored {repositories} repositories of {user} in {store}.");
        }
        ImportOutcome::Empty => {
            println!("Warning: {user} has no repositories; nothing was stored.");
        }
    }
    Ok(store)
}

async fn write_export(store: &Store, output: Option<&Path>) -> Result<()> {
    let records = store.export_json().await?;
    let json = export_pretty(&records)?;

    match output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("cannot write {}", path.display()))?;
            info!("Wrote {} repositories to {}", records.len(), path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
