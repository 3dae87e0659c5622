//! Command-line interface.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use futures_util::StreamExt;
use mixology_api::{CocktailClient, ConfigClient};
use mixology_core::{
    CocktailDetailModel, CocktailListModel, CocktailRepository, CocktailStore, RemoteConfig,
    group_by_day,
};
use tracing::{debug, info, warn};

use crate::render;
use crate::settings::{self, AppSettings};

type Repository = CocktailRepository<CocktailClient>;

#[derive(Debug, Parser)]
#[command(
    name = "mixology",
    about = "Discover random cocktails and keep a local history of them",
    version
)]
pub struct Cli {
    /// Cache database file.
    #[arg(long, global = true, value_name = "PATH")]
    pub database: Option<PathBuf>,

    /// Base URL of the recipe API.
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Fetch a random cocktail and add it to the history.
    Add,

    /// Print the history grouped by day.
    List,

    /// Print one cocktail.
    Show {
        /// Cocktail id.
        id: String,
    },

    /// Remove one cocktail from the history.
    Delete {
        /// Cocktail id.
        id: String,
    },

    /// Remove every cocktail from the history.
    Clear,

    /// Print the number of cached cocktails.
    Count,

    /// Print the history again every time it changes, until Ctrl-C.
    Watch,

    /// Fetch the remote configuration and print the active values.
    Config,

    /// Show a push message payload as a desktop notification.
    Notify {
        /// JSON payload.
        payload: String,
    },
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = settings::load_settings().await?;

    match cli.command {
        Commands::Config => show_config(&settings).await,
        Commands::Notify { payload } => crate::notify::show_push(&payload),
        command => {
            let repository = open_repository(cli.database, cli.api_url, &settings).await?;
            run_cache_command(command, Arc::new(repository)).await
        }
    }
}

async fn open_repository(
    database: Option<PathBuf>,
    api_url: Option<String>,
    settings: &AppSettings,
) -> anyhow::Result<Repository> {
    let database = database.unwrap_or_else(settings::default_database_path);
    if let Some(parent) = database.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let database = database
        .to_str()
        .context("Database path is not valid UTF-8")?;
    debug!(database, "Opening cocktail cache");
    let store = CocktailStore::new(database).await?;

    let api_url = api_url.unwrap_or_else(|| settings.api_base_url.clone());
    let client = CocktailClient::with_options(&api_url, settings.http_options())?;

    Ok(CocktailRepository::new(store, client))
}

async fn run_cache_command(command: Commands, repository: Arc<Repository>) -> anyhow::Result<()> {
    match command {
        Commands::Add => {
            let model = CocktailListModel::new(repository).await;
            let Some(cocktail) = model.add_random().await else {
                let error = model.snapshot().error;
                bail!(error.unwrap_or_else(|| "Could not add a cocktail".to_string()));
            };
            print!("{}", render::cocktail(&cocktail));
        }
        Commands::List => {
            let state = CocktailListModel::new(repository).await.snapshot();
            print!("{}", render::listing(&state.groups, state.total_count));
        }
        Commands::Show { id } => {
            let state = CocktailDetailModel::open(repository, id).await.snapshot();
            match (state.cocktail, state.error) {
                (Some(cocktail), _) => print!("{}", render::cocktail(&cocktail)),
                (None, Some(error)) => bail!(error),
                (None, None) => bail!("Cocktail could not be loaded"),
            }
        }
        Commands::Delete { id } => {
            repository.delete_by_id(&id).await?;
            println!("Deleted {id}");
        }
        Commands::Clear => {
            repository.delete_all().await?;
            println!("History cleared");
        }
        Commands::Count => println!("{}", repository.count().await?),
        Commands::Watch => watch(&repository).await?,
        Commands::Config | Commands::Notify { .. } => {}
    }
    Ok(())
}

async fn watch(repository: &Repository) -> anyhow::Result<()> {
    let mut listing = repository.observe_listing();
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            next = listing.next() => {
                let Some((cocktails, count)) = next else { break };
                print!("{}", render::listing(&group_by_day(&cocktails), count));
                println!();
            }
            result = &mut ctrl_c => {
                result?;
                break;
            }
        }
    }
    Ok(())
}

async fn show_config(settings: &AppSettings) -> anyhow::Result<()> {
    let config = RemoteConfig::new(settings.min_fetch_interval());

    if let Some(url) = &settings.remote_config_url {
        let client = ConfigClient::new(url, settings.http_options())?;
        match config.fetch_and_activate(&client).await {
            Ok(_) => info!(url = %client.url(), "Remote configuration fetched"),
            Err(e) => warn!(error = %e, "Remote configuration unavailable, using defaults"),
        }
    } else {
        info!("No remote configuration URL set, using defaults");
    }

    println!("{}", serde_json::to_string_pretty(&config.data().await)?);
    Ok(())
}
