use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use rec_core::{EngineConfig, InteractionKind, InteractionLedger, Limit};
use rec_engine::{RecommendationEngine, Stores};
use rec_storage::{MemoryStorage, Snapshot};
use rec_web::AppState;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Rule-based article recommendations", long_about = None)]
pub struct Cli {
    /// JSON snapshot with articles, users and interactions
    #[arg(long, global = true)]
    data: Option<PathBuf>,
    /// JSON engine configuration; unset fields keep their defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Personalized recommendations for a user
    Recommend {
        user_id: String,
        #[arg(long, default_value_t = Limit::DEFAULT)]
        limit: usize,
    },
    /// Articles with the most interactions overall
    Trending {
        #[arg(long, default_value_t = Limit::DEFAULT)]
        limit: usize,
    },
    /// Print the weighting constants in use
    Algorithm,
    /// Serve the HTTP API
    Serve {
        #[arg(long, default_value = "0.0.0.0:3000")]
        addr: String,
    },
    /// Record that a user viewed an article and save the snapshot
    View {
        user_id: String,
        article_id: String,
        /// Remove the interaction instead
        #[arg(long)]
        undo: bool,
    },
    /// Record that a user liked an article and save the snapshot
    Like {
        user_id: String,
        article_id: String,
        #[arg(long)]
        undo: bool,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> anyhow::Result<EngineConfig> {
    match path {
        Some(path) => EngineConfig::from_json_file(path)
            .with_context(|| format!("Failed to load engine config from {}", path.display())),
        None => Ok(EngineConfig::default()),
    }
}

async fn load_storage(path: Option<&Path>) -> anyhow::Result<MemoryStorage> {
    let Some(path) = path else {
        info!("No --data given, starting with empty storage");
        return Ok(MemoryStorage::new());
    };
    let snapshot = Snapshot::load(path)
        .await
        .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
    let storage = MemoryStorage::from_snapshot(snapshot)
        .with_context(|| format!("Snapshot {} is inconsistent", path.display()))?;
    info!("💾 Loaded data from {}", path.display());
    Ok(storage)
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn toggle_interaction(
    storage: &MemoryStorage,
    data: Option<&Path>,
    user_id: &str,
    article_id: &str,
    kind: InteractionKind,
    undo: bool,
) -> anyhow::Result<()> {
    let Some(path) = data else {
        bail!("--data is required to record interactions");
    };
    if undo {
        if !storage.remove(user_id, article_id, kind).await? {
            bail!("{} has no {} on {}", user_id, kind, article_id);
        }
        info!("🗑️ Removed {} by {} on {}", kind, user_id, article_id);
    } else {
        let interaction = storage.record(user_id, article_id, kind).await?;
        print_json(&interaction)?;
    }
    storage.snapshot().await.save(path).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    let storage = load_storage(cli.data.as_deref()).await?;
    let backend = Arc::new(storage.clone());
    let engine = Arc::new(RecommendationEngine::new(Stores::from_backend(backend.clone()), config));

    match cli.command {
        Commands::Recommend { user_id, limit } => {
            let set = engine.get_recommendations_for_user(&user_id, Limit::new(limit)?).await?;
            print_json(&set)?;
        }
        Commands::Trending { limit } => {
            let entries = engine.get_trending_articles(Limit::new(limit)?).await?;
            print_json(&entries)?;
        }
        Commands::Algorithm => print_json(&engine.algorithm_info())?,
        Commands::Serve { addr } => {
            rec_web::serve(AppState::new(engine, backend), &addr).await?;
        }
        Commands::View { user_id, article_id, undo } => {
            toggle_interaction(&storage, cli.data.as_deref(), &user_id, &article_id, InteractionKind::View, undo)
                .await?;
        }
        Commands::Like { user_id, article_id, undo } => {
            toggle_interaction(&storage, cli.data.as_deref(), &user_id, &article_id, InteractionKind::Like, undo)
                .await?;
        }
    }

    Ok(())
}
