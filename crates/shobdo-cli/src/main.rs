use anyhow::Context;
use clap::Parser;
use shobdo_core::{
    Config, GeminiProvider, HistoryManager, SearchSession, SearchState, TranslationProvider,
};
use shobdo_store::{KeyValueStore, MemoryStore, SqliteStore};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod output;

#[derive(Parser)]
#[command(name = "shobdo")]
#[command(version, about = "English to Bengali dictionary in your terminal", long_about = None)]
struct Cli {
    /// Gemini API key (overrides the config file)
    #[arg(long, env = "GEMINI_API_KEY", global = true, hide_env_values = true)]
    api_key: Option<String>,

    /// Model used for lookups
    #[arg(long, env = "SHOBDO_MODEL", global = true)]
    model: Option<String>,

    /// Keep history in memory only, nothing is written to disk
    #[arg(long, global = true)]
    ephemeral: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Look up one word and print the result
    Lookup {
        /// English word to translate
        word: String,

        /// Print entries as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show recent searches, most recent first
    History,
    /// Forget all recent searches
    ClearHistory,
    /// Show or initialise the config file
    Config {
        /// Write a default config file if none exists
        #[arg(long)]
        init: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // The TUI owns the terminal, so its logs go to a file instead
    init_logging(cli.command.is_none());

    let mut config = Config::load().unwrap_or_else(|e| {
        tracing::warn!("Falling back to default config: {}", e);
        Config::default()
    });
    config.apply_overrides(cli.api_key.clone(), cli.model.clone());

    match cli.command {
        Some(Commands::Lookup { word, json }) => {
            let provider = build_provider(&config)?;
            let mut session = SearchSession::new(load_history(&config, cli.ephemeral));

            match session.search(provider.as_ref(), &word).await {
                SearchState::Success { entries, .. } => {
                    if json {
                        println!("{}", output::entries_to_json(entries)?);
                    } else {
                        print!("{}", output::entries_to_text(entries));
                    }
                }
                SearchState::Empty { message, .. } => {
                    if json {
                        println!("[]");
                    } else {
                        println!("{}", message);
                    }
                }
                SearchState::Error { message } => anyhow::bail!("{}", message),
                SearchState::Idle | SearchState::Loading { .. } => {}
            }
        }
        Some(Commands::History) => {
            let history = load_history(&config, cli.ephemeral);
            if history.entries().is_empty() {
                println!("No searches yet.");
            } else {
                print!("{}", output::history_to_text(history.entries()));
            }
        }
        Some(Commands::ClearHistory) => {
            let mut history = load_history(&config, cli.ephemeral);
            history.clear();
            println!("Search history cleared.");
        }
        Some(Commands::Config { init }) => {
            let path = Config::config_path()?;
            if init && !path.exists() {
                Config::default().save_to(&path)?;
                println!("Wrote default config to {}", path.display());
            } else {
                println!("{}", path.display());
            }
        }
        None => {
            let provider = build_provider(&config)?;
            let session = SearchSession::new(load_history(&config, cli.ephemeral));
            shobdo_tui::run_tui(shobdo_tui::App::new(session), provider).await?;
        }
    }

    Ok(())
}

fn build_provider(config: &Config) -> anyhow::Result<Arc<dyn TranslationProvider>> {
    if config.provider.api_key.is_none() {
        tracing::warn!("No Gemini API key configured, lookups will fail until one is set");
    }

    let provider = GeminiProvider::with_base_url(
        config.provider.api_key.clone(),
        config.provider.model.clone(),
        config.provider.api_url.clone(),
    )
    .context("Failed to build HTTP client")?;

    Ok(Arc::new(provider))
}

/// Open the durable store, or fall back to memory if the disk says no
fn load_history(config: &Config, ephemeral: bool) -> HistoryManager {
    let store: Box<dyn KeyValueStore> = if ephemeral {
        Box::new(MemoryStore::new())
    } else {
        match config.database_path().map(SqliteStore::open) {
            Ok(Ok(store)) => Box::new(store),
            Ok(Err(e)) => {
                tracing::warn!("Could not open history database, using memory: {}", e);
                Box::new(MemoryStore::new())
            }
            Err(e) => {
                tracing::warn!("Could not locate history database, using memory: {}", e);
                Box::new(MemoryStore::new())
            }
        }
    };

    HistoryManager::load(store)
}

fn init_logging(to_file: bool) {
    let filter = || {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "shobdo=info".into())
    };

    let log_file = if to_file {
        Config::data_dir().ok().and_then(|dir| {
            std::fs::create_dir_all(&dir).ok()?;
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(dir.join("shobdo.log"))
                .ok()
        })
    } else {
        None
    };

    match log_file {
        Some(file) => tracing_subscriber::registry()
            .with(filter())
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(std::sync::Mutex::new(file)),
            )
            .init(),
        // Keep the TUI screen clean even when the log file is unavailable
        None if to_file => tracing_subscriber::registry()
            .with(filter())
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::sink))
            .init(),
        None => tracing_subscriber::registry()
            .with(filter())
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}
