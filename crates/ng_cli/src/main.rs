use clap::{Parser, Subcommand};
use ng_core::{HeadlineSource, Result};
use ng_scheduler::Scheduler;
use ng_sources::{IngestManager, NewsApiClient};
use ng_storage::SqliteStore;
use ng_verify::HeuristicVerifier;
use ng_web::AppState;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[derive(Debug, Clone)]
struct HumanDuration(Duration);

impl FromStr for HumanDuration {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut total_seconds = 0u64;
        let mut current_number = String::new();
        let mut has_unit = false;

        for c in s.chars() {
            if c.is_ascii_digit() {
                current_number.push(c);
            } else if let Ok(num) = current_number.parse::<u64>() {
                match c {
                    's' => total_seconds += num,
                    'm' => total_seconds += num * 60,
                    'h' => total_seconds += num * 3600,
                    'd' => total_seconds += num * 86400,
                    _ => return Err(format!("Invalid duration unit: {}", c)),
                }
                current_number.clear();
                has_unit = true;
            } else if !c.is_whitespace() {
                return Err(format!("Invalid character in duration: {}", c));
            }
        }

        // A trailing bare number counts as seconds.
        if !current_number.is_empty() {
            match current_number.parse::<u64>() {
                Ok(num) => {
                    total_seconds += num;
                    has_unit = true;
                }
                Err(_) => return Err("Invalid number in duration".to_string()),
            }
        }

        if !has_unit {
            return Err("Duration must include a number".to_string());
        }

        Ok(HumanDuration(Duration::from_secs(total_seconds)))
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Fetch, score and serve news headlines", long_about = None)]
struct Cli {
    /// Path to the SQLite database
    #[arg(long, default_value = "news.db")]
    db: PathBuf,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the API server together with the periodic background fetcher
    Serve {
        #[arg(long, default_value = "0.0.0.0:8001")]
        addr: String,
        /// Fetch interval (e.g. 1h, 30m, 1h15m30s)
        #[arg(long, default_value = "1h")]
        interval: HumanDuration,
        /// Serve stored articles only, without the background fetcher
        #[arg(long)]
        no_scheduler: bool,
    },
    /// Fetch headlines once and print them as JSON, without storing
    Fetch {
        /// Explicit API key; falls back to NEWSAPI_KEY
        api_key: Option<String>,
        #[arg(default_value = "business")]
        category: String,
        #[arg(default_value = "us")]
        country: String,
    },
    /// Create the database schema and exit
    InitDb,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            addr,
            interval,
            no_scheduler,
        } => serve(cli.db, addr, interval.0, no_scheduler).await,
        Commands::Fetch {
            api_key,
            category,
            country,
        } => {
            let client = NewsApiClient::from_env()?;
            let articles = client
                .top_headlines(api_key.as_deref(), &category, &country)
                .await?;
            println!("{}", serde_json::to_string_pretty(&articles)?);
            Ok(())
        }
        Commands::InitDb => {
            SqliteStore::open(&cli.db).await?;
            Ok(())
        }
    }
}

async fn serve(db: PathBuf, addr: String, interval: Duration, no_scheduler: bool) -> Result<()> {
    let store = Arc::new(SqliteStore::open(&db).await?);
    let client = Arc::new(NewsApiClient::from_env()?);
    let verifier = Arc::new(HeuristicVerifier::new());
    let manager = Arc::new(IngestManager::new(client, verifier, store));

    let scheduler = if no_scheduler {
        None
    } else {
        info!("⏰ Scheduler started, fetching every {}s", interval.as_secs());
        Some(
            Scheduler::new(manager.clone())
                .with_interval(interval)
                .start(),
        )
    };

    let app = ng_web::create_app(AppState::new(manager));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("🌐 Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(handle) = scheduler {
        info!("🛑 Stopping scheduler");
        handle.stop().await;
    }
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
