//! # Storefront Application Library
//!
//! Wires configuration, storage, the catalog source and the commands into
//! the `storefront` command-line tool.
//!
//! ## Module Organization
//! ```text
//! storefront_app/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── cli.rs          ◄─── clap definitions and dispatch
//! ├── client.rs       ◄─── CatalogSource trait, HTTP and in-memory sources
//! ├── state/
//! │   ├── mod.rs      ◄─── AppState and restore on startup
//! │   ├── db.rs       ◄─── Database state wrapper
//! │   ├── cart.rs     ◄─── Cart ledger behind a mutex
//! │   ├── wishlist.rs ◄─── Wishlist behind a mutex
//! │   ├── session.rs  ◄─── Current user
//! │   └── config.rs   ◄─── Configuration loading
//! ├── commands/       ◄─── One function per operation
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod cli;
pub mod client;
pub mod commands;
pub mod error;
pub mod state;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use directories::ProjectDirs;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use cli::Cli;
use client::{CatalogSource, FakeStoreClient, OfflineCatalog};
use error::ApiError;
use state::{AppState, ConfigState};
use storefront_db::{Database, DbConfig};

/// Runs the CLI and returns the process exit code.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Parse arguments (clap exits on --help / usage errors)              │
/// │  2. Initialize logging to stderr                                        │
/// │  3. Load config: defaults ◄ storefront.toml ◄ STOREFRONT_* env         │
/// │  4. Open the database, run pending migrations                           │
/// │  5. Build the catalog source (HTTP, or offline)                         │
/// │  6. AppState::load: restore cart and wishlist                           │
/// │  7. Dispatch; JSON to stdout, or an ApiError to stderr with exit 1     │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    let result = async {
        let state = build_state(&cli).await?;
        let output = cli::dispatch(&state, cli.command).await;
        state.db.inner().close().await;
        output
    }
    .await;

    match result {
        Ok(value) => match serde_json::to_string_pretty(&value) {
            Ok(text) => {
                println!("{}", text);
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!(error = %e, "Failed to render output");
                ExitCode::FAILURE
            }
        },
        Err(err) => {
            match serde_json::to_string(&err) {
                Ok(text) => eprintln!("{}", text),
                Err(_) => eprintln!("{}", err),
            }
            ExitCode::FAILURE
        }
    }
}

async fn build_state(cli: &Cli) -> Result<AppState, ApiError> {
    let mut config = ConfigState::load(cli.config.clone())?;
    if let Some(path) = &cli.db_path {
        config.database_path = Some(path.clone());
    }

    let db_path = get_database_path(&config)
        .map_err(|e| ApiError::internal(format!("Could not prepare data directory: {}", e)))?;
    info!(?db_path, "Database path determined");

    let db = Database::new(DbConfig::new(db_path)).await?;

    let catalog: Arc<dyn CatalogSource> = if cli.offline {
        info!("Offline mode, serving catalog from cache");
        Arc::new(OfflineCatalog)
    } else {
        Arc::new(FakeStoreClient::new(
            &config.api_base_url,
            config.api_timeout(),
        )?)
    };

    Ok(AppState::load(config, db, catalog, cli.user.clone()).await)
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so stdout stays machine-readable.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=storefront=trace` - Show trace for storefront crates only
/// - Default: `info,storefront=debug,sqlx=warn`
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,storefront=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Determines the database file path.
///
/// ## Platform-Specific Paths
/// - **macOS**: `~/Library/Application Support/com.storefront.storefront/storefront.db`
/// - **Windows**: `%APPDATA%\storefront\storefront\data\storefront.db`
/// - **Linux**: `~/.local/share/storefront/storefront.db`
///
/// `database_path` in the config (or `--db-path`, `STOREFRONT_DB_PATH`)
/// takes precedence.
fn get_database_path(config: &ConfigState) -> Result<PathBuf, std::io::Error> {
    if let Some(path) = &config.database_path {
        return Ok(path.clone());
    }

    let proj_dirs = ProjectDirs::from("com", "storefront", "storefront").ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "could not determine app data directory",
        )
    })?;

    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)?;

    Ok(data_dir.join("storefront.db"))
}
