use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use hookpoint::{FileHookStore, HookStore, MemoryHookStore};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

mod api;
mod cli;
mod config;
mod error;
mod state;

use crate::api::create_router;
use crate::cli::CliArgs;
use crate::config::ServerConfig;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli_args = CliArgs::parse();

    // Set up logging
    let filter = if let Some(ref level) = cli_args.log_level {
        tracing_subscriber::EnvFilter::new(level)
    } else {
        tracing_subscriber::EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting hookpoint server v{}", hookpoint::VERSION);

    // Load configuration from CLI arguments and environment variables
    let server_config = ServerConfig::from_cli_and_env(cli_args)?;
    info!("Server configuration loaded");

    // Pick the store: durable when a data directory is configured,
    // in-memory otherwise
    let store: Arc<dyn HookStore> = match &server_config.data_dir {
        Some(dir) => {
            info!("Persisting hook registrations under {}", dir.display());
            Arc::new(FileHookStore::open(dir).await?)
        }
        None => {
            info!("Keeping hook registrations in memory; they will not survive a restart");
            Arc::new(MemoryHookStore::new())
        }
    };

    // Create application state
    let app_state = Arc::new(AppState::new(store, server_config.clone()));

    // Create the router with all API endpoints
    let app = create_router(app_state).layer(TraceLayer::new_for_http());

    // Start the server
    let addr = SocketAddr::from(([0, 0, 0, 0], server_config.port));
    let listener = TcpListener::bind(addr).await?;

    info!("Server listening on {}", addr);
    info!(
        "Hook registrations accepted at http://{}/api/hooks (fixed id {})",
        addr, server_config.hook_id
    );

    axum::serve(listener, app).await?;

    Ok(())
}
