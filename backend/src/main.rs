//! User Admin - serves the in-memory user directory to the admin dashboard.

use std::env;
use std::sync::Arc;

use tokio::net::TcpListener;
use user_admin_backend::{app, load_directory, logging, AppState, Config};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Handle --version / -V
    let args: Vec<String> = env::args().collect();
    if args.iter().any(|a| a == "--version" || a == "-V") {
        println!("user-admin {}", VERSION);
        return Ok(());
    }

    // Load configuration
    let config = Config::load()
        .map_err(|e| format!("Failed to load configuration: {}", e))?;

    // Initialize tracing
    logging::init(&config.logging.level);

    tracing::info!("Starting User Admin {}", VERSION);

    let directory = load_directory(&config.directory)?;
    let stats = directory.statistics();
    tracing::info!(
        "Directory ready: {} users, {} active, {} admins, {} moderators",
        stats.total,
        stats.active,
        stats.admins,
        stats.moderators
    );

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = Arc::new(AppState::new(config, directory));
    let app = app(state);

    // Start server
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
