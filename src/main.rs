use std::sync::Arc;

use tracing::{error, info};

use minimail::{Config, Database, WebServer};

#[tokio::main]
async fn main() {
    // Load configuration
    let config = match Config::load_with_env("config.toml") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config.toml: {e}");
            eprintln!("Using default configuration.");
            let mut config = Config::default();
            config.apply_env_overrides();
            config
        }
    };

    // Initialize logging
    if let Err(e) = minimail::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        // Fall back to console-only logging
        minimail::logging::init_console_only(&config.logging.level);
    }

    info!("Minimail - Minimal Webmail Service");

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {e}");
        std::process::exit(1);
    }

    let db = match Database::open(&config.database.path).await {
        Ok(db) => Arc::new(db),
        Err(e) => {
            error!("Failed to open database at {}: {e}", config.database.path);
            std::process::exit(1);
        }
    };

    let server = WebServer::new(&config, db);
    if let Err(e) = server.run().await {
        error!("Web server failed: {e}");
        std::process::exit(1);
    }
}
