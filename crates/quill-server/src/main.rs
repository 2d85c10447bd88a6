//! # Quill Server
//!
//! Entry point for the Quill blog API.

use quill_config::ConfigLoader;
use quill_server::startup;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config = match ConfigLoader::from_default_location() {
        Ok(loader) => loader.get().await,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = startup::init_logging(&config.observability) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    info!("Starting Quill server...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = startup::run(config).await {
        error!("Application error: {}", e);
        std::process::exit(1);
    }
}
