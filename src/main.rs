use std::path::Path;
use std::sync::Arc;

use log::{error, info};
use tokio::sync::Mutex;

mod config;
mod core;
mod web;

use crate::config::ServiceConfig;
use crate::core::store::TicketStore;
use crate::web::server::start_web_server;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    info!("Starting ticketdesk...");

    let config = ServiceConfig::from_env();
    info!("Using database at {}", config.database_path);
    info!("Uploads will be stored under {}", config.upload_dir);

    let store = match TicketStore::open(Path::new(&config.database_path)) {
        Ok(store) => Arc::new(Mutex::new(store)),
        Err(e) => {
            error!("Failed to open ticket database: {}", e);
            std::process::exit(1);
        }
    };
    info!("Ticket store initialized");

    if let Err(e) = start_web_server(store, config).await {
        error!("Web server error: {}", e);
        std::process::exit(1);
    }

    info!("ticketdesk shutdown complete");
}
