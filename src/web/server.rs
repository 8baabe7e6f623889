use std::sync::Arc;

use actix_web::{middleware, web, App, HttpServer};
use log::info;
use tokio::sync::Mutex;

use crate::config::ServiceConfig;
use crate::core::error::ServiceError;
use crate::core::store::TicketStore;
use crate::web::handlers;

/// Path extraction config: a non-numeric ticket id is a validation error,
/// not a routing miss, so it renders as a 400
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req| {
        ServiceError::ValidationError(format!("invalid path parameter: {}", err)).into()
    })
}

/// Start the web server for the ticket API
pub async fn start_web_server(
    store: Arc<Mutex<TicketStore>>,
    config: ServiceConfig,
) -> std::io::Result<()> {
    let bind_addr = config.bind_addr.clone();
    info!("Starting web server on http://{}", bind_addr);

    // Create shared application state
    let app_state = web::Data::new(AppState { store, config });

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(app_state.clone())
            .app_data(path_config())
            // API routes
            .service(
                web::scope("/api")
                    // Ticket APIs
                    .route("/tickets", web::post().to(handlers::tickets::create_ticket))
                    .route("/tickets", web::get().to(handlers::tickets::list_tickets))
                    .route("/tickets/{id}", web::get().to(handlers::tickets::get_ticket))
                    .route("/tickets/{id}/status", web::post().to(handlers::tickets::update_status))
                    // Attachment APIs
                    .route("/tickets/{id}/upload", web::post().to(handlers::tickets::upload_attachment))
                    .route("/tickets/{id}/attachments", web::get().to(handlers::tickets::get_attachments)),
            )
            // Liveness probe
            .route("/health", web::get().to(handlers::health::health))
    })
    .bind(bind_addr.as_str())?
    .run()
    .await
}

/// Shared application state for web handlers
pub struct AppState {
    pub store: Arc<Mutex<TicketStore>>,
    pub config: ServiceConfig,
}
