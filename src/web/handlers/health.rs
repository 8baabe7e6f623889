use actix_web::{HttpResponse, Responder};
use serde_json::json;

/// Unauthenticated liveness probe
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
