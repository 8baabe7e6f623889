//! Web handlers for the ticket API
//!
//! Covers ticket CRUD plus the attachment upload endpoint, which validates
//! the multipart payload, writes the file to the upload directory and
//! appends the stored name to the ticket's attachment column.

use std::path::Path;

use actix_multipart::Multipart;
use actix_web::{web, HttpRequest, HttpResponse};
use futures::TryStreamExt;
use log::{error, info};
use serde_json::json;

use crate::core::error::ServiceError;
use crate::core::files;
use crate::core::ticket::TicketStatus;
use crate::web::auth::require_bearer;
use crate::web::models::{CreateTicketRequest, UpdateStatusRequest};
use crate::web::server::AppState;

/// Create a new ticket
pub async fn create_ticket(
    data: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<CreateTicketRequest>,
) -> Result<HttpResponse, ServiceError> {
    require_bearer(&req, &data.config.api_token)?;

    if body.subject.trim().is_empty() {
        return Err(ServiceError::ValidationError(
            "subject must not be empty".to_string(),
        ));
    }

    let store = data.store.lock().await;
    let ticket = store.create(body.subject.trim(), body.description.as_deref())?;
    info!("Created ticket {}", ticket.id);

    Ok(HttpResponse::Ok().json(ticket))
}

/// List all tickets
pub async fn list_tickets(
    data: web::Data<AppState>,
    req: HttpRequest,
) -> Result<HttpResponse, ServiceError> {
    require_bearer(&req, &data.config.api_token)?;

    let store = data.store.lock().await;
    let tickets = store.list()?;

    Ok(HttpResponse::Ok().json(json!({
        "count": tickets.len(),
        "tickets": tickets,
    })))
}

/// Fetch a single ticket by id
pub async fn get_ticket(
    data: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse, ServiceError> {
    require_bearer(&req, &data.config.api_token)?;
    let id = path.into_inner();

    let store = data.store.lock().await;
    let ticket = store
        .get(id)?
        .ok_or_else(|| ServiceError::NotFoundError("ticket not found".to_string()))?;

    Ok(HttpResponse::Ok().json(ticket))
}

/// Update a ticket's status
pub async fn update_status(
    data: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<UpdateStatusRequest>,
) -> Result<HttpResponse, ServiceError> {
    require_bearer(&req, &data.config.api_token)?;
    let id = path.into_inner();

    let status = TicketStatus::parse(&body.status).ok_or_else(|| {
        ServiceError::ValidationError(format!("unknown status: {}", body.status))
    })?;

    let store = data.store.lock().await;
    if !store.set_status(id, status)? {
        return Err(ServiceError::NotFoundError("ticket not found".to_string()));
    }

    Ok(HttpResponse::Ok().json(json!({
        "message": "status updated",
        "status": status,
    })))
}

/// List a ticket's attachments as a JSON array
pub async fn get_attachments(
    data: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse, ServiceError> {
    require_bearer(&req, &data.config.api_token)?;
    let id = path.into_inner();

    let store = data.store.lock().await;
    let ticket = store
        .get(id)?
        .ok_or_else(|| ServiceError::NotFoundError("ticket not found".to_string()))?;

    Ok(HttpResponse::Ok().json(json!({
        "ticket_id": id,
        "attachments": ticket.attachment_list(),
    })))
}

/// Upload a file attachment for a ticket.
///
/// Expects a multipart form with a `file` field. On success the file lands
/// in the upload directory under a generated unique name and that name is
/// appended to the ticket's attachment column.
pub async fn upload_attachment(
    data: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<i64>,
    payload: Multipart,
) -> Result<HttpResponse, ServiceError> {
    require_bearer(&req, &data.config.api_token)?;
    let id = path.into_inner();
    info!("Received upload request for ticket {}", id);

    {
        let store = data.store.lock().await;
        store
            .get(id)?
            .ok_or_else(|| ServiceError::NotFoundError("ticket not found".to_string()))?;
    }

    let (client_name, bytes) =
        read_file_field(payload, data.config.max_upload_bytes).await?;

    let sanitized = files::sanitize_filename(&client_name);
    if sanitized.is_empty() {
        return Err(ServiceError::ValidationError(
            "invalid filename".to_string(),
        ));
    }

    let ext = files::extension(&sanitized).ok_or_else(|| {
        ServiceError::ValidationError("file has no extension".to_string())
    })?;
    if !files::is_allowed(&ext, &data.config.allowed_extensions) {
        return Err(ServiceError::ValidationError(
            "file type not allowed".to_string(),
        ));
    }

    let stored = files::stored_name(id, &ext);
    files::save_upload(Path::new(&data.config.upload_dir), &stored, &bytes)?;

    let store = data.store.lock().await;
    let joined = match store.append_attachment(id, &stored) {
        Ok(Some(joined)) => joined,
        Ok(None) => {
            // Ticket vanished between the lookup and the append
            return Err(ServiceError::NotFoundError("ticket not found".to_string()));
        }
        Err(e) => {
            error!("Failed to record attachment {} for ticket {}: {}", stored, id, e);
            return Err(e);
        }
    };

    info!("Stored attachment {} for ticket {}", stored, id);
    Ok(HttpResponse::Ok().json(json!({
        "message": "file uploaded successfully",
        "attachments": joined,
    })))
}

/// Pull the `file` field out of the multipart payload.
///
/// Returns the client-supplied filename and the payload bytes, enforcing the
/// configured size cap while reading.
async fn read_file_field(
    mut payload: Multipart,
    max_bytes: usize,
) -> Result<(String, Vec<u8>), ServiceError> {
    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|e| ServiceError::ValidationError(format!("invalid multipart payload: {}", e)))?
    {
        if field.name() != "file" {
            continue;
        }

        let client_name = field
            .content_disposition()
            .get_filename()
            .unwrap_or_default()
            .to_string();
        if client_name.is_empty() {
            return Err(ServiceError::ValidationError(
                "invalid filename".to_string(),
            ));
        }

        let mut bytes = Vec::new();
        while let Some(chunk) = field.try_next().await.map_err(|e| {
            ServiceError::ValidationError(format!("invalid multipart payload: {}", e))
        })? {
            if bytes.len() + chunk.len() > max_bytes {
                return Err(ServiceError::ValidationError(
                    "file exceeds maximum upload size".to_string(),
                ));
            }
            bytes.extend_from_slice(&chunk);
        }

        return Ok((client_name, bytes));
    }

    Err(ServiceError::ValidationError(
        "no file provided".to_string(),
    ))
}
