use serde::Deserialize;

/// Create ticket request
#[derive(Deserialize)]
pub struct CreateTicketRequest {
    /// Short summary of the issue
    pub subject: String,
    /// Optional longer description
    pub description: Option<String>,
}

/// Update ticket status request
#[derive(Deserialize)]
pub struct UpdateStatusRequest {
    /// One of: open, in_progress, closed
    pub status: String,
}
