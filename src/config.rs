//! Service configuration
//!
//! Every setting has a default suitable for local development and can be
//! overridden through a `TICKETDESK_*` environment variable.

use std::env;

use serde::{Deserialize, Serialize};

/// Default extension allow-list for uploads
const DEFAULT_ALLOWED_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "pdf", "txt", "doc", "docx", "xls", "xlsx", "zip",
];

/// Runtime configuration for the service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Address the HTTP server binds to
    pub bind_addr: String,
    /// Path of the SQLite database file
    pub database_path: String,
    /// Directory uploaded files are written to
    pub upload_dir: String,
    /// Bearer token required on /api routes
    pub api_token: String,
    /// Maximum accepted upload size in bytes
    pub max_upload_bytes: usize,
    /// Lowercased file extensions accepted for upload
    pub allowed_extensions: Vec<String>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        ServiceConfig {
            bind_addr: "127.0.0.1:8080".to_string(),
            database_path: "tickets.db".to_string(),
            upload_dir: "uploads".to_string(),
            api_token: "dev-token".to_string(),
            max_upload_bytes: 10 * 1024 * 1024,
            allowed_extensions: DEFAULT_ALLOWED_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl ServiceConfig {
    /// Build the configuration from TICKETDESK_* environment variables,
    /// falling back to defaults for anything unset or unparseable
    pub fn from_env() -> Self {
        let defaults = ServiceConfig::default();

        ServiceConfig {
            bind_addr: env_or("TICKETDESK_BIND", defaults.bind_addr),
            database_path: env_or("TICKETDESK_DB", defaults.database_path),
            upload_dir: env_or("TICKETDESK_UPLOAD_DIR", defaults.upload_dir),
            api_token: env_or("TICKETDESK_API_TOKEN", defaults.api_token),
            max_upload_bytes: env::var("TICKETDESK_MAX_UPLOAD_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_upload_bytes),
            allowed_extensions: env::var("TICKETDESK_ALLOWED_EXTENSIONS")
                .ok()
                .map(|v| parse_extension_list(&v))
                .filter(|list| !list.is_empty())
                .unwrap_or(defaults.allowed_extensions),
        }
    }
}

fn env_or(key: &str, default: String) -> String {
    env::var(key).unwrap_or(default)
}

/// Parse a comma-separated extension list, lowercasing and trimming entries
fn parse_extension_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}
