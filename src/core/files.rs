//! Attachment file handling
//!
//! Filename sanitization, extension vetting and writing uploaded bytes to
//! the upload directory under a generated unique name.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use uuid::Uuid;

use crate::core::error::ServiceError;

/// Sanitize a client-supplied filename.
///
/// Takes the last path component (so `../../etc/passwd` becomes `passwd`),
/// replaces whitespace with underscores, drops every character outside
/// `[A-Za-z0-9._-]` and trims leading dots. The result may be empty, which
/// callers must treat as an invalid filename.
pub fn sanitize_filename(raw: &str) -> String {
    let last = raw
        .rsplit(|c| c == '/' || c == '\\')
        .next()
        .unwrap_or_default();

    let cleaned: String = last
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect();

    cleaned.trim_start_matches('.').to_string()
}

/// Lowercased extension of a sanitized filename, if it has one
pub fn extension(name: &str) -> Option<String> {
    let (stem, ext) = name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Whether an extension is in the configured allowed set
pub fn is_allowed(ext: &str, allowed: &[String]) -> bool {
    allowed.iter().any(|a| a.eq_ignore_ascii_case(ext))
}

/// Generate the unique stored name for an upload.
///
/// `ticket_{id}_{unix_seconds}_{uuid8}.{ext}` — the uuid suffix keeps two
/// uploads within the same second from colliding.
pub fn stored_name(ticket_id: i64, ext: &str) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!(
        "ticket_{}_{}_{}.{}",
        ticket_id,
        Utc::now().timestamp(),
        &suffix[..8],
        ext
    )
}

/// Write uploaded bytes under the upload directory, creating it if missing.
///
/// Returns the full path of the written file.
pub fn save_upload(upload_dir: &Path, name: &str, bytes: &[u8]) -> Result<PathBuf, ServiceError> {
    fs::create_dir_all(upload_dir)?;
    let path = upload_dir.join(name);
    fs::write(&path, bytes)?;
    Ok(path)
}
