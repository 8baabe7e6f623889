use std::fmt::Display;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a ticket
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    /// Ticket is open and awaiting triage
    Open,
    /// Ticket is being worked on
    InProgress,
    /// Ticket has been resolved and closed
    Closed,
}

impl TicketStatus {
    /// Wire representation used in the database column and API payloads
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Open => "open",
            TicketStatus::InProgress => "in_progress",
            TicketStatus::Closed => "closed",
        }
    }

    /// Parse the wire representation; None for unknown values
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "open" => Some(TicketStatus::Open),
            "in_progress" => Some(TicketStatus::InProgress),
            "closed" => Some(TicketStatus::Closed),
            _ => None,
        }
    }
}

impl Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A support ticket record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    /// Database row id
    pub id: i64,
    /// Short summary of the issue
    pub subject: String,
    /// Longer free-form description
    pub description: Option<String>,
    /// Current lifecycle status
    pub status: TicketStatus,
    /// Comma-joined stored attachment names; empty string means none
    pub attachments: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

impl Ticket {
    /// The attachment column parsed into individual stored names
    pub fn attachment_list(&self) -> Vec<String> {
        split_attachments(&self.attachments)
    }
}

/// Split a comma-joined attachment column into names, skipping empty segments
pub fn split_attachments(joined: &str) -> Vec<String> {
    joined
        .split(',')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
