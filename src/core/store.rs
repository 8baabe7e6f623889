//! SQLite-backed ticket storage
//!
//! A thin data-access layer over rusqlite. The attachment append is a single
//! UPDATE so concurrent uploads against the same ticket cannot lose entries.

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::core::error::ServiceError;
use crate::core::ticket::{Ticket, TicketStatus};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS tickets (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    subject     TEXT NOT NULL,
    description TEXT,
    status      TEXT NOT NULL DEFAULT 'open',
    attachments TEXT NOT NULL DEFAULT '',
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL
)";

/// Persistent store for ticket records
pub struct TicketStore {
    conn: Connection,
}

impl TicketStore {
    /// Open (or create) the database file and ensure the schema exists
    pub fn open(path: &Path) -> Result<Self, ServiceError> {
        let conn = Connection::open(path)?;
        conn.execute(SCHEMA, [])?;
        Ok(TicketStore { conn })
    }

    /// In-memory store for tests
    pub fn open_in_memory() -> Result<Self, ServiceError> {
        let conn = Connection::open_in_memory()?;
        conn.execute(SCHEMA, [])?;
        Ok(TicketStore { conn })
    }

    /// Insert a new ticket and return it with its assigned id
    pub fn create(
        &self,
        subject: &str,
        description: Option<&str>,
    ) -> Result<Ticket, ServiceError> {
        let now = Utc::now();
        self.conn.execute(
            "INSERT INTO tickets (subject, description, status, attachments, created_at, updated_at)
             VALUES (?1, ?2, 'open', '', ?3, ?3)",
            params![subject, description, now.to_rfc3339()],
        )?;
        let id = self.conn.last_insert_rowid();

        Ok(Ticket {
            id,
            subject: subject.to_string(),
            description: description.map(str::to_string),
            status: TicketStatus::Open,
            attachments: String::new(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Fetch a ticket by id
    pub fn get(&self, id: i64) -> Result<Option<Ticket>, ServiceError> {
        let ticket = self
            .conn
            .query_row(
                "SELECT id, subject, description, status, attachments, created_at, updated_at
                 FROM tickets WHERE id = ?1",
                params![id],
                row_to_ticket,
            )
            .optional()?;
        Ok(ticket)
    }

    /// List all tickets, newest first
    pub fn list(&self) -> Result<Vec<Ticket>, ServiceError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, subject, description, status, attachments, created_at, updated_at
             FROM tickets ORDER BY id DESC",
        )?;
        let tickets = stmt
            .query_map([], row_to_ticket)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(tickets)
    }

    /// Update a ticket's status; false if the ticket does not exist
    pub fn set_status(&self, id: i64, status: TicketStatus) -> Result<bool, ServiceError> {
        let changed = self.conn.execute(
            "UPDATE tickets SET status = ?2, updated_at = ?3 WHERE id = ?1",
            params![id, status.as_str(), Utc::now().to_rfc3339()],
        )?;
        Ok(changed > 0)
    }

    /// Append a stored attachment name to a ticket's attachment column.
    ///
    /// The append happens inside the UPDATE statement itself, so two callers
    /// appending to the same ticket both land. Returns the new joined column
    /// value, or None if the ticket does not exist.
    pub fn append_attachment(
        &self,
        id: i64,
        stored_name: &str,
    ) -> Result<Option<String>, ServiceError> {
        let changed = self.conn.execute(
            "UPDATE tickets
             SET attachments = CASE
                    WHEN attachments = '' THEN ?2
                    ELSE attachments || ',' || ?2
                 END,
                 updated_at = ?3
             WHERE id = ?1",
            params![id, stored_name, Utc::now().to_rfc3339()],
        )?;
        if changed == 0 {
            return Ok(None);
        }

        let joined = self.conn.query_row(
            "SELECT attachments FROM tickets WHERE id = ?1",
            params![id],
            |row| row.get::<_, String>(0),
        )?;
        Ok(Some(joined))
    }
}

fn row_to_ticket(row: &Row<'_>) -> rusqlite::Result<Ticket> {
    let status_raw: String = row.get(3)?;
    let created_raw: String = row.get(5)?;
    let updated_raw: String = row.get(6)?;

    Ok(Ticket {
        id: row.get(0)?,
        subject: row.get(1)?,
        description: row.get(2)?,
        status: parse_status(&status_raw)?,
        attachments: row.get(4)?,
        created_at: parse_timestamp(&created_raw, 5)?,
        updated_at: parse_timestamp(&updated_raw, 6)?,
    })
}

fn parse_status(raw: &str) -> rusqlite::Result<TicketStatus> {
    TicketStatus::parse(raw).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            3,
            rusqlite::types::Type::Text,
            Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("unknown ticket status: {}", raw),
            )),
        )
    })
}

fn parse_timestamp(raw: &str, column: usize) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                column,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        })
}
