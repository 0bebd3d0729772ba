// Single-file audit store using SQLite

use std::path::Path;

use chrono::NaiveDate;
use rusqlite::{params, Connection, ErrorCode};

use auditdesk_core::document::{DocStatus, DocumentRecord};
use auditdesk_core::person::PersonRecord;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS roster (
    pos INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    department TEXT NOT NULL,
    late_count INTEGER NOT NULL DEFAULT 0,
    absence_count INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS documents (
    pos INTEGER PRIMARY KEY,
    code TEXT NOT NULL,
    title TEXT NOT NULL,
    revision TEXT NOT NULL DEFAULT '0',
    issue_date TEXT,
    next_review_date TEXT,
    area TEXT NOT NULL DEFAULT '',
    status TEXT NOT NULL DEFAULT '',
    document_type TEXT NOT NULL DEFAULT '',
    link TEXT NOT NULL DEFAULT '',
    owner TEXT NOT NULL DEFAULT ''
);
"#;

#[derive(Debug)]
pub enum StoreError {
    /// The database is held by another writer (locked/busy).
    Conflict(String),
    /// Any other SQLite or filesystem failure.
    Io(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Conflict(msg) => write!(f, "store held by another writer: {msg}"),
            Self::Io(msg) => write!(f, "store error: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(e, _)
                if matches!(e.code, ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked) =>
            {
                Self::Conflict(err.to_string())
            }
            _ => Self::Io(err.to_string()),
        }
    }
}

/// Whole-table store over a single SQLite file.
///
/// There is deliberately no partial-row API: every save rewrites the full
/// table inside one transaction, so a failed write leaves the previous
/// contents intact and the caller re-reads instead of trusting its
/// pre-write copy. `pos` preserves row order across round trips.
pub struct LocalStore {
    conn: Connection,
}

impl LocalStore {
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| StoreError::Io(e.to_string()))?;
            }
        }
        let conn = Connection::open(path)?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    // ── Roster ──────────────────────────────────────────────────────

    pub fn load_roster(&self) -> Result<Vec<PersonRecord>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT name, department, late_count, absence_count FROM roster ORDER BY pos",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(PersonRecord {
                name: row.get(0)?,
                department: row.get(1)?,
                late_count: row.get(2)?,
                absence_count: row.get(3)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(StoreError::from)
    }

    pub fn save_roster(&mut self, records: &[PersonRecord]) -> Result<(), StoreError> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM roster", [])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO roster (pos, name, department, late_count, absence_count)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for (pos, r) in records.iter().enumerate() {
                stmt.execute(params![
                    pos as i64,
                    r.name,
                    r.department,
                    r.late_count,
                    r.absence_count
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    // ── Documents ───────────────────────────────────────────────────

    pub fn load_documents(&self) -> Result<Vec<DocumentRecord>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT code, title, revision, issue_date, next_review_date,
                    area, status, document_type, link, owner
             FROM documents ORDER BY pos",
        )?;
        let rows = stmt.query_map([], |row| {
            let issue: Option<String> = row.get(3)?;
            let review: Option<String> = row.get(4)?;
            let status: String = row.get(6)?;
            Ok(DocumentRecord {
                code: row.get(0)?,
                title: row.get(1)?,
                revision: row.get(2)?,
                issue_date: issue.as_deref().and_then(parse_iso),
                next_review_date: review.as_deref().and_then(parse_iso),
                area: row.get(5)?,
                status: DocStatus::parse_wire(&status),
                document_type: row.get(7)?,
                link: row.get(8)?,
                owner: row.get(9)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(StoreError::from)
    }

    pub fn save_documents(&mut self, documents: &[DocumentRecord]) -> Result<(), StoreError> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM documents", [])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO documents
                 (pos, code, title, revision, issue_date, next_review_date,
                  area, status, document_type, link, owner)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            )?;
            for (pos, d) in documents.iter().enumerate() {
                stmt.execute(params![
                    pos as i64,
                    d.code,
                    d.title,
                    d.revision,
                    d.issue_date.map(|dt| dt.to_string()),
                    d.next_review_date.map(|dt| dt.to_string()),
                    d.area,
                    d.status.wire_name(),
                    d.document_type,
                    d.link,
                    d.owner
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    /// Full replacement of the document register. Same delete-then-insert
    /// as `save_documents`, named separately because bulk import is the
    /// one caller that must be atomic by contract: the transaction either
    /// commits the whole cleaned set or leaves the old register untouched.
    pub fn replace_documents(&mut self, documents: &[DocumentRecord]) -> Result<(), StoreError> {
        self.save_documents(documents)
    }
}

fn parse_iso(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}
