use auditdesk_core::document::{DocStatus, DocumentRecord};
use auditdesk_core::person::PersonRecord;
use chrono::NaiveDate;
use serde::Serialize;

use crate::error::ReconcileError;

/// What an upsert did. Exactly one of the two occurs per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Created,
    Updated,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Created => write!(f, "created"),
            Self::Updated => write!(f, "updated"),
        }
    }
}

/// Mutable fields of a roster record (everything but the identity key).
#[derive(Debug, Clone)]
pub struct PersonFields {
    pub department: String,
    pub late_count: u32,
    pub absence_count: u32,
}

/// Insert-or-update a roster record keyed by trimmed name.
///
/// Scans for the first record whose trimmed name equals the trimmed key.
/// A hit replaces the mutable fields in place, preserving row position; a
/// miss appends. Table length changes by at most one, and applying the
/// same (key, fields) twice leaves the table as after one application.
pub fn upsert_person(
    table: &mut Vec<PersonRecord>,
    key: &str,
    fields: PersonFields,
) -> Result<Outcome, ReconcileError> {
    let key = key.trim();
    if key.is_empty() {
        return Err(ReconcileError::Validation("name must not be empty".into()));
    }

    if let Some(existing) = table.iter_mut().find(|r| r.name.trim() == key) {
        existing.department = fields.department;
        existing.late_count = fields.late_count;
        existing.absence_count = fields.absence_count;
        return Ok(Outcome::Updated);
    }

    table.push(PersonRecord {
        name: key.to_string(),
        department: fields.department,
        late_count: fields.late_count,
        absence_count: fields.absence_count,
    });
    Ok(Outcome::Created)
}

/// Mutable fields of a document record (everything but code and title).
#[derive(Debug, Clone)]
pub struct DocumentFields {
    pub revision: String,
    pub issue_date: Option<NaiveDate>,
    pub next_review_date: Option<NaiveDate>,
    pub area: String,
    pub status: DocStatus,
    pub document_type: String,
    pub link: String,
    pub owner: String,
}

/// Insert-or-update a document keyed by the operator-entered (code, title)
/// pairing. Both halves of the key are required, matching the original
/// registration form.
pub fn upsert_document(
    table: &mut Vec<DocumentRecord>,
    code: &str,
    title: &str,
    fields: DocumentFields,
) -> Result<Outcome, ReconcileError> {
    let code = code.trim();
    let title = title.trim();
    if code.is_empty() {
        return Err(ReconcileError::Validation("document code must not be empty".into()));
    }
    if title.is_empty() {
        return Err(ReconcileError::Validation("document title must not be empty".into()));
    }

    if let Some(existing) = table
        .iter_mut()
        .find(|d| d.code.trim() == code && d.title.trim() == title)
    {
        existing.revision = fields.revision;
        existing.issue_date = fields.issue_date;
        existing.next_review_date = fields.next_review_date;
        existing.area = fields.area;
        existing.status = fields.status;
        existing.document_type = fields.document_type;
        existing.link = fields.link;
        existing.owner = fields.owner;
        return Ok(Outcome::Updated);
    }

    table.push(DocumentRecord {
        code: code.to_string(),
        title: title.to_string(),
        revision: fields.revision,
        issue_date: fields.issue_date,
        next_review_date: fields.next_review_date,
        area: fields.area,
        status: fields.status,
        document_type: fields.document_type,
        link: fields.link,
        owner: fields.owner,
    });
    Ok(Outcome::Created)
}
