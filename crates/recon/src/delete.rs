//! Identity-checked positional delete.
//!
//! The deletion UI captures a row position when the candidate list is
//! rendered; the table may have changed by the time the operator confirms.
//! Deleting by position alone would then remove the wrong record, so the
//! delete re-validates identity: the position is only a hint, the key is
//! authoritative.

use auditdesk_core::document::DocumentRecord;
use auditdesk_core::person::PersonRecord;

use crate::error::ReconcileError;

fn delete_at_keyed<T, F>(
    table: &mut Vec<T>,
    position: usize,
    expected_key: &str,
    key_of: F,
) -> Result<T, ReconcileError>
where
    F: Fn(&T) -> &str,
{
    let expected = expected_key.trim();
    if expected.is_empty() {
        return Err(ReconcileError::Validation("delete key must not be empty".into()));
    }

    // Fast path: the snapshot position still points at the right record.
    if position < table.len() && key_of(&table[position]).trim() == expected {
        return Ok(table.remove(position));
    }

    // The table moved underneath the snapshot; re-locate by key.
    match table.iter().position(|r| key_of(r).trim() == expected) {
        Some(actual) => Ok(table.remove(actual)),
        None => Err(ReconcileError::NotFound(format!(
            "no record with key '{expected}'"
        ))),
    }
}

/// Remove the roster record identified by `expected_name`, using the
/// snapshot `position` as a hint. Returns the removed record.
pub fn delete_person_at(
    table: &mut Vec<PersonRecord>,
    position: usize,
    expected_name: &str,
) -> Result<PersonRecord, ReconcileError> {
    delete_at_keyed(table, position, expected_name, |r| &r.name)
}

/// Remove the document identified by `expected_code`, using the snapshot
/// `position` as a hint.
pub fn delete_document_at(
    table: &mut Vec<DocumentRecord>,
    position: usize,
    expected_code: &str,
) -> Result<DocumentRecord, ReconcileError> {
    delete_at_keyed(table, position, expected_code, |d| &d.code)
}
