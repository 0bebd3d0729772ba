//! Operator-facing table filters: free-text search and exact status match.
//!
//! These mirror the explorer controls — the text filter is a
//! case-insensitive substring match over the identity-ish columns, the
//! status filter an exact match. Both are pure and non-destructive: they
//! return references into the input slice in original order.

use crate::document::{DocStatus, DocumentRecord};
use crate::person::{classify, AuditStatus, PersonRecord};

/// Roster search: matches on name. Empty query matches everything.
pub fn filter_roster<'a>(
    records: &'a [PersonRecord],
    query: &str,
    status: Option<AuditStatus>,
) -> Vec<&'a PersonRecord> {
    let needle = query.trim().to_lowercase();
    records
        .iter()
        .filter(|r| needle.is_empty() || r.name.to_lowercase().contains(&needle))
        .filter(|r| status.map_or(true, |s| classify(r) == s))
        .collect()
}

/// Document search: matches on title OR code, like the explorer tab.
pub fn filter_documents<'a>(
    documents: &'a [DocumentRecord],
    query: &str,
    status: Option<&DocStatus>,
) -> Vec<&'a DocumentRecord> {
    let needle = query.trim().to_lowercase();
    documents
        .iter()
        .filter(|d| {
            needle.is_empty()
                || d.title.to_lowercase().contains(&needle)
                || d.code.to_lowercase().contains(&needle)
        })
        .filter(|d| status.map_or(true, |s| &d.status == s))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(name: &str, late: u32) -> PersonRecord {
        PersonRecord {
            name: name.into(),
            department: "TI".into(),
            late_count: late,
            absence_count: 0,
        }
    }

    fn doc(code: &str, title: &str, status: DocStatus) -> DocumentRecord {
        DocumentRecord {
            code: code.into(),
            title: title.into(),
            revision: "0".into(),
            issue_date: None,
            next_review_date: None,
            area: "Calidad".into(),
            status,
            document_type: String::new(),
            link: String::new(),
            owner: String::new(),
        }
    }

    #[test]
    fn empty_query_keeps_everything() {
        let roster = vec![person("Ana", 0), person("Juan", 4)];
        assert_eq!(filter_roster(&roster, "", None).len(), 2);
        assert_eq!(filter_roster(&roster, "   ", None).len(), 2);
    }

    #[test]
    fn text_filter_is_case_insensitive() {
        let roster = vec![person("Ana Gómez", 0), person("Juan Pérez", 0)];
        let hits = filter_roster(&roster, "gómez", None);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Ana Gómez");
    }

    #[test]
    fn status_filter_uses_derived_classification() {
        let roster = vec![person("Ana", 0), person("Juan", 4)];
        let flagged = filter_roster(&roster, "", Some(AuditStatus::Audit));
        assert_eq!(flagged.len(), 1);
        assert_eq!(flagged[0].name, "Juan");
    }

    #[test]
    fn document_filter_matches_title_or_code() {
        let docs = vec![
            doc("SGC-001", "Manual de Calidad", DocStatus::Current),
            doc("SGC-002", "Control de Registros", DocStatus::Obsolete),
        ];
        assert_eq!(filter_documents(&docs, "manual", None).len(), 1);
        assert_eq!(filter_documents(&docs, "sgc-002", None).len(), 1);
        assert_eq!(filter_documents(&docs, "sgc", None).len(), 2);
    }

    #[test]
    fn document_filters_compose() {
        let docs = vec![
            doc("SGC-001", "Manual de Calidad", DocStatus::Current),
            doc("SGC-002", "Manual de Compras", DocStatus::Obsolete),
        ];
        let hits = filter_documents(&docs, "manual", Some(&DocStatus::Obsolete));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].code, "SGC-002");
    }
}
