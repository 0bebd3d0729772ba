use std::collections::BTreeMap;

use serde::Serialize;

use crate::document::{DocStatus, DocumentRecord};
use crate::person::{classify, AuditStatus, PersonRecord};

/// Aggregate compliance metrics over the roster.
#[derive(Debug, Clone, Serialize)]
pub struct RosterSummary {
    pub total: usize,
    pub flagged: usize,
    pub compliance_rate: f64,
}

/// Count totals and the compliance percentage across a roster.
///
/// `compliance_rate` is 0.0 for an empty roster; the division is guarded
/// explicitly rather than producing NaN.
pub fn roster_summary(records: &[PersonRecord]) -> RosterSummary {
    let total = records.len();
    let flagged = records
        .iter()
        .filter(|r| classify(r) == AuditStatus::Audit)
        .count();
    let compliance_rate = if total == 0 {
        0.0
    } else {
        100.0 * (total - flagged) as f64 / total as f64
    };
    RosterSummary { total, flagged, compliance_rate }
}

/// Aggregate health metrics over the document register.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentSummary {
    pub total: usize,
    pub current: usize,
    pub needs_attention: usize,
    pub score: u32,
    pub distinct_areas: usize,
    pub by_status: BTreeMap<String, usize>,
    pub by_area: BTreeMap<String, usize>,
}

/// Register health score: percentage of documents with Current status,
/// rounded to the nearest integer. 0 for an empty register.
///
/// This is a different rule from the roster compliance rate (presence of a
/// status value, not a threshold on counters); the two are never merged.
pub fn document_score(documents: &[DocumentRecord]) -> u32 {
    let total = documents.len();
    if total == 0 {
        return 0;
    }
    let current = documents
        .iter()
        .filter(|d| d.status == DocStatus::Current)
        .count();
    (100.0 * current as f64 / total as f64).round() as u32
}

pub fn document_summary(documents: &[DocumentRecord]) -> DocumentSummary {
    let mut by_status: BTreeMap<String, usize> = BTreeMap::new();
    let mut by_area: BTreeMap<String, usize> = BTreeMap::new();
    let mut current = 0;

    for doc in documents {
        *by_status.entry(doc.status.wire_name().to_string()).or_insert(0) += 1;
        *by_area.entry(doc.area.clone()).or_insert(0) += 1;
        if doc.status == DocStatus::Current {
            current += 1;
        }
    }

    DocumentSummary {
        total: documents.len(),
        current,
        needs_attention: documents.len() - current,
        score: document_score(documents),
        distinct_areas: by_area.len(),
        by_status,
        by_area,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(name: &str, late: u32, absences: u32) -> PersonRecord {
        PersonRecord {
            name: name.into(),
            department: "Ventas".into(),
            late_count: late,
            absence_count: absences,
        }
    }

    fn doc(code: &str, area: &str, status: DocStatus) -> DocumentRecord {
        DocumentRecord {
            code: code.into(),
            title: format!("Documento {code}"),
            revision: "1".into(),
            issue_date: None,
            next_review_date: None,
            area: area.into(),
            status,
            document_type: "Procedimiento".into(),
            link: String::new(),
            owner: String::new(),
        }
    }

    #[test]
    fn empty_roster_is_zero_not_nan() {
        let summary = roster_summary(&[]);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.flagged, 0);
        assert_eq!(summary.compliance_rate, 0.0);
    }

    #[test]
    fn all_clean_is_full_compliance() {
        let roster = vec![person("a", 0, 0), person("b", 2, 0)];
        assert_eq!(roster_summary(&roster).compliance_rate, 100.0);
    }

    #[test]
    fn all_flagged_is_zero_compliance() {
        let roster = vec![person("a", 3, 0), person("b", 0, 1)];
        let summary = roster_summary(&roster);
        assert_eq!(summary.flagged, 2);
        assert_eq!(summary.compliance_rate, 0.0);
    }

    #[test]
    fn ten_records_three_flagged_is_seventy() {
        let mut roster: Vec<PersonRecord> =
            (0..7).map(|i| person(&format!("ok_{i}"), 1, 0)).collect();
        roster.push(person("late", 4, 0));
        roster.push(person("absent", 0, 1));
        roster.push(person("both", 3, 1));

        let summary = roster_summary(&roster);
        assert_eq!(summary.total, 10);
        assert_eq!(summary.flagged, 3);
        assert_eq!(summary.compliance_rate, 70.0);
    }

    #[test]
    fn empty_register_scores_zero() {
        assert_eq!(document_score(&[]), 0);
    }

    #[test]
    fn eight_of_ten_current_scores_eighty() {
        let mut docs: Vec<DocumentRecord> = (0..8)
            .map(|i| doc(&format!("D-{i}"), "Calidad", DocStatus::Current))
            .collect();
        docs.push(doc("D-8", "RRHH", DocStatus::Obsolete));
        docs.push(doc("D-9", "RRHH", DocStatus::UnderReview));

        assert_eq!(document_score(&docs), 80);
    }

    #[test]
    fn summary_counts_by_status_and_area() {
        let docs = vec![
            doc("A", "Calidad", DocStatus::Current),
            doc("B", "Calidad", DocStatus::Obsolete),
            doc("C", "RRHH", DocStatus::Current),
        ];
        let summary = document_summary(&docs);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.current, 2);
        assert_eq!(summary.needs_attention, 1);
        assert_eq!(summary.distinct_areas, 2);
        assert_eq!(summary.by_status["Vigente"], 2);
        assert_eq!(summary.by_status["Obsoleto"], 1);
        assert_eq!(summary.by_area["Calidad"], 2);
    }
}
