//! Bulk-replace cleaning pipeline.
//!
//! Takes raw CSV text (already decoded to UTF-8, delimiter already
//! sniffed), applies the fixed column rename map, normalizes dates and
//! defaults, and produces the full replacement set for the document
//! register. Cleaning is total over rows: bad cells degrade to defaults
//! or missing markers, they never abort the batch. The only hard failure
//! is a header row with zero recognized columns.

use auditdesk_core::document::{DocStatus, DocumentRecord};

use crate::columns::{canonical, canonical_for};
use crate::dates::parse_day_first;
use crate::error::ReconcileError;

/// What cleaning did, for the operator's stderr note.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanReport {
    pub rows: usize,
    pub recognized_columns: usize,
    pub dropped_columns: Vec<String>,
    pub coerced_dates: usize,
}

fn cell<'a>(record: &'a csv::StringRecord, idx: Option<usize>) -> &'a str {
    idx.and_then(|i| record.get(i)).unwrap_or("").trim()
}

/// Clean raw CSV rows into the replacement document set.
///
/// Unrecognized columns are dropped, recognized ones renamed to canonical
/// fields, the two date columns parsed day-first with unparsable values
/// coerced to missing, and an absent revision defaults to the literal "0".
pub fn clean_csv(
    csv_data: &str,
    delimiter: u8,
) -> Result<(Vec<DocumentRecord>, CleanReport), ReconcileError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(csv_data.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| ReconcileError::Schema(e.to_string()))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    // Map each input column to its canonical field; first occurrence wins.
    let mut column_of: Vec<Option<&'static str>> = Vec::with_capacity(headers.len());
    let mut seen: Vec<&'static str> = Vec::new();
    let mut dropped: Vec<String> = Vec::new();
    for header in &headers {
        match canonical_for(header) {
            Some(name) if !seen.contains(&name) => {
                seen.push(name);
                column_of.push(Some(name));
            }
            Some(_) => column_of.push(None),
            None => {
                dropped.push(header.trim().to_string());
                column_of.push(None);
            }
        }
    }

    if seen.is_empty() {
        return Err(ReconcileError::Schema(
            "no recognized columns in bulk input".into(),
        ));
    }

    let index_of = |name: &str| -> Option<usize> {
        column_of.iter().position(|c| *c == Some(name))
    };
    let code_idx = index_of(canonical::CODE);
    let title_idx = index_of(canonical::TITLE);
    let revision_idx = index_of(canonical::REVISION);
    let issue_idx = index_of(canonical::ISSUE_DATE);
    let review_idx = index_of(canonical::NEXT_REVIEW_DATE);
    let area_idx = index_of(canonical::AREA);
    let status_idx = index_of(canonical::STATUS);
    let type_idx = index_of(canonical::DOCUMENT_TYPE);
    let link_idx = index_of(canonical::LINK);
    let owner_idx = index_of(canonical::OWNER);

    let mut documents = Vec::new();
    let mut coerced_dates = 0usize;

    for record in reader.records() {
        let record = record.map_err(|e| ReconcileError::Schema(e.to_string()))?;

        let issue_raw = cell(&record, issue_idx);
        let issue_date = parse_day_first(issue_raw);
        if issue_date.is_none() && !issue_raw.is_empty() {
            coerced_dates += 1;
        }
        let review_raw = cell(&record, review_idx);
        let next_review_date = parse_day_first(review_raw);
        if next_review_date.is_none() && !review_raw.is_empty() {
            coerced_dates += 1;
        }

        let revision_raw = cell(&record, revision_idx);
        let revision = if revision_raw.is_empty() {
            "0".to_string()
        } else {
            revision_raw.to_string()
        };

        documents.push(DocumentRecord {
            code: cell(&record, code_idx).to_string(),
            title: cell(&record, title_idx).to_string(),
            revision,
            issue_date,
            next_review_date,
            area: cell(&record, area_idx).to_string(),
            status: DocStatus::parse_wire(cell(&record, status_idx)),
            document_type: cell(&record, type_idx).to_string(),
            link: cell(&record, link_idx).to_string(),
            owner: cell(&record, owner_idx).to_string(),
        });
    }

    let report = CleanReport {
        rows: documents.len(),
        recognized_columns: seen.len(),
        dropped_columns: dropped,
        coerced_dates,
    };
    Ok((documents, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const FULL_HEADER: &str = "Código del Documento,Título del Documento,Versión Actual,\
Fecha de Emisión,Próxima Revisión,Área Aplicable,Estado,Tipo de Documento,\
Enlace al Documento Controlado,Puesto Responsable";

    #[test]
    fn clean_full_row() {
        let csv = format!(
            "{FULL_HEADER}\n\
SGC-001,Manual de Calidad,2,14/03/2024,14/03/2025,Calidad,Vigente,Manual,https://files.example/m.pdf,Gerente de Calidad\n"
        );
        let (docs, report) = clean_csv(&csv, b',').unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(report.recognized_columns, 10);
        assert!(report.dropped_columns.is_empty());

        let doc = &docs[0];
        assert_eq!(doc.code, "SGC-001");
        assert_eq!(doc.revision, "2");
        assert_eq!(doc.issue_date, NaiveDate::from_ymd_opt(2024, 3, 14));
        assert_eq!(doc.next_review_date, NaiveDate::from_ymd_opt(2025, 3, 14));
        assert_eq!(doc.status, DocStatus::Current);
        assert_eq!(doc.owner, "Gerente de Calidad");
    }

    #[test]
    fn unrecognized_columns_dropped() {
        let csv = "Código del Documento,Comentarios,Estado\n\
SGC-001,esto se descarta,Vigente\n";
        let (docs, report) = clean_csv(csv, b',').unwrap();
        assert_eq!(report.recognized_columns, 2);
        assert_eq!(report.dropped_columns, vec!["Comentarios".to_string()]);
        assert_eq!(docs[0].code, "SGC-001");
        assert_eq!(docs[0].status, DocStatus::Current);
        // Unmapped fields come out empty, not filled from dropped columns.
        assert_eq!(docs[0].title, "");
    }

    #[test]
    fn zero_recognized_columns_is_schema_error() {
        let csv = "Nombre,Edad\nAna,30\n";
        let err = clean_csv(csv, b',').unwrap_err();
        assert!(matches!(err, ReconcileError::Schema(_)));
    }

    #[test]
    fn missing_revision_defaults_to_zero() {
        let csv = "Código del Documento,Versión Actual\nSGC-001,\nSGC-002,3\n";
        let (docs, _) = clean_csv(csv, b',').unwrap();
        assert_eq!(docs[0].revision, "0");
        assert_eq!(docs[1].revision, "3");
    }

    #[test]
    fn garbage_date_coerces_without_aborting() {
        let csv = "Código del Documento,Fecha de Emisión\n\
SGC-001,pendiente\nSGC-002,01/02/2025\n";
        let (docs, report) = clean_csv(csv, b',').unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].issue_date, None);
        assert_eq!(docs[1].issue_date, NaiveDate::from_ymd_opt(2025, 2, 1));
        assert_eq!(report.coerced_dates, 1);
    }

    #[test]
    fn empty_date_is_missing_not_coerced() {
        let csv = "Código del Documento,Fecha de Emisión\nSGC-001,\n";
        let (docs, report) = clean_csv(csv, b',').unwrap();
        assert_eq!(docs[0].issue_date, None);
        assert_eq!(report.coerced_dates, 0);
    }

    #[test]
    fn duplicate_header_first_occurrence_wins() {
        let csv = "Estado,Estado\nVigente,Obsoleto\n";
        let (docs, report) = clean_csv(csv, b',').unwrap();
        assert_eq!(report.recognized_columns, 1);
        assert_eq!(docs[0].status, DocStatus::Current);
    }

    #[test]
    fn cleaning_is_idempotent() {
        let csv = "Código del Documento,Estado,Versión Actual\n\
SGC-001,Vigente,\nSGC-002,Obsoleto,4\n";
        let (first, _) = clean_csv(csv, b',').unwrap();
        let (second, _) = clean_csv(csv, b',').unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn semicolon_delimiter_supported() {
        let csv = "Código del Documento;Estado\nSGC-001;Vigente\n";
        let (docs, _) = clean_csv(csv, b';').unwrap();
        assert_eq!(docs[0].code, "SGC-001");
    }
}
