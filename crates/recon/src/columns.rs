//! Recognized bulk-import columns.
//!
//! Bulk CSVs arrive with the upstream system's source-language headers.
//! Exactly ten headers are recognized; everything else is dropped before
//! the rows reach the register.

/// Canonical field names, in register column order.
pub mod canonical {
    pub const CODE: &str = "code";
    pub const TITLE: &str = "title";
    pub const REVISION: &str = "revision";
    pub const ISSUE_DATE: &str = "issue_date";
    pub const NEXT_REVIEW_DATE: &str = "next_review_date";
    pub const AREA: &str = "area";
    pub const STATUS: &str = "status";
    pub const DOCUMENT_TYPE: &str = "document_type";
    pub const LINK: &str = "link";
    pub const OWNER: &str = "owner";
}

/// The fixed source-header → canonical-field rename map.
pub const RENAME_MAP: [(&str, &str); 10] = [
    ("Código del Documento", canonical::CODE),
    ("Título del Documento", canonical::TITLE),
    ("Versión Actual", canonical::REVISION),
    ("Fecha de Emisión", canonical::ISSUE_DATE),
    ("Próxima Revisión", canonical::NEXT_REVIEW_DATE),
    ("Área Aplicable", canonical::AREA),
    ("Estado", canonical::STATUS),
    ("Tipo de Documento", canonical::DOCUMENT_TYPE),
    ("Enlace al Documento Controlado", canonical::LINK),
    ("Puesto Responsable", canonical::OWNER),
];

/// Canonical name for a source header, if recognized. Headers are trimmed
/// before lookup; matching is otherwise exact.
pub fn canonical_for(header: &str) -> Option<&'static str> {
    let header = header.trim();
    RENAME_MAP
        .iter()
        .find(|(source, _)| *source == header)
        .map(|(_, canonical)| *canonical)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_ten_headers_recognized() {
        for (source, expected) in RENAME_MAP {
            assert_eq!(canonical_for(source), Some(expected));
        }
    }

    #[test]
    fn unknown_header_is_none() {
        assert_eq!(canonical_for("Comentarios"), None);
        assert_eq!(canonical_for(""), None);
    }

    #[test]
    fn header_whitespace_is_trimmed() {
        assert_eq!(canonical_for("  Estado "), Some(canonical::STATUS));
    }

    #[test]
    fn matching_is_exact_not_fuzzy() {
        assert_eq!(canonical_for("estado"), None);
        assert_eq!(canonical_for("Codigo del Documento"), None);
    }
}
