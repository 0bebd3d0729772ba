use serde::{Deserialize, Serialize};

/// A late-arrival count at or above this flags the record for audit.
pub const LATE_THRESHOLD: u32 = 3;

/// One row of the personnel roster.
///
/// `name` is the identity field: case-sensitive exact match after trimming.
/// The audit status is derived from the counters on every read and never
/// stored alongside them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRecord {
    pub name: String,
    pub department: String,
    pub late_count: u32,
    pub absence_count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditStatus {
    Ok,
    Audit,
}

impl std::fmt::Display for AuditStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ok => write!(f, "OK"),
            Self::Audit => write!(f, "AUDIT"),
        }
    }
}

/// Classify one roster record.
///
/// Flags for audit when `late_count >= 3` or `absence_count >= 1`.
/// The source system carried this rule in two spellings (`> 0` and `>= 1`
/// on the absence counter); over unsigned integers they are the same
/// predicate and it lives here exactly once.
pub fn classify(record: &PersonRecord) -> AuditStatus {
    if record.late_count >= LATE_THRESHOLD || record.absence_count >= 1 {
        AuditStatus::Audit
    } else {
        AuditStatus::Ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(late: u32, absences: u32) -> PersonRecord {
        PersonRecord {
            name: "Ana Gómez".into(),
            department: "RH".into(),
            late_count: late,
            absence_count: absences,
        }
    }

    #[test]
    fn clean_record_is_ok() {
        assert_eq!(classify(&person(0, 0)), AuditStatus::Ok);
        assert_eq!(classify(&person(2, 0)), AuditStatus::Ok);
    }

    #[test]
    fn late_threshold_boundary() {
        assert_eq!(classify(&person(2, 0)), AuditStatus::Ok);
        assert_eq!(classify(&person(3, 0)), AuditStatus::Audit);
        assert_eq!(classify(&person(4, 0)), AuditStatus::Audit);
    }

    #[test]
    fn any_absence_flags() {
        // Both historical spellings of the rule: absence > 0 and absence >= 1.
        assert_eq!(classify(&person(0, 1)), AuditStatus::Audit);
        assert_eq!(classify(&person(2, 1)), AuditStatus::Audit);
    }

    #[test]
    fn both_counters_over() {
        assert_eq!(classify(&person(5, 2)), AuditStatus::Audit);
    }

    #[test]
    fn status_display() {
        assert_eq!(AuditStatus::Ok.to_string(), "OK");
        assert_eq!(AuditStatus::Audit.to_string(), "AUDIT");
    }
}
