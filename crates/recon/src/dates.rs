use chrono::NaiveDate;

/// Formats accepted for human-entered dates, day first. ISO is included
/// for already-normalized exports.
const DAY_FIRST_FORMATS: [&str; 4] = ["%d/%m/%Y", "%d-%m-%Y", "%d/%m/%y", "%Y-%m-%d"];

/// Parse a day-first date string. Anything unparsable — including empty
/// input — yields `None`, the register's explicit missing marker. Bulk
/// ingestion relies on this never failing: one bad cell must not abort a
/// whole batch.
pub fn parse_day_first(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    DAY_FIRST_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_first_slash_format() {
        assert_eq!(
            parse_day_first("14/03/2025"),
            NaiveDate::from_ymd_opt(2025, 3, 14)
        );
    }

    #[test]
    fn day_first_is_not_month_first() {
        // 03/04 is the 3rd of April, never March 4th.
        assert_eq!(
            parse_day_first("03/04/2025"),
            NaiveDate::from_ymd_opt(2025, 4, 3)
        );
    }

    #[test]
    fn dash_and_short_year_variants() {
        assert_eq!(
            parse_day_first("14-03-2025"),
            NaiveDate::from_ymd_opt(2025, 3, 14)
        );
        assert_eq!(
            parse_day_first("14/03/25"),
            NaiveDate::from_ymd_opt(2025, 3, 14)
        );
    }

    #[test]
    fn iso_passthrough() {
        assert_eq!(
            parse_day_first("2025-03-14"),
            NaiveDate::from_ymd_opt(2025, 3, 14)
        );
    }

    #[test]
    fn garbage_coerces_to_missing() {
        assert_eq!(parse_day_first("pendiente"), None);
        assert_eq!(parse_day_first("32/13/2025"), None);
        assert_eq!(parse_day_first(""), None);
        assert_eq!(parse_day_first("   "), None);
    }
}
