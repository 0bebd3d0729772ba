use std::io::BufRead;

use auditdesk_config::Session;
use auditdesk_core::document::DocumentRecord;
use auditdesk_core::person::{classify, AuditStatus, PersonRecord};

use crate::exit_codes::EXIT_AUTH_REQUIRED;
use crate::CliError;

const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

/// Status cell, colored when stdout is a terminal: green OK, red AUDIT.
pub fn paint_status(status: AuditStatus, tty: bool) -> String {
    if !tty {
        return status.to_string();
    }
    match status {
        AuditStatus::Ok => format!("{GREEN}{status}{RESET}"),
        AuditStatus::Audit => format!("{RED}{status}{RESET}"),
    }
}

pub fn stdout_is_tty() -> bool {
    atty::is(atty::Stream::Stdout)
}

/// Fail unless an operator session is active.
pub fn require_session() -> Result<Session, CliError> {
    Session::load().ok_or_else(|| CliError {
        code: EXIT_AUTH_REQUIRED,
        message: "no active operator session".into(),
        hint: Some("run `adesk login USER` first".into()),
    })
}

/// Read one line (the password) from stdin. Prompt goes to stderr so
/// piped usage stays clean.
pub fn read_password() -> Result<String, CliError> {
    eprint!("Password: ");
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|e| CliError {
            code: crate::exit_codes::EXIT_ERROR,
            message: format!("cannot read password from stdin: {e}"),
            hint: None,
        })?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

pub fn print_roster(records: &[&PersonRecord]) {
    let tty = stdout_is_tty();
    let name_w = records.iter().map(|r| r.name.chars().count()).max().unwrap_or(4).max(4);
    let dept_w = records
        .iter()
        .map(|r| r.department.chars().count())
        .max()
        .unwrap_or(10)
        .max(10);

    println!(
        "{:<name_w$}  {:<dept_w$}  {:>5}  {:>8}  STATUS",
        "NAME", "DEPARTMENT", "LATE", "ABSENCES"
    );
    for r in records {
        println!(
            "{:<name_w$}  {:<dept_w$}  {:>5}  {:>8}  {}",
            r.name,
            r.department,
            r.late_count,
            r.absence_count,
            paint_status(classify(r), tty)
        );
    }
}

pub fn print_documents(documents: &[&DocumentRecord]) {
    let code_w = documents.iter().map(|d| d.code.chars().count()).max().unwrap_or(4).max(4);
    let title_w = documents
        .iter()
        .map(|d| d.title.chars().count())
        .max()
        .unwrap_or(5)
        .max(5);

    println!(
        "{:<code_w$}  {:<title_w$}  {:>4}  {:<12}  {:<10}  NEXT REVIEW",
        "CODE", "TITLE", "REV", "STATUS", "AREA"
    );
    for d in documents {
        let review = d
            .next_review_date
            .map(|dt| dt.to_string())
            .unwrap_or_else(|| "-".into());
        println!(
            "{:<code_w$}  {:<title_w$}  {:>4}  {:<12}  {:<10}  {}",
            d.code, d.title, d.revision, d.status, d.area, review
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paint_plain_without_tty() {
        assert_eq!(paint_status(AuditStatus::Ok, false), "OK");
        assert_eq!(paint_status(AuditStatus::Audit, false), "AUDIT");
    }

    #[test]
    fn paint_colored_on_tty() {
        assert!(paint_status(AuditStatus::Ok, true).contains(GREEN));
        assert!(paint_status(AuditStatus::Audit, true).contains(RED));
    }
}
