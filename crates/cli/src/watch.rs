//! `adesk watch` — periodic full re-read-and-redisplay.
//!
//! There is no incremental update and no change feed: each tick reads the
//! whole table again and reprints it, the same refresh model as the
//! dashboard's timer.

use std::time::Duration;

use auditdesk_core::document::DocumentRecord;
use auditdesk_core::metrics::{document_summary, roster_summary};
use auditdesk_remote::TableClient;

use crate::util::{print_documents, print_roster, require_session};
use crate::{open_store, CliError};

const DOCUMENTS_TABLE: &str = "documentos_sgc";

pub fn cmd_watch(
    docs: bool,
    remote: bool,
    interval_secs: u64,
    count: Option<usize>,
) -> Result<(), CliError> {
    require_session()?;
    let interval = Duration::from_secs(interval_secs.max(1));
    // None = run until interrupted.
    let ticks = count.unwrap_or(usize::MAX);

    if remote {
        if !docs {
            return Err(CliError {
                code: crate::exit_codes::EXIT_USAGE,
                message: "--remote watch covers the document register only".into(),
                hint: Some("use `adesk watch --docs --remote`".into()),
            });
        }
        let client = TableClient::from_saved_auth()?;
        client.poll::<DocumentRecord, _>(DOCUMENTS_TABLE, interval, ticks, |snapshot| {
            render_documents(snapshot);
        })?;
        return Ok(());
    }

    for tick in 0..ticks {
        let store = open_store()?;
        if docs {
            render_documents(&store.load_documents()?);
        } else {
            render_roster(&store.load_roster()?);
        }
        if tick + 1 < ticks {
            std::thread::sleep(interval);
        }
    }
    Ok(())
}

fn render_roster(roster: &[auditdesk_core::person::PersonRecord]) {
    let summary = roster_summary(roster);
    println!(
        "--- roster: {} total, {} to audit, {:.1}% compliance ---",
        summary.total, summary.flagged, summary.compliance_rate
    );
    print_roster(&roster.iter().collect::<Vec<_>>());
}

fn render_documents(documents: &[DocumentRecord]) {
    let summary = document_summary(documents);
    println!(
        "--- documents: {} total, {} current, score {}% ---",
        summary.total, summary.current, summary.score
    );
    print_documents(&documents.iter().collect::<Vec<_>>());
}
