//! `adesk docs` — controlled-document register operations.
//!
//! Every subcommand works against the local store by default; `--remote`
//! switches to the hosted table service. After any write the table is
//! re-read rather than trusted from memory.

use std::path::PathBuf;

use clap::Subcommand;

use auditdesk_core::document::{DocStatus, DocumentRecord};
use auditdesk_core::filter::filter_documents;
use auditdesk_core::metrics::{document_score, document_summary};
use auditdesk_recon::{
    clean_csv, delete_document_at, parse_day_first, upsert_document, DocumentFields,
};
use auditdesk_remote::{FilterOp, TableClient};
use auditdesk_store::csv::read_raw;

use crate::exit_codes::{EXIT_ERROR, EXIT_USAGE};
use crate::util::{print_documents, require_session};
use crate::{open_store, CliError};

/// Upstream table holding the register.
const DOCUMENTS_TABLE: &str = "documentos_sgc";

#[derive(Subcommand)]
pub enum DocsCommands {
    /// Show the register
    #[command(after_help = "\
Examples:
  adesk docs list
  adesk docs list --filter manual --status Vigente
  adesk docs list --remote --json")]
    List {
        /// Case-insensitive search over title or code
        #[arg(long)]
        filter: Option<String>,

        /// Only rows with this status (wire name, e.g. Vigente)
        #[arg(long)]
        status: Option<String>,

        /// Read from the hosted table service
        #[arg(long)]
        remote: bool,

        /// Output JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Register health score (percentage of Current documents)
    Score {
        #[arg(long)]
        remote: bool,
    },

    /// Counts by status and area plus the health score
    Summary {
        #[arg(long)]
        remote: bool,

        #[arg(long)]
        json: bool,
    },

    /// Register one document (upsert by code + title)
    #[command(after_help = "\
Examples:
  adesk docs add SGC-001 \"Manual de Calidad\" --area Calidad --doc-type Manual
  adesk docs add SGC-002 \"Alta de Personal\" --status \"En Revisión\" \\
      --issue-date 15/06/2024 --next-review 15/06/2025
  adesk docs add SGC-003 \"Respaldo\" --file ./respaldo.pdf --remote")]
    Add {
        code: String,
        title: String,

        #[arg(long, default_value = "Calidad")]
        area: String,

        #[arg(long = "doc-type", default_value = "Procedimiento")]
        document_type: String,

        /// Status wire name (Vigente | En Revisión | Obsoleto)
        #[arg(long, default_value = "Vigente")]
        status: String,

        #[arg(long, default_value = "1.0")]
        revision: String,

        #[arg(long, default_value = "")]
        owner: String,

        /// Day-first date, e.g. 15/06/2024
        #[arg(long = "issue-date")]
        issue_date: Option<String>,

        /// Day-first date, e.g. 15/06/2025
        #[arg(long = "next-review")]
        next_review: Option<String>,

        /// Upload this file to blob storage and link it (requires --remote)
        #[arg(long)]
        file: Option<PathBuf>,

        #[arg(long)]
        remote: bool,
    },

    /// Delete one document by code, with an optional positional hint
    Delete {
        code: String,

        #[arg(long)]
        at: Option<usize>,

        #[arg(long)]
        remote: bool,
    },

    /// Bulk replace the register from a CSV export (full overwrite)
    #[command(after_help = "\
Examples:
  adesk docs import listado_maestro.csv
  adesk docs import listado_maestro.csv --remote
  adesk docs import listado_maestro.csv --quiet")]
    Import {
        file: PathBuf,

        #[arg(long)]
        remote: bool,

        /// Suppress stderr notes (dropped columns, coerced dates)
        #[arg(long, short = 'q')]
        quiet: bool,
    },
}

pub fn cmd_docs(cmd: DocsCommands) -> Result<(), CliError> {
    require_session()?;
    match cmd {
        DocsCommands::List { filter, status, remote, json } => {
            cmd_list(filter, status, remote, json)
        }
        DocsCommands::Score { remote } => cmd_score(remote),
        DocsCommands::Summary { remote, json } => cmd_summary(remote, json),
        DocsCommands::Add {
            code,
            title,
            area,
            document_type,
            status,
            revision,
            owner,
            issue_date,
            next_review,
            file,
            remote,
        } => cmd_add(AddArgs {
            code,
            title,
            area,
            document_type,
            status,
            revision,
            owner,
            issue_date,
            next_review,
            file,
            remote,
        }),
        DocsCommands::Delete { code, at, remote } => cmd_delete(&code, at, remote),
        DocsCommands::Import { file, remote, quiet } => cmd_import(&file, remote, quiet),
    }
}

fn load_documents(remote: bool) -> Result<Vec<DocumentRecord>, CliError> {
    if remote {
        let client = TableClient::from_saved_auth()?;
        Ok(client.select_all(DOCUMENTS_TABLE)?)
    } else {
        Ok(open_store()?.load_documents()?)
    }
}

fn cmd_list(
    filter: Option<String>,
    status: Option<String>,
    remote: bool,
    json: bool,
) -> Result<(), CliError> {
    let documents = load_documents(remote)?;
    let status = status.map(|s| DocStatus::parse_wire(&s));
    let rows = filter_documents(&documents, filter.as_deref().unwrap_or(""), status.as_ref());

    if json {
        println!("{}", serde_json::to_string_pretty(&rows).unwrap_or_default());
    } else if rows.is_empty() {
        println!("(empty register)");
    } else {
        print_documents(&rows);
    }
    Ok(())
}

fn cmd_score(remote: bool) -> Result<(), CliError> {
    let documents = load_documents(remote)?;
    println!("{}", document_score(&documents));
    Ok(())
}

fn cmd_summary(remote: bool, json: bool) -> Result<(), CliError> {
    let documents = load_documents(remote)?;
    let summary = document_summary(&documents);

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&summary).unwrap_or_default()
        );
        return Ok(());
    }

    println!("Documents:       {}", summary.total);
    println!("Current:         {}", summary.current);
    println!("Needs attention: {}", summary.needs_attention);
    println!("Areas:           {}", summary.distinct_areas);
    println!("Health score:    {}%", summary.score);
    if !summary.by_status.is_empty() {
        println!("By status:");
        for (status, count) in &summary.by_status {
            println!("  {status:<14} {count}");
        }
    }
    Ok(())
}

struct AddArgs {
    code: String,
    title: String,
    area: String,
    document_type: String,
    status: String,
    revision: String,
    owner: String,
    issue_date: Option<String>,
    next_review: Option<String>,
    file: Option<PathBuf>,
    remote: bool,
}

/// Operator-typed dates must parse; silently coercing an interactive typo
/// to "missing" is for bulk imports only.
fn parse_cli_date(label: &str, value: Option<&str>) -> Result<Option<chrono::NaiveDate>, CliError> {
    match value {
        None => Ok(None),
        Some(raw) => parse_day_first(raw).map(Some).ok_or_else(|| CliError {
            code: EXIT_USAGE,
            message: format!("cannot parse {label} \"{raw}\" (expected day-first, e.g. 15/06/2024)"),
            hint: None,
        }),
    }
}

fn cmd_add(args: AddArgs) -> Result<(), CliError> {
    let issue_date = parse_cli_date("--issue-date", args.issue_date.as_deref())?;
    let next_review_date = parse_cli_date("--next-review", args.next_review.as_deref())?;

    if args.file.is_some() && !args.remote {
        return Err(CliError {
            code: EXIT_USAGE,
            message: "--file uploads to blob storage and requires --remote".into(),
            hint: None,
        });
    }

    // Push the file first so the register row links to a live URL.
    let link = match &args.file {
        Some(path) => {
            let bytes = std::fs::read(path).map_err(|e| CliError {
                code: EXIT_ERROR,
                message: format!("cannot read {}: {e}", path.display()),
                hint: None,
            })?;
            let ext = path
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("bin")
                .to_string();
            let content_type = match ext.as_str() {
                "pdf" => "application/pdf",
                "png" => "image/png",
                "jpg" | "jpeg" => "image/jpeg",
                _ => "application/octet-stream",
            };
            let client = TableClient::from_saved_auth()?;
            let url = client.upload_blob(args.code.trim(), &ext, content_type, bytes)?;
            eprintln!("note: uploaded to {url}");
            url
        }
        None => String::new(),
    };

    let fields = DocumentFields {
        revision: args.revision,
        issue_date,
        next_review_date,
        area: args.area,
        status: DocStatus::parse_wire(&args.status),
        document_type: args.document_type,
        link,
        owner: args.owner,
    };

    if args.remote {
        let client = TableClient::from_saved_auth()?;
        let mut documents: Vec<DocumentRecord> = client.select_all(DOCUMENTS_TABLE)?;
        let outcome = upsert_document(&mut documents, &args.code, &args.title, fields)?;
        client.replace_all(DOCUMENTS_TABLE, &documents)?;
        println!("{outcome}: {} — {}", args.code.trim(), args.title.trim());
    } else {
        let mut store = open_store()?;
        let mut documents = store.load_documents()?;
        let outcome = upsert_document(&mut documents, &args.code, &args.title, fields)?;
        store.save_documents(&documents)?;
        println!("{outcome}: {} — {}", args.code.trim(), args.title.trim());
    }
    Ok(())
}

fn cmd_delete(code: &str, at: Option<usize>, remote: bool) -> Result<(), CliError> {
    if remote {
        let client = TableClient::from_saved_auth()?;
        client.delete_matching(DOCUMENTS_TABLE, "codigo", FilterOp::Eq, code.trim())?;
        println!("deleted: {}", code.trim());
        return Ok(());
    }

    let mut store = open_store()?;
    let mut documents = store.load_documents()?;
    let removed = delete_document_at(&mut documents, at.unwrap_or(usize::MAX), code)?;
    store.save_documents(&documents)?;

    let remaining = store.load_documents()?.len();
    println!("deleted: {} — {} ({} documents remain)", removed.code, removed.title, remaining);
    Ok(())
}

fn cmd_import(file: &PathBuf, remote: bool, quiet: bool) -> Result<(), CliError> {
    let (content, delimiter) = read_raw(file)?;
    let (documents, report) = clean_csv(&content, delimiter)?;

    if !quiet {
        if !report.dropped_columns.is_empty() {
            eprintln!("note: dropped columns: {}", report.dropped_columns.join(", "));
        }
        if report.coerced_dates > 0 {
            eprintln!("note: {} unparsable date(s) set to missing", report.coerced_dates);
        }
    }

    if remote {
        let client = TableClient::from_saved_auth()?;
        client.replace_all(DOCUMENTS_TABLE, &documents)?;
        // The service has no cross-call transaction; what landed is
        // whatever a fresh read says.
        let after: Vec<DocumentRecord> = client.select_all(DOCUMENTS_TABLE)?;
        println!("replaced register: {} documents", after.len());
    } else {
        let mut store = open_store()?;
        store.replace_documents(&documents)?;
        let after = store.load_documents()?;
        println!("replaced register: {} documents", after.len());
    }
    Ok(())
}
