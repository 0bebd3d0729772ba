//! `adesk roster` — personnel roster operations.

use clap::Subcommand;

use auditdesk_core::filter::filter_roster;
use auditdesk_core::metrics::roster_summary;
use auditdesk_core::person::{classify, AuditStatus, PersonRecord};
use auditdesk_recon::{delete_person_at, upsert_person, PersonFields};

use crate::exit_codes::EXIT_USAGE;
use crate::util::{print_roster, require_session};
use crate::{open_store, CliError};

#[derive(Subcommand)]
pub enum RosterCommands {
    /// Show the roster with derived audit status
    #[command(after_help = "\
Examples:
  adesk roster list
  adesk roster list --filter gómez
  adesk roster list --status audit --json")]
    List {
        /// Case-insensitive name search
        #[arg(long)]
        filter: Option<String>,

        /// Only rows with this status (ok | audit)
        #[arg(long)]
        status: Option<String>,

        /// Output JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Totals and compliance percentage
    Summary {
        #[arg(long)]
        json: bool,
    },

    /// Create or update one record (upsert by name)
    #[command(after_help = "\
Examples:
  adesk roster set \"Ana Gómez\" --department RH --late 3 --absences 0")]
    Set {
        /// Identity key; trimmed, case-sensitive
        name: String,

        #[arg(long)]
        department: String,

        #[arg(long, default_value_t = 0)]
        late: u32,

        #[arg(long, default_value_t = 0)]
        absences: u32,
    },

    /// Delete one record by name, with an optional positional hint
    Delete {
        name: String,

        /// Row position from the last listing, used as a hint only
        #[arg(long)]
        at: Option<usize>,
    },

    /// Load the demo roster (overwrites the current table)
    Seed,
}

pub fn cmd_roster(cmd: RosterCommands) -> Result<(), CliError> {
    require_session()?;
    match cmd {
        RosterCommands::List { filter, status, json } => cmd_list(filter, status, json),
        RosterCommands::Summary { json } => cmd_summary(json),
        RosterCommands::Set { name, department, late, absences } => {
            cmd_set(&name, department, late, absences)
        }
        RosterCommands::Delete { name, at } => cmd_delete(&name, at),
        RosterCommands::Seed => cmd_seed(),
    }
}

fn parse_status(value: &str) -> Result<AuditStatus, CliError> {
    match value.to_lowercase().as_str() {
        "ok" => Ok(AuditStatus::Ok),
        "audit" => Ok(AuditStatus::Audit),
        other => Err(CliError {
            code: EXIT_USAGE,
            message: format!("unknown status \"{other}\" (expected \"ok\" or \"audit\")"),
            hint: None,
        }),
    }
}

fn cmd_list(filter: Option<String>, status: Option<String>, json: bool) -> Result<(), CliError> {
    let store = open_store()?;
    let roster = store.load_roster()?;

    let status = status.as_deref().map(parse_status).transpose()?;
    let rows = filter_roster(&roster, filter.as_deref().unwrap_or(""), status);

    if json {
        let out: Vec<serde_json::Value> = rows
            .iter()
            .map(|r| {
                serde_json::json!({
                    "name": r.name,
                    "department": r.department,
                    "late_count": r.late_count,
                    "absence_count": r.absence_count,
                    "status": classify(r).to_string(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&out).unwrap_or_default());
    } else if rows.is_empty() {
        println!("(empty roster)");
    } else {
        print_roster(&rows);
    }
    Ok(())
}

fn cmd_summary(json: bool) -> Result<(), CliError> {
    let store = open_store()?;
    let roster = store.load_roster()?;
    let summary = roster_summary(&roster);

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&summary).unwrap_or_default()
        );
    } else {
        println!("Total:      {}", summary.total);
        println!("To audit:   {}", summary.flagged);
        println!("Compliance: {:.1}%", summary.compliance_rate);
    }
    Ok(())
}

fn cmd_set(name: &str, department: String, late: u32, absences: u32) -> Result<(), CliError> {
    let mut store = open_store()?;
    let mut roster = store.load_roster()?;

    let outcome = upsert_person(
        &mut roster,
        name,
        PersonFields { department, late_count: late, absence_count: absences },
    )?;
    store.save_roster(&roster)?;

    // Re-read after the write; the saved table is the truth, not the
    // in-memory copy we just pushed.
    let roster = store.load_roster()?;
    match roster.iter().find(|r| r.name.trim() == name.trim()) {
        Some(record) => println!("{outcome}: {} ({})", record.name, classify(record)),
        // A concurrent writer got between our save and re-read.
        None => println!("{outcome}: {} (no longer present on re-read)", name.trim()),
    }
    Ok(())
}

fn cmd_delete(name: &str, at: Option<usize>) -> Result<(), CliError> {
    let mut store = open_store()?;
    let mut roster = store.load_roster()?;

    // With no positional hint the key lookup does all the work.
    let position = at.unwrap_or(usize::MAX);
    let removed = delete_person_at(&mut roster, position, name)?;
    store.save_roster(&roster)?;

    let remaining = store.load_roster()?.len();
    println!("deleted: {} ({} records remain)", removed.name, remaining);
    Ok(())
}

fn cmd_seed() -> Result<(), CliError> {
    let mut store = open_store()?;
    let roster = demo_roster();
    store.save_roster(&roster)?;

    let summary = roster_summary(&store.load_roster()?);
    println!(
        "seeded {} records ({} to audit, {:.1}% compliance)",
        summary.total, summary.flagged, summary.compliance_rate
    );
    Ok(())
}

/// The simulated roster that ships with the dashboard demo.
fn demo_roster() -> Vec<PersonRecord> {
    let rows: [(&str, &str, u32, u32); 10] = [
        ("Juan Pérez", "Ventas", 0, 0),
        ("Ana Gómez", "RH", 3, 0),
        ("Carlos Ruiz", "TI", 1, 1),
        ("María López", "Ventas", 4, 1),
        ("Pedro Hernández", "Operaciones", 0, 0),
        ("Lucía Torres", "Finanzas", 2, 0),
        ("Jorge Ramírez", "TI", 5, 0),
        ("Elena Díaz", "Marketing", 0, 0),
        ("Miguel Ángel", "Operaciones", 1, 0),
        ("Sofía Castro", "Ventas", 3, 1),
    ];
    rows.into_iter()
        .map(|(name, department, late, absences)| PersonRecord {
            name: name.into(),
            department: department.into(),
            late_count: late,
            absence_count: absences,
        })
        .collect()
}
