//! `auditdesk-recon` — record reconciliation engine.
//!
//! Pure engine crate: receives in-memory tables and raw CSV text, returns
//! reconciled tables and outcomes. Persistence is the caller's job — the
//! store and remote crates apply what this crate decides.

pub mod bulk;
pub mod columns;
pub mod dates;
pub mod delete;
pub mod error;
pub mod upsert;

pub use bulk::{clean_csv, CleanReport};
pub use dates::parse_day_first;
pub use delete::{delete_document_at, delete_person_at};
pub use error::ReconcileError;
pub use upsert::{upsert_document, upsert_person, DocumentFields, Outcome, PersonFields};
