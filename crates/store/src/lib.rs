//! `auditdesk-store` — local persistence.
//!
//! A single-file SQLite store with whole-table semantics (the only API is
//! load-everything / save-everything), plus raw CSV reading for bulk
//! ingestion. Typed cleaning of CSV rows lives in `auditdesk-recon`; this
//! crate stops at decoded text and a sniffed delimiter.

pub mod csv;
pub mod local;

pub use local::{LocalStore, StoreError};
