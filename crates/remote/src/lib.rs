//! `auditdesk-remote` — hosted table service client.
//!
//! Blocking reqwest client (no Tokio runtime required). Covers the row
//! API (select-all, insert-rows, delete-matching), the two-phase table
//! replace built on top of them, blob upload with public-URL retrieval,
//! and saved service credentials.

pub mod auth;
pub mod blob;
pub mod client;

pub use auth::{delete_auth, load_auth, save_auth, ServiceCredentials};
pub use blob::{hash_bytes, object_name};
pub use client::{FilterOp, RemoteError, ReplacePhase, TableClient};
