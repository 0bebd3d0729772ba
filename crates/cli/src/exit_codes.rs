//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract — scripts rely on them.
//!
//! # Exit Code Ranges
//!
//! | Range   | Domain    | Description                                 |
//! |---------|-----------|---------------------------------------------|
//! | 0       | Universal | Success                                     |
//! | 1       | Universal | General error (unspecified)                 |
//! | 2       | Universal | CLI usage error (bad args, missing file)    |
//! | 10-19   | auth      | Operator credential gate                    |
//! | 20-29   | store     | Local table store                           |
//! | 30-39   | reconcile | Upsert/delete/bulk-replace validation       |
//! | 40-49   | remote    | Hosted table service                        |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant in the appropriate range
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Wire it into the relevant command's error handling

use auditdesk_recon::ReconcileError;
use auditdesk_remote::RemoteError;
use auditdesk_store::StoreError;

// =============================================================================
// Universal (0-2)
// =============================================================================

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

// =============================================================================
// Auth (10-19)
// =============================================================================

/// Invalid username or password.
pub const EXIT_AUTH_BAD: u8 = 10;

/// Account locked out after repeated failures.
pub const EXIT_AUTH_LOCKED: u8 = 11;

/// Command requires an operator session and none is active.
pub const EXIT_AUTH_REQUIRED: u8 = 12;

/// No operator credentials configured on this machine.
pub const EXIT_AUTH_UNCONFIGURED: u8 = 13;

// =============================================================================
// Store (20-29)
// =============================================================================

/// Local store is held by another writer (locked/busy).
pub const EXIT_STORE_CONFLICT: u8 = 20;

/// Local store read/write failure.
pub const EXIT_STORE_IO: u8 = 21;

// =============================================================================
// Reconcile (30-39)
// =============================================================================

/// Required input empty or missing (e.g. blank identity key).
pub const EXIT_RECON_VALIDATION: u8 = 30;

/// Key or position did not resolve to a record.
pub const EXIT_RECON_NOT_FOUND: u8 = 31;

/// Bulk input had no recognized columns.
pub const EXIT_RECON_SCHEMA: u8 = 32;

// =============================================================================
// Remote (40-49)
// =============================================================================

/// No saved service credentials.
pub const EXIT_REMOTE_NOT_CONFIGURED: u8 = 40;

/// Network or HTTP failure talking to the service.
pub const EXIT_REMOTE_NETWORK: u8 = 41;

/// Service rejected the request as invalid.
pub const EXIT_REMOTE_VALIDATION: u8 = 42;

/// Two-phase replace failed after the clear phase: the remote table was
/// cleared and must be re-read before retrying.
pub const EXIT_REMOTE_REPLACE_INCOMPLETE: u8 = 43;

// =============================================================================
// Error mapping
// =============================================================================

pub fn store_exit_code(err: &StoreError) -> u8 {
    match err {
        StoreError::Conflict(_) => EXIT_STORE_CONFLICT,
        StoreError::Io(_) => EXIT_STORE_IO,
    }
}

pub fn reconcile_exit_code(err: &ReconcileError) -> u8 {
    match err {
        ReconcileError::Validation(_) => EXIT_RECON_VALIDATION,
        ReconcileError::NotFound(_) => EXIT_RECON_NOT_FOUND,
        ReconcileError::Schema(_) => EXIT_RECON_SCHEMA,
    }
}

pub fn remote_exit_code(err: &RemoteError) -> u8 {
    match err {
        RemoteError::NotConfigured => EXIT_REMOTE_NOT_CONFIGURED,
        RemoteError::Network(_) | RemoteError::Http(_, _) | RemoteError::Parse(_) => {
            EXIT_REMOTE_NETWORK
        }
        RemoteError::Validation(_) => EXIT_REMOTE_VALIDATION,
        RemoteError::Replace { phase: auditdesk_remote::ReplacePhase::Insert, .. } => {
            EXIT_REMOTE_REPLACE_INCOMPLETE
        }
        RemoteError::Replace { .. } => EXIT_REMOTE_NETWORK,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use auditdesk_remote::ReplacePhase;

    #[test]
    fn insert_phase_failure_has_dedicated_code() {
        let err = RemoteError::Replace {
            phase: ReplacePhase::Insert,
            message: "boom".into(),
        };
        assert_eq!(remote_exit_code(&err), EXIT_REMOTE_REPLACE_INCOMPLETE);

        // Clear-phase failure left the old table intact; plain network code.
        let err = RemoteError::Replace {
            phase: ReplacePhase::Clear,
            message: "boom".into(),
        };
        assert_eq!(remote_exit_code(&err), EXIT_REMOTE_NETWORK);
    }

    #[test]
    fn conflict_and_io_are_distinct() {
        assert_eq!(
            store_exit_code(&StoreError::Conflict("locked".into())),
            EXIT_STORE_CONFLICT
        );
        assert_eq!(store_exit_code(&StoreError::Io("gone".into())), EXIT_STORE_IO);
    }
}
