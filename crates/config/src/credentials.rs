//! Operator credential gate.
//!
//! The allow-list maps usernames to SHA-256 password digests; verification
//! hashes the submitted password and compares digests, never plaintext.
//! A per-user failure counter enforces a cooldown after repeated bad
//! attempts. The gate itself is a pure function of (allow-list, throttle
//! state, clock) — the caller owns persistence of the throttle state, so
//! the lockout survives across CLI invocations.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Consecutive failures before a user is locked out.
pub const MAX_FAILURES: u32 = 5;

/// Lockout window in seconds once the failure cap is hit.
pub const LOCKOUT_SECS: u64 = 300;

/// Hex SHA-256 digest of a password. Also used by setup tooling to build
/// the allow-list file.
pub fn digest(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Per-user failure tracking, serialized between invocations by the caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThrottleState {
    pub failures: HashMap<String, FailureRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureRecord {
    pub count: u32,
    pub last_failure_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginError {
    /// Unknown user or wrong password; the two are indistinguishable.
    BadCredentials,
    /// Too many consecutive failures; retry after the given seconds.
    LockedOut { retry_after_secs: u64 },
}

impl std::fmt::Display for LoginError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BadCredentials => write!(f, "invalid username or password"),
            Self::LockedOut { retry_after_secs } => {
                write!(f, "too many failed attempts — retry in {retry_after_secs}s")
            }
        }
    }
}

impl std::error::Error for LoginError {}

impl ThrottleState {
    pub fn path() -> std::path::PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| std::path::PathBuf::from("."))
            .join("auditdesk")
            .join("lockout.json")
    }

    pub fn load_from(path: &std::path::Path) -> Self {
        std::fs::read_to_string(path)
            .ok()
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default()
    }

    pub fn save_to(&self, path: &std::path::Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| e.to_string())?;
        std::fs::write(path, json).map_err(|e| e.to_string())
    }
}

/// The configured allow-list: username → password digest.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CredentialGate {
    pub users: HashMap<String, String>,
}

impl CredentialGate {
    pub fn path() -> std::path::PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| std::path::PathBuf::from("."))
            .join("auditdesk")
            .join("credentials.json")
    }

    /// Load the allow-list. None when no credentials are configured.
    pub fn load_from(path: &std::path::Path) -> Option<Self> {
        std::fs::read_to_string(path)
            .ok()
            .and_then(|s| serde_json::from_str(&s).ok())
    }

    /// Verify a submitted credential pair at the given clock reading
    /// (seconds, any monotone-enough epoch). Updates the throttle state:
    /// a failure increments the user's counter, a success clears it.
    pub fn verify_at(
        &self,
        user: &str,
        password: &str,
        throttle: &mut ThrottleState,
        now_secs: u64,
    ) -> Result<(), LoginError> {
        if let Some(record) = throttle.failures.get(user) {
            if record.count >= MAX_FAILURES {
                let elapsed = now_secs.saturating_sub(record.last_failure_secs);
                if elapsed < LOCKOUT_SECS {
                    return Err(LoginError::LockedOut {
                        retry_after_secs: LOCKOUT_SECS - elapsed,
                    });
                }
                // Window expired; the user gets a fresh set of attempts.
                throttle.failures.remove(user);
            }
        }

        let ok = self
            .users
            .get(user)
            .map(|expected| expected == &digest(password))
            .unwrap_or(false);

        if ok {
            throttle.failures.remove(user);
            Ok(())
        } else {
            let record = throttle
                .failures
                .entry(user.to_string())
                .or_insert(FailureRecord { count: 0, last_failure_secs: now_secs });
            record.count += 1;
            record.last_failure_secs = now_secs;
            Err(LoginError::BadCredentials)
        }
    }

    /// Verify against the wall clock.
    pub fn verify(
        &self,
        user: &str,
        password: &str,
        throttle: &mut ThrottleState,
    ) -> Result<(), LoginError> {
        let now_secs = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        self.verify_at(user, password, throttle, now_secs)
    }
}
