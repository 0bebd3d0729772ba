//! Operator session lifecycle.
//!
//! A session is an explicit object: created by a successful login, read by
//! commands that need an authenticated operator, removed at logout. There
//! is no global login flag — absence of the file is absence of a session.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub user: String,
    /// Unix seconds at login, for display only.
    pub started_at_secs: u64,
}

impl Session {
    pub fn start(user: &str) -> Self {
        let started_at_secs = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self { user: user.to_string(), started_at_secs }
    }

    pub fn path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("auditdesk")
            .join("session.json")
    }

    pub fn load() -> Option<Self> {
        Self::load_from(&Self::path())
    }

    pub fn load_from(path: &PathBuf) -> Option<Self> {
        fs::read_to_string(path)
            .ok()
            .and_then(|s| serde_json::from_str(&s).ok())
    }

    pub fn save(&self) -> Result<(), String> {
        self.save_to(&Self::path())
    }

    pub fn save_to(&self, path: &PathBuf) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| e.to_string())?;
        fs::write(path, json).map_err(|e| e.to_string())
    }

    /// End the session. Removing the file is the logout.
    pub fn clear() -> Result<(), String> {
        Self::clear_at(&Self::path())
    }

    pub fn clear_at(path: &PathBuf) -> Result<(), String> {
        if path.exists() {
            fs::remove_file(path).map_err(|e| e.to_string())?;
        }
        Ok(())
    }
}
