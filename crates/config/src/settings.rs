// Application settings
// Loaded from ~/.config/auditdesk/settings.json

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_poll_interval() -> u64 {
    5
}

fn default_areas() -> Vec<String> {
    ["Calidad", "RRHH", "Operaciones", "Ventas", "Dirección", "Otro"]
        .into_iter()
        .map(String::from)
        .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Path of the local store file. None = platform data dir default.
    pub store_path: Option<PathBuf>,

    /// Seconds between full re-reads in watch mode.
    pub poll_interval_secs: u64,

    /// Areas offered by the registration form.
    pub areas: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            store_path: None,
            poll_interval_secs: default_poll_interval(),
            areas: default_areas(),
        }
    }
}

impl Settings {
    pub fn path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("auditdesk")
            .join("settings.json")
    }

    /// Load settings, falling back to defaults when the file is missing
    /// or unreadable. Unknown fields are ignored.
    pub fn load() -> Self {
        Self::load_from(&Self::path())
    }

    pub fn load_from(path: &PathBuf) -> Self {
        fs::read_to_string(path)
            .ok()
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default()
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

    /// Resolved local store path.
    pub fn resolved_store_path(&self) -> PathBuf {
        self.store_path.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("auditdesk")
                .join("audit.db")
        })
    }
}
