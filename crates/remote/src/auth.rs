//! Saved service credentials.
//!
//! Reads/writes ~/.config/auditdesk/auth.json (0600 on Unix). The CLI
//! picks these up to build clients; load returns None when nothing is
//! saved or the file is invalid.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Endpoint and key for the hosted table service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceCredentials {
    /// API base URL (e.g. "https://tables.example.app")
    pub api_base: String,
    /// Service API key
    pub api_key: String,
}

impl ServiceCredentials {
    pub fn new(api_base: String, api_key: String) -> Self {
        Self { api_base, api_key }
    }
}

/// Returns the path to the credentials file.
pub fn auth_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|c| c.join("auditdesk/auth.json"))
}

/// Load saved credentials from disk.
pub fn load_auth() -> Option<ServiceCredentials> {
    let path = auth_file_path()?;
    let contents = std::fs::read_to_string(&path).ok()?;
    serde_json::from_str(&contents).ok()
}

/// Save credentials to disk, creating the parent directory if needed.
/// Sets 0600 permissions on Unix.
pub fn save_auth(creds: &ServiceCredentials) -> Result<(), String> {
    let path = auth_file_path().ok_or("Could not determine config directory")?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create config directory: {}", e))?;
    }

    let contents = serde_json::to_string_pretty(creds)
        .map_err(|e| format!("Failed to serialize credentials: {}", e))?;

    std::fs::write(&path, &contents).map_err(|e| format!("Failed to write auth file: {}", e))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let permissions = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(&path, permissions)
            .map_err(|e| format!("Failed to set file permissions: {}", e))?;
    }

    Ok(())
}

/// Delete saved credentials.
pub fn delete_auth() -> Result<(), String> {
    let Some(path) = auth_file_path() else {
        return Ok(());
    };
    if path.exists() {
        std::fs::remove_file(&path).map_err(|e| format!("Failed to delete auth file: {}", e))?;
    }
    Ok(())
}
