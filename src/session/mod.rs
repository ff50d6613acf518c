//! Durable login session record.
//!
//! One preferences namespace holding the logged-in flag plus cached
//! identity fields, persisted as a TOML document in the data directory.
//! A missing or unreadable file reads as logged out.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name of the session record inside the data directory.
const SESSION_FILE: &str = "session.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SessionRecord {
    #[serde(default)]
    is_logged_in: bool,
    email: Option<String>,
    role: Option<String>,
    username: Option<String>,
}

/// Durable store for the current login session.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Session store backed by `session.toml` under the given data directory.
    pub fn open(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(SESSION_FILE),
        }
    }

    /// Persist the identity fields and set the logged-in flag.
    pub fn save_login(&self, email: &str, role: &str, username: &str) -> Result<(), SessionError> {
        let record = SessionRecord {
            is_logged_in: true,
            email: Some(email.to_string()),
            role: Some(role.to_string()),
            username: Some(username.to_string()),
        };
        self.write(&record)
    }

    /// Erase every stored key.
    pub fn clear_session(&self) -> Result<(), SessionError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SessionError::IoError(e.to_string())),
        }
    }

    /// The persisted logged-in flag, default false.
    pub fn is_logged_in(&self) -> bool {
        self.read().is_logged_in
    }

    /// Last-saved email, if any.
    pub fn user_email(&self) -> Option<String> {
        self.read().email
    }

    /// Last-saved role, if any.
    pub fn user_role(&self) -> Option<String> {
        self.read().role
    }

    /// Last-saved username, if any.
    pub fn user_name(&self) -> Option<String> {
        self.read().username
    }

    fn read(&self) -> SessionRecord {
        let Ok(content) = std::fs::read_to_string(&self.path) else {
            return SessionRecord::default();
        };
        toml::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!("Unreadable session record, treating as logged out: {}", e);
            SessionRecord::default()
        })
    }

    fn write(&self, record: &SessionRecord) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| SessionError::IoError(e.to_string()))?;
        }

        let content = toml::to_string_pretty(record)
            .map_err(|e| SessionError::SerializeError(e.to_string()))?;

        std::fs::write(&self.path, content).map_err(|e| SessionError::IoError(e.to_string()))
    }
}

/// Session store errors.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Serialize error: {0}")]
    SerializeError(String),
}
