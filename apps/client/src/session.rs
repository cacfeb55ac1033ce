//! Persisted session credentials.
//!
//! The backend hands out an opaque access/refresh token pair at login. Both
//! are stored as-is in a JSON file; no expiry is tracked locally — expiry is
//! discovered reactively when a request comes back 401.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::ClientError;

/// Everything the login response gives us about the signed-in user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    pub role: String,
    pub user_id: String,
    pub email: String,
    #[serde(default)]
    pub company_id: String,
    #[serde(default)]
    pub name: String,
}

/// File-backed store for the current session.
///
/// Reads go to disk on every call rather than caching in memory: the store is
/// the single source of truth, so a token rotated by one caller is visible to
/// every other caller immediately.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the session, or `None` if nobody is logged in.
    pub fn load(&self) -> Result<Option<Session>, ClientError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let session = serde_json::from_str(&raw)?;
        Ok(Some(session))
    }

    /// Loads the session, failing with `NotLoggedIn` if there is none.
    pub fn require(&self) -> Result<Session, ClientError> {
        self.load()?.ok_or(ClientError::NotLoggedIn)
    }

    pub fn save(&self, session: &Session) -> Result<(), ClientError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, raw)?;
        debug!("Session saved for {}", session.email);
        Ok(())
    }

    /// Swaps in a freshly-minted access token, keeping everything else.
    pub fn update_access_token(&self, access_token: &str) -> Result<(), ClientError> {
        let mut session = self.require()?;
        session.access_token = access_token.to_string();
        self.save(&session)
    }

    /// Tears the session down. Missing file is fine — logout is idempotent.
    pub fn clear(&self) -> Result<(), ClientError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
