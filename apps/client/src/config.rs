use std::path::PathBuf;

use anyhow::{Context, Result};

const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

/// Client configuration loaded from environment variables.
/// Everything has a sensible default; nothing is required to start.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the screening backend, no trailing slash.
    pub api_url: String,
    /// Where the session file lives. Defaults to
    /// `<config_dir>/shortlist/session.json`.
    pub session_path: PathBuf,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let api_url = std::env::var("SHORTLIST_API_URL")
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let session_path = match std::env::var("SHORTLIST_SESSION_FILE") {
            Ok(p) => PathBuf::from(p),
            Err(_) => default_session_path()?,
        };

        Ok(Config {
            api_url,
            session_path,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn default_session_path() -> Result<PathBuf> {
    let dir = dirs::config_dir().context("Could not determine a config directory for the session file")?;
    Ok(dir.join("shortlist").join("session.json"))
}
