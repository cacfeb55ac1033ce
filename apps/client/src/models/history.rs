use chrono::{DateTime, Utc};
use serde::Deserialize;

/// One row of `GET /history`. The backend returns a loose document per
/// analysis; only the columns the history table shows are modeled here.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryEntry {
    pub analysis_id: String,
    #[serde(default)]
    pub candidate_name: String,
    #[serde(default)]
    pub client_name: String,
    #[serde(default)]
    pub jd_title: String,
    #[serde(default)]
    pub match_score: u32,
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_by_name: String,
}
