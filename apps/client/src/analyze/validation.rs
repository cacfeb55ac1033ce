//! Pure validation for the analysis submission flow.
//!
//! Nothing in this module touches the network or the terminal: raw form
//! inputs go in, a validated [`JdDraft`] or an aggregated error comes out.
//! The CLI prompts and the duplicate check sit on top.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::ClientError;
use crate::models::jd::{JdDetail, JdDraft};

/// 1MB upload cap, matching the backend's limit.
pub const MAX_RESUME_BYTES: u64 = 1_048_576;

const ALLOWED_EXTENSIONS: &[&str] = &["pdf", "doc", "docx"];

pub const EXPERIENCE_FORMAT_HINT: &str = "Use '3-5', '4+' or '5 +'";

/// Accepts "N-M", "N+" and "N +" (whitespace tolerated around the separator).
static EXPERIENCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:\d+\s*-\s*\d+|\d+\s*\+)$").expect("experience regex"));

pub fn required_experience_valid(value: &str) -> bool {
    EXPERIENCE_RE.is_match(value.trim())
}

/// Checks the staged resume before anything goes on the wire.
pub fn validate_resume_file(file_name: &str, size: u64) -> Result<(), ClientError> {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(ClientError::validation(
            "Invalid file type. Please upload a PDF, DOC, or DOCX file.",
        ));
    }
    if size > MAX_RESUME_BYTES {
        return Err(ClientError::validation(
            "File size exceeds the 1MB limit.",
        ));
    }
    Ok(())
}

/// Comma-separated skills → trimmed, non-empty, order preserved.
pub fn split_skills(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Raw inputs for the new-client branch, exactly as typed.
#[derive(Debug, Clone, Default)]
pub struct NewJdForm {
    pub client_name: String,
    pub jd_title: String,
    pub required_experience: String,
    pub primary_skills: String,
    pub secondary_skills: String,
    pub location: String,
    pub budget: String,
    pub number_of_positions: Option<u32>,
    pub work_mode: String,
}

impl NewJdForm {
    /// Validates the form into a draft. Missing required fields are collected
    /// into one error listing their display names; no partial draft escapes.
    pub fn into_draft(self) -> Result<JdDraft, ClientError> {
        let client_name = self.client_name.trim().to_string();
        let jd_title = self.jd_title.trim().to_string();
        let required_experience = self.required_experience.trim().to_string();
        let primary_skills = split_skills(&self.primary_skills);
        let location = self.location.trim().to_string();
        let budget = self.budget.trim().to_string();

        let mut missing = Vec::new();
        if client_name.is_empty() {
            missing.push("Client Name".to_string());
        }
        if jd_title.is_empty() {
            missing.push("Job Description Name".to_string());
        }
        if required_experience.is_empty() {
            missing.push("Required Experience".to_string());
        }
        if primary_skills.is_empty() {
            missing.push("Primary Skills".to_string());
        }
        if location.is_empty() {
            missing.push("Location".to_string());
        }
        if budget.is_empty() {
            missing.push("Budget".to_string());
        }
        if !missing.is_empty() {
            return Err(ClientError::Validation(missing));
        }

        if !required_experience_valid(&required_experience) {
            return Err(ClientError::validation(format!(
                "Invalid experience format! {EXPERIENCE_FORMAT_HINT}"
            )));
        }

        let work_mode = self.work_mode.trim().to_string();
        Ok(JdDraft {
            client_name,
            jd_title,
            required_experience,
            primary_skills,
            secondary_skills: split_skills(&self.secondary_skills),
            location: Some(location),
            budget: Some(budget),
            number_of_positions: self.number_of_positions,
            work_mode: (!work_mode.is_empty()).then_some(work_mode),
        })
    }
}

/// The existing-client branch: a selected (client, JD) pair plus the fetched
/// record, whose experience/skill fields the user may have edited before
/// submitting.
#[derive(Debug, Clone)]
pub struct ExistingJdSelection {
    pub client_name: String,
    pub jd_title: String,
    pub detail: JdDetail,
}

impl ExistingJdSelection {
    pub fn into_draft(self) -> Result<JdDraft, ClientError> {
        let client_name = self.client_name.trim().to_string();
        let jd_title = self.jd_title.trim().to_string();

        let mut missing = Vec::new();
        if client_name.is_empty() {
            missing.push("Choose Client".to_string());
        }
        if jd_title.is_empty() {
            missing.push("Choose Job Description".to_string());
        }
        if !missing.is_empty() {
            return Err(ClientError::Validation(missing));
        }

        Ok(JdDraft {
            client_name,
            jd_title,
            required_experience: self.detail.required_experience.trim().to_string(),
            primary_skills: self.detail.primary_skills,
            secondary_skills: self.detail.secondary_skills,
            location: None,
            budget: None,
            number_of_positions: None,
            work_mode: None,
        })
    }
}
