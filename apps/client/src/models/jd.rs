use serde::{Deserialize, Serialize};

/// A job-description draft as submitted to `/analyze` (field `jd_data`).
///
/// Either references an existing (client_name, jd_title) pair or carries a
/// fully new record. The optional fields are only meaningful for new records;
/// the backend drops them before matching.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JdDraft {
    pub client_name: String,
    pub jd_title: String,
    pub required_experience: String,
    pub primary_skills: Vec<String>,
    pub secondary_skills: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_positions: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_mode: Option<String>,
}

/// Stored job description as returned by `GET /clients/{client}/jds/{title}`.
/// This is what the existing-client branch pre-fills the draft from.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JdDetail {
    pub jd_title: String,
    #[serde(default)]
    pub required_experience: String,
    #[serde(default)]
    pub primary_skills: Vec<String>,
    #[serde(default)]
    pub secondary_skills: Vec<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub budget: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_serializes_without_absent_optionals() {
        let draft = JdDraft {
            client_name: "Acme".to_string(),
            jd_title: "Backend Engineer".to_string(),
            required_experience: "3-5".to_string(),
            primary_skills: vec!["Rust".to_string()],
            secondary_skills: vec![],
            location: None,
            budget: None,
            number_of_positions: None,
            work_mode: None,
        };
        let json = serde_json::to_string(&draft).unwrap();
        assert!(!json.contains("location"));
        assert!(!json.contains("work_mode"));
        assert!(json.contains("\"secondary_skills\":[]"));
    }

    #[test]
    fn test_jd_detail_tolerates_missing_fields() {
        let detail: JdDetail =
            serde_json::from_str(r#"{"jd_title": "Data Engineer"}"#).unwrap();
        assert_eq!(detail.jd_title, "Data Engineer");
        assert!(detail.primary_skills.is_empty());
        assert!(detail.location.is_none());
    }
}
