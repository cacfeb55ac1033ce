//! Typed view of the `/analyze` response.
//!
//! The backend assembles this payload from an LLM pass plus post-processing,
//! so every field may be absent or null. Everything defaults rather than
//! failing deserialization; the renderer substitutes placeholders.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeResponse {
    pub analysis_id: String,
    pub analysis: Analysis,
    #[serde(default)]
    pub page_count: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Analysis {
    #[serde(default)]
    pub candidate_info: CandidateInfo,
    #[serde(default)]
    pub skill_analysis: SkillAnalysis,
    #[serde(default)]
    pub experience_analysis: ExperienceAnalysis,
    #[serde(default)]
    pub summary: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CandidateInfo {
    #[serde(default = "not_specified")]
    pub candidate_name: String,
}

impl Default for CandidateInfo {
    fn default() -> Self {
        Self {
            candidate_name: not_specified(),
        }
    }
}

fn not_specified() -> String {
    "Not specified".to_string()
}

/// Score is computed from primary skills only; secondary skills feed the
/// profile feedback but never the score.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SkillAnalysis {
    #[serde(default)]
    pub match_score: u32,
    #[serde(default)]
    pub matching_skills: Vec<String>,
    #[serde(default)]
    pub missing_primary_skills: Vec<String>,
    #[serde(default)]
    pub matching_secondary_skills: Vec<String>,
    #[serde(default)]
    pub missing_secondary_skills: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExperienceAnalysis {
    #[serde(default)]
    pub positions: Vec<Position>,
    #[serde(default)]
    pub total_experience: String,
    #[serde(default)]
    pub experience_match: bool,
    #[serde(default)]
    pub frequent_hopper: bool,
    #[serde(default)]
    pub required_experience: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Position {
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub title: String,
    /// Raw date range as written on the resume, e.g. "Jan 2020 - Mar 2022".
    #[serde(default)]
    pub duration: String,
    /// Normalized length, e.g. "2 years 2 months".
    #[serde(default)]
    pub duration_length: String,
    #[serde(default)]
    pub is_internship: bool,
    #[serde(default)]
    pub duration_missing: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_PAYLOAD: &str = r#"{
        "analysis_id": "a-123",
        "analysis": {
            "candidate_info": { "candidate_name": "John Doe" },
            "skill_analysis": {
                "match_score": 75,
                "matching_skills": ["Python", "ML"],
                "missing_primary_skills": ["AWS"],
                "missing_secondary_skills": ["Docker"]
            },
            "experience_analysis": {
                "positions": [{
                    "company": "TechCorp",
                    "title": "ML Engineer",
                    "duration": "Jan 2020 - May 2022",
                    "duration_length": "2 years 5 months",
                    "is_internship": false,
                    "duration_missing": false
                }],
                "total_experience": "2 years 5 months",
                "experience_match": true,
                "frequent_hopper": false,
                "required_experience": "3-5"
            },
            "summary": "Strong profile."
        },
        "page_count": 2
    }"#;

    #[test]
    fn test_full_payload_parses() {
        let resp: AnalyzeResponse = serde_json::from_str(FULL_PAYLOAD).unwrap();
        assert_eq!(resp.analysis_id, "a-123");
        assert_eq!(resp.analysis.skill_analysis.match_score, 75);
        assert_eq!(resp.analysis.experience_analysis.positions.len(), 1);
        assert!(resp.analysis.experience_analysis.experience_match);
    }

    #[test]
    fn test_sparse_payload_defaults_everything() {
        let resp: AnalyzeResponse =
            serde_json::from_str(r#"{"analysis_id": "a-1", "analysis": {}}"#).unwrap();
        assert_eq!(resp.analysis.candidate_info.candidate_name, "Not specified");
        assert_eq!(resp.analysis.skill_analysis.match_score, 0);
        assert!(resp.analysis.experience_analysis.positions.is_empty());
        assert_eq!(resp.page_count, 0);
    }
}
