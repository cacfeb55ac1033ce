//! Submission flow: validated draft → duplicate check → multipart POST.

use tracing::{info, warn};

use crate::api::{ApiClient, ResumeUpload};
use crate::errors::ClientError;
use crate::models::analysis::AnalyzeResponse;
use crate::models::jd::JdDraft;

use super::validation::{validate_resume_file, ExistingJdSelection, NewJdForm};

/// Which branch of the form the draft comes from.
#[derive(Debug, Clone)]
pub enum DraftSource {
    New(NewJdForm),
    Existing(ExistingJdSelection),
}

/// Validates the source into a draft, running the duplicate check for the
/// new-client branch.
///
/// The duplicate check fails open: if `GET /clients/{client}/jds` itself
/// errors, the title is treated as not taken and submission proceeds. The
/// backend still rejects true duplicates.
pub async fn prepare_draft(
    client: &ApiClient,
    source: DraftSource,
) -> Result<JdDraft, ClientError> {
    match source {
        DraftSource::Existing(selection) => selection.into_draft(),
        DraftSource::New(form) => {
            let draft = form.into_draft()?;
            if jd_exists(client, &draft.client_name, &draft.jd_title).await {
                return Err(ClientError::DuplicateJd {
                    client_name: draft.client_name,
                    jd_title: draft.jd_title,
                });
            }
            Ok(draft)
        }
    }
}

/// Case-insensitive existence check for (client, title).
async fn jd_exists(client: &ApiClient, client_name: &str, jd_title: &str) -> bool {
    match client.list_client_jds(client_name).await {
        Ok(titles) => {
            let wanted = jd_title.trim().to_lowercase();
            titles.iter().any(|t| t.trim().to_lowercase() == wanted)
        }
        Err(e) => {
            warn!("Duplicate check failed, proceeding without it: {e}");
            false
        }
    }
}

/// End-to-end submission: file check, draft preparation, authenticated POST.
/// No automatic retry — a failed analysis returns to the caller, who may
/// resubmit.
pub async fn run_analysis(
    client: &ApiClient,
    resume: ResumeUpload,
    source: DraftSource,
) -> Result<AnalyzeResponse, ClientError> {
    validate_resume_file(&resume.file_name, resume.bytes.len() as u64)?;
    let draft = prepare_draft(client, source).await?;

    info!(
        "Submitting {} against {} / {}",
        resume.file_name, draft.client_name, draft.jd_title
    );
    let response = client.analyze(&resume, &draft).await?;
    info!(
        "Analysis {} complete, match score {}%",
        response.analysis_id, response.analysis.skill_analysis.match_score
    );
    Ok(response)
}
