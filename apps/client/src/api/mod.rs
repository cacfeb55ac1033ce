//! API client — the single point of entry for all backend calls in Shortlist.
//!
//! ARCHITECTURAL RULE: no other module may talk to the backend directly.
//! Every request goes through [`ApiClient`], which owns bearer-token
//! injection and the refresh-and-retry handling for expired access tokens.

use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, Url};
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::errors::ClientError;
use crate::models::analysis::AnalyzeResponse;
use crate::models::auth::{LoginRequest, LoginResponse, RefreshResponse};
use crate::models::history::HistoryEntry;
use crate::models::jd::{JdDetail, JdDraft};
use crate::session::{Session, SessionStore};

const HTTP_TIMEOUT_SECS: u64 = 120;

/// A resume file staged for upload, held in memory so the request can be
/// rebuilt if the first attempt hits an expired token.
#[derive(Debug, Clone)]
pub struct ResumeUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

pub struct ApiClient {
    http: Client,
    base_url: String,
    store: SessionStore,
    /// Serializes token refresh: concurrent requests racing on one expiry
    /// event take this lock in turn, and all but the first find the token
    /// already rotated.
    refresh_gate: Mutex<()>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, store: SessionStore) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            store,
            refresh_gate: Mutex::new(()),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Builds a URL from percent-encoded path segments, for user-supplied
    /// names like clients and JD titles.
    fn url_with_segments(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ClientError::validation(format!("Invalid API base URL: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| ClientError::validation("API base URL cannot carry path segments"))?
            .extend(segments);
        Ok(url)
    }

    // ---- auth ----

    /// `POST /login`. On success the full session is persisted and returned.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, ClientError> {
        let resp = self
            .http
            .post(self.url("/login"))
            .json(&LoginRequest { email, password })
            .send()
            .await?;
        let resp = ok_or_api_error(resp).await?;
        let body: LoginResponse = resp.json().await?;

        let session = Session {
            access_token: body.access_token,
            refresh_token: body.refresh_token,
            role: body.role,
            user_id: body.user_id,
            email: body.email,
            company_id: body.company_id.unwrap_or_default(),
            name: body.name.unwrap_or_default(),
        };
        self.store.save(&session)?;
        Ok(session)
    }

    /// Sends an authenticated request, transparently recovering from token
    /// expiry once.
    ///
    /// `build` constructs a fresh request each attempt; the wrapper attaches
    /// the current access token. On 401 it refreshes (serialized across
    /// callers) and retries exactly once with the rotated token. The retry
    /// path never re-enters the refresh logic, so a second 401 flows back to
    /// the caller as an ordinary API error.
    async fn send_authed<F>(&self, build: F) -> Result<Response, ClientError>
    where
        F: Fn(&Client) -> reqwest::RequestBuilder,
    {
        let session = self.store.require()?;
        let resp = build(&self.http)
            .bearer_auth(&session.access_token)
            .send()
            .await?;

        if resp.status().as_u16() != 401 {
            return Ok(resp);
        }
        if session.refresh_token.is_empty() {
            self.store.clear()?;
            return Err(ClientError::SessionExpired);
        }

        debug!("Access token rejected, attempting refresh");
        let fresh = self.refresh_access_token(&session.access_token).await?;
        let retry = build(&self.http).bearer_auth(&fresh).send().await?;
        Ok(retry)
    }

    /// `POST /refresh` with the refresh token as bearer. Returns the new
    /// access token, persisting it first. On any failure the session is torn
    /// down and the call ends in `SessionExpired`.
    ///
    /// `failed_token` is the access token that just got a 401: if the stored
    /// token no longer matches it, another in-flight request already
    /// refreshed and we reuse its result instead of refreshing again.
    async fn refresh_access_token(&self, failed_token: &str) -> Result<String, ClientError> {
        let _guard = self.refresh_gate.lock().await;

        let session = self.store.require()?;
        if session.access_token != failed_token {
            debug!("Token already rotated by a concurrent request");
            return Ok(session.access_token);
        }

        let resp = self
            .http
            .post(self.url("/refresh"))
            .bearer_auth(&session.refresh_token)
            .send()
            .await;

        match resp {
            Ok(r) if r.status().is_success() => {
                let body: RefreshResponse = r.json().await?;
                self.store.update_access_token(&body.access_token)?;
                debug!("Access token refreshed");
                Ok(body.access_token)
            }
            Ok(r) => {
                warn!("Refresh rejected with status {}", r.status());
                self.store.clear()?;
                Err(ClientError::SessionExpired)
            }
            Err(e) => {
                warn!("Refresh request failed: {e}");
                self.store.clear()?;
                Err(ClientError::SessionExpired)
            }
        }
    }

    // ---- clients / job descriptions ----

    /// `GET /clients` — all client names visible to the caller.
    pub async fn list_clients(&self) -> Result<Vec<String>, ClientError> {
        let url = self.url("/clients");
        let resp = self.send_authed(|http| http.get(url.as_str())).await?;
        Ok(ok_or_api_error(resp).await?.json().await?)
    }

    /// `GET /clients/{client}/jds` — JD titles for one client.
    pub async fn list_client_jds(&self, client_name: &str) -> Result<Vec<String>, ClientError> {
        let url = self.url_with_segments(&["clients", client_name, "jds"])?;
        let resp = self.send_authed(|http| http.get(url.clone())).await?;
        Ok(ok_or_api_error(resp).await?.json().await?)
    }

    /// `GET /clients/{client}/jds/{title}` — the stored JD record.
    pub async fn jd_detail(
        &self,
        client_name: &str,
        jd_title: &str,
    ) -> Result<JdDetail, ClientError> {
        let url = self.url_with_segments(&["clients", client_name, "jds", jd_title])?;
        let resp = self.send_authed(|http| http.get(url.clone())).await?;
        Ok(ok_or_api_error(resp).await?.json().await?)
    }

    // ---- analysis ----

    /// `POST /analyze` — multipart upload of the resume plus the
    /// JSON-serialized draft under `jd_data`. The form is rebuilt from the
    /// staged bytes on the retry path.
    pub async fn analyze(
        &self,
        resume: &ResumeUpload,
        draft: &JdDraft,
    ) -> Result<AnalyzeResponse, ClientError> {
        let jd_data = serde_json::to_string(draft)?;
        let url = self.url("/analyze");

        let resp = self
            .send_authed(|http| {
                let form = Form::new()
                    .part(
                        "resume",
                        Part::bytes(resume.bytes.clone()).file_name(resume.file_name.clone()),
                    )
                    .text("jd_data", jd_data.clone());
                http.post(url.as_str()).multipart(form)
            })
            .await?;
        Ok(ok_or_api_error(resp).await?.json().await?)
    }

    /// `GET /history` — past analyses visible to the caller.
    pub async fn history(&self) -> Result<Vec<HistoryEntry>, ClientError> {
        let url = self.url("/history");
        let resp = self.send_authed(|http| http.get(url.as_str())).await?;
        Ok(ok_or_api_error(resp).await?.json().await?)
    }

    /// `GET /download/{analysis_id}` — the originally uploaded resume.
    /// Returns the attachment file name (falling back to "resume.pdf") and
    /// the raw bytes.
    pub async fn download(
        &self,
        analysis_id: &str,
    ) -> Result<(String, bytes::Bytes), ClientError> {
        let url = self.url_with_segments(&["download", analysis_id])?;
        let resp = self.send_authed(|http| http.get(url.clone())).await?;
        let resp = ok_or_api_error(resp).await?;

        let file_name = resp
            .headers()
            .get(reqwest::header::CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(attachment_filename)
            .unwrap_or_else(|| "resume.pdf".to_string());
        let body = resp.bytes().await?;
        Ok((file_name, body))
    }
}

/// Maps a non-2xx response to `ClientError::Api`, pulling the backend's
/// `detail` field when the body carries one.
async fn ok_or_api_error(resp: Response) -> Result<Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let detail = resp
        .json::<Value>()
        .await
        .ok()
        .and_then(|v| v.get("detail").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string()
        });
    Err(ClientError::Api {
        status: status.as_u16(),
        detail,
    })
}

/// Pulls `filename=...` out of a Content-Disposition header value.
fn attachment_filename(header: &str) -> Option<String> {
    header.split(';').find_map(|part| {
        let part = part.trim();
        part.strip_prefix("filename=")
            .map(|name| name.trim_matches('"').to_string())
    })
}
