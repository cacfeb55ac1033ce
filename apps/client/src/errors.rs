use thiserror::Error;

/// Client-level error type.
/// Library functions return `Result<T, ClientError>`; the binary converts to
/// `anyhow::Error` at the top.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Local validation failed. Carries the aggregated list of problems so the
    /// caller can surface them in one message, the way the form did.
    #[error("Validation failed:\n- {}", .0.join("\n- "))]
    Validation(Vec<String>),

    /// A job description with the same title already exists for the client.
    #[error("Job Description \"{jd_title}\" already exists for client \"{client_name}\". Please use a different name.")]
    DuplicateJd {
        client_name: String,
        jd_title: String,
    },

    /// The access token expired and could not be refreshed (or no refresh
    /// token was present). Session state has already been cleared; the caller
    /// should send the user back through login.
    #[error("Session expired. Please log in again.")]
    SessionExpired,

    /// No session on disk at all — the user never logged in.
    #[error("Not logged in. Run `shortlist login` first.")]
    NotLoggedIn,

    /// Non-2xx response from the backend, with the server's `detail` message
    /// when it sent one.
    #[error("Server returned {status}: {detail}")]
    Api { status: u16, detail: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Session store error: {0}")]
    Store(#[from] std::io::Error),
}

impl ClientError {
    /// Single missing/invalid field convenience constructor.
    pub fn validation(msg: impl Into<String>) -> Self {
        ClientError::Validation(vec![msg.into()])
    }
}
