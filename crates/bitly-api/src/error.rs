use thiserror::Error;

/// Top-level error type for the `bitly-api` crate.
///
/// Nothing here is retried or recovered internally: every variant reaches
/// the immediate caller as-is.
#[derive(Debug, Error)]
pub enum Error {
    // ── Upstream ────────────────────────────────────────────────────
    /// Non-2xx HTTP status from the Bitly API.
    ///
    /// `message` is the upstream error code (e.g. `NOT_FOUND`), or the
    /// canonical reason phrase when the body carried none.
    #[error("[{status}] {message}")]
    Api {
        status: u16,
        message: String,
        description: Option<String>,
    },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The base URL cannot carry path segments (e.g. `mailto:`).
    #[error("Base URL cannot be used for API paths: {0}")]
    InvalidBaseUrl(String),

    /// The access token cannot be sent as an HTTP header value.
    #[error("Invalid access token: {message}")]
    InvalidToken { message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// Body was not JSON at all. Keeps the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    /// Body was JSON, but not of the expected shape.
    #[error("Malformed response: {message}")]
    MalformedResponse { message: String },

    // ── Caller input ────────────────────────────────────────────────
    /// Query rejected before any request was sent.
    #[error("Invalid query: {field}: {reason}")]
    InvalidQuery { field: &'static str, reason: String },
}

impl Error {
    /// HTTP status of an upstream rejection, if that is what this is.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` if the bitlink (or other resource) does not exist.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Returns `true` if the token was missing, invalid, or lacks access.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }

    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            message: message.into(),
        }
    }
}
