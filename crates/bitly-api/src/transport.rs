// Transport configuration for building the reqwest::Client behind BitlyClient.
//
// The bearer token is injected here as a sensitive default header so every
// request carries it without the endpoint code touching credentials.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};

use crate::error::Error;

const DEFAULT_USER_AGENT: &str = concat!("bitly-api/", env!("CARGO_PKG_VERSION"));

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl TransportConfig {
    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build a `reqwest::Client` that sends `Authorization: Bearer <token>`
    /// on every request.
    pub fn build_client(&self, token: &SecretString) -> Result<reqwest::Client, Error> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
            .map_err(|e| Error::InvalidToken {
                message: format!("not a valid header value: {e}"),
            })?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent.as_str())
            .default_headers(headers)
            .build()
            .map_err(Error::Transport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_timeout_is_thirty_seconds() {
        let config = TransportConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.user_agent.starts_with("bitly-api/"));
    }

    #[test]
    fn token_with_newline_is_rejected() {
        let token = SecretString::from("abc\ndef");
        let result = TransportConfig::default().build_client(&token);
        assert!(matches!(result, Err(Error::InvalidToken { .. })));
    }
}
