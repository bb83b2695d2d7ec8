// Bitly v4 HTTP client
//
// Wraps `reqwest::Client` with Bitly URL construction and response
// decoding. Endpoint groups (organizations, groups, bitlinks) are
// implemented as inherent methods in separate files to keep this module
// focused on transport mechanics.

use secrecy::SecretString;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Production API root.
pub const DEFAULT_BASE_URL: &str = "https://api-ssl.bitly.com";

// ── Error response shape from the Bitly API ──────────────────────────

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the Bitly v4 API.
///
/// Owns one pooled HTTP connection with the bearer token baked into its
/// default headers. The session lives exactly as long as this value:
/// it is acquired by [`new`](Self::new) and released by
/// [`close`](Self::close) or by dropping the client on any exit path.
///
/// Cloning is cheap and shares the underlying connection pool, so a
/// single client can serve many concurrent calls.
#[derive(Debug, Clone)]
pub struct BitlyClient {
    http: reqwest::Client,
    base_url: Url,
}

impl BitlyClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Open a session against the production API.
    pub fn new(token: &SecretString, transport: &TransportConfig) -> Result<Self, Error> {
        Self::with_base_url(DEFAULT_BASE_URL, token, transport)
    }

    /// Open a session against a custom API root (proxies, mock servers).
    pub fn with_base_url(
        base_url: &str,
        token: &SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client(token)?;
        Self::from_reqwest(base_url, http)
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(Error::InvalidBaseUrl(base_url.into()));
        }
        debug!(%base_url, "opened Bitly session");
        Ok(Self { http, base_url })
    }

    /// Release the session.
    ///
    /// Equivalent to dropping the client; spelled out for call sites that
    /// want the end of the session to be visible.
    pub fn close(self) {
        debug!(base_url = %self.base_url, "closing Bitly session");
    }

    /// The API root this client talks to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Append path segments to the base URL, percent-encoding each one.
    pub(crate) fn url(&self, segments: &[&str]) -> Result<Url, Error> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        url: Url,
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        debug!("GET {url} params={params:?}");

        let resp = self.http.get(url).query(params).send().await?;
        Self::handle_response(resp).await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<T, Error> {
        debug!("POST {url}");

        let resp = self.http.post(url).json(body).send().await?;
        Self::handle_response(resp).await
    }

    pub(crate) async fn delete<T: DeserializeOwned>(
        &self,
        url: Url,
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        debug!("DELETE {url} params={params:?}");

        let resp = self.http.delete(url).query(params).send().await?;
        Self::handle_response(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    /// Non-2xx becomes [`Error::Api`]; a 2xx body that is not JSON becomes
    /// [`Error::Deserialization`]; JSON of the wrong shape becomes
    /// [`Error::MalformedResponse`].
    async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            return Err(Self::parse_error(status, &body));
        }

        let value: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| Error::Deserialization {
                message: e.to_string(),
                body,
            })?;
        serde_json::from_value(value).map_err(|e| Error::malformed(e.to_string()))
    }

    fn parse_error(status: reqwest::StatusCode, raw: &str) -> Error {
        let fallback = || {
            status
                .canonical_reason()
                .map_or_else(|| status.to_string(), str::to_owned)
        };

        match serde_json::from_str::<ErrorResponse>(raw) {
            Ok(err) => Error::Api {
                status: status.as_u16(),
                message: err.message.unwrap_or_else(fallback),
                description: err.description,
            },
            Err(_) => Error::Api {
                status: status.as_u16(),
                message: if raw.is_empty() {
                    fallback()
                } else {
                    raw.to_owned()
                },
                description: None,
            },
        }
    }
}
