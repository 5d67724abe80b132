//! Remote lookup against the token authority.
//!
//! The authenticator only depends on [`AccessTokenLookup`]; the reqwest-backed
//! [`HttpAccessTokenClient`] is the production implementation.
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(200);

/// Connection settings for the token authority.
///
/// Injected at construction time so each deployment (and each test) can point
/// at its own authority.
#[derive(Debug, Clone)]
pub struct OAuthConfig {
    pub base_url: Url,
    pub timeout: Duration,
}

impl OAuthConfig {
    pub fn new(base_url: Url, timeout: Duration) -> Self {
        Self { base_url, timeout }
    }
}

impl Default for OAuthConfig {
    /// `http://localhost:8080`, 200ms
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL)
                .expect("DEFAULT_BASE_URL is an absolute http url"),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Raw response from the authority: status code + payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// No response at all (connect error, timeout, bad URL).
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid lookup url: {0}")]
    InvalidUrl(String),
}

#[async_trait]
pub trait AccessTokenLookup: Send + Sync {
    // Single GET, no retry.
    async fn get_access_token(&self, token_id: &str) -> Result<LookupResponse, LookupError>;
}

#[derive(Debug, Clone)]
pub struct HttpAccessTokenClient {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpAccessTokenClient {
    pub fn new(config: &OAuthConfig) -> Result<Self, LookupError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
        })
    }

    /// `{base}/oauth/access_token/{token_id}` (token_id は 1 segment として encode)
    pub fn access_token_url(&self, token_id: &str) -> Result<Url, LookupError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| LookupError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(["oauth", "access_token", token_id]);

        Ok(url)
    }
}

#[async_trait]
impl AccessTokenLookup for HttpAccessTokenClient {
    async fn get_access_token(&self, token_id: &str) -> Result<LookupResponse, LookupError> {
        let url = self.access_token_url(token_id)?;

        let response = self.http.get(url).send().await.map_err(|err| {
            tracing::debug!(error = %err, timeout = err.is_timeout(), "access token lookup failed");
            LookupError::Transport(err)
        })?;

        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();

        Ok(LookupResponse { status, body })
    }
}
