//! HTTP access to the user-info endpoint.

use async_trait::async_trait;
use log::debug;
use reqwest::header::ACCEPT;

use super::error::HttpError;

/// The only network access point of the profile path.
///
/// Resolves to the response body on a 2xx response. Anything else is an
/// [`HttpError`]: `Status` when the endpoint answered, `Transport` when it
/// could not be reached. Implementations must not retry.
#[async_trait]
pub trait UserInfoClient: Send + Sync {
    /// Performs an authenticated GET of `url` with `access_token` as bearer token.
    async fn get(&self, url: &str, access_token: &str) -> Result<String, HttpError>;
}

/// [`UserInfoClient`] backed by `reqwest`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestUserInfoClient {
    http: reqwest::Client,
}

impl ReqwestUserInfoClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses a preconfigured `reqwest` client (proxies, timeouts, TLS roots).
    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl UserInfoClient for ReqwestUserInfoClient {
    async fn get(&self, url: &str, access_token: &str) -> Result<String, HttpError> {
        debug!("GET {}", url);

        let response = self
            .http
            .get(url)
            .bearer_auth(access_token)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(HttpError::transport)?;

        let status = response.status();
        let body = response.text().await.map_err(HttpError::transport)?;

        if !status.is_success() {
            debug!("GET {} answered {}", url, status);
            return Err(HttpError::status(status.as_u16(), body));
        }

        Ok(body)
    }
}
