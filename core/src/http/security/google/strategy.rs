//! The Google strategy: authorization redirect, code exchange and profile.

use std::fmt;
use std::sync::Arc;

use actix_web::http::header::LOCATION;
use actix_web::HttpResponse;
use log::{debug, warn};
use oauth2::basic::{BasicClient, BasicErrorResponse};
use oauth2::reqwest::async_http_client;
use oauth2::{
    AuthType, AuthUrl, AuthorizationCode, ClientId, ClientSecret, RedirectUrl, RequestTokenError,
    TokenResponse, TokenUrl,
};
use url::Url;

use super::client::{ReqwestUserInfoClient, UserInfoClient};
use super::config::{parse_url, GoogleConfig};
use super::error::{GoogleAuthError, HttpError};
use super::options::AuthorizationOptions;
use super::profile::{user_info_error, GoogleProfile};

/// Tokens obtained by exchanging an authorization code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoogleTokens {
    pub access_token: String,
    pub refresh_token: Option<String>,
    /// Lifetime of the access token in seconds.
    pub expires_in: Option<u64>,
    /// Scopes actually granted, when Google reports them.
    pub scopes: Vec<String>,
}

/// Outcome of a completed callback.
#[derive(Debug, Clone, PartialEq)]
pub struct GoogleAuthentication {
    pub tokens: GoogleTokens,
    /// `None` when the strategy is configured to skip the profile.
    pub profile: Option<GoogleProfile>,
}

/// OAuth 2.0 / OpenID Connect strategy for Google.
///
/// # Example
///
/// ```
/// use actix_security_google::{AuthorizationOptions, GoogleConfig, GoogleStrategy};
///
/// let strategy = GoogleStrategy::new(GoogleConfig::new("ABC123", "secret")).unwrap();
/// let url = strategy.authorization_url(&AuthorizationOptions::new().display("touch"));
///
/// assert_eq!(
///     url.as_str(),
///     "https://accounts.google.com/o/oauth2/v2/auth?display=touch&response_type=code&client_id=ABC123"
/// );
/// ```
#[derive(Clone)]
pub struct GoogleStrategy {
    config: GoogleConfig,
    authorization_endpoint: Url,
    oauth2_client: BasicClient,
    user_info_client: Arc<dyn UserInfoClient>,
}

impl GoogleStrategy {
    /// Name under which the strategy registers.
    pub const NAME: &'static str = "google";

    /// Creates the strategy with a `reqwest` backed user-info client.
    pub fn new(config: GoogleConfig) -> Result<Self, GoogleAuthError> {
        Self::with_user_info_client(config, Arc::new(ReqwestUserInfoClient::new()))
    }

    /// Creates the strategy with a custom user-info client.
    pub fn with_user_info_client(
        config: GoogleConfig,
        user_info_client: Arc<dyn UserInfoClient>,
    ) -> Result<Self, GoogleAuthError> {
        config.validate()?;

        let authorization_endpoint = parse_url("authorization_url", &config.authorization_url)?;

        let mut oauth2_client = BasicClient::new(
            ClientId::new(config.client_id.clone()),
            Some(ClientSecret::new(config.client_secret.clone())),
            AuthUrl::new(config.authorization_url.clone())
                .map_err(|e| GoogleAuthError::configuration(e.to_string()))?,
            Some(
                TokenUrl::new(config.token_url.clone())
                    .map_err(|e| GoogleAuthError::configuration(e.to_string()))?,
            ),
        )
        .set_auth_type(AuthType::RequestBody);

        if let Some(callback_url) = &config.callback_url {
            oauth2_client = oauth2_client.set_redirect_uri(
                RedirectUrl::new(callback_url.clone())
                    .map_err(|e| GoogleAuthError::configuration(e.to_string()))?,
            );
        }

        Ok(Self {
            config,
            authorization_endpoint,
            oauth2_client,
            user_info_client,
        })
    }

    pub fn name(&self) -> &'static str {
        Self::NAME
    }

    pub fn config(&self) -> &GoogleConfig {
        &self.config
    }

    /// Builds the URL the user agent is sent to.
    ///
    /// Provider parameters come first (see
    /// [`AuthorizationOptions::authorization_params`]), followed by
    /// `response_type`, `redirect_uri`, `scope`, `state` and `client_id`.
    pub fn authorization_url(&self, options: &AuthorizationOptions) -> Url {
        let mut params = options.authorization_params();
        params.push(("response_type", "code".to_string()));
        if let Some(callback_url) = &self.config.callback_url {
            params.push(("redirect_uri", callback_url.clone()));
        }

        let scope = options.scope.as_ref().unwrap_or(&self.config.scope);
        if !scope.is_empty() {
            params.push(("scope", scope.join(&self.config.scope_separator)));
        }
        if let Some(state) = &options.state {
            params.push(("state", state.clone()));
        }
        params.push(("client_id", self.config.client_id.clone()));

        let query = params
            .iter()
            .map(|(name, value)| {
                format!("{}={}", urlencoding::encode(name), urlencoding::encode(value))
            })
            .collect::<Vec<_>>()
            .join("&");

        let mut url = self.authorization_endpoint.clone();
        let query = match url.query() {
            Some(existing) if !existing.is_empty() => format!("{}&{}", existing, query),
            _ => query,
        };
        url.set_query(Some(&query));
        url
    }

    /// Redirects the user agent to Google.
    pub fn redirect(&self, options: &AuthorizationOptions) -> HttpResponse {
        let url = self.authorization_url(options);
        debug!("redirecting to {}", url);

        HttpResponse::Found()
            .append_header((LOCATION, url.as_str()))
            .finish()
    }

    /// Exchanges an authorization code at the token endpoint.
    pub async fn exchange_code(&self, code: &str) -> Result<GoogleTokens, GoogleAuthError> {
        debug!("exchanging authorization code at {}", self.config.token_url);

        let response = self
            .oauth2_client
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .request_async(async_http_client)
            .await
            .map_err(token_error)?;

        Ok(GoogleTokens {
            access_token: response.access_token().secret().clone(),
            refresh_token: response.refresh_token().map(|t| t.secret().clone()),
            expires_in: response.expires_in().map(|d| d.as_secs()),
            scopes: response
                .scopes()
                .map(|scopes| scopes.iter().map(|s| s.to_string()).collect())
                .unwrap_or_default(),
        })
    }

    /// Fetches and normalizes the profile of the user owning `access_token`.
    pub async fn user_profile(&self, access_token: &str) -> Result<GoogleProfile, GoogleAuthError> {
        let body = self
            .user_info_client
            .get(&self.config.user_profile_url, access_token)
            .await
            .map_err(user_info_error)?;

        let mut profile = GoogleProfile::parse(&body)?;
        profile.provider = Some(Self::NAME.to_string());
        Ok(profile)
    }

    /// Completes the callback leg: code exchange, then the profile unless
    /// `skip_user_profile` is set.
    pub async fn authenticate(&self, code: &str) -> Result<GoogleAuthentication, GoogleAuthError> {
        let tokens = self.exchange_code(code).await?;

        let profile = if self.config.skip_user_profile {
            None
        } else {
            Some(self.user_profile(&tokens.access_token).await?)
        };

        Ok(GoogleAuthentication { tokens, profile })
    }
}

impl fmt::Debug for GoogleStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoogleStrategy")
            .field("name", &Self::NAME)
            .field("client_id", &self.config.client_id)
            .field("authorization_url", &self.config.authorization_url)
            .field("token_url", &self.config.token_url)
            .field("user_profile_url", &self.config.user_profile_url)
            .finish()
    }
}

fn token_error(
    err: RequestTokenError<oauth2::reqwest::Error<reqwest::Error>, BasicErrorResponse>,
) -> GoogleAuthError {
    match err {
        RequestTokenError::ServerResponse(response) => {
            let code = response.error().to_string();
            let message = response
                .error_description()
                .cloned()
                .unwrap_or_else(|| code.clone());
            warn!("token request rejected: {} ({})", message, code);
            GoogleAuthError::Token { code, message }
        }
        other => GoogleAuthError::internal("Failed to obtain access token", HttpError::transport(other)),
    }
}
