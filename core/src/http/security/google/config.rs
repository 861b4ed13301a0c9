//! Google strategy configuration.

use std::env;

use serde::Deserialize;
use url::Url;

use super::error::GoogleAuthError;

/// Google's OAuth 2.0 authorization endpoint.
pub const AUTHORIZATION_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
/// Google's OAuth 2.0 token endpoint.
pub const TOKEN_URL: &str = "https://www.googleapis.com/oauth2/v4/token";
/// Google's OpenID Connect user-info endpoint.
pub const USER_PROFILE_URL: &str = "https://www.googleapis.com/oauth2/v3/userinfo";

/// Configuration for [`GoogleStrategy`](super::GoogleStrategy).
///
/// Also deserializable, so it can live in a config file. The camelCase
/// names (`clientID`, `callbackURL`, `userProfileURL`, ...) are accepted as
/// aliases.
///
/// # Example
///
/// ```
/// use actix_security_google::GoogleConfig;
///
/// let config = GoogleConfig::new("client-id", "client-secret")
///     .callback_url("http://localhost:8080/auth/google/callback")
///     .scope(vec!["openid", "email", "profile"]);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GoogleConfig {
    #[serde(alias = "clientID")]
    pub client_id: String,
    #[serde(alias = "clientSecret")]
    pub client_secret: String,
    /// Redirect URI registered with Google.
    #[serde(default, alias = "callbackURL")]
    pub callback_url: Option<String>,
    #[serde(default = "default_authorization_url", alias = "authorizationURL")]
    pub authorization_url: String,
    #[serde(default = "default_token_url", alias = "tokenURL")]
    pub token_url: String,
    #[serde(default = "default_user_profile_url", alias = "userProfileURL")]
    pub user_profile_url: String,
    /// Scopes requested when a request does not name its own.
    #[serde(default)]
    pub scope: Vec<String>,
    #[serde(default = "default_scope_separator", alias = "scopeSeparator")]
    pub scope_separator: String,
    /// Stop after the token exchange instead of fetching the profile.
    #[serde(default, alias = "skipUserProfile")]
    pub skip_user_profile: bool,
}

fn default_authorization_url() -> String {
    AUTHORIZATION_URL.to_string()
}

fn default_token_url() -> String {
    TOKEN_URL.to_string()
}

fn default_user_profile_url() -> String {
    USER_PROFILE_URL.to_string()
}

fn default_scope_separator() -> String {
    " ".to_string()
}

impl GoogleConfig {
    /// Creates a configuration with Google's default endpoints.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            callback_url: None,
            authorization_url: default_authorization_url(),
            token_url: default_token_url(),
            user_profile_url: default_user_profile_url(),
            scope: Vec::new(),
            scope_separator: default_scope_separator(),
            skip_user_profile: false,
        }
    }

    /// Reads the configuration from the environment.
    ///
    /// `GOOGLE_CLIENT_ID` and `GOOGLE_CLIENT_SECRET` are required;
    /// `GOOGLE_CALLBACK_URL`, `GOOGLE_USER_PROFILE_URL` and `GOOGLE_SCOPE`
    /// (space-separated) are optional.
    pub fn from_env() -> Result<Self, GoogleAuthError> {
        let required = |name: &str| {
            env::var(name)
                .map_err(|_| GoogleAuthError::configuration(format!("{} is not set", name)))
        };

        let client_id = required("GOOGLE_CLIENT_ID")?;
        let client_secret = required("GOOGLE_CLIENT_SECRET")?;

        let mut config = Self::new(client_id, client_secret);
        if let Ok(callback_url) = env::var("GOOGLE_CALLBACK_URL") {
            config = config.callback_url(callback_url);
        }
        if let Ok(user_profile_url) = env::var("GOOGLE_USER_PROFILE_URL") {
            config = config.user_profile_url(user_profile_url);
        }
        if let Ok(scope) = env::var("GOOGLE_SCOPE") {
            config = config.scope(scope.split_whitespace().collect::<Vec<_>>());
        }
        Ok(config)
    }

    /// Set the redirect URI
    pub fn callback_url(mut self, url: impl Into<String>) -> Self {
        self.callback_url = Some(url.into());
        self
    }

    /// Set the authorization endpoint URL
    pub fn authorization_url(mut self, url: impl Into<String>) -> Self {
        self.authorization_url = url.into();
        self
    }

    /// Set the token endpoint URL
    pub fn token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = url.into();
        self
    }

    /// Set the user info endpoint URL
    pub fn user_profile_url(mut self, url: impl Into<String>) -> Self {
        self.user_profile_url = url.into();
        self
    }

    /// Set the default scopes
    pub fn scope(mut self, scopes: Vec<impl Into<String>>) -> Self {
        self.scope = scopes.into_iter().map(Into::into).collect();
        self
    }

    /// Add a scope
    pub fn add_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope.push(scope.into());
        self
    }

    pub fn scope_separator(mut self, separator: impl Into<String>) -> Self {
        self.scope_separator = separator.into();
        self
    }

    pub fn skip_user_profile(mut self, skip: bool) -> Self {
        self.skip_user_profile = skip;
        self
    }

    /// Checks that the strategy can be built from this configuration.
    pub fn validate(&self) -> Result<(), GoogleAuthError> {
        if self.client_id.trim().is_empty() {
            return Err(GoogleAuthError::configuration(
                "GoogleStrategy requires a client_id option",
            ));
        }
        if self.client_secret.trim().is_empty() {
            return Err(GoogleAuthError::configuration(
                "GoogleStrategy requires a client_secret option",
            ));
        }

        parse_url("authorization_url", &self.authorization_url)?;
        parse_url("token_url", &self.token_url)?;
        parse_url("user_profile_url", &self.user_profile_url)?;
        if let Some(callback_url) = &self.callback_url {
            parse_url("callback_url", callback_url)?;
        }
        Ok(())
    }
}

pub(crate) fn parse_url(name: &str, value: &str) -> Result<Url, GoogleAuthError> {
    Url::parse(value)
        .map_err(|e| GoogleAuthError::configuration(format!("Invalid {}: {}", name, e)))
}
