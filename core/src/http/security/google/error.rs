//! Google authentication error types.

use std::error::Error as StdError;
use std::fmt;

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use derive_more::{Display, Error};
use serde_json::json;

/// Failure reported by the HTTP layer underneath the strategy.
///
/// `Transport` covers everything that prevented a response from arriving;
/// `Status` carries a non-2xx response so its body can still be inspected
/// for a provider error object.
#[derive(Debug)]
pub enum HttpError {
    /// The request never produced a response (DNS, TLS, connection reset, ...).
    Transport(Box<dyn StdError + Send + Sync>),
    /// The endpoint answered with a non-success status.
    Status { status: u16, body: String },
}

impl HttpError {
    /// Wraps any transport-level error.
    pub fn transport<E>(err: E) -> Self
    where
        E: Into<Box<dyn StdError + Send + Sync>>,
    {
        HttpError::Transport(err.into())
    }

    /// Builds a status error from a response status and its body.
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        HttpError::Status {
            status,
            body: body.into(),
        }
    }

    /// The response status, if the request got that far.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            HttpError::Transport(_) => None,
            HttpError::Status { status, .. } => Some(*status),
        }
    }

    /// The response body, if the request got that far.
    pub fn body(&self) -> Option<&str> {
        match self {
            HttpError::Transport(_) => None,
            HttpError::Status { body, .. } => Some(body),
        }
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpError::Transport(err) => write!(f, "{}", err),
            HttpError::Status { status, .. } => write!(f, "HTTP status {}", status),
        }
    }
}

// `Box<dyn Error>` is not itself an `Error`, so the source is exposed by hand.
impl StdError for HttpError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            HttpError::Transport(err) => Some(err.as_ref()),
            HttpError::Status { .. } => None,
        }
    }
}

/// Errors produced by the Google strategy.
///
/// Every variant is recoverable by the caller; none of them carries a
/// partially built profile.
#[derive(Debug, Display, Error)]
pub enum GoogleAuthError {
    /// The strategy configuration is unusable.
    #[display("{message}")]
    Configuration { message: String },

    /// The user-info body is not valid JSON.
    #[display("Failed to parse user profile")]
    Parse { source: serde_json::Error },

    /// The user-info endpoint answered with a provider error object.
    #[display("{message}")]
    UserInfo { code: String, message: String },

    /// The token endpoint rejected the authorization code.
    #[display("{message}")]
    Token { code: String, message: String },

    /// The HTTP exchange with the provider failed below the OAuth layer.
    #[display("{message}")]
    InternalOAuth {
        message: String,
        #[error(source)]
        oauth_error: HttpError,
    },
}

impl GoogleAuthError {
    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        GoogleAuthError::Configuration {
            message: message.into(),
        }
    }

    pub(crate) fn internal(message: impl Into<String>, oauth_error: HttpError) -> Self {
        GoogleAuthError::InternalOAuth {
            message: message.into(),
            oauth_error,
        }
    }

    /// The provider error code for `UserInfo` and `Token` errors.
    pub fn code(&self) -> Option<&str> {
        match self {
            GoogleAuthError::UserInfo { code, .. } | GoogleAuthError::Token { code, .. } => {
                Some(code)
            }
            _ => None,
        }
    }

    /// The underlying HTTP failure for `InternalOAuth` errors.
    pub fn oauth_error(&self) -> Option<&HttpError> {
        match self {
            GoogleAuthError::InternalOAuth { oauth_error, .. } => Some(oauth_error),
            _ => None,
        }
    }
}

impl ResponseError for GoogleAuthError {
    fn status_code(&self) -> StatusCode {
        match self {
            GoogleAuthError::Configuration { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            GoogleAuthError::UserInfo { .. } | GoogleAuthError::Token { .. } => {
                StatusCode::UNAUTHORIZED
            }
            GoogleAuthError::Parse { .. } | GoogleAuthError::InternalOAuth { .. } => {
                StatusCode::BAD_GATEWAY
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let body = json!({
            "error": status.canonical_reason().unwrap_or("Error"),
            "message": self.to_string(),
        });

        HttpResponse::build(status).json(body)
    }
}
