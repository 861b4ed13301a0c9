//! # actix-security-google
//!
//! Google OAuth 2.0 / OpenID Connect sign-in for Actix Web.
//!
//! ```ignore
//! use actix_security_google::{GoogleConfig, GoogleStrategy};
//!
//! let strategy = GoogleStrategy::new(
//!     GoogleConfig::new(client_id, client_secret)
//!         .callback_url("https://www.example.net/auth/google/callback")
//!         .scope(vec!["openid", "email", "profile"]),
//! )?;
//! ```
//!
//! See [`http::security::google`] for the full flow.

pub mod http;

pub use http::security::google::{
    AuthorizationOptions, GoogleAuthError, GoogleAuthentication, GoogleConfig, GoogleProfile,
    GoogleStrategy, GoogleTokens, HttpError, ReqwestUserInfoClient, UserInfoClient,
};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
