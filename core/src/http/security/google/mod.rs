//! Google OAuth 2.0 / OpenID Connect authentication for Actix Web.
//!
//! # Overview
//!
//! The strategy covers both legs of the authorization code flow:
//! - **Redirect**: builds the Google authorization URL from the configured
//!   client and the per-request [`AuthorizationOptions`], and answers with a
//!   `302 Found`.
//! - **Callback**: exchanges the code at the token endpoint, then fetches the
//!   user-info endpoint and normalizes the answer into a [`GoogleProfile`].
//!
//! Google's user-info endpoint has changed shape over time (`sub` vs `id`,
//! `email_verified` vs `verified_email`, structured vs plain `name`). The
//! profile normalizer accepts all of them.
//!
//! # Usage
//!
//! ```ignore
//! use actix_security_google::{AuthorizationOptions, GoogleConfig, GoogleStrategy};
//! use actix_web::{get, web, HttpResponse, Responder};
//!
//! #[get("/auth/google")]
//! async fn login(
//!     strategy: web::Data<GoogleStrategy>,
//!     options: web::Query<AuthorizationOptions>,
//! ) -> impl Responder {
//!     strategy.redirect(&options)
//! }
//!
//! #[get("/auth/google/callback")]
//! async fn callback(
//!     strategy: web::Data<GoogleStrategy>,
//!     query: web::Query<Callback>,
//! ) -> actix_web::Result<HttpResponse> {
//!     let auth = strategy.authenticate(&query.code).await?;
//!     Ok(HttpResponse::Ok().json(auth.profile))
//! }
//! ```
//!
//! # Testing
//!
//! The only network access on the profile path goes through
//! [`UserInfoClient`]. Tests build the strategy with
//! [`GoogleStrategy::with_user_info_client`] and a fake client.

mod client;
mod config;
mod error;
mod options;
mod profile;
mod strategy;

pub use client::{ReqwestUserInfoClient, UserInfoClient};
pub use config::{GoogleConfig, AUTHORIZATION_URL, TOKEN_URL, USER_PROFILE_URL};
pub use error::{GoogleAuthError, HttpError};
pub use options::AuthorizationOptions;
pub use profile::{
    user_info_error, Flag, GoogleProfile, Identifier, NameClaim, ProfileEmail, ProfileName,
    ProfilePhoto, UserInfo,
};
pub use strategy::{GoogleAuthentication, GoogleStrategy, GoogleTokens};
