//! Authentication strategies.
//!
//! # Module Structure
//!
//! - `google` - Google OAuth 2.0 / OpenID Connect (redirect, code exchange, profile)

pub mod google;

pub use google::{AuthorizationOptions, GoogleAuthError, GoogleConfig, GoogleProfile, GoogleStrategy};
