//! Google sign-in routes.

use actix_web::{get, web, HttpResponse, Responder};
use log::info;
use serde::{Deserialize, Serialize};

use actix_security_google::{AuthorizationOptions, GoogleAuthError, GoogleProfile, GoogleStrategy};

/// Query parameters Google appends to the callback URL.
#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CallbackResponse {
    pub profile: Option<GoogleProfile>,
    pub scopes: Vec<String>,
    pub state: Option<String>,
}

/// Redirects to Google. The query string is forwarded as authorization options,
/// e.g. `/auth/google?prompt=select_account&loginHint=john@mail.com`.
#[get("/auth/google")]
pub async fn login(
    strategy: web::Data<GoogleStrategy>,
    options: web::Query<AuthorizationOptions>,
) -> impl Responder {
    strategy.redirect(&options)
}

#[get("/auth/google/callback")]
pub async fn callback(
    strategy: web::Data<GoogleStrategy>,
    query: web::Query<CallbackQuery>,
) -> Result<HttpResponse, GoogleAuthError> {
    let query = query.into_inner();

    if let Some(error) = query.error {
        let body = match query.error_description {
            Some(description) => format!("OAuth2 error: {} ({})", error, description),
            None => format!("OAuth2 error: {}", error),
        };
        return Ok(HttpResponse::BadRequest().body(body));
    }

    let code = match query.code {
        Some(code) => code,
        None => return Ok(HttpResponse::BadRequest().body("Missing authorization code")),
    };

    let auth = strategy.authenticate(&code).await?;
    if let Some(profile) = &auth.profile {
        info!("signed in google user {}", profile.id);
    }

    Ok(HttpResponse::Ok().json(CallbackResponse {
        profile: auth.profile,
        scopes: auth.tokens.scopes,
        state: query.state,
    }))
}
