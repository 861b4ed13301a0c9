//! Normalization of Google user-info responses.
//!
//! Google has served several user-info schemas over the years: the OpenID
//! Connect `v3/userinfo` shape (`sub`, `email_verified`) and the older
//! `v2/userinfo` shape (`id`, `verified_email`). Both are read through
//! [`UserInfo`] and coalesced into a single [`GoogleProfile`].

use log::warn;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::error::{GoogleAuthError, HttpError};

/// User-info claims, covering every schema generation Google has served.
///
/// Claims of an unexpected type are read as absent rather than rejected.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserInfo {
    /// OpenID Connect subject.
    #[serde(default, deserialize_with = "lenient_identifier")]
    pub sub: Option<Identifier>,
    /// Legacy identifier, superseded by `sub`.
    #[serde(default, deserialize_with = "lenient_identifier")]
    pub id: Option<Identifier>,
    #[serde(default)]
    pub name: Option<NameClaim>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub given_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub family_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub email_verified: Option<Flag>,
    /// Legacy spelling of `email_verified`.
    #[serde(default, deserialize_with = "lenient_flag")]
    pub verified_email: Option<Flag>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub picture: Option<String>,
}

fn lenient_identifier<'de, D>(deserializer: D) -> Result<Option<Identifier>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(id)) => Some(Identifier::Text(id)),
        Some(Value::Number(id)) => Some(Identifier::Number(id)),
        _ => None,
    })
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(value)) => Some(value),
        _ => None,
    })
}

fn lenient_flag<'de, D>(deserializer: D) -> Result<Option<Flag>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Bool(flag)) => Some(Flag::Bool(flag)),
        Some(Value::String(flag)) => Some(Flag::Text(flag)),
        _ => None,
    })
}

/// A `sub` or `id` claim, which some responses encode as a number.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Identifier {
    Text(String),
    Number(serde_json::Number),
}

impl Identifier {
    fn into_string(self) -> String {
        match self {
            Identifier::Text(id) => id,
            Identifier::Number(id) => id.to_string(),
        }
    }
}

/// The `name` claim. Only a flat string is a display name.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NameClaim {
    Formatted(String),
    Other(Value),
}

/// A boolean claim that may be sent as `true` or `"true"`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Flag {
    Bool(bool),
    Text(String),
}

impl Flag {
    pub fn is_set(&self) -> bool {
        match self {
            Flag::Bool(flag) => *flag,
            Flag::Text(text) => text == "true",
        }
    }
}

/// Given and family name of the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileName {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileEmail {
    pub value: String,
    pub verified: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfilePhoto {
    pub value: String,
}

/// Canonical profile of a user authenticated with Google.
///
/// Groups missing from the user-info response stay `None` (and are left out
/// when serialized); only `display_name` falls back to an empty string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleProfile {
    /// Set by the strategy, not by [`GoogleProfile::parse`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    pub id: String,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<ProfileName>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emails: Option<Vec<ProfileEmail>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photos: Option<Vec<ProfilePhoto>>,
    /// The response body as received.
    #[serde(rename = "_raw")]
    pub raw: String,
    /// The response body as parsed JSON.
    #[serde(rename = "_json")]
    pub json: Value,
}

impl GoogleProfile {
    /// Parses a user-info response body.
    ///
    /// # Errors
    ///
    /// [`GoogleAuthError::Parse`] if the body is not JSON, or is JSON other
    /// than an object (`[]`, `"text"`, `42`). Claims of the wrong type inside
    /// an object never fail the parse.
    pub fn parse(body: &str) -> Result<Self, GoogleAuthError> {
        let json: Value =
            serde_json::from_str(body).map_err(|source| GoogleAuthError::Parse { source })?;
        if !json.is_object() {
            return Err(GoogleAuthError::Parse {
                source: serde_json::Error::custom("user info is not a JSON object"),
            });
        }
        let info: UserInfo = serde_json::from_value(json.clone())
            .map_err(|source| GoogleAuthError::Parse { source })?;

        Ok(Self::normalize(info, body.to_string(), json))
    }

    /// Coalesces the claims of any schema generation into a profile.
    pub fn normalize(info: UserInfo, raw: String, json: Value) -> Self {
        let id = match (info.sub, info.id) {
            (Some(sub), _) => sub.into_string(),
            (None, Some(id)) => id.into_string(),
            (None, None) => {
                warn!("user info response carries neither `sub` nor `id`");
                String::new()
            }
        };

        let display_name = match info.name {
            Some(NameClaim::Formatted(name)) => name,
            _ => String::new(),
        };

        let name = if info.given_name.is_some() || info.family_name.is_some() {
            Some(ProfileName {
                given_name: info.given_name,
                family_name: info.family_name,
            })
        } else {
            None
        };

        let verified = info
            .email_verified
            .or(info.verified_email)
            .map_or(false, |flag| flag.is_set());
        let emails = info
            .email
            .map(|value| vec![ProfileEmail { value, verified }]);

        let photos = info.picture.map(|value| vec![ProfilePhoto { value }]);

        GoogleProfile {
            provider: None,
            id,
            display_name,
            name,
            emails,
            photos,
            raw,
            json,
        }
    }

    /// The first email address, if the `email` scope was granted.
    pub fn email(&self) -> Option<&str> {
        self.emails
            .as_ref()
            .and_then(|emails| emails.first())
            .map(|email| email.value.as_str())
    }

    /// The first photo URL, if any.
    pub fn photo(&self) -> Option<&str> {
        self.photos
            .as_ref()
            .and_then(|photos| photos.first())
            .map(|photo| photo.value.as_str())
    }
}

/// Error object returned by Google alongside a non-2xx status.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorField,
    #[serde(default)]
    error_description: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorField {
    /// OAuth style: `{"error": "invalid_request", "error_description": "..."}`.
    Code(String),
    /// Google API style: `{"error": {"code": 401, "message": "...", "status": "..."}}`.
    Detailed {
        #[serde(default)]
        code: Option<Value>,
        message: String,
        #[serde(default)]
        status: Option<String>,
    },
}

impl ErrorBody {
    fn into_code_and_message(self) -> Option<(String, String)> {
        match self.error {
            ErrorField::Code(code) => self.error_description.map(|message| (code, message)),
            ErrorField::Detailed {
                code,
                message,
                status,
            } => {
                let code = status
                    .or_else(|| {
                        code.map(|code| match code {
                            Value::String(code) => code,
                            other => other.to_string(),
                        })
                    })
                    .unwrap_or_default();
                Some((code, message))
            }
        }
    }
}

/// Classifies a failed user-info request.
///
/// A provider error object in the response body becomes
/// [`GoogleAuthError::UserInfo`]; anything else is reported as
/// [`GoogleAuthError::InternalOAuth`] wrapping the HTTP failure.
pub fn user_info_error(err: HttpError) -> GoogleAuthError {
    let provider_error = err
        .body()
        .and_then(|body| serde_json::from_str::<ErrorBody>(body).ok())
        .and_then(ErrorBody::into_code_and_message);

    match provider_error {
        Some((code, message)) => {
            warn!("user info request rejected: {} ({})", message, code);
            GoogleAuthError::UserInfo { code, message }
        }
        None => GoogleAuthError::internal("Failed to fetch user profile", err),
    }
}
