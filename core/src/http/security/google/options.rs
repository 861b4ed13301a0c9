//! Per-request authorization options and their mapping to Google's
//! authorization endpoint parameters.
//!
//! | Option | Parameter |
//! |--------|-----------|
//! | `accessType` | `access_type` |
//! | `prompt` | `prompt` |
//! | `loginHint` | `login_hint` |
//! | `display` | `display` |
//! | `hostedDomain` / `hd` | `hd` |
//! | `requestVisibleActions` | `request_visible_actions` |
//! | `openIDRealm` | `openid.realm` |
//! | `includeGrantedScopes` | `include_granted_scopes` |
//! | `approvalPrompt` | `approval_prompt` |
//! | `userID` | `user_id` |
//!
//! Options arrive either through the builder methods or deserialized from
//! whatever loose key/value map the caller has (query string, JSON). Unknown
//! keys are ignored and values of the wrong type are coerced to text rather
//! than rejected.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Options accepted when starting a Google authorization request.
///
/// # Example
///
/// ```
/// use actix_security_google::AuthorizationOptions;
///
/// let options = AuthorizationOptions::new()
///     .access_type("offline")
///     .prompt("consent");
///
/// assert_eq!(
///     options.authorization_params(),
///     vec![("access_type", "offline".to_string()), ("prompt", "consent".to_string())]
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationOptions {
    #[serde(default, deserialize_with = "lenient_text")]
    pub access_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub prompt: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub login_hint: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub display: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub hosted_domain: Option<String>,
    /// Short form of `hosted_domain`; ignored when both are set.
    #[serde(default, deserialize_with = "lenient_text")]
    pub hd: Option<String>,
    /// Space-separated list of app activity types.
    #[serde(default, deserialize_with = "lenient_text")]
    pub request_visible_actions: Option<String>,
    /// OpenID 2.0 realm, for migrating legacy identifiers.
    #[serde(default, rename = "openIDRealm", deserialize_with = "lenient_text")]
    pub openid_realm: Option<String>,
    /// Incremental authorization.
    #[serde(default, deserialize_with = "lenient_flag")]
    pub include_granted_scopes: Option<bool>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub approval_prompt: Option<String>,
    #[serde(default, rename = "userID", deserialize_with = "lenient_text")]
    pub user_id: Option<String>,
    /// Overrides the configured scopes for this request only.
    #[serde(default, deserialize_with = "lenient_list")]
    pub scope: Option<Vec<String>>,
    /// Opaque value echoed back on the callback. Never generated or checked here.
    #[serde(default, deserialize_with = "lenient_text")]
    pub state: Option<String>,
}

impl AuthorizationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn access_type(mut self, value: impl Into<String>) -> Self {
        self.access_type = Some(value.into());
        self
    }

    pub fn prompt(mut self, value: impl Into<String>) -> Self {
        self.prompt = Some(value.into());
        self
    }

    pub fn login_hint(mut self, value: impl Into<String>) -> Self {
        self.login_hint = Some(value.into());
        self
    }

    pub fn display(mut self, value: impl Into<String>) -> Self {
        self.display = Some(value.into());
        self
    }

    /// Restricts sign-in to accounts of a Google Workspace domain.
    pub fn hosted_domain(mut self, value: impl Into<String>) -> Self {
        self.hosted_domain = Some(value.into());
        self
    }

    pub fn hd(mut self, value: impl Into<String>) -> Self {
        self.hd = Some(value.into());
        self
    }

    pub fn request_visible_actions(mut self, value: impl Into<String>) -> Self {
        self.request_visible_actions = Some(value.into());
        self
    }

    pub fn openid_realm(mut self, value: impl Into<String>) -> Self {
        self.openid_realm = Some(value.into());
        self
    }

    pub fn include_granted_scopes(mut self, value: bool) -> Self {
        self.include_granted_scopes = Some(value);
        self
    }

    pub fn approval_prompt(mut self, value: impl Into<String>) -> Self {
        self.approval_prompt = Some(value.into());
        self
    }

    pub fn user_id(mut self, value: impl Into<String>) -> Self {
        self.user_id = Some(value.into());
        self
    }

    pub fn scope(mut self, scopes: Vec<impl Into<String>>) -> Self {
        self.scope = Some(scopes.into_iter().map(Into::into).collect());
        self
    }

    pub fn state(mut self, value: impl Into<String>) -> Self {
        self.state = Some(value.into());
        self
    }

    /// Maps the provider-specific options to authorization endpoint parameters.
    ///
    /// Parameters come out in table order. `scope` and `state` are base
    /// parameters and are not part of the mapping.
    pub fn authorization_params(&self) -> Vec<(&'static str, String)> {
        let hosted_domain = self.hosted_domain.as_ref().or(self.hd.as_ref());

        let mapped: [(&'static str, Option<String>); 10] = [
            ("access_type", self.access_type.clone()),
            ("prompt", self.prompt.clone()),
            ("login_hint", self.login_hint.clone()),
            ("display", self.display.clone()),
            ("hd", hosted_domain.cloned()),
            ("request_visible_actions", self.request_visible_actions.clone()),
            ("openid.realm", self.openid_realm.clone()),
            (
                "include_granted_scopes",
                self.include_granted_scopes.map(|flag| flag.to_string()),
            ),
            ("approval_prompt", self.approval_prompt.clone()),
            ("user_id", self.user_id.clone()),
        ];

        mapped
            .into_iter()
            .filter_map(|(name, value)| value.map(|value| (name, value)))
            .collect()
    }
}

fn to_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(to_text)
                .collect::<Vec<_>>()
                .join(","),
        ),
        other => Some(other.to_string()),
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(to_text))
}

fn lenient_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::Bool(flag)) => Some(flag),
        Some(Value::String(s)) => Some(s == "true"),
        Some(Value::Number(n)) => Some(n.as_f64().map_or(false, |n| n != 0.0)),
        Some(_) => Some(true),
    })
}

fn lenient_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::Array(items)) => Some(items.iter().filter_map(to_text).collect()),
        Some(other) => to_text(&other).map(|scope| vec![scope]),
    })
}
