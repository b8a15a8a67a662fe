use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::sdk::GoogleUser;

use super::errors::GoogleAuthError;

/// Tokens returned by `signIn`. Every key is always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Authentication {
    pub access_token: String,
    pub id_token: Option<String>,
    /// Never exposed by the SDK; always serialized as `null`.
    pub refresh_token: Option<String>,
}

/// Normalized `signIn` response.
///
/// Profile fields are serialized as explicit `null` when unavailable;
/// `imageUrl` is the only key that may be omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResult {
    pub authentication: Authentication,
    pub email: Option<String>,
    pub family_name: Option<String>,
    pub given_name: Option<String>,
    pub id: Option<String>,
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl AuthResult {
    pub fn from_user(user: &GoogleUser, image_dimension: u32) -> Self {
        let profile = user.profile.as_ref();
        Self {
            authentication: Authentication {
                access_token: user.access_token.token_string.clone(),
                id_token: user.id_token.as_ref().map(|t| t.token_string.clone()),
                refresh_token: None,
            },
            email: profile.and_then(|p| p.email.clone()),
            family_name: profile.and_then(|p| p.family_name.clone()),
            given_name: profile.and_then(|p| p.given_name.clone()),
            id: user.user_id.clone(),
            name: profile.and_then(|p| p.name.clone()),
            image_url: profile
                .and_then(|p| p.image_url_with_dimension(image_dimension))
                .map(|url| url.to_string()),
        }
    }
}

/// Normalized `refresh` response. A missing ID token becomes `""`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResult {
    pub access_token: String,
    pub id_token: String,
    pub refresh_token: Option<String>,
}

impl From<&GoogleUser> for RefreshResult {
    fn from(user: &GoogleUser) -> Self {
        Self {
            access_token: user.access_token.token_string.clone(),
            id_token: user
                .id_token
                .as_ref()
                .map(|t| t.token_string.clone())
                .unwrap_or_default(),
            refresh_token: None,
        }
    }
}

/// Session state as observed by the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Unconfigured,
    Configured,
    SignInPending,
    SignedIn,
    SignedOut,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unconfigured => "unconfigured",
            Self::Configured => "configured",
            Self::SignInPending => "sign_in_pending",
            Self::SignedIn => "signed_in",
            Self::SignedOut => "signed_out",
        }
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Serializes a response struct into the flat map handed back to the host.
pub(crate) fn into_response<T: Serialize>(value: &T) -> Result<Map<String, Value>, GoogleAuthError> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(GoogleAuthError::Serde(format!(
            "Expected a JSON object, got {other}"
        ))),
    }
}
