use async_trait::async_trait;
use chrono::{DateTime, Utc};
use url::Url;

use crate::plugin::PresentationSurface;

use super::errors::SdkError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdkConfiguration {
    pub client_id: String,
    pub server_client_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdkToken {
    pub token_string: String,
    pub expiration_date: Option<DateTime<Utc>>,
}

impl SdkToken {
    pub fn new(token_string: impl Into<String>, expiration_date: Option<DateTime<Utc>>) -> Self {
        Self {
            token_string: token_string.into(),
            expiration_date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProfileData {
    pub email: Option<String>,
    pub name: Option<String>,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
    pub image_url: Option<Url>,
}

impl ProfileData {
    /// Profile image sized to `dimension` pixels, in the `=s<size>` form
    /// Google profile image hosts accept.
    ///
    /// An existing size suffix such as `=s96-c` is replaced.
    pub fn image_url_with_dimension(&self, dimension: u32) -> Option<Url> {
        let mut url = self.image_url.clone()?;
        let path = format!("{}=s{}", strip_size_suffix(url.path()), dimension);
        url.set_path(&path);
        Some(url)
    }
}

fn strip_size_suffix(path: &str) -> &str {
    let segment_start = path.rfind('/').map_or(0, |i| i + 1);
    match path[segment_start..].rfind("=s") {
        Some(at)
            if path[segment_start + at + 2..]
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_digit()) =>
        {
            &path[..segment_start + at]
        }
        _ => path,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoogleUser {
    pub user_id: Option<String>,
    pub access_token: SdkToken,
    pub id_token: Option<SdkToken>,
    pub profile: Option<ProfileData>,
    pub granted_scopes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignInResult {
    pub user: GoogleUser,
}

/// The identity SDK performing the actual OAuth/OIDC work.
///
/// Asynchronous operations complete exactly once through their future.
#[async_trait]
pub trait IdentitySdk: Send + Sync + 'static {
    /// Install the client configuration used by subsequent flows.
    fn set_configuration(&self, configuration: SdkConfiguration);

    /// Whether a previous session can be restored without user interaction.
    fn has_previous_sign_in(&self) -> bool;

    async fn restore_previous_sign_in(&self) -> Result<Option<GoogleUser>, SdkError>;

    /// Run the interactive flow on `surface`, requesting `additional_scopes`
    /// on top of the default grant.
    async fn sign_in(
        &self,
        surface: PresentationSurface,
        additional_scopes: Vec<String>,
    ) -> Result<Option<SignInResult>, SdkError>;

    fn current_user(&self) -> Option<GoogleUser>;

    /// Refresh the tokens of `user` only if they are about to expire.
    async fn refresh_tokens_if_needed(&self, user: GoogleUser) -> Result<GoogleUser, SdkError>;

    fn sign_out(&self);

    /// Offer an activation URL to the SDK; returns whether the SDK consumed it.
    fn handle_url(&self, url: &Url) -> bool;
}
