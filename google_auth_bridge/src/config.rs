//! Central configuration for the google_auth_bridge crate

use std::str::FromStr;
use std::sync::LazyLock;

/// Path of the bundled service descriptor consulted when neither the call
/// nor the plugin configuration carries a client id.
///
/// Default: "GoogleService-Info.json"
pub static GOOGLE_SERVICE_INFO_PATH: LazyLock<String> = LazyLock::new(|| {
    env_or(
        "GOOGLE_SERVICE_INFO_PATH",
        "GoogleService-Info.json".to_string(),
    )
});

/// Edge length in pixels of the profile image URL returned by `signIn`.
pub static PROFILE_IMAGE_DIMENSION: LazyLock<u32> =
    LazyLock::new(|| env_or("GOOGLE_AUTH_PROFILE_IMAGE_DIMENSION", 100));

/// Access tokens expiring within this many seconds are re-minted by
/// `refresh_tokens_if_needed` of the in-memory SDK.
pub(crate) static REFRESH_THRESHOLD_SECS: LazyLock<i64> =
    LazyLock::new(|| env_or("GOOGLE_AUTH_REFRESH_THRESHOLD_SECS", 300));

/// Reads `name` from the environment, falling back to `default` when unset or unparsable.
fn env_or<T: FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}
