use thiserror::Error;

/// Error codes reported by the identity SDK.
pub mod codes {
    pub const UNKNOWN: i64 = -1;
    pub const KEYCHAIN: i64 = -2;
    pub const HAS_NO_AUTH_IN_KEYCHAIN: i64 = -4;
    pub const CANCELED: i64 = -5;
}

/// An error reported by the identity SDK. The message reaches the caller verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct SdkError {
    pub code: i64,
    pub message: String,
}

impl SdkError {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn canceled() -> Self {
        Self::new(codes::CANCELED, "The user canceled the sign-in flow.")
    }

    pub fn has_no_auth_in_keychain() -> Self {
        Self::new(
            codes::HAS_NO_AUTH_IN_KEYCHAIN,
            "The user has not signed in before or they have since signed out.",
        )
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(codes::UNKNOWN, message)
    }
}
