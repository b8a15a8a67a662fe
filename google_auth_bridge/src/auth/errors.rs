use thiserror::Error;

use crate::plugin::PluginCall;
use crate::sdk::SdkError;

/// Errors surfaced to the host as call rejections.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GoogleAuthError {
    /// Error reported by the identity SDK, passed through verbatim
    #[error("{message}")]
    Sdk {
        message: String,
        code: Option<String>,
    },

    #[error("Unable to access presenting view controller")]
    NoPresentingSurface,

    #[error("No user returned")]
    NoUserReturned,

    #[error("No sign-in result returned")]
    NoSignInResult,

    #[error("User not logged in.")]
    NotSignedIn,

    /// A newer sign-in replaced this one before it completed
    #[error("Sign-in superseded by a newer request")]
    Superseded,

    #[error("Bridge is not running")]
    BridgeStopped,

    #[error("Serde error: {0}")]
    Serde(String),
}

impl GoogleAuthError {
    /// Wraps an SDK error, keeping only its message.
    pub fn from_sdk(error: SdkError) -> Self {
        Self::Sdk {
            message: error.message,
            code: None,
        }
    }

    /// Wraps an SDK error, keeping its message and numeric code.
    pub fn from_sdk_with_code(error: SdkError) -> Self {
        Self::Sdk {
            code: Some(error.code.to_string()),
            message: error.message,
        }
    }

    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Sdk { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    pub fn reject(self, call: PluginCall) {
        let code = self.code().map(str::to_string);
        call.reject(self.to_string(), code);
    }
}

impl From<serde_json::Error> for GoogleAuthError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}
