mod config;
mod errors;
mod main;
mod types;

pub use config::{AuthConfig, DEFAULT_GRANTED_SCOPES, additional_scopes};
pub use errors::GoogleAuthError;
pub use main::{AttemptId, GoogleAuth};
pub use types::{AuthResult, Authentication, RefreshResult, SessionState};
