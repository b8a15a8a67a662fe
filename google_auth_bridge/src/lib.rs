//! google_auth_bridge - Google Sign-In bridge for cross-platform application shells
//!
//! The bridge answers five host commands (`initialize`, `signIn`, `refresh`,
//! `signOut`, `handleOpenUrl`) by delegating to an [`IdentitySdk`] and reshaping
//! its results into flat key-value maps. All OAuth work stays inside the SDK.
//!
//! ```no_run
//! use std::sync::Arc;
//! use google_auth_bridge::{GoogleAuth, InMemoryIdentitySdk, PluginCall, PluginConfig, StaticHost};
//!
//! # async fn run() {
//! let bridge = GoogleAuth::load(
//!     Arc::new(InMemoryIdentitySdk::new()),
//!     Arc::new(StaticHost::new(PluginConfig::default())),
//! );
//! let (call, pending) = PluginCall::new("signIn", Default::default());
//! bridge.call(call);
//! let _response = pending.response().await;
//! # }
//! ```

mod auth;
mod config;
mod plugin;
mod sdk;

pub use config::{GOOGLE_SERVICE_INFO_PATH, PROFILE_IMAGE_DIMENSION};

pub use auth::{
    AttemptId, AuthConfig, AuthResult, Authentication, DEFAULT_GRANTED_SCOPES, GoogleAuth,
    GoogleAuthError, RefreshResult, SessionState, additional_scopes,
};

pub use plugin::{
    CallRejection, CallResponse, OpenUrlNotification, PendingCall, PluginCall, PluginConfig,
    PluginError, PluginHost, PresentationSurface, ServiceDescriptor, StaticHost,
    UNIMPLEMENTED_CODE,
};

pub use sdk::{
    GoogleUser, IdentitySdk, InMemoryIdentitySdk, ProfileData, SdkCall, SdkConfiguration,
    SdkError, SdkToken, SignInResult, codes,
};
