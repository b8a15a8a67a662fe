use async_trait::async_trait;
use chrono::{Duration, Utc};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Semaphore;
use url::Url;

use crate::auth::DEFAULT_GRANTED_SCOPES;
use crate::config::REFRESH_THRESHOLD_SECS;
use crate::plugin::PresentationSurface;

use super::errors::SdkError;
use super::types::{GoogleUser, IdentitySdk, SdkConfiguration, SdkToken, SignInResult};

const REDIRECT_SCHEME_PREFIX: &str = "com.googleusercontent.apps.";

/// One SDK entry point invocation, as recorded by [`InMemoryIdentitySdk`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SdkCall {
    SetConfiguration(SdkConfiguration),
    HasPreviousSignIn,
    RestorePreviousSignIn,
    SignIn {
        surface: String,
        additional_scopes: Vec<String>,
    },
    CurrentUser,
    RefreshTokensIfNeeded,
    SignOut,
    HandleUrl(Url),
}

enum ScriptedOutcome {
    Error(SdkError),
    Empty,
}

#[derive(Default)]
struct SdkState {
    configuration: Option<SdkConfiguration>,
    account: Option<GoogleUser>,
    keychain: Option<GoogleUser>,
    current_user: Option<GoogleUser>,
    next_restore: Option<ScriptedOutcome>,
    next_sign_in: Option<ScriptedOutcome>,
    next_refresh_error: Option<SdkError>,
    calls: Vec<SdkCall>,
}

/// Identity SDK living entirely in process memory.
///
/// `account` is the user an interactive sign-in "picks"; the keychain holds
/// the session restorable without interaction.
pub struct InMemoryIdentitySdk {
    state: Mutex<SdkState>,
    hold_sign_ins: AtomicBool,
    sign_in_gate: Semaphore,
}

impl Default for InMemoryIdentitySdk {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryIdentitySdk {
    pub fn new() -> Self {
        tracing::info!("Creating new in-memory identity SDK");
        Self {
            state: Mutex::new(SdkState::default()),
            hold_sign_ins: AtomicBool::new(false),
            sign_in_gate: Semaphore::new(0),
        }
    }

    /// The account an interactive sign-in returns. `None` makes the flow
    /// behave as if the user canceled.
    pub fn set_account(&self, account: Option<GoogleUser>) {
        self.state.lock().account = account;
    }

    /// Store `user` as a previous session, restorable without interaction.
    pub fn seed_previous_sign_in(&self, user: GoogleUser) {
        self.state.lock().keychain = Some(user);
    }

    pub fn fail_next_restore(&self, error: SdkError) {
        self.state.lock().next_restore = Some(ScriptedOutcome::Error(error));
    }

    /// The next restoration completes with neither a user nor an error.
    pub fn return_nothing_on_next_restore(&self) {
        self.state.lock().next_restore = Some(ScriptedOutcome::Empty);
    }

    pub fn fail_next_sign_in(&self, error: SdkError) {
        self.state.lock().next_sign_in = Some(ScriptedOutcome::Error(error));
    }

    /// The next interactive sign-in completes with neither a result nor an error.
    pub fn return_nothing_on_next_sign_in(&self) {
        self.state.lock().next_sign_in = Some(ScriptedOutcome::Empty);
    }

    pub fn fail_next_refresh(&self, error: SdkError) {
        self.state.lock().next_refresh_error = Some(error);
    }

    /// Keep interactive sign-ins open until [`Self::release_sign_ins`] is called.
    pub fn hold_sign_ins(&self) {
        self.hold_sign_ins.store(true, Ordering::SeqCst);
    }

    /// Let `count` held interactive sign-ins complete.
    pub fn release_sign_ins(&self, count: usize) {
        self.sign_in_gate.add_permits(count);
    }

    pub fn configuration(&self) -> Option<SdkConfiguration> {
        self.state.lock().configuration.clone()
    }

    /// Every entry point invocation so far, oldest first.
    pub fn calls(&self) -> Vec<SdkCall> {
        self.state.lock().calls.clone()
    }

    pub fn handled_urls(&self) -> Vec<Url> {
        self.state
            .lock()
            .calls
            .iter()
            .filter_map(|call| match call {
                SdkCall::HandleUrl(url) => Some(url.clone()),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: SdkCall) {
        self.state.lock().calls.push(call);
    }

    fn fresh_access_token() -> SdkToken {
        SdkToken::new(
            format!("ya29.{}", uuid::Uuid::new_v4().simple()),
            Some(Utc::now() + Duration::hours(1)),
        )
    }
}

#[async_trait]
impl IdentitySdk for InMemoryIdentitySdk {
    fn set_configuration(&self, configuration: SdkConfiguration) {
        let mut state = self.state.lock();
        state
            .calls
            .push(SdkCall::SetConfiguration(configuration.clone()));
        state.configuration = Some(configuration);
    }

    fn has_previous_sign_in(&self) -> bool {
        let mut state = self.state.lock();
        state.calls.push(SdkCall::HasPreviousSignIn);
        state.keychain.is_some()
    }

    async fn restore_previous_sign_in(&self) -> Result<Option<GoogleUser>, SdkError> {
        let mut state = self.state.lock();
        state.calls.push(SdkCall::RestorePreviousSignIn);

        match state.next_restore.take() {
            Some(ScriptedOutcome::Error(error)) => return Err(error),
            Some(ScriptedOutcome::Empty) => return Ok(None),
            None => {}
        }

        let user = state
            .keychain
            .clone()
            .ok_or_else(SdkError::has_no_auth_in_keychain)?;
        state.current_user = Some(user.clone());
        Ok(Some(user))
    }

    async fn sign_in(
        &self,
        surface: PresentationSurface,
        additional_scopes: Vec<String>,
    ) -> Result<Option<SignInResult>, SdkError> {
        self.record(SdkCall::SignIn {
            surface: surface.id().to_string(),
            additional_scopes: additional_scopes.clone(),
        });

        if self.hold_sign_ins.load(Ordering::SeqCst) {
            let permit = self
                .sign_in_gate
                .acquire()
                .await
                .map_err(|e| SdkError::unknown(e.to_string()))?;
            permit.forget();
        }

        let mut state = self.state.lock();
        match state.next_sign_in.take() {
            Some(ScriptedOutcome::Error(error)) => return Err(error),
            Some(ScriptedOutcome::Empty) => return Ok(None),
            None => {}
        }

        if state.configuration.is_none() {
            return Err(SdkError::unknown(
                "No active configuration. Make sure a client ID is configured.",
            ));
        }

        let mut user = state.account.clone().ok_or_else(SdkError::canceled)?;
        for scope in DEFAULT_GRANTED_SCOPES
            .iter()
            .map(|s| s.to_string())
            .chain(additional_scopes)
        {
            if !user.granted_scopes.contains(&scope) {
                user.granted_scopes.push(scope);
            }
        }

        state.current_user = Some(user.clone());
        state.keychain = Some(user.clone());
        Ok(Some(SignInResult { user }))
    }

    fn current_user(&self) -> Option<GoogleUser> {
        let mut state = self.state.lock();
        state.calls.push(SdkCall::CurrentUser);
        state.current_user.clone()
    }

    async fn refresh_tokens_if_needed(&self, user: GoogleUser) -> Result<GoogleUser, SdkError> {
        let mut state = self.state.lock();
        state.calls.push(SdkCall::RefreshTokensIfNeeded);

        if let Some(error) = state.next_refresh_error.take() {
            return Err(error);
        }

        let threshold = Utc::now() + Duration::seconds(*REFRESH_THRESHOLD_SECS);
        let needs_refresh = user
            .access_token
            .expiration_date
            .is_none_or(|expires_at| expires_at <= threshold);
        if !needs_refresh {
            return Ok(user);
        }

        let mut user = user;
        user.access_token = Self::fresh_access_token();
        if state
            .current_user
            .as_ref()
            .is_some_and(|current| current.user_id == user.user_id)
        {
            state.current_user = Some(user.clone());
            state.keychain = Some(user.clone());
        }
        Ok(user)
    }

    fn sign_out(&self) {
        let mut state = self.state.lock();
        state.calls.push(SdkCall::SignOut);
        state.current_user = None;
        state.keychain = None;
    }

    fn handle_url(&self, url: &Url) -> bool {
        self.record(SdkCall::HandleUrl(url.clone()));
        url.scheme().starts_with(REDIRECT_SCHEME_PREFIX)
    }
}
