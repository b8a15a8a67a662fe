use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use url::Url;

use crate::auth::config::AuthConfig;
use crate::auth::errors::GoogleAuthError;
use crate::auth::types::{AuthResult, RefreshResult, SessionState, into_response};
use crate::config::PROFILE_IMAGE_DIMENSION;
use crate::plugin::{PluginCall, PluginHost};
use crate::sdk::{GoogleUser, IdentitySdk};

use super::pending::{AttemptId, PendingSignIn};

/// Work posted to the main queue.
#[derive(Debug)]
pub(super) enum Command {
    Initialize(PluginCall),
    SignIn(PluginCall),
    Refresh(PluginCall),
    SignOut,
    OpenUrl(Url),
}

/// Outcome of an SDK sign-in future, posted back to the main queue.
#[derive(Debug)]
pub(super) struct SignInCompletion {
    attempt: AttemptId,
    outcome: Result<GoogleUser, GoogleAuthError>,
}

/// How a sign-in attempt reaches the SDK.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum SignInRoute {
    Restore,
    Interactive { additional_scopes: Vec<String> },
}

/// Silent restoration is tried first unless auth codes are forced.
pub(super) fn sign_in_route(has_previous_sign_in: bool, config: Option<&AuthConfig>) -> SignInRoute {
    let force_auth_code = config.is_some_and(|c| c.force_auth_code);
    if has_previous_sign_in && !force_auth_code {
        return SignInRoute::Restore;
    }
    SignInRoute::Interactive {
        additional_scopes: config
            .map(|c| c.additional_scopes.clone())
            .unwrap_or_default(),
    }
}

/// Owner of the configuration, the pending sign-in slot and every SDK
/// interaction. Runs as a single task; SDK futures run on their own tasks and
/// report back through `completions`.
pub(super) struct MainQueue {
    sdk: Arc<dyn IdentitySdk>,
    host: Arc<dyn PluginHost>,
    config: Option<AuthConfig>,
    pending: PendingSignIn,
    state: watch::Sender<SessionState>,
    completions: mpsc::UnboundedSender<SignInCompletion>,
}

impl MainQueue {
    pub(super) fn new(
        sdk: Arc<dyn IdentitySdk>,
        host: Arc<dyn PluginHost>,
        state: watch::Sender<SessionState>,
        completions: mpsc::UnboundedSender<SignInCompletion>,
    ) -> Self {
        Self {
            sdk,
            host,
            config: None,
            pending: PendingSignIn::default(),
            state,
            completions,
        }
    }

    pub(super) async fn run(
        mut self,
        mut commands: mpsc::UnboundedReceiver<Command>,
        mut completions: mpsc::UnboundedReceiver<SignInCompletion>,
    ) {
        tracing::info!("Google auth main queue started");
        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(command) => self.handle(command),
                    None => break,
                },
                Some(completion) = completions.recv() => self.complete_sign_in(completion),
            }
        }
        tracing::info!("Google auth main queue stopped");
    }

    fn handle(&mut self, command: Command) {
        match command {
            Command::Initialize(call) => self.initialize(call),
            Command::SignIn(call) => self.sign_in(call),
            Command::Refresh(call) => self.refresh(call),
            Command::SignOut => self.sign_out(),
            Command::OpenUrl(url) => self.open_url(&url),
        }
    }

    fn initialize(&mut self, call: PluginCall) {
        match AuthConfig::resolve(&call, self.host.as_ref()) {
            Some(config) => {
                tracing::info!(
                    "Configuring Google Sign-In: client_id={}, additional_scopes={:?}, force_auth_code={}",
                    config.client_id,
                    config.additional_scopes,
                    config.force_auth_code
                );
                self.sdk.set_configuration(config.sdk_configuration());
                self.config = Some(config);
                if *self.state.borrow() == SessionState::Unconfigured {
                    self.set_state(SessionState::Configured);
                }
            }
            None => tracing::warn!("No client ID found in config"),
        }
        call.resolve();
    }

    fn sign_in(&mut self, call: PluginCall) {
        let (attempt, superseded) = self.pending.track(call);
        if let Some(previous) = superseded {
            tracing::debug!("Sign-in {} supersedes an unfinished attempt", attempt);
            GoogleAuthError::Superseded.reject(previous);
        }
        self.set_state(SessionState::SignInPending);

        let route = sign_in_route(self.sdk.has_previous_sign_in(), self.config.as_ref());
        let sdk = self.sdk.clone();
        let completions = self.completions.clone();

        match route {
            SignInRoute::Restore => {
                tracing::debug!("Restoring previous sign-in for attempt {}", attempt);
                tokio::spawn(async move {
                    let outcome = match sdk.restore_previous_sign_in().await {
                        Ok(Some(user)) => Ok(user),
                        Ok(None) => Err(GoogleAuthError::NoUserReturned),
                        Err(e) => Err(GoogleAuthError::from_sdk(e)),
                    };
                    let _ = completions.send(SignInCompletion { attempt, outcome });
                });
            }
            SignInRoute::Interactive { additional_scopes } => {
                let Some(surface) = self.host.presenting_surface() else {
                    self.complete_sign_in(SignInCompletion {
                        attempt,
                        outcome: Err(GoogleAuthError::NoPresentingSurface),
                    });
                    return;
                };
                tracing::debug!(
                    "Starting interactive sign-in for attempt {} on surface {}",
                    attempt,
                    surface.id()
                );
                tokio::spawn(async move {
                    let outcome = match sdk.sign_in(surface, additional_scopes).await {
                        Ok(Some(result)) => Ok(result.user),
                        Ok(None) => Err(GoogleAuthError::NoSignInResult),
                        Err(e) => Err(GoogleAuthError::from_sdk_with_code(e)),
                    };
                    let _ = completions.send(SignInCompletion { attempt, outcome });
                });
            }
        }
    }

    fn complete_sign_in(&mut self, completion: SignInCompletion) {
        let SignInCompletion { attempt, outcome } = completion;
        let Some(call) = self.pending.take(attempt) else {
            tracing::debug!(
                "Discarding completion of stale sign-in {} (current: {:?})",
                attempt,
                self.pending.current()
            );
            return;
        };

        let response = outcome.and_then(|user| {
            into_response(&AuthResult::from_user(&user, *PROFILE_IMAGE_DIMENSION))
        });
        match response {
            Ok(data) => {
                tracing::info!("Sign-in {} succeeded", attempt);
                self.set_state(SessionState::SignedIn);
                call.resolve_with(data);
            }
            Err(e) => {
                tracing::info!("Sign-in {} failed: {}", attempt, e);
                // A failed attempt leaves any session the SDK still holds intact
                let next = if self.sdk.current_user().is_some() {
                    SessionState::SignedIn
                } else {
                    SessionState::SignedOut
                };
                self.set_state(next);
                e.reject(call);
            }
        }
    }

    fn refresh(&self, call: PluginCall) {
        let Some(user) = self.sdk.current_user() else {
            GoogleAuthError::NotSignedIn.reject(call);
            return;
        };

        let sdk = self.sdk.clone();
        tokio::spawn(async move {
            let response = sdk
                .refresh_tokens_if_needed(user)
                .await
                .map_err(GoogleAuthError::from_sdk)
                .and_then(|user| into_response(&RefreshResult::from(&user)));
            match response {
                Ok(data) => call.resolve_with(data),
                Err(e) => e.reject(call),
            }
        });
    }

    fn sign_out(&mut self) {
        self.sdk.sign_out();
        if *self.state.borrow() != SessionState::Unconfigured {
            self.set_state(SessionState::SignedOut);
        }
    }

    fn open_url(&self, url: &Url) {
        let handled = self.sdk.handle_url(url);
        tracing::debug!("Forwarded activation url (handled by SDK: {})", handled);
    }

    fn set_state(&self, next: SessionState) {
        let previous = self.state.send_replace(next);
        if previous != next {
            tracing::debug!("Session state: {} -> {}", previous, next);
        }
    }
}
