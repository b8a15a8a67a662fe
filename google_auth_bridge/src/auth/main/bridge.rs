use std::sync::Arc;
use tokio::sync::{mpsc, watch};

use crate::auth::errors::GoogleAuthError;
use crate::auth::types::SessionState;
use crate::plugin::{OpenUrlNotification, PluginCall, PluginHost};
use crate::sdk::IdentitySdk;

use super::core::{Command, MainQueue};

/// Host-facing handle of the Google Sign-In bridge.
///
/// Every entry point returns immediately; the answer is delivered later
/// through the [`PluginCall`]. Clones share the same main queue, which stops
/// once the last clone is dropped.
#[derive(Debug, Clone)]
pub struct GoogleAuth {
    commands: mpsc::UnboundedSender<Command>,
    state: watch::Receiver<SessionState>,
}

impl GoogleAuth {
    /// Starts the main queue. Must be called from within a Tokio runtime.
    pub fn load(sdk: Arc<dyn IdentitySdk>, host: Arc<dyn PluginHost>) -> Self {
        let (commands_tx, commands_rx) = mpsc::unbounded_channel();
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(SessionState::Unconfigured);

        let queue = MainQueue::new(sdk, host, state_tx, completions_tx);
        tokio::spawn(queue.run(commands_rx, completions_rx));

        Self {
            commands: commands_tx,
            state: state_rx,
        }
    }

    /// Dispatches a host call by method name.
    pub fn call(&self, call: PluginCall) {
        match call.method() {
            "initialize" => self.initialize(call),
            "signIn" => self.sign_in(call),
            "refresh" => self.refresh(call),
            "signOut" => self.sign_out(call),
            method => {
                tracing::warn!("Unknown plugin method: {}", method);
                call.unimplemented();
            }
        }
    }

    /// Resolves the configuration and hands it to the SDK. Never rejects.
    pub fn initialize(&self, call: PluginCall) {
        if let Err(mpsc::error::SendError(command)) = self.commands.send(Command::Initialize(call))
        {
            tracing::error!("Main queue is gone; initialize resolves without effect");
            if let Command::Initialize(call) = command {
                call.resolve();
            }
        }
    }

    pub fn sign_in(&self, call: PluginCall) {
        self.enqueue(Command::SignIn(call));
    }

    pub fn refresh(&self, call: PluginCall) {
        self.enqueue(Command::Refresh(call));
    }

    /// Clears the SDK session. Always resolves, before the SDK sign-out runs.
    pub fn sign_out(&self, call: PluginCall) {
        if self.commands.send(Command::SignOut).is_err() {
            tracing::error!("Main queue is gone; sign-out not forwarded");
        }
        call.resolve();
    }

    /// Forwards an activation URL to the SDK. Payloads without a usable URL
    /// are logged and dropped.
    pub fn handle_open_url(&self, notification: &OpenUrlNotification) {
        let Some(url) = notification.url() else {
            tracing::warn!("No URL object in handleOpenUrl");
            return;
        };
        if self.commands.send(Command::OpenUrl(url)).is_err() {
            tracing::error!("Main queue is gone; activation url dropped");
        }
    }

    pub fn state(&self) -> SessionState {
        *self.state.borrow()
    }

    /// Receiver observing every session state change.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.clone()
    }

    fn enqueue(&self, command: Command) {
        if let Err(mpsc::error::SendError(command)) = self.commands.send(command) {
            tracing::error!("Main queue is gone; rejecting call");
            match command {
                Command::SignIn(call) | Command::Refresh(call) | Command::Initialize(call) => {
                    GoogleAuthError::BridgeStopped.reject(call)
                }
                Command::SignOut | Command::OpenUrl(_) => {}
            }
        }
    }
}
