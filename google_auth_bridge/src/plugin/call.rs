use serde_json::{Map, Value};
use thiserror::Error;
use tokio::sync::oneshot;

/// Rejection delivered to the host when a call fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct CallRejection {
    pub message: String,
    pub code: Option<String>,
}

impl CallRejection {
    pub fn new(message: impl Into<String>, code: Option<String>) -> Self {
        Self {
            message: message.into(),
            code,
        }
    }
}

pub type CallResponse = Result<Map<String, Value>, CallRejection>;

/// Code attached to rejections of methods the bridge does not implement.
pub const UNIMPLEMENTED_CODE: &str = "UNIMPLEMENTED";

/// A single command issued by the host runtime.
///
/// Every resolution method consumes the call, so a call can be answered at
/// most once. A call dropped without an answer is observed by the host as a
/// rejection.
#[derive(Debug)]
pub struct PluginCall {
    callback_id: String,
    method: String,
    options: Map<String, Value>,
    responder: oneshot::Sender<CallResponse>,
}

/// Host-side handle awaiting the answer to a [`PluginCall`].
#[derive(Debug)]
pub struct PendingCall {
    callback_id: String,
    receiver: oneshot::Receiver<CallResponse>,
}

impl PluginCall {
    pub fn new(method: impl Into<String>, options: Map<String, Value>) -> (Self, PendingCall) {
        let (responder, receiver) = oneshot::channel();
        let callback_id = uuid::Uuid::new_v4().to_string();
        let call = Self {
            callback_id: callback_id.clone(),
            method: method.into(),
            options,
            responder,
        };
        (
            call,
            PendingCall {
                callback_id,
                receiver,
            },
        )
    }

    pub fn callback_id(&self) -> &str {
        &self.callback_id
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn get_string(&self, key: &str) -> Option<String> {
        self.options
            .get(key)
            .and_then(Value::as_str)
            .map(str::to_string)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.options.get(key).and_then(Value::as_bool)
    }

    /// Reads a string array. Any non-string element makes the whole value absent.
    pub fn get_string_array(&self, key: &str) -> Option<Vec<String>> {
        string_array(self.options.get(key)?)
    }

    pub fn resolve(self) {
        self.resolve_with(Map::new());
    }

    pub fn resolve_with(self, data: Map<String, Value>) {
        tracing::debug!("Resolving call {} ({})", self.callback_id, self.method);
        self.send(Ok(data));
    }

    pub fn reject(self, message: impl Into<String>, code: Option<String>) {
        let rejection = CallRejection::new(message, code);
        tracing::debug!(
            "Rejecting call {} ({}): {}",
            self.callback_id,
            self.method,
            rejection
        );
        self.send(Err(rejection));
    }

    pub fn unimplemented(self) {
        let message = format!("{} not implemented", self.method);
        self.reject(message, Some(UNIMPLEMENTED_CODE.to_string()));
    }

    fn send(self, response: CallResponse) {
        if self.responder.send(response).is_err() {
            tracing::debug!(
                "Host stopped waiting for call {} ({})",
                self.callback_id,
                self.method
            );
        }
    }
}

impl PendingCall {
    pub fn callback_id(&self) -> &str {
        &self.callback_id
    }

    pub async fn response(self) -> CallResponse {
        self.receiver.await.unwrap_or_else(|_| {
            Err(CallRejection::new(
                "Call was dropped without a response",
                None,
            ))
        })
    }
}

pub(crate) fn string_array(value: &Value) -> Option<Vec<String>> {
    value
        .as_array()?
        .iter()
        .map(|v| v.as_str().map(str::to_string))
        .collect()
}
