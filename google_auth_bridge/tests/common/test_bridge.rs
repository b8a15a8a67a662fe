use google_auth_bridge::{
    CallResponse, GoogleAuth, InMemoryIdentitySdk, PendingCall, PluginCall, PluginConfig,
    SdkCall, SessionState, StaticHost,
};
use serde_json::{Value, json};
use std::sync::{Arc, LazyLock};

use super::fixtures::options;

/// Loads test-specific settings from .env_test once per test binary
static ENV_INIT: LazyLock<()> = LazyLock::new(|| {
    if let Err(e) = dotenvy::from_filename(".env_test") {
        eprintln!("No .env_test loaded, using process environment: {e}");
    }
});

/// A bridge wired to an in-memory SDK the test can script and inspect
pub struct TestBridge {
    pub bridge: GoogleAuth,
    pub sdk: Arc<InMemoryIdentitySdk>,
}

impl TestBridge {
    pub fn new(host: StaticHost) -> Self {
        LazyLock::force(&ENV_INIT);
        let sdk = Arc::new(InMemoryIdentitySdk::new());
        let bridge = GoogleAuth::load(sdk.clone(), Arc::new(host));
        Self { bridge, sdk }
    }

    /// A bridge whose plugin config is `config` and which has a presentation surface
    pub fn with_config(config: Value) -> Self {
        Self::new(StaticHost::new(PluginConfig::from_json(config)))
    }

    /// A bridge already initialized with client id "X"
    pub async fn initialized() -> Self {
        let test = Self::with_config(json!({}));
        test.invoke("initialize", json!({ "clientId": "X" }))
            .await
            .expect("initialize never rejects");
        test
    }

    /// Issues a call without waiting for its answer
    pub fn start(&self, method: &str, call_options: Value) -> PendingCall {
        let (call, pending) = PluginCall::new(method, options(call_options));
        self.bridge.call(call);
        pending
    }

    pub async fn invoke(&self, method: &str, call_options: Value) -> CallResponse {
        self.start(method, call_options).response().await
    }

    /// Waits until the main queue has processed everything queued before it
    pub async fn barrier(&self) {
        let _ = self.invoke("initialize", json!({})).await;
    }

    /// Waits until the SDK has seen `count` interactive sign-ins
    pub async fn wait_for_sdk_sign_ins(&self, count: usize) {
        let sdk = self.sdk.clone();
        let seen = async move {
            loop {
                let started = sdk
                    .calls()
                    .iter()
                    .filter(|call| matches!(call, SdkCall::SignIn { .. }))
                    .count();
                if started >= count {
                    break;
                }
                tokio::task::yield_now().await;
            }
        };
        tokio::time::timeout(std::time::Duration::from_secs(5), seen)
            .await
            .expect("sign-ins started within timeout");
    }

    pub async fn wait_for_state(&self, expected: SessionState) {
        let mut receiver = self.bridge.subscribe();
        tokio::time::timeout(
            std::time::Duration::from_secs(5),
            receiver.wait_for(|state| *state == expected),
        )
        .await
        .expect("state change within timeout")
        .expect("bridge still running");
    }
}
