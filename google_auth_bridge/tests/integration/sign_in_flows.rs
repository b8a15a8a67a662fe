use google_auth_bridge::{AuthResult, PluginConfig, SdkCall, SdkError, SessionState, StaticHost};
use serde_json::{Value, json};

use crate::common::{TestBridge, TestUsers};

#[tokio::test]
async fn test_interactive_sign_in_normalizes_user() {
    let test = TestBridge::initialized().await;
    test.sdk.set_account(Some(TestUsers::without_family_name()));

    let response = test
        .invoke("signIn", json!({}))
        .await
        .expect("sign-in succeeds");

    assert_eq!(response.get("email"), Some(&json!("a@b.com")));
    assert_eq!(response.get("familyName"), Some(&Value::Null));
    assert_eq!(response.get("givenName"), Some(&json!("Ada")));
    assert_eq!(response.get("id"), Some(&json!("100000000000000000001")));
    assert!(!response.contains_key("imageUrl"));
    assert_eq!(
        response.get("authentication"),
        Some(&json!({
            "accessToken": "ya29.a0-first",
            "idToken": "eyJhbGciOiJSUzI1NiJ9.first.sig",
            "refreshToken": null
        }))
    );
    assert_eq!(test.bridge.state(), SessionState::SignedIn);
}

#[tokio::test]
async fn test_sign_in_includes_profile_image() {
    let test = TestBridge::initialized().await;
    test.sdk.set_account(Some(TestUsers::complete()));

    let response = test
        .invoke("signIn", json!({}))
        .await
        .expect("sign-in succeeds");
    let result: AuthResult =
        serde_json::from_value(Value::Object(response)).expect("response parses");

    assert_eq!(result.family_name.as_deref(), Some("Hopper"));
    assert_eq!(
        result.image_url.as_deref(),
        Some("https://lh3.googleusercontent.com/a/grace=s100")
    );
}

#[tokio::test]
async fn test_previous_session_is_restored_silently() {
    let test = TestBridge::initialized().await;
    test.sdk.seed_previous_sign_in(TestUsers::complete());

    let response = test
        .invoke("signIn", json!({}))
        .await
        .expect("restoration succeeds");

    assert_eq!(response.get("email"), Some(&json!("grace@example.com")));
    let calls = test.sdk.calls();
    let restore_at = calls
        .iter()
        .position(|c| *c == SdkCall::RestorePreviousSignIn)
        .expect("restoration attempted");
    let has_previous_at = calls
        .iter()
        .position(|c| *c == SdkCall::HasPreviousSignIn)
        .expect("previous session checked");
    assert!(has_previous_at < restore_at);
    assert!(!calls.iter().any(|c| matches!(c, SdkCall::SignIn { .. })));
}

#[tokio::test]
async fn test_forced_auth_code_skips_restoration() {
    let test = TestBridge::with_config(json!({ "forceCodeForRefreshToken": true }));
    test.invoke("initialize", json!({ "clientId": "X" }))
        .await
        .expect("initialize resolves");
    test.sdk.seed_previous_sign_in(TestUsers::complete());
    test.sdk.set_account(Some(TestUsers::without_family_name()));

    let response = test
        .invoke("signIn", json!({}))
        .await
        .expect("interactive sign-in succeeds");

    assert_eq!(response.get("email"), Some(&json!("a@b.com")));
    assert!(!test.sdk.calls().contains(&SdkCall::RestorePreviousSignIn));
}

#[tokio::test]
async fn test_restoration_error_rejects_with_message_only() {
    let test = TestBridge::initialized().await;
    test.sdk.seed_previous_sign_in(TestUsers::complete());
    test.sdk.fail_next_restore(SdkError::new(-2, "A keychain error occurred."));

    let rejection = test
        .invoke("signIn", json!({}))
        .await
        .expect_err("restoration fails");

    assert_eq!(rejection.message, "A keychain error occurred.");
    assert_eq!(rejection.code, None);
    assert_eq!(test.bridge.state(), SessionState::SignedOut);
}

#[tokio::test]
async fn test_failed_sign_in_keeps_existing_session() {
    let test = TestBridge::initialized().await;
    test.sdk.set_account(Some(TestUsers::complete()));
    test.invoke("signIn", json!({}))
        .await
        .expect("first sign-in succeeds");
    test.sdk.fail_next_restore(SdkError::new(-2, "A keychain error occurred."));

    let rejection = test
        .invoke("signIn", json!({}))
        .await
        .expect_err("second sign-in fails");
    assert_eq!(rejection.message, "A keychain error occurred.");
    assert_eq!(test.bridge.state(), SessionState::SignedIn);

    let refreshed = test
        .invoke("refresh", json!({}))
        .await
        .expect("session is still usable");
    assert_eq!(refreshed.get("accessToken"), Some(&json!("ya29.a0-second")));
}

#[tokio::test]
async fn test_restoration_without_user_rejects() {
    let test = TestBridge::initialized().await;
    test.sdk.seed_previous_sign_in(TestUsers::complete());
    test.sdk.return_nothing_on_next_restore();

    let rejection = test
        .invoke("signIn", json!({}))
        .await
        .expect_err("no user means rejection");

    assert_eq!(rejection.message, "No user returned");
}

#[tokio::test]
async fn test_missing_presentation_surface_rejects_before_sdk() {
    let test = TestBridge::new(StaticHost::new(PluginConfig::default()).without_surface());
    test.invoke("initialize", json!({ "clientId": "X" }))
        .await
        .expect("initialize resolves");
    test.sdk.set_account(Some(TestUsers::complete()));

    let rejection = test
        .invoke("signIn", json!({}))
        .await
        .expect_err("no surface means rejection");

    assert_eq!(rejection.message, "Unable to access presenting view controller");
    assert!(!test.sdk.calls().iter().any(|c| matches!(c, SdkCall::SignIn { .. })));
}

#[tokio::test]
async fn test_interactive_failure_carries_code() {
    let test = TestBridge::initialized().await;

    let rejection = test
        .invoke("signIn", json!({}))
        .await
        .expect_err("no account picked means cancel");

    assert_eq!(rejection.message, "The user canceled the sign-in flow.");
    assert_eq!(rejection.code.as_deref(), Some("-5"));
}

#[tokio::test]
async fn test_interactive_without_result_rejects() {
    let test = TestBridge::initialized().await;
    test.sdk.return_nothing_on_next_sign_in();

    let rejection = test
        .invoke("signIn", json!({}))
        .await
        .expect_err("no result means rejection");

    assert_eq!(rejection.message, "No sign-in result returned");
}

#[tokio::test]
async fn test_sign_in_before_initialize_fails_in_sdk() {
    let test = TestBridge::with_config(json!({}));
    test.sdk.set_account(Some(TestUsers::complete()));

    let rejection = test
        .invoke("signIn", json!({}))
        .await
        .expect_err("unconfigured sdk rejects");

    assert_eq!(rejection.code.as_deref(), Some("-1"));
}

#[tokio::test]
async fn test_newer_sign_in_supersedes_pending_one() {
    let test = TestBridge::initialized().await;
    test.sdk.set_account(Some(TestUsers::without_family_name()));
    test.sdk.hold_sign_ins();

    let first = test.start("signIn", json!({}));
    let second = test.start("signIn", json!({}));

    let rejection = first
        .response()
        .await
        .expect_err("first attempt is superseded");
    assert_eq!(rejection.message, "Sign-in superseded by a newer request");

    test.sdk.release_sign_ins(2);
    let response = second.response().await.expect("second attempt resolves");
    assert_eq!(response.get("email"), Some(&json!("a@b.com")));
    assert_eq!(test.bridge.state(), SessionState::SignedIn);
}

#[tokio::test]
async fn test_stale_completion_does_not_resolve_newer_attempt() {
    let test = TestBridge::initialized().await;
    test.sdk.set_account(Some(TestUsers::complete()));
    test.sdk.hold_sign_ins();

    let first = test.start("signIn", json!({}));
    test.wait_for_sdk_sign_ins(1).await;
    let second = test.start("signIn", json!({}));
    test.wait_for_sdk_sign_ins(2).await;
    assert!(first.response().await.is_err());

    // Held sign-ins complete in arrival order: the first, stale attempt fails.
    test.sdk.fail_next_sign_in(SdkError::canceled());
    test.sdk.release_sign_ins(1);
    test.barrier().await;
    assert_eq!(test.bridge.state(), SessionState::SignInPending);

    test.sdk.release_sign_ins(1);
    let response = second
        .response()
        .await
        .expect("newer attempt resolves with its own outcome");
    assert_eq!(response.get("email"), Some(&json!("grace@example.com")));
    assert_eq!(test.bridge.state(), SessionState::SignedIn);
}
