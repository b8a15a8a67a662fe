use google_auth_bridge::{IdentitySdk, SdkCall, SessionState};
use serde_json::json;

use crate::common::{TestBridge, TestUsers};

#[tokio::test]
async fn test_sign_out_twice_resolves_both_times() {
    let test = TestBridge::initialized().await;
    test.sdk.set_account(Some(TestUsers::complete()));
    test.invoke("signIn", json!({}))
        .await
        .expect("sign-in succeeds");

    let first = test.invoke("signOut", json!({})).await.expect("resolves");
    test.wait_for_state(SessionState::SignedOut).await;
    let second = test.invoke("signOut", json!({})).await.expect("resolves");
    test.barrier().await;

    assert!(first.is_empty());
    assert!(second.is_empty());
    assert_eq!(test.bridge.state(), SessionState::SignedOut);
    assert!(!test.sdk.has_previous_sign_in());
    assert_eq!(test.sdk.current_user(), None);
}

#[tokio::test]
async fn test_refresh_after_sign_out_rejects() {
    let test = TestBridge::initialized().await;
    test.sdk.set_account(Some(TestUsers::complete()));
    test.invoke("signIn", json!({}))
        .await
        .expect("sign-in succeeds");

    test.invoke("signOut", json!({})).await.expect("resolves");
    let rejection = test
        .invoke("refresh", json!({}))
        .await
        .expect_err("no session after sign-out");

    assert_eq!(rejection.message, "User not logged in.");
}

#[tokio::test]
async fn test_sign_out_without_configuration_resolves() {
    let test = TestBridge::with_config(json!({}));

    test.invoke("signOut", json!({})).await.expect("resolves");
    test.barrier().await;

    assert_eq!(test.bridge.state(), SessionState::Unconfigured);
    assert!(test.sdk.calls().contains(&SdkCall::SignOut));
}

#[tokio::test]
async fn test_sign_in_after_sign_out_is_interactive() {
    let test = TestBridge::initialized().await;
    test.sdk.set_account(Some(TestUsers::complete()));
    test.invoke("signIn", json!({}))
        .await
        .expect("sign-in succeeds");
    test.invoke("signOut", json!({})).await.expect("resolves");

    test.invoke("signIn", json!({}))
        .await
        .expect("second sign-in succeeds");

    let sign_ins = test
        .sdk
        .calls()
        .iter()
        .filter(|c| matches!(c, SdkCall::SignIn { .. }))
        .count();
    assert_eq!(sign_ins, 2);
    assert!(!test.sdk.calls().contains(&SdkCall::RestorePreviousSignIn));
}
