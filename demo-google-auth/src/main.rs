use axum::Router;
use chrono::{Duration, Utc};
use dotenvy::dotenv;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

use google_auth_bridge::{GoogleUser, ProfileData, SdkToken};
use google_auth_bridge_axum::{
    GoogleAuth, InMemoryIdentitySdk, PluginConfig, StaticHost, google_auth_router,
};

mod server;

use crate::server::spawn_http_server;

/// The account the in-memory SDK signs in when the interactive flow runs.
fn demo_account() -> Result<GoogleUser, url::ParseError> {
    Ok(GoogleUser {
        user_id: Some("100000000000000000042".to_string()),
        access_token: SdkToken::new("ya29.demo-access", Some(Utc::now() + Duration::hours(1))),
        id_token: Some(SdkToken::new("eyJhbGciOiJSUzI1NiJ9.demo.sig", None)),
        profile: Some(ProfileData {
            email: Some("demo@example.com".to_string()),
            name: Some("Demo User".to_string()),
            given_name: Some("Demo".to_string()),
            family_name: None,
            image_url: Some(Url::parse("https://lh3.googleusercontent.com/a/demo")?),
        }),
        granted_scopes: vec![],
    })
}

fn plugin_config_from_env() -> Result<PluginConfig, serde_json::Error> {
    match std::env::var("GOOGLE_AUTH_PLUGIN_CONFIG") {
        Ok(raw) => Ok(PluginConfig::from_json(serde_json::from_str(&raw)?)),
        Err(_) => Ok(PluginConfig::default()),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "{}=debug,google_auth_bridge=debug,google_auth_bridge_axum=debug",
                    env!("CARGO_CRATE_NAME")
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let sdk = Arc::new(InMemoryIdentitySdk::new());
    sdk.set_account(Some(demo_account()?));

    let host = StaticHost::new(plugin_config_from_env()?);
    let bridge = GoogleAuth::load(sdk, Arc::new(host));

    let app = Router::new().nest("/google-auth", google_auth_router(bridge));

    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3001);

    spawn_http_server(port, app).await??;
    Ok(())
}
