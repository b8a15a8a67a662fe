mod error;
mod plugin;
mod router;

pub use error::IntoResponseError;
pub use router::google_auth_router;

// Re-export the bridge types a host needs to build a router
pub use google_auth_bridge::{GoogleAuth, InMemoryIdentitySdk, PluginConfig, StaticHost};
