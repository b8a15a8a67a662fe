use crate::plugin::{PluginCall, PluginConfig, PluginHost};
use crate::sdk::SdkConfiguration;

/// Scopes every sign-in is granted without asking.
pub const DEFAULT_GRANTED_SCOPES: [&str; 3] = ["email", "profile", "openid"];

/// Configuration established by `initialize` and handed to each later operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthConfig {
    pub client_id: String,
    pub server_client_id: Option<String>,
    pub scopes: Vec<String>,
    /// Requested scopes outside [`DEFAULT_GRANTED_SCOPES`]; asked for on interactive sign-in.
    pub additional_scopes: Vec<String>,
    /// Skip silent restoration so the SDK issues a fresh auth code.
    pub force_auth_code: bool,
}

impl AuthConfig {
    /// Resolves the configuration for an `initialize` call.
    ///
    /// Call options win over the plugin configuration. Returns `None` when no
    /// client id can be found anywhere.
    pub fn resolve(call: &PluginCall, host: &dyn PluginHost) -> Option<Self> {
        let plugin_config = host.plugin_config();
        let client_id = call
            .get_string("clientId")
            .or_else(|| client_id_from_host(&plugin_config, host))?;

        let scopes = call
            .get_string_array("scopes")
            .or_else(|| plugin_config.scopes())
            .unwrap_or_default();

        let force_auth_code = call
            .get_bool("grantOfflineAccess")
            .or_else(|| plugin_config.force_code_for_refresh_token())
            .unwrap_or(false);

        Some(Self {
            client_id,
            server_client_id: plugin_config.server_client_id(),
            additional_scopes: additional_scopes(&scopes),
            scopes,
            force_auth_code,
        })
    }

    pub fn sdk_configuration(&self) -> SdkConfiguration {
        SdkConfiguration {
            client_id: self.client_id.clone(),
            server_client_id: self.server_client_id.clone(),
        }
    }
}

fn client_id_from_host(config: &PluginConfig, host: &dyn PluginHost) -> Option<String> {
    config
        .ios_client_id()
        .or_else(|| config.client_id())
        .or_else(|| host.service_descriptor().and_then(|d| d.client_id))
}

/// `scopes` minus the default grant, order preserved.
pub fn additional_scopes(scopes: &[String]) -> Vec<String> {
    scopes
        .iter()
        .filter(|scope| !DEFAULT_GRANTED_SCOPES.contains(&scope.as_str()))
        .cloned()
        .collect()
}
