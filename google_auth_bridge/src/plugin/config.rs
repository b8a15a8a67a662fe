use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

use super::call::string_array;
use super::errors::PluginError;

/// The plugin's entry in the host application configuration.
///
/// Values are read loosely: a key holding the wrong type reads as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PluginConfig {
    values: Map<String, Value>,
}

impl PluginConfig {
    pub fn new(values: Map<String, Value>) -> Self {
        Self { values }
    }

    /// Builds a config from a JSON value; anything but an object yields an empty config.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Object(values) => Self { values },
            _ => Self::default(),
        }
    }

    pub fn get_string(&self, key: &str) -> Option<String> {
        self.values
            .get(key)
            .and_then(Value::as_str)
            .map(str::to_string)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.values.get(key).and_then(Value::as_bool)
    }

    pub fn get_string_array(&self, key: &str) -> Option<Vec<String>> {
        string_array(self.values.get(key)?)
    }

    pub fn ios_client_id(&self) -> Option<String> {
        self.get_string("iosClientId")
    }

    pub fn client_id(&self) -> Option<String> {
        self.get_string("clientId")
    }

    pub fn server_client_id(&self) -> Option<String> {
        self.get_string("serverClientId")
    }

    pub fn scopes(&self) -> Option<Vec<String>> {
        self.get_string_array("scopes")
    }

    pub fn force_code_for_refresh_token(&self) -> Option<bool> {
        self.get_bool("forceCodeForRefreshToken")
    }
}

/// The bundled service descriptor. Only `CLIENT_ID` is consumed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ServiceDescriptor {
    #[serde(rename = "CLIENT_ID")]
    pub client_id: Option<String>,
}

impl ServiceDescriptor {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PluginError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Loads the descriptor, treating a missing or unreadable file as absent.
    pub fn load_optional(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(descriptor) => Some(descriptor),
            Err(e) => {
                tracing::debug!("No service descriptor at {}: {}", path.display(), e);
                None
            }
        }
    }
}
