use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum PluginError {
    #[error("Io error: {0}")]
    Io(String),

    #[error("Serde error: {0}")]
    Serde(String),
}

impl From<std::io::Error> for PluginError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for PluginError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}
