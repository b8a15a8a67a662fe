use serde_json::Value;
use url::Url;

/// Payload the host delivers when the app is activated through an external URL.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OpenUrlNotification {
    object: Option<Value>,
}

impl OpenUrlNotification {
    pub fn new(object: Option<Value>) -> Self {
        Self { object }
    }

    pub fn with_url(url: &Url) -> Self {
        Self::new(Some(serde_json::json!({ "url": url.as_str() })))
    }

    /// Extracts the activation URL. `None` when the payload is not an object,
    /// has no string `url` entry, or the entry does not parse.
    pub fn url(&self) -> Option<Url> {
        let raw = self.object.as_ref()?.as_object()?.get("url")?.as_str()?;
        match Url::parse(raw) {
            Ok(url) => Some(url),
            Err(e) => {
                tracing::debug!("Unparsable url in open-url notification: {}", e);
                None
            }
        }
    }
}
