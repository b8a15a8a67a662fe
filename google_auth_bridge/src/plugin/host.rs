use crate::config::GOOGLE_SERVICE_INFO_PATH;

use super::config::{PluginConfig, ServiceDescriptor};

/// Opaque handle to the host UI context able to present an interactive sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresentationSurface {
    id: String,
}

impl PresentationSurface {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

/// What the bridge reads from the host runtime.
pub trait PluginHost: Send + Sync + 'static {
    /// The plugin's entry in the host application configuration.
    fn plugin_config(&self) -> PluginConfig;

    /// The surface an interactive sign-in is presented on, if the host has one.
    fn presenting_surface(&self) -> Option<PresentationSurface>;

    /// The bundled service descriptor.
    fn service_descriptor(&self) -> Option<ServiceDescriptor> {
        ServiceDescriptor::load_optional(GOOGLE_SERVICE_INFO_PATH.as_str())
    }
}

/// A host described by plain values.
#[derive(Debug, Clone, Default)]
pub struct StaticHost {
    pub config: PluginConfig,
    pub surface: Option<PresentationSurface>,
    pub descriptor: Option<ServiceDescriptor>,
}

impl StaticHost {
    pub fn new(config: PluginConfig) -> Self {
        Self {
            config,
            surface: Some(PresentationSurface::new("root")),
            descriptor: None,
        }
    }

    pub fn without_surface(mut self) -> Self {
        self.surface = None;
        self
    }

    pub fn with_descriptor(mut self, descriptor: ServiceDescriptor) -> Self {
        self.descriptor = Some(descriptor);
        self
    }
}

impl PluginHost for StaticHost {
    fn plugin_config(&self) -> PluginConfig {
        self.config.clone()
    }

    fn presenting_surface(&self) -> Option<PresentationSurface> {
        self.surface.clone()
    }

    fn service_descriptor(&self) -> Option<ServiceDescriptor> {
        self.descriptor.clone()
    }
}
