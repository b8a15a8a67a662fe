mod call;
mod config;
mod errors;
mod host;
mod notification;

pub use call::{CallRejection, CallResponse, PendingCall, PluginCall, UNIMPLEMENTED_CODE};
pub use config::{PluginConfig, ServiceDescriptor};
pub use errors::PluginError;
pub use host::{PluginHost, PresentationSurface, StaticHost};
pub use notification::OpenUrlNotification;
