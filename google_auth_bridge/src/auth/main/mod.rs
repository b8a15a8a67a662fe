mod bridge;
mod core;
mod pending;

pub use bridge::GoogleAuth;
pub use pending::AttemptId;
