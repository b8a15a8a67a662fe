pub mod test_bridge;

pub use fixtures::*;
pub use test_bridge::TestBridge;
