mod errors;
mod memory;
mod types;

pub use errors::{SdkError, codes};
pub use memory::{InMemoryIdentitySdk, SdkCall};
pub use types::{GoogleUser, IdentitySdk, ProfileData, SdkConfiguration, SdkToken, SignInResult};
