// Library exports shared by the CLI binary and integration tests

/// Storage node API client and request types
pub mod api;
/// Unlocking signing keys from wallet files
pub mod credentials;
/// Config directory and config file
pub mod state;
/// Policy submission and retrieval over an [`submit::EaclStore`]
pub mod submit;

pub use api::{ApiClient, ApiError};
pub use submit::{fetch_policy, submit_policy, EaclStore, SubmitError};
