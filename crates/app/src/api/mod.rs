use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use url::Url;

mod client;
mod error;
pub mod v0;

pub use client::ApiClient;
pub use error::ApiError;

/// A request the storage node API understands.
///
/// Each request type knows its own route and method; [`ApiClient::call`]
/// sends it and decodes the JSON response.
pub trait ApiRequest {
    type Response: DeserializeOwned;

    fn build_request(self, base_url: &Url, client: &Client) -> Result<RequestBuilder, ApiError>;
}
