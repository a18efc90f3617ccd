use std::time::Duration;

use reqwest::{header::HeaderMap, header::HeaderValue, Client, StatusCode};
use url::Url;

use common::prelude::{ContainerId, SignedTable};

use super::error::ApiError;
use super::v0::eacl::{GetEaclRequest, SetEaclRequest, SetEaclResponse};
use super::ApiRequest;
use crate::submit::EaclStore;

#[derive(Debug, Clone)]
pub struct ApiClient {
    pub remote: Url,
    client: Client,
}

impl ApiClient {
    pub fn new(remote: &Url, timeout: Duration) -> Result<Self, ApiError> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert("Content-Type", HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .default_headers(default_headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            remote: remote.clone(),
            client,
        })
    }

    pub async fn call<T: ApiRequest>(&self, request: T) -> Result<T::Response, ApiError> {
        let request_builder = request.build_request(&self.remote, &self.client)?;
        let response = request_builder.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response.json::<T::Response>().await?);
        }

        let body = response.text().await?;
        tracing::debug!("API call failed with {}: {}", status, body);
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(ApiError::Unauthorized(status, body))
            }
            _ => Err(ApiError::HttpStatus(status, body)),
        }
    }
}

#[async_trait::async_trait]
impl EaclStore for ApiClient {
    type Error = ApiError;

    async fn set_eacl(&self, table: SignedTable) -> Result<(), Self::Error> {
        let container_id = *table.table.container_id();
        let response: SetEaclResponse = self.call(SetEaclRequest(table)).await?;
        tracing::info!(
            "storage node accepted {} record(s) for container {}",
            response.records,
            container_id
        );
        Ok(())
    }

    async fn get_eacl(&self, container_id: &ContainerId) -> Result<SignedTable, Self::Error> {
        self.call(GetEaclRequest {
            container_id: *container_id,
        })
        .await
    }
}
