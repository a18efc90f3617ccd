use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use url::Url;

use common::prelude::{ContainerId, SignedTable};

use crate::api::{ApiError, ApiRequest};

fn eacl_url(base_url: &Url, container_id: &ContainerId) -> Result<Url, ApiError> {
    Ok(base_url.join(&format!("/api/v0/container/{}/eacl", container_id))?)
}

/// Replace the extended ACL of the table's container.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SetEaclRequest(pub SignedTable);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetEaclResponse {
    pub container_id: ContainerId,
    pub records: usize,
}

impl ApiRequest for SetEaclRequest {
    type Response = SetEaclResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> Result<RequestBuilder, ApiError> {
        let full_url = eacl_url(base_url, self.0.table.container_id())?;
        Ok(client.put(full_url).json(&self))
    }
}

/// Fetch the extended ACL currently attached to a container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetEaclRequest {
    pub container_id: ContainerId,
}

impl ApiRequest for GetEaclRequest {
    type Response = SignedTable;

    fn build_request(self, base_url: &Url, client: &Client) -> Result<RequestBuilder, ApiError> {
        Ok(client.get(eacl_url(base_url, &self.container_id)?))
    }
}
