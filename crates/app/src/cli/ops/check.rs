use clap::Args;

use common::prelude::{AccessRequest, ContainerId, Operation, PublicKey, Role};
use eacl_changer::api::ApiError;
use eacl_changer::submit::{fetch_policy, SubmitError};

/// Evaluate a request against a container's current extended ACL
#[derive(Args, Debug, Clone)]
pub struct Check {
    /// Container to read the table of
    #[arg(long)]
    pub container_id: ContainerId,

    /// Hex public key of the requester
    #[arg(long)]
    pub sender: PublicKey,

    /// Role of the requester (user, system, others)
    #[arg(long, default_value = "others")]
    pub role: Role,

    /// Requested operation
    #[arg(long, default_value = "GET")]
    pub operation: Operation,

    /// Object attribute as KEY=VALUE, repeatable
    #[arg(long = "attribute", value_parser = parse_key_val)]
    pub attributes: Vec<(String, String)>,

    /// Request header as KEY=VALUE, repeatable
    #[arg(long = "header", value_parser = parse_key_val)]
    pub headers: Vec<(String, String)>,
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", s))?;
    if key.is_empty() {
        return Err(format!("empty attribute name in '{}'", s));
    }
    Ok((key.to_string(), value.to_string()))
}

#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error("failed to fetch eACL: {0}")]
    Fetch(#[from] SubmitError<ApiError>),
}

impl Check {
    fn access_request(&self) -> AccessRequest {
        let request = AccessRequest::new(self.operation, self.sender, self.role);
        let request = self
            .attributes
            .iter()
            .fold(request, |request, (key, value)| {
                request.with_object_attribute(key.clone(), value.clone())
            });
        self.headers.iter().fold(request, |request, (key, value)| {
            request.with_request_header(key.clone(), value.clone())
        })
    }
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Check {
    type Error = CheckError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let signed = fetch_policy(&ctx.client, &self.container_id, Some(ctx.timeout)).await?;
        let request = self.access_request();

        Ok(match signed.table.matching_record(&request) {
            Some((index, record)) => format!("{} (record {}: {})", record.action, index, record),
            None => "no matching record, the container's basic ACL applies".to_string(),
        })
    }
}
