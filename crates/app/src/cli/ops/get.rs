use clap::Args;

use common::prelude::ContainerId;
use eacl_changer::api::ApiError;
use eacl_changer::submit::{fetch_policy, SubmitError};

/// Fetch and verify a container's extended ACL
#[derive(Args, Debug, Clone)]
pub struct Get {
    /// Container to read the table of
    #[arg(long)]
    pub container_id: ContainerId,

    /// Print the signed table as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum GetError {
    #[error("failed to fetch eACL: {0}")]
    Fetch(#[from] SubmitError<ApiError>),
    #[error("failed to encode table: {0}")]
    Encode(#[from] serde_json::Error),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Get {
    type Error = GetError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let signed = fetch_policy(&ctx.client, &self.container_id, Some(ctx.timeout)).await?;

        if self.json {
            return Ok(serde_json::to_string_pretty(&signed)?);
        }

        let mut lines = vec![
            format!("eACL for container {}", signed.table.container_id()),
            format!("signed by {}", signed.public_key),
        ];
        if signed.table.records().is_empty() {
            lines.push("  (no records)".to_string());
        }
        for (index, record) in signed.table.records().iter().enumerate() {
            lines.push(format!("  {}: {}", index, record));
        }
        Ok(lines.join("\n"))
    }
}
