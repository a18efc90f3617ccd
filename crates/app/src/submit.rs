//! Pushing a table to the policy store and reading it back.
//!
//! Submission is a single call: the table is validated and signed locally,
//! then handed whole to the store. There is no retry; a failed call leaves
//! nothing applied and the caller decides what to do next.

use std::time::Duration;

use common::prelude::{ContainerId, EaclError, SecretKey, SignedTable, Table};

/// The remote side that owns the durable copy of a container's table.
#[async_trait::async_trait]
pub trait EaclStore: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    async fn set_eacl(&self, table: SignedTable) -> Result<(), Self::Error>;

    async fn get_eacl(&self, container_id: &ContainerId) -> Result<SignedTable, Self::Error>;
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError<E: std::error::Error + 'static> {
    #[error("invalid table: {0}")]
    Invalid(#[from] EaclError),
    #[error(transparent)]
    Store(E),
    #[error("policy store did not answer within {0:?}")]
    DeadlineElapsed(Duration),
    #[error("store returned the table of container {actual}, expected {expected}")]
    ContainerMismatch {
        expected: ContainerId,
        actual: ContainerId,
    },
}

/// Validate, sign with `signer` and submit `table` in one call to `store`.
///
/// When `deadline` is set the call is abandoned once it elapses.
pub async fn submit_policy<S>(
    store: &S,
    table: &Table,
    signer: &SecretKey,
    deadline: Option<Duration>,
) -> Result<(), SubmitError<S::Error>>
where
    S: EaclStore + ?Sized,
{
    table.validate()?;
    let signed = table.clone().sign(signer)?;

    tracing::info!(
        "submitting {} record(s) for container {} signed by {}",
        table.records().len(),
        table.container_id(),
        signer.public()
    );

    let call = store.set_eacl(signed);
    let result = match deadline {
        Some(limit) => tokio::time::timeout(limit, call)
            .await
            .map_err(|_| SubmitError::DeadlineElapsed(limit))?,
        None => call.await,
    };

    result.map_err(SubmitError::Store)
}

/// Fetch the table of `container_id` and check it is signed and belongs to it.
pub async fn fetch_policy<S>(
    store: &S,
    container_id: &ContainerId,
    deadline: Option<Duration>,
) -> Result<SignedTable, SubmitError<S::Error>>
where
    S: EaclStore + ?Sized,
{
    let call = store.get_eacl(container_id);
    let signed = match deadline {
        Some(limit) => tokio::time::timeout(limit, call)
            .await
            .map_err(|_| SubmitError::DeadlineElapsed(limit))?,
        None => call.await,
    }
    .map_err(SubmitError::Store)?;

    signed.verify()?;
    if signed.table.container_id() != container_id {
        return Err(SubmitError::ContainerMismatch {
            expected: *container_id,
            actual: *signed.table.container_id(),
        });
    }

    tracing::debug!(
        "fetched {} record(s) for container {}",
        signed.table.records().len(),
        container_id
    );
    Ok(signed)
}
