//! # Extended ACL
//!
//! An extended ACL is an ordered table of [`Record`]s attached to a container.
//! Each record carries:
//! - an [`Action`] (allow or deny)
//! - the [`Operation`] it governs
//! - [`Filter`]s over object or request headers, combined with AND
//! - target [`Principal`]s (explicit keys or a [`Role`]), combined with OR
//!
//! ## Evaluation
//!
//! [`Table::evaluate`] walks the records in order and returns the action of the
//! first one that matches. When nothing matches the table is silent and the
//! storage node falls back to the container's basic ACL.
//!
//! Because of first-match-wins, narrow allow records have to come before the
//! catch-all deny records that would otherwise hide them. [`Table::validate`]
//! checks exactly that.

mod filter;
mod record;
mod request;
mod table;
mod types;

pub use filter::{Filter, ATTRIBUTE_FILE_NAME};
pub use record::{Principal, Record};
pub use request::AccessRequest;
pub use table::{SignedTable, Table};
pub use types::{Action, HeaderType, MatchType, Operation, Role};

#[derive(Debug, thiserror::Error)]
pub enum EaclError {
    #[error("table has no records")]
    Empty,
    #[error("record {index} has no targets and can never match")]
    NoTargets { index: usize },
    #[error("{action} record {index} is shadowed by record {by} with the opposite action")]
    Shadowed {
        index: usize,
        action: Action,
        by: usize,
    },
    #[error("unknown operation: {0}")]
    UnknownOperation(String),
    #[error("unknown role: {0}")]
    UnknownRole(String),
    #[error("table signature does not verify")]
    BadSignature,
    #[error("failed to encode table: {0}")]
    Encode(#[from] serde_json::Error),
}
