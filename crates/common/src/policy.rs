//! # Single-file read policy
//!
//! Grants one key `GET` on one file and denies `GET` on that file to every
//! other requester. All other objects in the container are left to the
//! container's default access rules.

use crate::container::ContainerId;
use crate::crypto::PublicKey;
use crate::eacl::{Action, Filter, MatchType, Operation, Record, Role, Table, ATTRIBUTE_FILE_NAME};

/// File name the default policy protects
pub const SECRET_FILE_NAME: &str = "Secret.jpg";

/// Build the policy protecting [`SECRET_FILE_NAME`] for `special`.
pub fn build_policy(container_id: ContainerId, special: PublicKey) -> Table {
    build_file_policy(container_id, special, SECRET_FILE_NAME)
}

/// Build the two-record table for an arbitrary file name.
///
/// The allow record comes first: the deny record targets `Others`, which
/// includes `special`, so with first-match-wins the order is what lets
/// `special` through.
pub fn build_file_policy(container_id: ContainerId, special: PublicKey, file_name: &str) -> Table {
    let file_filter = Filter::object_attribute(MatchType::StringEqual, ATTRIBUTE_FILE_NAME, file_name);

    Table::new(
        container_id,
        vec![
            Record::new(Action::Allow, Operation::Get)
                .with_filter(file_filter.clone())
                .with_target(special),
            Record::new(Action::Deny, Operation::Get)
                .with_filter(file_filter)
                .with_target(Role::Others),
        ],
    )
}
