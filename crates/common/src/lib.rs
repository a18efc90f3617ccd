/**
 * Identifier for the container a table applies to.
 */
pub mod container;
/**
 * Cryptographic types and operations.
 *  - Public and Private key implementations
 *  - Password-derived symmetric secrets
 */
pub mod crypto;
/**
 * Extended ACL model: records, targets, filters
 *  and first-match evaluation over a table.
 */
pub mod eacl;
/**
 * The two-record policy that grants one key
 *  read access to a single file and denies
 *  everybody else.
 */
pub mod policy;
/**
 * Encrypted key storage and account lookup.
 */
pub mod wallet;

pub mod prelude {
    pub use crate::container::{ContainerId, ContainerIdError};
    pub use crate::crypto::{PublicKey, SecretKey};
    pub use crate::eacl::{
        AccessRequest, Action, EaclError, Filter, Operation, Principal, Record, Role, SignedTable,
        Table,
    };
    pub use crate::policy::{build_file_policy, build_policy, SECRET_FILE_NAME};
    pub use crate::wallet::{Address, SigningKeySource, Wallet, WalletError};
}
