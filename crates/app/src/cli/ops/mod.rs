pub mod check;
pub mod get;
pub mod init;
pub mod set;
pub mod version;
pub mod wallet;

pub use check::Check;
pub use get::Get;
pub use init::Init;
pub use set::Set;
pub use version::Version;
pub use wallet::Wallet;
