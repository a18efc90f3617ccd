//! # Wallets
//!
//! A wallet is a JSON file holding one or more accounts. Each account stores
//! its public key in the clear and its signing key encrypted under a secret
//! derived from the account password (see [`crate::crypto::Secret`]).
//!
//! ```json
//! {
//!   "version": "1.0",
//!   "kdf": { "memory_kib": 19456, "iterations": 2, "parallelism": 1 },
//!   "accounts": [
//!     {
//!       "address": "...",
//!       "label": "owner",
//!       "public_key": "<hex>",
//!       "encrypted_key": "<hex>",
//!       "salt": "<hex>"
//!     }
//!   ]
//! }
//! ```

mod address;

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::crypto::{KdfParams, KeyError, PublicKey, Secret, SecretError, SecretKey};

pub use address::{Address, AddressError};

pub const WALLET_VERSION: &str = "1.0";

/// Errors acquiring a signing key from a wallet
#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    #[error("failed to read wallet {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write wallet {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("corrupt wallet: {0}")]
    Corrupt(String),
    #[error("unsupported wallet version {0}")]
    UnsupportedVersion(String),
    #[error("invalid address: {0}")]
    InvalidAddress(#[from] AddressError),
    #[error("account {0} missing from wallet")]
    AccountMissing(Address),
    #[error("account {0} already present in wallet")]
    DuplicateAccount(Address),
    #[error("wrong password for account {0}")]
    WrongPassword(Address),
    #[error("decrypted key does not match public key of account {0}")]
    KeyMismatch(Address),
    #[error("failed to read password: {0}")]
    Password(String),
    #[error("secret error: {0}")]
    Secret(#[from] SecretError),
    #[error("key error: {0}")]
    Key(#[from] KeyError),
}

impl From<serde_json::Error> for WalletError {
    fn from(e: serde_json::Error) -> Self {
        WalletError::Corrupt(e.to_string())
    }
}

/// Anything that can hand out a decrypted signing key.
pub trait SigningKeySource {
    fn acquire_signing_key(&self) -> Result<SecretKey, WalletError>;
}

/// One keypair stored in a wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub address: Address,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub public_key: PublicKey,
    encrypted_key: String,
    salt: String,
}

impl Account {
    fn decrypt(&self, password: &str, kdf: &KdfParams) -> Result<SecretKey, WalletError> {
        let salt = hex::decode(&self.salt)
            .map_err(|e| WalletError::Corrupt(format!("salt of {}: {}", self.address, e)))?;
        let ciphertext = hex::decode(&self.encrypted_key)
            .map_err(|e| WalletError::Corrupt(format!("key of {}: {}", self.address, e)))?;

        let secret = Secret::derive(password, &salt, kdf)?;
        let plaintext = secret.decrypt(&ciphertext).map_err(|e| match e {
            SecretError::Decrypt => WalletError::WrongPassword(self.address),
            other => WalletError::Secret(other),
        })?;

        let key = SecretKey::from_slice(&plaintext)?;
        if key.public() != self.public_key {
            return Err(WalletError::KeyMismatch(self.address));
        }
        Ok(key)
    }
}

/// A set of password-protected accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    pub version: String,
    pub kdf: KdfParams,
    #[serde(default)]
    accounts: Vec<Account>,
}

impl Default for Wallet {
    fn default() -> Self {
        Self::new(KdfParams::default())
    }
}

impl Wallet {
    pub fn new(kdf: KdfParams) -> Self {
        Self {
            version: WALLET_VERSION.to_string(),
            kdf,
            accounts: Vec::new(),
        }
    }

    /// Load a wallet from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, WalletError> {
        let contents = fs::read_to_string(path).map_err(|source| WalletError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let wallet = Self::from_json(&contents)?;
        tracing::debug!(
            "loaded wallet {} with {} account(s)",
            path.display(),
            wallet.accounts.len()
        );
        Ok(wallet)
    }

    pub fn from_json(contents: &str) -> Result<Self, WalletError> {
        let wallet: Wallet = serde_json::from_str(contents)?;
        if wallet.version != WALLET_VERSION {
            return Err(WalletError::UnsupportedVersion(wallet.version));
        }
        for account in &wallet.accounts {
            if Address::from(&account.public_key) != account.address {
                return Err(WalletError::Corrupt(format!(
                    "address {} does not belong to its public key",
                    account.address
                )));
            }
        }
        Ok(wallet)
    }

    /// Write the wallet as pretty-printed JSON
    pub fn save(&self, path: &Path) -> Result<(), WalletError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| WalletError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn account(&self, address: &Address) -> Option<&Account> {
        self.accounts.iter().find(|a| a.address == *address)
    }

    /// Encrypt `key` under `password` and store it as a new account
    pub fn add_account(
        &mut self,
        key: &SecretKey,
        password: &str,
        label: Option<String>,
    ) -> Result<Address, WalletError> {
        let public_key = key.public();
        let address = Address::from(&public_key);
        if self.account(&address).is_some() {
            return Err(WalletError::DuplicateAccount(address));
        }

        let salt = Secret::generate_salt()?;
        let secret = Secret::derive(password, &salt, &self.kdf)?;
        let encrypted_key = secret.encrypt(&key.to_bytes())?;

        self.accounts.push(Account {
            address,
            label,
            public_key,
            encrypted_key: hex::encode(encrypted_key),
            salt: hex::encode(salt),
        });
        Ok(address)
    }

    /// Decrypt the signing key of the account at `address`
    pub fn signing_key(&self, address: &Address, password: &str) -> Result<SecretKey, WalletError> {
        let account = self
            .account(address)
            .ok_or(WalletError::AccountMissing(*address))?;
        account.decrypt(password, &self.kdf)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn test_kdf() -> KdfParams {
        KdfParams {
            memory_kib: 64,
            iterations: 1,
            parallelism: 1,
        }
    }

    #[test]
    fn test_add_and_decrypt() {
        let mut wallet = Wallet::new(test_kdf());
        let key = SecretKey::generate().unwrap();
        let address = wallet
            .add_account(&key, "pw", Some("owner".to_string()))
            .unwrap();

        assert_eq!(address, Address::from(&key.public()));
        let recovered = wallet.signing_key(&address, "pw").unwrap();
        assert_eq!(recovered.to_bytes(), key.to_bytes());
    }

    #[test]
    fn test_wrong_password() {
        let mut wallet = Wallet::new(test_kdf());
        let address = wallet
            .add_account(&SecretKey::generate().unwrap(), "pw", None)
            .unwrap();

        assert!(matches!(
            wallet.signing_key(&address, "nope"),
            Err(WalletError::WrongPassword(a)) if a == address
        ));
    }

    #[test]
    fn test_missing_account() {
        let wallet = Wallet::new(test_kdf());
        let address = Address::from(&SecretKey::generate().unwrap().public());
        assert!(matches!(
            wallet.signing_key(&address, "pw"),
            Err(WalletError::AccountMissing(_))
        ));
    }

    #[test]
    fn test_duplicate_account() {
        let mut wallet = Wallet::new(test_kdf());
        let key = SecretKey::generate().unwrap();
        wallet.add_account(&key, "pw", None).unwrap();
        assert!(matches!(
            wallet.add_account(&key, "other", None),
            Err(WalletError::DuplicateAccount(_))
        ));
    }

    #[test]
    fn test_swapped_public_key_is_detected() {
        let mut wallet = Wallet::new(test_kdf());
        let key = SecretKey::generate().unwrap();
        let address = wallet.add_account(&key, "pw", None).unwrap();

        // keep the address consistent but point the key material elsewhere
        let other = SecretKey::generate().unwrap();
        let mut other_wallet = Wallet::new(test_kdf());
        other_wallet.add_account(&other, "pw", None).unwrap();
        wallet.accounts[0].encrypted_key = other_wallet.accounts[0].encrypted_key.clone();
        wallet.accounts[0].salt = other_wallet.accounts[0].salt.clone();

        assert!(matches!(
            wallet.signing_key(&address, "pw"),
            Err(WalletError::KeyMismatch(_))
        ));
    }

    #[test]
    fn test_rejects_unknown_version() {
        let mut wallet = Wallet::new(test_kdf());
        wallet.version = "9.9".to_string();
        let json = serde_json::to_string(&wallet).unwrap();
        assert!(matches!(
            Wallet::from_json(&json),
            Err(WalletError::UnsupportedVersion(_))
        ));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(
            Wallet::from_json("{ not json"),
            Err(WalletError::Corrupt(_))
        ));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wallet.json");

        let mut wallet = Wallet::new(test_kdf());
        let key = SecretKey::generate().unwrap();
        let address = wallet.add_account(&key, "pw", None).unwrap();
        wallet.save(&path).unwrap();

        let loaded = Wallet::from_file(&path).unwrap();
        assert_eq!(loaded, wallet);
        assert_eq!(
            loaded.signing_key(&address, "pw").unwrap().public(),
            key.public()
        );
    }

    #[test]
    fn test_unreadable_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Wallet::from_file(&dir.path().join("absent.json")),
            Err(WalletError::Read { .. })
        ));
    }
}
