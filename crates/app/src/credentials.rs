use std::path::PathBuf;

use common::prelude::{Address, SecretKey, SigningKeySource, Wallet, WalletError};

pub const PASSWORD_PROMPT: &str = "Enter password > ";

/// One account of a wallet file, unlocked with a password.
///
/// If no password was supplied up front it is read from the terminal
/// without echo once the account is known to exist.
#[derive(Debug, Clone)]
pub struct WalletCredentials {
    pub wallet_path: PathBuf,
    pub address: Address,
    pub password: Option<String>,
}

impl WalletCredentials {
    pub fn new(wallet_path: PathBuf, address: Address, password: Option<String>) -> Self {
        Self {
            wallet_path,
            address,
            password,
        }
    }
}

/// Read a password from the terminal without echo
pub fn prompt_password(prompt: &str) -> Result<String, WalletError> {
    rpassword::prompt_password(prompt).map_err(|e| WalletError::Password(e.to_string()))
}

impl SigningKeySource for WalletCredentials {
    fn acquire_signing_key(&self) -> Result<SecretKey, WalletError> {
        let wallet = Wallet::from_file(&self.wallet_path)?;
        if wallet.account(&self.address).is_none() {
            return Err(WalletError::AccountMissing(self.address));
        }

        let password = match &self.password {
            Some(password) => password.clone(),
            None => {
                eprintln!(
                    "Unlocking account {} in {}",
                    self.address,
                    self.wallet_path.display()
                );
                prompt_password(PASSWORD_PROMPT)?
            }
        };

        let key = wallet.signing_key(&self.address, &password)?;
        tracing::debug!("unlocked account {}", self.address);
        Ok(key)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use common::crypto::KdfParams;

    fn wallet_with_account(dir: &tempfile::TempDir) -> (PathBuf, Address, SecretKey) {
        let path = dir.path().join("wallet.json");
        let mut wallet = Wallet::new(KdfParams {
            memory_kib: 64,
            iterations: 1,
            parallelism: 1,
        });
        let key = SecretKey::generate().unwrap();
        let address = wallet.add_account(&key, "secret", None).unwrap();
        wallet.save(&path).unwrap();
        (path, address, key)
    }

    #[test]
    fn test_acquire_with_password() {
        let dir = tempfile::tempdir().unwrap();
        let (path, address, key) = wallet_with_account(&dir);

        let credentials = WalletCredentials::new(path, address, Some("secret".to_string()));
        let acquired = credentials.acquire_signing_key().unwrap();
        assert_eq!(acquired.public(), key.public());
    }

    #[test]
    fn test_wrong_password_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let (path, address, _) = wallet_with_account(&dir);

        let credentials = WalletCredentials::new(path, address, Some("guess".to_string()));
        assert!(matches!(
            credentials.acquire_signing_key(),
            Err(WalletError::WrongPassword(_))
        ));
    }

    #[test]
    fn test_missing_account_fails_before_prompting() {
        let dir = tempfile::tempdir().unwrap();
        let (path, _, _) = wallet_with_account(&dir);
        let stranger = Address::from(&SecretKey::generate().unwrap().public());

        // no password given: reaching the prompt would block the test
        let credentials = WalletCredentials::new(path, stranger, None);
        assert!(matches!(
            credentials.acquire_signing_key(),
            Err(WalletError::AccountMissing(_))
        ));
    }

    #[test]
    fn test_missing_wallet_file() {
        let dir = tempfile::tempdir().unwrap();
        let address = Address::from(&SecretKey::generate().unwrap().public());
        let credentials = WalletCredentials::new(
            dir.path().join("nope.json"),
            address,
            Some("x".to_string()),
        );
        assert!(matches!(
            credentials.acquire_signing_key(),
            Err(WalletError::Read { .. })
        ));
    }
}
