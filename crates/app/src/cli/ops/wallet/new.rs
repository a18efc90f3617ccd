use std::path::PathBuf;

use clap::Args;

use common::crypto::{KeyError, SecretKey};
use common::prelude::{Wallet, WalletError};
use eacl_changer::credentials::prompt_password;

/// Generate a key and store it as a new account in a wallet file
#[derive(Args, Debug, Clone)]
pub struct New {
    /// Wallet file, created when it does not exist
    #[arg(long)]
    pub wallet: PathBuf,

    /// Optional account label
    #[arg(long)]
    pub label: Option<String>,

    /// Account password (prompted twice when absent)
    #[arg(long, env = "EACL_WALLET_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum NewError {
    #[error("wallet error: {0}")]
    Wallet(#[from] WalletError),
    #[error("key error: {0}")]
    Key(#[from] KeyError),
    #[error("passwords do not match")]
    PasswordMismatch,
}

impl New {
    fn password(&self) -> Result<String, NewError> {
        if let Some(password) = &self.password {
            return Ok(password.clone());
        }
        let first = prompt_password("New password > ")?;
        let second = prompt_password("Repeat password > ")?;
        if first != second {
            return Err(NewError::PasswordMismatch);
        }
        Ok(first)
    }
}

#[async_trait::async_trait]
impl crate::cli::op::Op for New {
    type Error = NewError;
    type Output = String;

    async fn execute(&self, _ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let mut wallet = if self.wallet.exists() {
            Wallet::from_file(&self.wallet)?
        } else {
            Wallet::default()
        };

        let password = self.password()?;
        let key = SecretKey::generate()?;
        let address = wallet.add_account(&key, &password, self.label.clone())?;
        wallet.save(&self.wallet)?;

        tracing::info!("added account {} to {}", address, self.wallet.display());
        Ok(format!(
            "Created account in {}\n- Address: {}\n- Public key: {}",
            self.wallet.display(),
            address,
            key.public()
        ))
    }
}
