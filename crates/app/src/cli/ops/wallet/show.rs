use std::path::PathBuf;

use clap::Args;

use common::prelude::{Wallet, WalletError};

/// List the accounts of a wallet file
#[derive(Args, Debug, Clone)]
pub struct Show {
    /// Wallet file to read
    #[arg(long)]
    pub wallet: PathBuf,
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Show {
    type Error = WalletError;
    type Output = String;

    async fn execute(&self, _ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let wallet = Wallet::from_file(&self.wallet)?;

        let mut lines = vec![format!(
            "{} ({} account(s))",
            self.wallet.display(),
            wallet.accounts().len()
        )];
        for account in wallet.accounts() {
            let label = account.label.as_deref().unwrap_or("-");
            lines.push(format!(
                "  {}  {}  {}",
                account.address, account.public_key, label
            ));
        }
        Ok(lines.join("\n"))
    }
}
