use clap::{Args, Subcommand};

pub mod new;
pub mod show;

use crate::cli::op::Op;

crate::command_enum! {
    (New, new::New),
    (Show, show::Show),
}

pub type WalletCommand = Command;

/// Manage wallet files
#[derive(Args, Debug, Clone)]
pub struct Wallet {
    #[command(subcommand)]
    pub command: WalletCommand,
}

#[async_trait::async_trait]
impl Op for Wallet {
    type Error = OpError;
    type Output = OpOutput;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        self.command.execute(ctx).await
    }
}
