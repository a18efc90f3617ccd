use std::path::PathBuf;

use clap::Args;

use common::prelude::{
    build_file_policy, Address, ContainerId, EaclError, PublicKey, SigningKeySource, WalletError,
    SECRET_FILE_NAME,
};
use eacl_changer::api::ApiError;
use eacl_changer::credentials::WalletCredentials;
use eacl_changer::submit::{submit_policy, SubmitError};

/// Restrict GET on one file to a single key and push the table
#[derive(Args, Debug, Clone)]
pub struct Set {
    /// Container whose extended ACL is replaced
    #[arg(long)]
    pub container_id: ContainerId,

    /// Wallet holding the container owner's key
    #[arg(long)]
    pub owner_wallet: PathBuf,

    /// Address of the owner account inside the wallet
    #[arg(long)]
    pub owner_address: Address,

    /// Owner account password (prompted when absent)
    #[arg(long, env = "EACL_OWNER_PASSWORD", hide_env_values = true)]
    pub owner_password: Option<String>,

    /// Wallet holding the key that keeps access to the file
    #[arg(long, requires = "special_address", required_unless_present = "special_key")]
    pub special_wallet: Option<PathBuf>,

    /// Address of the special account inside its wallet
    #[arg(long, requires = "special_wallet")]
    pub special_address: Option<Address>,

    /// Special account password (prompted when absent)
    #[arg(long, env = "EACL_SPECIAL_PASSWORD", hide_env_values = true)]
    pub special_password: Option<String>,

    /// Hex public key of the special account, instead of opening its wallet
    #[arg(long, conflicts_with = "special_wallet")]
    pub special_key: Option<PublicKey>,

    /// Value of the FileName attribute the records filter on
    #[arg(long, default_value = SECRET_FILE_NAME)]
    pub file_name: String,

    /// Print the table instead of submitting it
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum SetError {
    #[error("credential error: {0}")]
    Credential(#[from] WalletError),
    #[error("no special account given: pass --special-wallet/--special-address or --special-key")]
    MissingSpecial,
    #[error(transparent)]
    Invalid(#[from] EaclError),
    #[error("failed to encode table: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("failed to update eACL: {0}")]
    Submit(#[from] SubmitError<ApiError>),
}

impl Set {
    fn special_key(&self) -> Result<PublicKey, SetError> {
        if let Some(key) = self.special_key {
            return Ok(key);
        }
        match (&self.special_wallet, self.special_address) {
            (Some(wallet), Some(address)) => {
                let credentials =
                    WalletCredentials::new(wallet.clone(), address, self.special_password.clone());
                Ok(credentials.acquire_signing_key()?.public())
            }
            _ => Err(SetError::MissingSpecial),
        }
    }
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Set {
    type Error = SetError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let special = self.special_key()?;

        let table = build_file_policy(self.container_id, special, &self.file_name);
        table.validate()?;

        if self.dry_run {
            let mut lines = vec![format!("eACL for container {}:", table.container_id())];
            for (index, record) in table.records().iter().enumerate() {
                lines.push(format!("  {}: {}", index, record));
            }
            lines.push(serde_json::to_string_pretty(&table)?);
            return Ok(lines.join("\n"));
        }

        let owner = WalletCredentials::new(
            self.owner_wallet.clone(),
            self.owner_address,
            self.owner_password.clone(),
        )
        .acquire_signing_key()?;

        submit_policy(&ctx.client, &table, &owner, Some(ctx.timeout)).await?;
        Ok("EACL updated".to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use url::Url;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use common::crypto::KdfParams;
    use common::prelude::{Action, Principal, Role, SecretKey, SignedTable, Wallet};
    use eacl_changer::api::v0::eacl::SetEaclResponse;
    use eacl_changer::ApiClient;

    use super::*;
    use crate::cli::op::{Op, OpContext};

    const CONTAINER: [u8; 32] = [0x17; 32];

    fn wallet_with_account(
        dir: &tempfile::TempDir,
        name: &str,
        password: &str,
    ) -> (PathBuf, Address, SecretKey) {
        let path = dir.path().join(name);
        let mut wallet = Wallet::new(KdfParams {
            memory_kib: 64,
            iterations: 1,
            parallelism: 1,
        });
        let key = SecretKey::generate().unwrap();
        let address = wallet.add_account(&key, password, None).unwrap();
        wallet.save(&path).unwrap();
        (path, address, key)
    }

    fn context(server: &MockServer) -> OpContext {
        let remote = Url::parse(&server.uri()).unwrap();
        OpContext {
            client: ApiClient::new(&remote, Duration::from_secs(5)).unwrap(),
            timeout: Duration::from_secs(5),
            config_path: None,
        }
    }

    fn set_command(owner: (PathBuf, Address), owner_password: &str) -> Set {
        Set {
            container_id: ContainerId::from(CONTAINER),
            owner_wallet: owner.0,
            owner_address: owner.1,
            owner_password: Some(owner_password.to_string()),
            special_wallet: None,
            special_address: None,
            special_password: None,
            special_key: None,
            file_name: SECRET_FILE_NAME.to_string(),
            dry_run: false,
        }
    }

    async fn mount_put(server: &MockServer, expected_calls: u64) {
        let container_id = ContainerId::from(CONTAINER);
        Mock::given(method("PUT"))
            .and(path(format!("/api/v0/container/{}/eacl", container_id)))
            .respond_with(ResponseTemplate::new(200).set_body_json(SetEaclResponse {
                container_id,
                records: 2,
            }))
            .expect(expected_calls)
            .mount(server)
            .await;
    }

    async fn received_table(server: &MockServer) -> SignedTable {
        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        serde_json::from_slice(&requests[0].body).unwrap()
    }

    #[tokio::test]
    async fn test_set_with_two_wallets() {
        let server = MockServer::start().await;
        mount_put(&server, 1).await;

        let dir = tempfile::tempdir().unwrap();
        let (owner_path, owner_address, owner_key) =
            wallet_with_account(&dir, "owner.json", "owner-pw");
        let (special_path, special_address, special_key) =
            wallet_with_account(&dir, "special.json", "special-pw");

        let mut set = set_command((owner_path, owner_address), "owner-pw");
        set.special_wallet = Some(special_path);
        set.special_address = Some(special_address);
        set.special_password = Some("special-pw".to_string());

        let output = set.execute(&context(&server)).await.unwrap();
        assert_eq!(output, "EACL updated");

        let signed = received_table(&server).await;
        assert!(signed.verify().is_ok());
        assert_eq!(signed.public_key, owner_key.public());

        let records = signed.table.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].action, Action::Allow);
        assert_eq!(
            records[0].targets,
            vec![Principal::Key(special_key.public())]
        );
        assert_eq!(records[1].action, Action::Deny);
        assert_eq!(records[1].targets, vec![Principal::Role(Role::Others)]);
    }

    #[tokio::test]
    async fn test_set_with_special_key() {
        let server = MockServer::start().await;
        mount_put(&server, 1).await;

        let dir = tempfile::tempdir().unwrap();
        let (owner_path, owner_address, owner_key) =
            wallet_with_account(&dir, "owner.json", "owner-pw");
        let special = SecretKey::generate().unwrap().public();

        let mut set = set_command((owner_path, owner_address), "owner-pw");
        set.special_key = Some(special);

        let output = set.execute(&context(&server)).await.unwrap();
        assert_eq!(output, "EACL updated");

        let signed = received_table(&server).await;
        assert_eq!(signed.public_key, owner_key.public());
        assert_eq!(signed.table.records()[0].targets, vec![Principal::Key(special)]);
    }

    #[tokio::test]
    async fn test_dry_run_never_contacts_store() {
        let server = MockServer::start().await;
        mount_put(&server, 0).await;

        let dir = tempfile::tempdir().unwrap();
        let missing_owner = dir.path().join("absent.json");
        let owner_address = Address::from(&SecretKey::generate().unwrap().public());
        let special = SecretKey::generate().unwrap().public();

        // the owner wallet does not exist; a dry run must not need it
        let mut set = set_command((missing_owner, owner_address), "unused");
        set.special_key = Some(special);
        set.dry_run = true;

        let output = set.execute(&context(&server)).await.unwrap();
        assert!(output.contains(&ContainerId::from(CONTAINER).to_string()));
        assert!(output.contains(SECRET_FILE_NAME));
        assert!(output.contains(&special.to_hex()));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_wrong_owner_password_is_credential_error() {
        let server = MockServer::start().await;
        mount_put(&server, 0).await;

        let dir = tempfile::tempdir().unwrap();
        let (owner_path, owner_address, _) = wallet_with_account(&dir, "owner.json", "owner-pw");

        let mut set = set_command((owner_path, owner_address), "not-the-password");
        set.special_key = Some(SecretKey::generate().unwrap().public());

        let err = set.execute(&context(&server)).await.unwrap_err();
        assert!(matches!(
            err,
            SetError::Credential(WalletError::WrongPassword(address)) if address == owner_address
        ));
    }

    #[tokio::test]
    async fn test_missing_special_account_is_credential_error() {
        let server = MockServer::start().await;
        mount_put(&server, 0).await;

        let dir = tempfile::tempdir().unwrap();
        let (owner_path, owner_address, _) = wallet_with_account(&dir, "owner.json", "owner-pw");
        let (special_path, _, _) = wallet_with_account(&dir, "special.json", "special-pw");
        let stranger = Address::from(&SecretKey::generate().unwrap().public());

        let mut set = set_command((owner_path, owner_address), "owner-pw");
        set.special_wallet = Some(special_path);
        set.special_address = Some(stranger);
        set.special_password = Some("special-pw".to_string());

        let err = set.execute(&context(&server)).await.unwrap_err();
        assert!(matches!(
            err,
            SetError::Credential(WalletError::AccountMissing(address)) if address == stranger
        ));
    }
}
