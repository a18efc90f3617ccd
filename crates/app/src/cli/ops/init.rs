use clap::Args;
use url::Url;

use eacl_changer::state::{AppConfig, AppState, StateError};

#[derive(Args, Debug, Clone)]
pub struct Init {
    /// Storage node API endpoint to store as the default remote
    #[arg(long, default_value = eacl_changer::state::DEFAULT_ENDPOINT)]
    pub endpoint: Url,

    /// Default deadline in seconds for calls to the storage node
    #[arg(long, default_value_t = 30)]
    pub request_timeout_secs: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("init failed: {0}")]
    StateFailed(#[from] StateError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Init {
    type Error = InitError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let config = AppConfig {
            endpoint: self.endpoint.clone(),
            request_timeout_secs: self.request_timeout_secs,
        };

        let state = AppState::init(ctx.config_path.clone(), Some(config))?;

        Ok(format!(
            "Initialized eacl directory at: {}\n\
             - Config: {}\n\
             - Endpoint: {}\n\
             - Request timeout: {}s",
            state.config_dir.display(),
            state.config_path.display(),
            state.config.endpoint,
            state.config.request_timeout_secs
        ))
    }
}
