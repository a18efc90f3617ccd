use std::error::Error;
use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use eacl_changer::api::{ApiClient, ApiError};
use eacl_changer::state::{AppConfig, AppState};

/// Settings resolved from flags first, then the config file, then defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub remote: Url,
    pub timeout: Duration,
}

/// Resolve the remote URL and call deadline for the API client.
///
/// Priority: explicit flag > config file > built-in default.
pub fn resolve(
    explicit_remote: Option<Url>,
    explicit_timeout_secs: Option<u64>,
    config_path: Option<PathBuf>,
) -> Resolved {
    let config = match AppState::load(config_path) {
        Ok(state) => state.config,
        Err(e) => {
            tracing::debug!("using default configuration: {}", e);
            AppConfig::default()
        }
    };

    Resolved {
        remote: explicit_remote.unwrap_or(config.endpoint),
        timeout: Duration::from_secs(explicit_timeout_secs.unwrap_or(config.request_timeout_secs)),
    }
}

#[derive(Clone)]
pub struct OpContext {
    /// API client (always initialized with default or custom URL)
    pub client: ApiClient,
    /// Deadline for a single call to the storage node
    pub timeout: Duration,
    /// Optional custom config path (defaults to ~/.eacl)
    pub config_path: Option<PathBuf>,
}

impl OpContext {
    pub fn new(resolved: Resolved, config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        Ok(Self {
            client: ApiClient::new(&resolved.remote, resolved.timeout)?,
            timeout: resolved.timeout,
            config_path,
        })
    }
}

#[async_trait::async_trait]
pub trait Op: Send + Sync {
    type Error: Error + Send + Sync + 'static;
    type Output;

    async fn execute(&self, ctx: &OpContext) -> Result<Self::Output, Self::Error>;
}

#[macro_export]
macro_rules! command_enum {
    ($(($variant:ident, $type:ty)),* $(,)?) => {
        #[derive(Subcommand, Debug, Clone)]
        pub enum Command {
            $($variant($type),)*
        }

        #[derive(Debug)]
        pub enum OpOutput {
            $($variant(<$type as $crate::cli::op::Op>::Output),)*
        }

        #[derive(Debug, thiserror::Error)]
        pub enum OpError {
            $(
                #[error(transparent)]
                $variant(<$type as $crate::cli::op::Op>::Error),
            )*
        }

        #[async_trait::async_trait]
        impl $crate::cli::op::Op for Command {
            type Output = OpOutput;
            type Error = OpError;

            async fn execute(&self, ctx: &$crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
                match self {
                    $(
                        Command::$variant(op) => {
                            op.execute(ctx).await
                                .map(OpOutput::$variant)
                                .map_err(OpError::$variant)
                        },
                    )*
                }
            }
        }

        impl std::fmt::Display for OpOutput {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(
                        OpOutput::$variant(output) => write!(f, "{}", output),
                    )*
                }
            }
        }
    };
}
