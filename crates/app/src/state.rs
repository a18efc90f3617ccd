use std::{fs, path::PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

pub const APP_NAME: &str = "eacl";
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8080";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Storage node API endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: Url,
    /// Upper bound for a single call to the storage node
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

pub fn default_endpoint() -> Url {
    Url::parse(DEFAULT_ENDPOINT).expect("hardcoded URL must parse")
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    /// Path to the config directory (~/.eacl)
    pub config_dir: PathBuf,
    /// Path to the config file
    pub config_path: PathBuf,
    /// Loaded configuration
    pub config: AppConfig,
}

impl AppState {
    /// Get the config directory path (custom or default ~/.eacl)
    pub fn config_dir(custom_path: Option<PathBuf>) -> Result<PathBuf, StateError> {
        if let Some(path) = custom_path {
            return Ok(path);
        }

        let home = dirs::home_dir().ok_or(StateError::NoHomeDirectory)?;
        Ok(home.join(format!(".{}", APP_NAME)))
    }

    /// Initialize a new config directory
    pub fn init(
        custom_path: Option<PathBuf>,
        config: Option<AppConfig>,
    ) -> Result<Self, StateError> {
        let config_dir = Self::config_dir(custom_path)?;
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            return Err(StateError::AlreadyInitialized);
        }

        fs::create_dir_all(&config_dir)?;

        let config = config.unwrap_or_default();
        fs::write(&config_path, toml::to_string_pretty(&config)?)?;

        Ok(Self {
            config_dir,
            config_path,
            config,
        })
    }

    /// Load existing state from the config directory
    pub fn load(custom_path: Option<PathBuf>) -> Result<Self, StateError> {
        let config_dir = Self::config_dir(custom_path)?;
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            return Err(StateError::NotInitialized);
        }

        let config_toml = fs::read_to_string(&config_path)?;
        let config: AppConfig = toml::from_str(&config_toml)?;

        Ok(Self {
            config_dir,
            config_path,
            config,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("config directory not initialized. Run 'eacl init' first")]
    NotInitialized,

    #[error("config directory already initialized")]
    AlreadyInitialized,

    #[error("no home directory found")]
    NoHomeDirectory,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),
}
