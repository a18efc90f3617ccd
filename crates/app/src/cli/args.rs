pub use clap::Parser;

use std::path::PathBuf;
use url::Url;

#[derive(Parser, Debug)]
#[command(name = "eacl")]
#[command(about = "Build and push extended ACL tables for storage containers")]
pub struct Args {
    /// Storage node API endpoint (defaults to the configured endpoint)
    #[arg(long, global = true)]
    pub remote: Option<Url>,

    /// Path to the eacl config directory (defaults to ~/.eacl)
    #[arg(long, global = true)]
    pub config_path: Option<PathBuf>,

    /// Deadline in seconds for calls to the storage node
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: crate::Command,
}
