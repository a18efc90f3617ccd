// CLI modules
mod cli;

use clap::{Parser, Subcommand};
use cli::{args::Args, op::Op, Check, Get, Init, Set, Version, Wallet};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

command_enum! {
    (Check, Check),
    (Get, Get),
    (Init, Init),
    (Set, Set),
    (Version, Version),
    (Wallet, Wallet),
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Logs go to stderr so command output on stdout stays clean
    let (non_blocking_writer, guard) = tracing_appender::non_blocking(std::io::stderr());
    let log_level: tracing::Level = args.log_level.parse().unwrap_or(tracing::Level::WARN);
    let env_filter = EnvFilter::builder()
        .with_default_directive(log_level.into())
        .from_env_lossy();
    let stderr_layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(non_blocking_writer)
        .with_filter(env_filter);
    tracing_subscriber::registry().with(stderr_layer).init();

    // Resolve remote and deadline: explicit flags > config file > defaults
    let resolved = cli::op::resolve(args.remote, args.timeout_secs, args.config_path.clone());
    tracing::debug!("using remote {} with timeout {:?}", resolved.remote, resolved.timeout);

    let code = match cli::op::OpContext::new(resolved, args.config_path) {
        Ok(ctx) => match args.command.execute(&ctx).await {
            Ok(output) => {
                println!("{}", output);
                0
            }
            Err(e) => {
                tracing::debug!("command failed: {:?}", e);
                eprintln!("Error: {}", e);
                1
            }
        },
        Err(e) => {
            eprintln!("Error: Failed to create API client: {}", e);
            1
        }
    };

    // flush buffered log lines before exiting
    drop(guard);
    std::process::exit(code);
}
