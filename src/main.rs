use clap::Parser;
use mcp_smoke::{Config, DEFAULT_PROTOCOL_VERSION, SmokeTest};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Smoke test an MCP server over stdio: initialize, then list its resources
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// Path to the MCP server executable
    #[arg(env = "MCP_SMOKE_EXEC")]
    executable: PathBuf,

    /// Arguments passed to the server
    #[arg(last = true)]
    args: Vec<String>,

    /// Protocol version announced in `initialize`
    #[arg(long, env = "MCP_SMOKE_PROTOCOL_VERSION", default_value = DEFAULT_PROTOCOL_VERSION)]
    protocol_version: String,

    /// Client name announced in `initialize`
    #[arg(long, default_value = "test-client")]
    client_name: String,

    /// Client version announced in `initialize`
    #[arg(long, default_value = "1.0")]
    client_version: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("warn,{}=info", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let config = Config::new(args.executable)
        .with_args(args.args)
        .with_protocol_version(args.protocol_version)
        .with_client_info(args.client_name, args.client_version);
    tracing::debug!("config: {config:#?}");

    let outcome = SmokeTest::new(config).run(&mut std::io::stdout()).await;
    tracing::info!(success = outcome.is_success(), "smoke test finished");

    Ok(())
}
