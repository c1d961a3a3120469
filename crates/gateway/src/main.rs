//! API Gateway - HTTP REST API for the procurement marketplace.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gateway_lib::config::GatewayConfig;

#[derive(Parser)]
#[command(name = "gateway")]
#[command(about = "HTTP API for tenders and bids")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Overrides the host from SERVER_ADDRESS
        #[arg(long)]
        host: Option<String>,
        /// Overrides the port from SERVER_ADDRESS
        #[arg(long)]
        port: Option<u16>,
        /// Per-request deadline in seconds
        #[arg(long, env = "REQUEST_TIMEOUT_SECS")]
        request_timeout_secs: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let mut config = GatewayConfig::from_env();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.server.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Serve {
            host,
            port,
            request_timeout_secs,
        } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(secs) = request_timeout_secs {
                config.request_timeout_secs = secs;
            }
            gateway_lib::run_server(config).await?;
        }
    }

    Ok(())
}
