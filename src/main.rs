//! Settlement Engine HTTP server.

use std::net::SocketAddr;

use clap::Parser;
use tracing::info;

use settlement_engine::api::{AppState, InMemoryDirectory, create_router};
use settlement_engine::config::ConfigLoader;

/// Settlement Server - HTTP server for termination settlement simulation
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding `policy.yaml` and `rates/*.yaml`
    #[arg(short, long, default_value = "./config/standard")]
    config: String,

    /// YAML employee roster
    #[arg(short, long, default_value = "./config/employees.yaml")]
    employees: String,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Settlement Server");

    let config = ConfigLoader::load(&args.config)?;
    info!(
        policy = %config.policy().code,
        version = %config.policy().version,
        rate_files = config.config().rates().len(),
        "Loaded settlement policy from {}",
        args.config
    );

    let directory = InMemoryDirectory::from_yaml_file(&args.employees)?;
    info!(employees = directory.len(), "Loaded employee roster from {}", args.employees);

    let app = create_router(AppState::new(config, directory));

    let addr: SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
