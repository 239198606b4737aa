use anyhow::Context;
use clap::Parser;
use dnstest::{Server, ZoneHandler, ZoneRecords};
use dnstest_domain::CliOverrides;
use tracing::info;

mod bootstrap;

#[derive(Parser, Debug)]
#[command(name = "dnstest")]
#[command(version)]
#[command(about = "Serve a zone file on an ephemeral loopback UDP port for DNS client testing")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Zone file to serve
    #[arg(short = 'z', long, value_name = "FILE")]
    zone: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        zone_path: cli.zone.clone(),
        log_level: cli.log_level.clone(),
    };
    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    info!("Starting dnstest v{}", env!("CARGO_PKG_VERSION"));

    let zone_path = config
        .zone
        .path
        .as_deref()
        .context("No zone file configured")?;
    let zone_text = std::fs::read_to_string(zone_path)
        .with_context(|| format!("Failed to read zone file {}", zone_path))?;

    let records = ZoneRecords::parse(&zone_text)?;
    info!(zone = %zone_path, records = records.len(), "Zone loaded");

    let server = Server::new(ZoneHandler::new(records)).await?;
    println!("listening on {}", server.addr());

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl-C")?;

    info!("Shutting down");
    server.close().await?;

    info!("Server shutdown complete");
    Ok(())
}
