use anyhow::Context;
use clap::Parser;
use order_tracker::config::ServiceConfig;
use order_tracker::lifecycle::{setup_tracing, OrderService};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServiceConfig::parse();
    setup_tracing();

    info!(?config, "Starting order tracker");

    let listener = TcpListener::bind(&config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;

    let mut service = OrderService::new(&config);
    service.listen(listener)?;

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for ctrl-c")?;
    info!("Ctrl-C received");

    service.shutdown().await?;
    Ok(())
}
