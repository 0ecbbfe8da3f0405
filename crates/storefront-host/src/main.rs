use std::sync::Arc;

use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

use storefront_core::catalog::Catalog;
use storefront_host::config::HostConfig;
use storefront_host::download_loop::DownloadTicker;
use storefront_host::session::run_session;
use storefront_host::spawn_report_logger;
use storefront_host::state::build_storefront;

#[tokio::main]
async fn main() {
    // stdout carries the view stream, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Storefront host starting");

    let config = HostConfig::load();
    if let Err(e) = config.validate() {
        tracing::error!(error = %e, "Refusing to start");
        std::process::exit(1);
    }

    let store = build_storefront(&config, Catalog::sample());
    let (ticker, reports) = DownloadTicker::start(Arc::clone(&store), config.tick_interval());
    let logger = spawn_report_logger(reports);

    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();

    tokio::select! {
        result = run_session(store, stdin, stdout) => {
            if let Err(e) = result {
                tracing::error!(error = %e, "Intent session failed");
            }
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Interrupted, shutting down");
        }
    }

    let ticks = ticker.stop().await;
    let completed = logger.await.unwrap_or_default();
    tracing::info!(ticks, completed, "Storefront host stopped");
}
