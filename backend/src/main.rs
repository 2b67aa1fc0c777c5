use std::net::SocketAddr;

use anyhow::Context;
use attendance_tracker::config::TrackerConfig;
use attendance_tracker::storage::JsonConnection;
use attendance_tracker::{create_router, initialize_backend, logging};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logging goes up first so data directory resolution is recorded
    let log_filter = logging::init();

    let data_dir = JsonConnection::resolve_data_directory()?;
    let config = TrackerConfig::load_or_create(&data_dir)?;
    log_filter.apply_config(&config)?;

    info!("Using data directory {}", data_dir.display());
    let app_state = initialize_backend(&config, &data_dir)?;
    let app = create_router(app_state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
