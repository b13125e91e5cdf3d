use std::net::SocketAddr;

use anyhow::Context;
use pipescout_core::{
    logging,
    ConfigLoader,
    ExecutionService,
};
use pipescout_web::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let config_path = ConfigLoader::discover_config_path();
    let config = ConfigLoader::load_or_default(&config_path).context("Failed to load config")?;

    logging::init_from_config(&config.log);

    let bind_addr: SocketAddr = config
        .bind_addr()
        .parse()
        .with_context(|| format!("Invalid bind address {}", config.bind_addr()))?;

    tracing::info!("Starting Pipescout plugin server");
    tracing::info!("Config path: {}", config_path.display());
    tracing::info!(
        "Worker pool size: {}, heartbeat: {}s",
        config.service.workerpool_size,
        config.service.heartbeat_secs
    );

    let service = ExecutionService::from_config(&config);
    let state = AppState::new(service, config.service.heartbeat_secs);
    let app = pipescout_web::app(state, config.transport.max_request_bytes);

    tracing::info!("Listening on {bind_addr}");
    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("Failed to bind {bind_addr}"))?;
    axum::serve(listener, app).await?;

    Ok(())
}
