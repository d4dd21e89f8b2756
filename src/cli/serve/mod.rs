//! Serve command - runs the decision API server

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tracing::info;

use crate::api;
use crate::config::AppConfig;
use crate::infrastructure::logging;

/// Run the decision API server
pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().unwrap_or_default();
    logging::init_logging(&config.logging);

    if config.experiments.domain.is_none() {
        tracing::warn!(
            "No experiment domain configured; decisions will fail until \
             APP__EXPERIMENTS__DOMAIN is set"
        );
    }

    let state = crate::create_app_state(&config);
    let app = api::create_router(state);

    let addr = build_socket_addr(&config)?;
    info!("Starting content-experiment gateway on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_socket_addr(config: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    )))
}
