//! Serve command - runs the HTTP gateway

use std::net::SocketAddr;
use std::time::Duration;

use tokio::net::TcpListener;
use tracing::info;

use crate::api::create_router_with_state;
use crate::config::AppConfig;
use crate::infrastructure::alert::{HttpHealthEndpoint, IaHealthMonitor};
use crate::infrastructure::logging;

/// Load configuration, build the state and serve until shutdown
pub async fn run(config_path: Option<&str>) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load(config_path)?;
    logging::init_logging(&config.logging)?;

    let gateway = crate::build_gateway(&config).await?;

    if config.ia_health.enabled {
        let endpoint = HttpHealthEndpoint::new(&config.ia_health)?;
        info!(url = %config.ia_health.url, "IA health monitor enabled");
        IaHealthMonitor::new(endpoint, gateway.alerts.clone())
            .spawn(Duration::from_millis(config.ia_health.interval_ms));
    }

    let app = create_router_with_state(gateway.state);

    let addr = build_socket_addr(&config)?;
    info!("Starting telemetry gateway on {}", addr);

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
