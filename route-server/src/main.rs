use std::process::ExitCode;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use route_server::config::ServerConfig;
use route_server::network::SharedNetwork;
use route_server::planner::CostConfig;
use route_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    // Load the network (fail fast if unavailable)
    let network = match config.network_source() {
        Ok(source) => SharedNetwork::load(source).await,
        Err(e) => Err(e),
    };
    let network = match network {
        Ok(network) => network,
        Err(e) => {
            error!("failed to load network: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Spawn background task to reload the network
    if let Some(period) = config.refresh_interval {
        let network = network.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.tick().await; // First tick is immediate, skip it
            loop {
                interval.tick().await;
                match network.refresh().await {
                    Ok(count) => info!(nodes = count, "refreshed network"),
                    Err(e) => warn!("failed to refresh network, keeping previous: {e}"),
                }
            }
        });
    }

    let state = AppState::new(network, CostConfig::default());
    let app = create_router(state, &config.static_dir);

    let listener = match tokio::net::TcpListener::bind(config.addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("failed to bind {}: {e}", config.addr);
            return ExitCode::FAILURE;
        }
    };
    info!("Route planner listening on http://{}", config.addr);

    if let Err(e) = axum::serve(listener, app).await {
        error!("server error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
