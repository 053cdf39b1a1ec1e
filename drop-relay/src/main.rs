//! drop-relay binary entry point.
//!
//! Usage:
//! ```bash
//! drop-relay --config relay.toml
//! PORT=8080 drop-relay
//! ```

use drop_relay::cleanup::spawn_sweep_task;
use drop_relay::config::Config;
use drop_relay::error::RelayError;
use drop_relay::http::{build_router, health};
use drop_relay::server::ShareRelay;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), RelayError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config_path = get_config_path();
    let mut config = if config_path.exists() {
        Config::from_file(&config_path)?
    } else {
        tracing::info!("No config file at {:?}, using defaults", config_path);
        Config::default()
    };

    // PORT overrides the configured bind port, for container platforms that
    // assign one.
    if let Ok(port) = std::env::var("PORT") {
        let host = config
            .server
            .bind_address
            .rsplit_once(':')
            .map(|(host, _)| host.to_string())
            .unwrap_or_else(|| "0.0.0.0".to_string());
        config.server.bind_address = format!("{host}:{port}");
    }

    let bind_address = config.server.bind_address.clone();
    let session_ttl = Duration::from_secs(config.store.session_ttl_secs);
    let cleanup = config.cleanup.clone();

    health::init_start_time();
    let relay = Arc::new(ShareRelay::new(config));

    let sweep_handle = spawn_sweep_task(
        relay.registry_arc(),
        relay.rate_limits().clone(),
        cleanup,
        session_ttl,
    );

    let app = build_router(Arc::clone(&relay));
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;

    tracing::info!("drop-relay listening on {}", bind_address);
    tracing::info!("HTTP API ready for file sharing");

    axum::serve(listener, app).await?;

    sweep_handle.abort();
    Ok(())
}

fn get_config_path() -> PathBuf {
    std::env::args()
        .skip_while(|arg| arg != "--config")
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("relay.toml"))
}
