use std::net::SocketAddr;
use std::sync::Arc;

use admission_gateway::config::Args;
use admission_gateway::routes::create_router;
use admission_gateway::state::AppState;
use clap::Parser; // for cli
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // parse cli arguments
    let args = Args::parse();
    let settings = args.settings()?;

    let state = Arc::new(AppState::new(settings));
    let limiter = Arc::clone(&state.limiter);
    let app = create_router(state);

    let addr = format!("0.0.0.0:{}", args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("Gateway running on http://localhost:{}", args.port);
    info!(
        "Rate limit: 1 token every {}s, burst {}, key scope {:?}",
        args.refill_every_secs, settings.route.burst, settings.key_scope
    );
    info!(
        "Idle keys expire after {}s, swept every {}s",
        args.expire_after_secs, args.sweep_interval_secs
    );

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    limiter.shutdown().await;
    info!("Gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
