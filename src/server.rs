use anyhow::Result;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::{
    config::Config,
    handlers::{self, AppState},
    inventory::Inventory,
    metrics,
    signals::setup_signal_handlers,
};

/// Start the phone finder server
///
/// This function:
/// 1. Loads the inventory (an unreadable source yields an empty table)
/// 2. Initializes metrics if enabled
/// 3. Sets up signal handlers for graceful shutdown and reload
/// 4. Binds to the configured address and serves until shutdown
pub async fn start_server(config: Config, config_path: PathBuf) -> Result<()> {
    let inventory = Inventory::load(&config.inventory);
    info!(
        "Inventory ready: {} listings from {:?}",
        inventory.table.len(),
        inventory.source
    );

    let metrics_handle = if config.metrics.enabled {
        info!("Initializing Prometheus metrics...");
        let handle = Arc::new(metrics::init_metrics()?);
        metrics::record_listings(inventory.table.len());
        Some(handle)
    } else {
        None
    };

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));
    let metrics_endpoint = config.metrics.endpoint.clone();

    let app_state = AppState::new(config, inventory);

    // SIGTERM, SIGINT for shutdown; SIGHUP for reload
    let (shutdown_tx, signal_handle) = setup_signal_handlers(app_state.clone(), config_path);
    let mut shutdown_rx = shutdown_tx.subscribe();

    let app = create_router(app_state, metrics_handle.map(|h| (metrics_endpoint, h)));

    info!("Starting phone finder on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.recv().await;
            info!("Shutdown signal received, draining connections...");
        })
        .await?;

    signal_handle.await?;
    info!("Server stopped gracefully");

    Ok(())
}

/// Create the Axum router with all routes and middleware
pub fn create_router(
    app_state: AppState,
    metrics: Option<(String, Arc<PrometheusHandle>)>,
) -> Router {
    let app_routes = Router::new()
        .route("/", get(handlers::static_files::serve_index))
        .route("/ask", post(handlers::ask::handle_ask))
        .route("/api/listings", get(handlers::listings::search_listings))
        .route("/ready", get(handlers::health::readiness_check))
        .with_state(app_state);

    let mut router = Router::new()
        .route("/health", get(handlers::health::health_check))
        .merge(app_routes);

    if let Some((endpoint, handle)) = metrics {
        router = router.merge(
            Router::new()
                .route(&endpoint, get(handlers::metrics_handler::metrics))
                .with_state(handle),
        );
    }

    router
        .fallback(handlers::static_files::serve_static)
        .layer(DefaultBodyLimit::max(64 * 1024))
        .layer(TraceLayer::new_for_http())
}
