//! HTTP surface: `GET /api/getData?city=<name>` plus a liveness probe.

use std::collections::HashMap;

use anyhow::Context;
use axum::{
    Router,
    extract::{Query, State},
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
    routing::get,
};
use tokio::{net::TcpListener, signal};
use tower_http::trace::TraceLayer;
use weather_core::{Config, WeatherProxy};

pub fn router(proxy: WeatherProxy) -> Router {
    Router::new()
        .route("/api/getData", get(get_data))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(proxy)
}

async fn health() -> &'static str {
    "OK"
}

/// Query parsed into a map so a repeated `city` keeps the last value
/// instead of rejecting the request.
async fn get_data(
    State(proxy): State<WeatherProxy>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let resp = proxy.get_data(params.get("city").map(String::as_str)).await;

    (
        resp.status(),
        [(CONTENT_TYPE, "application/json")],
        resp.into_body(),
    )
        .into_response()
}

/// Bind the configured address and serve until SIGINT/SIGTERM.
pub async fn serve(config: &Config) -> anyhow::Result<()> {
    let listener = TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.listen_addr))?;

    tracing::info!(
        addr = %config.listen_addr,
        upstream = %config.upstream.base_url,
        "weather proxy listening"
    );

    let app = router(WeatherProxy::from_config(&config.upstream));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server terminated with an error")?;

    tracing::info!("weather proxy stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
