mod extract;
pub mod handlers;
pub mod html;
pub mod types;

pub use extract::{ApiError, FormBody, JsonBody, Payload};
pub use handlers::AppState;

use crate::{Result, config::Config, model};
use axum::{
    Router,
    routing::{get, post},
};
use std::net::SocketAddr;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::demo))
        .route("/info", get(handlers::info))
        .route("/predict", post(handlers::predict))
        .route("/predict/", post(handlers::predict))
        .route("/submit", post(handlers::submit))
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(config: Config) -> Result<()> {
    // Initialize the model once; handlers only read it
    let model = model::from_config(&config.model).await?;
    let app = router(AppState::new(model));

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            warn!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await
        }
    }
}
