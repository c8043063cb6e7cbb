//! HTTP server setup and management

use std::future::Future;
use axum::{
    routing::get,
    Router,
};
use tower_http::trace::TraceLayer;
use super::handlers::{AppState, badge};

/// Build the badge router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(badge))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server and serve until `shutdown` resolves
pub async fn start<F>(port: &str, state: AppState, shutdown: F) -> crate::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;
    tracing::info!("Badge server listening on http://{}/?context=<name>", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}
