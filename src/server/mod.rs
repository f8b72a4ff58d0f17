//! HTTP API server
//!
//! Thin axum layer over the cache-or-fetch adapter and the statistics
//! engine. All routes live under `/api`.

mod response;
mod routes;
mod state;

use std::future::Future;
use std::net::SocketAddr;

use axum::Router;
use log::info;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use crate::error::{Error, Result};

pub use response::UNAVAILABLE_MESSAGE;
pub use state::AppState;

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .nest("/api", routes::routes().fallback(routes::not_found))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serve until `shutdown` resolves
pub async fn serve<S>(addr: SocketAddr, state: AppState, shutdown: S) -> Result<()>
where
    S: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind(addr).await.map_err(|e| match e.kind() {
        std::io::ErrorKind::AddrInUse => {
            Error::Other(format!("Failed to bind to {}: address already in use", addr))
        }
        _ => Error::Other(format!("Failed to bind to {}: {}", addr, e)),
    })?;

    info!("Listening on http://{}", addr);
    info!("Health: http://{}/api/health", addr);

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Server stopped");
    Ok(())
}
