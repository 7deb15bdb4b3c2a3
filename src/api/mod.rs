//! REST API for production planning.
//!
//! Provides one endpoint:
//! - `POST /productionplan`: computes the plan for a JSON payload

mod handlers;
mod types;

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::post;
use tracing::info;

use crate::dispatch::Dispatcher;

pub use types::ErrorResponse;

/// Immutable application state shared across all request handlers.
///
/// Holds only the dispatcher settings; every request decodes its own plant
/// and fuel data, so no locks are needed.
#[derive(Debug, Default, Clone)]
pub struct AppState {
    /// Dispatcher applied to every request.
    pub dispatcher: Dispatcher,
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/productionplan", post(handlers::post_production_plan))
        .with_state(state)
}

/// Binds to the given address and serves the API until the server stops.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind to `addr` or the
/// server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "API server listening");
    axum::serve(listener, app).await
}
