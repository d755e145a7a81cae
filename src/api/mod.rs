//! REST API over the pricing engine.
//!
//! Routes:
//! - `GET /health`
//! - `POST /calculate-proposal`: price and rank client-supplied kits
//! - `POST /quick-quote`: size a kit from consumption or bill value
//! - `GET /components`: the loaded component catalog
//! - `GET /config`: the base pricing policy
//! - `POST /test-calculation`: price the built-in sample kit

mod handlers;
mod types;

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};

use crate::catalog::Catalog;
use crate::pricing::ProposalCalculator;

pub use types::{CalculateProposalRequest, ErrorResponse};

/// Immutable application state shared across all request handlers.
///
/// The calculator's base policy is read-only and every request merges its
/// overrides into a fresh snapshot, so no locks are needed.
pub struct AppState {
    pub calculator: ProposalCalculator,
    /// Catalog for quick quotes; `None` turns those routes into 503s.
    pub catalog: Option<Catalog>,
}

/// Builds the axum router with all API routes.
///
/// # Arguments
///
/// * `state` - Shared application state
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/calculate-proposal", post(handlers::calculate_proposal))
        .route("/quick-quote", post(handlers::quick_quote))
        .route("/components", get(handlers::components))
        .route("/config", get(handlers::config))
        .route("/test-calculation", post(handlers::test_calculation))
        .with_state(state)
}

/// Binds to the given address and serves the API until the server stops.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind to `addr` or the server
/// fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "API server listening");
    axum::serve(listener, app).await
}
