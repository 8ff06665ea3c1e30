//! HTTP layer: routing, handlers and error mapping

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::application::services::HierarchyService;
use crate::infrastructure::{InfraError, InfraResult};

pub mod error;
pub mod handlers;
pub mod openapi;

pub use error::{ApiError, ErrorBody};

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub hierarchy: Arc<HierarchyService>,
    /// Base URL advertised in the API document
    pub public_url: String,
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let parties = Router::new()
        .route(
            "/parties",
            get(handlers::list_parties).post(handlers::create_party),
        )
        .route(
            "/parties/:id",
            get(handlers::get_party).delete(handlers::delete_party),
        )
        .route("/parties/:id/parents", get(handlers::list_parents))
        .route("/parties/:id/subsidiaries", get(handlers::list_subsidiaries));

    Router::new()
        .nest("/api", parties)
        .route("/api-docs", get(openapi::api_docs))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve(state: AppState, addr: &str) -> InfraResult<()> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| InfraError::io(format!("bind {addr}"), e))?;
    let local = listener
        .local_addr()
        .map_err(|e| InfraError::io("read local address", e))?;
    info!("Server is running at http://{local}");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| InfraError::Server {
            message: e.to_string(),
        })
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("cannot listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
