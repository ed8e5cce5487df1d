//! In-process stand-in for the asset REST API.
//!
//! Feature-gated behind `stub`. Serves the `/api/v1/assets` contract from an
//! [`InMemorySource`] for local development and integration tests:
//! - `GET /api/v1/assets?skip&limit`: one page of assets
//! - `POST /api/v1/assets`: create
//! - `GET|PUT|DELETE /api/v1/assets/{id}`: read, replace, delete

mod handlers;
mod types;

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tokio::net::TcpListener;
use tracing::info;

use crate::source::InMemorySource;

pub use types::ErrorResponse;

/// State shared by all stub handlers.
pub struct StubState {
    /// Backing store.
    pub source: InMemorySource,
    /// Bearer token required on every request; `None` disables auth.
    pub token: Option<String>,
}

impl StubState {
    /// Open stub over `source`.
    pub fn new(source: InMemorySource) -> Self {
        Self {
            source,
            token: None,
        }
    }

    /// Requires `Authorization: Bearer <token>`.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }
}

/// Builds the axum router with all asset routes.
pub fn router(state: Arc<StubState>) -> Router {
    Router::new()
        .route(
            "/api/v1/assets",
            get(handlers::list_assets).post(handlers::create_asset),
        )
        .route(
            "/api/v1/assets/{id}",
            get(handlers::get_asset)
                .put(handlers::update_asset)
                .delete(handlers::delete_asset),
        )
        .with_state(state)
}

/// Binds to `addr` and serves the stub until the process exits.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<StubState>, addr: SocketAddr) -> io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    serve_on(listener, state).await
}

/// Serves the stub on an already-bound listener.
///
/// # Errors
///
/// Returns an `io::Error` if the server fails.
pub async fn serve_on(listener: TcpListener, state: Arc<StubState>) -> io::Result<()> {
    info!(addr = %listener.local_addr()?, "stub asset API listening");
    axum::serve(listener, router(state)).await
}
