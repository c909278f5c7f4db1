//! # LEXREF API Server
//!
//! REST surface over the legal reference proxy, consumed by the practice
//! management back office and the client document portal.
//!
//! ## Endpoints
//!
//! - `GET /api/v1/references/:key` - Reference set by logical key (`?no_cache=true` to bypass)
//! - `GET /api/v1/proxy?url=...` - Fetch an arbitrary absolute URL through the cache
//! - `GET /api/v1/cache` - Cache statistics
//! - `DELETE /api/v1/cache` - Clear the whole cache
//! - `DELETE /api/v1/cache/:key` - Clear one key
//! - `GET /api/v1/endpoints` - List the endpoint table
//! - `POST /api/v1/endpoints` - Register or replace an endpoint
//! - `GET /api/v1/upstream/health` - Probe the upstream store
//!
//! ## Example
//!
//! ```rust,ignore
//! use lexref_api::{ApiServer, ApiConfig};
//!
//! let server = ApiServer::new(ApiConfig::from_env())?;
//! server.run(([0, 0, 0, 0], 3002)).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod dto;
mod error;
mod handlers;
mod routes;
mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::{ApiConfig, AppState};

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use lexref_core::error::Result;

/// API server for LEXREF.
pub struct ApiServer {
    state: Arc<AppState>,
}

impl ApiServer {
    /// Creates a new API server with the given configuration.
    pub fn new(config: ApiConfig) -> Result<Self> {
        Ok(Self {
            state: Arc::new(AppState::new(config)?),
        })
    }

    /// Creates the router with all routes configured.
    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        create_router(self.state.clone())
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    }

    /// Runs the server on the given address.
    pub async fn run(self, addr: impl Into<SocketAddr>) -> std::io::Result<()> {
        let addr = addr.into();
        let listener = tokio::net::TcpListener::bind(addr).await?;

        info!(
            base_url = %self.state.proxy.base_url(),
            "LEXREF API server listening on {}", addr
        );

        axum::serve(listener, self.router()).await
    }
}
