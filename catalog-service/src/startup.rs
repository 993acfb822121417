//! Application startup and lifecycle management.
//!
//! The public API (two lookup routes) and the operational endpoints
//! (health, readiness, metrics) are served on separate listeners.

use crate::config::CatalogConfig;
use crate::handlers;
use crate::services::{CatalogStore, MongoDb};
use axum::{middleware::from_fn, routing::get, Router};
use service_core::error::AppError;
use service_core::middleware::{metrics_middleware, request_id_middleware};
use std::future::{Future, IntoFuture};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tokio::time::Instant;
use tower_http::trace::TraceLayer;

/// Upper bound on releasing the MongoDB connection during shutdown.
const DISCONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Shared application state. Immutable after startup.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CatalogStore>,
    pub query_timeout: Duration,
}

impl AppState {
    pub fn new(store: Arc<dyn CatalogStore>, query_timeout: Duration) -> Self {
        Self {
            store,
            query_timeout,
        }
    }

    /// Deadline for a lookup starting now.
    pub fn lookup_deadline(&self) -> Instant {
        Instant::now() + self.query_timeout
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/products/:id", get(handlers::get_product))
        .route("/api/customers/:id", get(handlers::get_customer))
        .fallback(handlers::fallback)
        .layer(from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

pub fn build_ops_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics_endpoint))
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    ops_port: u16,
    listener: TcpListener,
    ops_listener: TcpListener,
    db: MongoDb,
    state: AppState,
}

impl Application {
    /// Connects to MongoDB and binds both listeners. A database that cannot be
    /// reached within the connect timeout is a startup failure.
    pub async fn build(config: CatalogConfig) -> Result<Self, AppError> {
        let db = MongoDb::connect(&config.mongodb).await.map_err(|e| {
            tracing::error!("Failed to connect to MongoDB: {}", e);
            e
        })?;

        let state = AppState::new(Arc::new(db.clone()), config.mongodb.query_timeout);

        // Port 0 = random port for testing
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        let ops_addr = SocketAddr::from(([0, 0, 0, 0], ops_port_for(config.common.port)));
        let ops_listener = TcpListener::bind(ops_addr).await.map_err(|e| {
            tracing::error!("Failed to bind ops listener to {}: {}", ops_addr, e);
            AppError::from(e)
        })?;
        let ops_port = ops_listener.local_addr()?.port();

        tracing::info!(
            "Catalog service: API on port {}, health/metrics on port {}",
            port,
            ops_port
        );
        tracing::info!("GET /api/products/:id");
        tracing::info!("GET /api/customers/:id");

        Ok(Self {
            port,
            ops_port,
            listener,
            ops_listener,
            db,
            state,
        })
    }

    /// Get the API port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Get the health/metrics port the server is listening on.
    pub fn ops_port(&self) -> u16 {
        self.ops_port
    }

    pub fn db(&self) -> &MongoDb {
        &self.db
    }

    /// Serve until SIGINT or SIGTERM.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.run_with_shutdown(shutdown_signal()).await
    }

    /// Serve until `shutdown` resolves, drain in-flight API requests, then
    /// release the database connection.
    pub async fn run_with_shutdown<F>(self, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let api = axum::serve(self.listener, build_router(self.state.clone()))
            .with_graceful_shutdown(shutdown)
            .into_future();
        let ops = axum::serve(self.ops_listener, build_ops_router(self.state)).into_future();

        let result = tokio::select! {
            result = api => result.map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                e
            }),
            result = ops => result.map_err(|e| {
                tracing::error!("Ops server error: {}", e);
                e
            }),
        };

        self.db.disconnect(DISCONNECT_TIMEOUT).await;
        tracing::info!("Service shutdown complete");

        result
    }
}

/// The port after `port`, or 0 (any free port) when the API port is random
/// or already the last one.
fn ops_port_for(port: u16) -> u16 {
    if port == 0 {
        0
    } else {
        port.checked_add(1).unwrap_or(0)
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received SIGINT, starting graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ops_port_follows_api_port() {
        assert_eq!(ops_port_for(8080), 8081);
        assert_eq!(ops_port_for(0), 0);
    }

    #[test]
    fn last_port_gets_a_free_ops_port() {
        assert_eq!(ops_port_for(u16::MAX), 0);
        assert_eq!(ops_port_for(u16::MAX - 1), u16::MAX);
    }
}
