//! Axum router and server.

use axum::routing::{get, post};
use axum::Router;
use std::net::SocketAddr;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::cors::preflight;
use crate::handlers::{self, method_not_allowed};
use crate::{FunctionError, FunctionsState};

pub fn router(state: FunctionsState) -> Router {
    Router::new()
        .route(
            "/activations",
            get(handlers::activations)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .route(
            "/registration",
            post(handlers::registration)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .route(
            "/global",
            get(handlers::global)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .route("/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub struct FunctionsServer {
    pub addr: SocketAddr,
}

impl FunctionsServer {
    pub fn new(addr: SocketAddr) -> Self {
        Self { addr }
    }

    /// Serve until Ctrl+C or SIGTERM.
    pub async fn serve(&self, state: FunctionsState) -> Result<(), FunctionError> {
        let listener = tokio::net::TcpListener::bind(self.addr)
            .await
            .map_err(|e| FunctionError::Internal(format!("bind {}: {e}", self.addr)))?;
        info!(addr = %self.addr, "functions listening");
        axum::serve(listener, router(state))
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| FunctionError::Internal(e.to_string()))
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutting down");
}
