use axum::routing::{get, post};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;

use crate::core::planner::Planner;

pub mod error;
mod generate;

pub use error::{ApiError, ApiErrorResponse, GENERATION_FAILED};

pub(crate) struct ServerState {
    pub(crate) planner: Planner,
}

/// Build the HTTP routes around a planner
pub fn router(planner: Planner) -> Router {
    let state = Arc::new(ServerState { planner });
    Router::new()
        .route("/health", get(health))
        .route("/generate", post(generate::generate_itinerary))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// A running HTTP server, stopped on `shutdown` or drop.
pub struct Server {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl Server {
    pub async fn start(addr: SocketAddr, planner: Planner) -> std::io::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        let addr = listener.local_addr()?;
        let app = router(planner);
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            let result = axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.await;
                })
                .await;
            if let Err(err) = result {
                tracing::error!(target: "trip_planner::http", error = %err, "server terminated");
            }
        });

        Ok(Server {
            addr,
            shutdown: Some(shutdown_tx),
            task: Some(task),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn shutdown(&mut self) -> Result<(), String> {
        if let Some(sender) = self.shutdown.take() {
            sender
                .send(())
                .map_err(|_| "failed to send server shutdown signal".to_string())
        } else {
            Ok(())
        }
    }

    /// Signal shutdown and wait for in-flight requests to finish
    pub async fn stop(mut self) -> Result<(), String> {
        self.shutdown()?;
        if let Some(task) = self.task.take() {
            task.await.map_err(|err| err.to_string())?;
        }
        Ok(())
    }
}

impl Drop for Server {
    fn drop(&mut self) {
        let _ = self.shutdown();
    }
}

async fn health() -> &'static str {
    "ok"
}
