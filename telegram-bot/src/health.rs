//! Liveness endpoint: `GET /` and `GET /health` report the bot's lifecycle status.
//! No session data is exposed.

use axum::{extract::State, response::Json, routing::get, Router};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

pub const SERVICE_NAME: &str = "chatgate";

/// Lifecycle of the bot as reported by the health endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BotStatus {
    #[default]
    Starting,
    Running,
    Stopping,
}

/// Shared status cell, written by the runner and read by the endpoint.
#[derive(Clone, Default)]
pub struct HealthState {
    status: Arc<RwLock<BotStatus>>,
}

impl HealthState {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set(&self, status: BotStatus) {
        *self.status.write().await = status;
        info!(status = ?status, "Bot status changed");
    }

    pub async fn get(&self) -> BotStatus {
        *self.status.read().await
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub bot_status: BotStatus,
    pub service: &'static str,
}

async fn health_handler(State(state): State<HealthState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        bot_status: state.get().await,
        service: SERVICE_NAME,
    })
}

/// Build health check routes.
pub fn health_routes(state: HealthState) -> Router {
    Router::new()
        .route("/", get(health_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

/// Serves the health routes on `0.0.0.0:port` until the task is dropped.
pub async fn serve_health(port: u16, state: HealthState) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "Health endpoint listening");
    axum::serve(listener, health_routes(state)).await?;
    Ok(())
}
