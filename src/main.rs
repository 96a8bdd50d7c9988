//! QA Arena · submission scoring backend
//!
//! - Axum HTTP API for validating and storing challenge submissions
//! - Heuristic scorers for manual test-case tables and automation code
//! - In-memory submission store
//!
//! Important env variables:
//!   PORT                  : u16, overrides `server.port` (default 3000)
//!   QA_ARENA_CONFIG_PATH  : path to TOML config (server settings + challenge rule overrides)
//!   LOG_LEVEL             : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT            : "pretty" (default) or "json"

mod config;
mod domain;
mod error;
mod extract;
mod logic;
mod protocol;
mod routes;
mod rules;
mod scoring;
mod state;
mod telemetry;
mod util;

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::config::load_app_config_from_env;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  let cfg = load_app_config_from_env();
  let state = Arc::new(AppState::new(&cfg));
  let app = build_router(state, cfg.server.max_body_bytes);

  let addr = SocketAddr::from(([0, 0, 0, 0], cfg.effective_port()));
  let listener = TcpListener::bind(addr).await?;
  info!(target: "qa_arena", %addr, max_body_bytes = cfg.server.max_body_bytes, "HTTP server listening");
  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;
  info!(target: "qa_arena", "Server stopped");
  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    warn!(target: "qa_arena", error = %e, "Failed to listen for Ctrl-C; running until killed");
    std::future::pending::<()>().await;
  }
  info!(target: "qa_arena", "Shutdown signal received");
}
