//! Trial server - trial lifecycle and download guardrails for the
//! community hub.
//!
//! Architecture:
//! - SeaORM for database access (SQLite)
//! - Axum for HTTP API with rate limiting
//! - Tokio for async runtime

mod entity;
mod error;
mod handlers;
mod model;
mod notify;
mod nudge;
mod prelude;
mod state;
mod sv;

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::routing::{get, post};
use tower::ServiceBuilder;
use tower_governor::GovernorLayer;
use tower_governor::governor::GovernorConfigBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::prelude::*;
use crate::state::AppState;

#[tokio::main]
async fn main() {
  dotenvy::dotenv().ok();

  // Initialize tracing
  tracing_subscriber::registry()
    .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
      "trial=debug,tower_http=debug,axum=trace,sea_orm=warn".into()
    }))
    .with(tracing_subscriber::fmt::layer())
    .init();

  let db_url =
    env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:trial.db?mode=rwc".into());

  info!("Starting Trial Server v{}", env!("CARGO_PKG_VERSION"));

  let app_state = Arc::new(AppState::new(&db_url).await);

  // Spawn session pruner: sessions that fall out of the activity window
  // stop counting as concurrent devices and can be dropped.
  let pruner_app = app_state.clone();
  tokio::spawn(async move {
    let mut interval = tokio::time::interval(Duration::from_secs(60));
    loop {
      interval.tick().await;
      if let Err(err) = pruner_app.sv().guardrails.prune_sessions().await {
        error!("Session prune failed: {}", err);
      }
    }
  });

  // Configure rate limiting (100 requests per minute per IP)
  let governor_conf = Arc::new(
    GovernorConfigBuilder::default()
      .per_second(2)
      .burst_size(100)
      .finish()
      .expect("Failed to build rate limiter config"),
  );

  let governor_limiter = governor_conf.limiter().clone();

  // Spawn rate limiter cleanup task
  tokio::spawn(async move {
    loop {
      tokio::time::sleep(Duration::from_secs(60)).await;
      governor_limiter.retain_recent();
    }
  });

  // Build router with middleware
  let app = Router::new()
    // API endpoints
    .route("/api/trial/start", post(handlers::start_trial))
    .route("/api/trial/status/{user_id}", get(handlers::trial_status))
    .route("/api/trial/nudge/{user_id}", get(handlers::trial_nudge))
    .route("/api/trial/convert", post(handlers::convert_to_paid))
    .route("/api/guardrails/{user_id}", get(handlers::guardrails))
    .route("/api/downloads", post(handlers::record_download))
    .route("/api/verify", post(handlers::verify_contact))
    .route("/api/heartbeat", post(handlers::heartbeat))
    .route("/health", get(handlers::health))
    // Middleware
    .layer(
      ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(GovernorLayer::new(governor_conf))
        .layer(
          CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
        ),
    )
    .with_state(app_state);

  // Start HTTP server
  let port: u16 = env::var("PORT")
    .ok()
    .and_then(|p| p.parse().ok())
    .unwrap_or(3000);
  let addr = SocketAddr::from(([0, 0, 0, 0], port));

  info!("HTTP server listening on {}", addr);

  let listener =
    tokio::net::TcpListener::bind(addr).await.expect("Failed to bind");
  axum::serve(listener, app).await.expect("Server error");
}
