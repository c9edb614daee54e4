//! Router assembly and server lifecycle.

use crate::config::{app_directory, Settings};
use crate::handlers::{
    app::{health_check, index},
    metrics::metrics,
    planner::{generate, reset, select_city, select_country, select_state, set_dates, set_interests},
};
use crate::middleware::metrics::metrics_middleware;
use crate::services::{metrics::init_metrics, GeoCatalog, HttpChatClient, PlannerSessions};
use crate::AppState;
use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use planner_core::error::AppError;
use planner_core::middleware::tracing::{request_id_middleware, REQUEST_ID_HEADER};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

pub fn build_router(state: AppState, session_idle: Duration, static_dir: PathBuf) -> Router {
    let idle_seconds = i64::try_from(session_idle.as_secs()).unwrap_or(i64::MAX);
    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(false) // Set to true in production with HTTPS
        .with_expiry(Expiry::OnInactivity(time::Duration::seconds(idle_seconds)));

    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        .route("/planner/country", post(select_country))
        .route("/planner/state", post(select_state))
        .route("/planner/city", post(select_city))
        .route("/planner/dates", post(set_dates))
        .route("/planner/interests", post(set_interests))
        .route("/planner/generate", post(generate))
        .route("/planner/reset", post(reset))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(session_layer)
        .layer(from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

/// A bound, ready-to-serve trip planner.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Wire up the catalog, backend client and session registry and bind the listener.
    ///
    /// Port 0 binds a random port.
    pub async fn build(settings: Settings) -> Result<Self, AppError> {
        init_metrics().map_err(|e| {
            tracing::error!("Failed to initialize metrics: {}", e);
            AppError::InternalError(e.into())
        })?;

        let geo = GeoCatalog::bundled().map_err(|e| {
            tracing::error!("Failed to load geographic dataset: {}", e);
            AppError::InternalError(e.into())
        })?;

        let chat_client = HttpChatClient::new(settings.backend.clone());
        tracing::info!(url = %chat_client.chat_url(), "Using itinerary backend");

        let session_idle = settings.server.session_idle();
        let state = AppState::new(
            Arc::new(geo),
            Arc::new(chat_client),
            Arc::new(PlannerSessions::new(session_idle)),
        );

        let static_dir = app_directory()?.join("static");
        let router = build_router(state, session_idle, static_dir);

        let address = format!("{}:{}", settings.server.host, settings.server.port);
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", address, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Starting trip-planner on {}:{}", settings.server.host, port);

        Ok(Self {
            port,
            listener,
            router,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router).await
    }
}
