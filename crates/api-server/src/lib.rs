//! Dashboard Watchlist API Server
//!
//! HTTP surface over the watchlist store: one route module per collection
//! (US stocks, crypto, Korean stocks, weather cities) plus a health probe.
//! Every endpoint answers with the `{"success": ..}` envelope the dashboard
//! frontend expects.

pub mod config;
mod crypto_routes;
mod korean_stock_routes;
mod request_id;
mod stock_routes;
mod weather_routes;

use std::net::SocketAddr;

use axum::{
    extract::State,
    http::{HeaderValue, Method, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tokio::signal::unix::SignalKind;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use watchlist_store::{
    StoreError, TickerRepository, WatchlistDb, CRYPTO, KOREAN_STOCKS, STOCKS, WEATHER_CITIES,
};

use config::ServerConfig;

/// Shared state for all routes.
#[derive(Clone)]
pub struct AppState {
    pub db: WatchlistDb,
}

impl AppState {
    pub fn new(db: WatchlistDb) -> Self {
        Self { db }
    }

    pub fn stocks(&self) -> TickerRepository {
        TickerRepository::new(self.db.clone(), &STOCKS)
    }

    pub fn crypto(&self) -> TickerRepository {
        TickerRepository::new(self.db.clone(), &CRYPTO)
    }

    pub fn korean_stocks(&self) -> TickerRepository {
        TickerRepository::new(self.db.clone(), &KOREAN_STOCKS)
    }

    pub fn weather_cities(&self) -> TickerRepository {
        TickerRepository::new(self.db.clone(), &WEATHER_CITIES)
    }
}

/// JSON envelope shared by every endpoint.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiErrorBody>,
}

/// Error half of the envelope.
#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    pub kind: &'static str,
    pub message: String,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(kind: &'static str, message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ApiErrorBody { kind, message }),
        }
    }
}

/// Route-level error. Store errors map onto status codes; anything else is
/// a masked 500 so internals never leak to the frontend.
#[derive(Debug)]
pub enum AppError {
    Store(StoreError),
    Internal(anyhow::Error),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::Store(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, kind, message) = match self {
            AppError::Store(err) => {
                let kind = err.kind();
                match err {
                    StoreError::Validation(msg) => (StatusCode::BAD_REQUEST, kind, msg),
                    StoreError::Conflict(msg) => (StatusCode::CONFLICT, kind, msg),
                    StoreError::NotFound(msg) => (StatusCode::NOT_FOUND, kind, msg),
                    StoreError::Storage(inner) => {
                        tracing::error!("Storage failure: {}", inner);
                        (
                            StatusCode::INTERNAL_SERVER_ERROR,
                            kind,
                            "storage operation failed".to_string(),
                        )
                    }
                }
            }
            AppError::Internal(err) => {
                tracing::error!("Unhandled error: {:#}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal",
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ApiResponse::<()>::failure(kind, message))).into_response()
    }
}

#[derive(Debug, Serialize)]
struct HealthStatus {
    status: &'static str,
    database: &'static str,
    checked_at: String,
}

/// Liveness + storage reachability probe.
async fn health(State(state): State<AppState>) -> Result<Json<ApiResponse<HealthStatus>>, AppError> {
    sqlx::query("SELECT 1")
        .execute(state.db.pool())
        .await
        .map_err(StoreError::from)?;

    Ok(Json(ApiResponse::success(HealthStatus {
        status: "ok",
        database: "reachable",
        checked_at: chrono::Utc::now().to_rfc3339(),
    })))
}

fn build_cors(config: &ServerConfig) -> CorsLayer {
    match config
        .cors_origin
        .as_deref()
        .and_then(|origin| origin.parse::<HeaderValue>().ok())
    {
        Some(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers(Any),
        // Local dashboard dev servers move between ports; stay permissive
        // unless an origin is pinned.
        None => CorsLayer::permissive(),
    }
}

/// Assemble the full router.
pub fn app(state: AppState, config: &ServerConfig) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .merge(stock_routes::stock_routes())
        .merge(crypto_routes::crypto_routes())
        .merge(korean_stock_routes::korean_stock_routes())
        .merge(weather_routes::weather_routes())
        .layer(middleware::from_fn(request_id::request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(build_cors(config))
        .with_state(state)
}

/// Bring the server up and run until SIGINT/SIGTERM.
pub async fn run_server() -> anyhow::Result<()> {
    // 1. Configuration
    let config = ServerConfig::from_env()?;

    // 2. Storage (creates the database and schema on first run)
    let db = WatchlistDb::new(&config.database_url).await?;
    tracing::info!("Watchlist store ready at {}", config.database_url);

    if config.seed_defaults {
        watchlist_store::seed::seed_defaults(&db).await?;
    }

    // 3. Router and listener
    let state = AppState::new(db);
    let router = app(state, &config);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Dashboard API listening on {}", addr);

    // 4. Serve until a shutdown signal arrives
    let mut sigterm = tokio::signal::unix::signal(SignalKind::terminate())?;
    let shutdown = async move {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => tracing::info!("Received SIGINT, shutting down"),
            _ = sigterm.recv() => tracing::info!("Received SIGTERM, shutting down"),
        }
    };

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await?;

    tracing::info!("Dashboard API stopped");
    Ok(())
}
