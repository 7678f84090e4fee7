//! Prediction API Server
//!
//! HTTP surface for the diabetes and insurance prediction services. Both
//! frozen artifacts are loaded once at startup into a `ServiceContext`;
//! handlers share it read-only, so the per-request path takes no locks.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use prediction_service::{PredictionError, ServiceContext};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

mod routes;
mod settings;

pub use settings::Settings;

/// Application state shared across handlers
pub struct AppState {
    /// Frozen models and preprocessing statistics, immutable after load
    pub context: ServiceContext,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Create new application state around a loaded service context
    pub fn new(context: ServiceContext) -> Self {
        Self {
            context,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: std::time::Instant::now(),
        }
    }
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub endpoints: EndpointStatus,
}

/// Per-endpoint model status
#[derive(Debug, Serialize)]
pub struct EndpointStatus {
    pub diabetes: String,
    pub insurance: String,
}

/// JSON error body returned for any failed request
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Wraps pipeline failures into the `{error}` contract with a status that
/// distinguishes bad input from broken artifacts
pub struct ApiError(pub PredictionError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = if self.0.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            error!(error = %self.0, "artifact failure during request");
            StatusCode::INTERNAL_SERVER_ERROR
        };
        let body = ErrorBody {
            error: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<PredictionError> for ApiError {
    fn from(err: PredictionError) -> Self {
        ApiError(err)
    }
}

/// Create the application router.
///
/// The original handlers answered every request with permissive CORS
/// headers; the CORS layer reproduces that contract.
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(health_handler))
        .route(
            "/api/diabetes",
            get(routes::diabetes::running).post(routes::diabetes::predict),
        )
        .route(
            "/api/insurance",
            get(routes::insurance::running).post(routes::insurance::predict),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check handler
async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        endpoints: EndpointStatus {
            diabetes: "ok".to_string(),
            insurance: "ok".to_string(),
        },
    })
}

/// Initialize logging
pub fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}

/// Run the server until shutdown
pub async fn run_server(settings: &Settings, context: ServiceContext) -> anyhow::Result<()> {
    let state = Arc::new(AppState::new(context));
    let app = create_router(state);

    info!("Starting prediction API server on {}", settings.listen_addr);

    let listener = tokio::net::TcpListener::bind(&settings.listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
