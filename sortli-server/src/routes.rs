//! HTTP routes for the classification endpoint.

use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{DefaultBodyLimit, State, rejection::BytesRejection},
    http::{
        HeaderName, Method, StatusCode,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    routing::{get, post},
};
use serde_json::{Value, json};
use sortli_core::{ClassificationRequest, ClassificationResult, ClassificationService, TaxonomyEntry};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use crate::error::ApiError;

/// Path of the classification endpoint.
pub const CLASSIFY_PATH: &str = "/classify-waste";
/// Same endpoint under the hosted-function prefix older clients call.
pub const FUNCTION_PATH: &str = "/functions/v1/classify-waste";
/// Request body ceiling; fits a 10 MB photo after base64 encoding.
pub const DEFAULT_MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

/// State shared across HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// Classification service; immutable and shared by all requests.
    pub service: Arc<ClassificationService>,
    /// Largest accepted request body in bytes.
    pub max_body_bytes: usize,
}

/// Build the application router with the provided state.
pub fn app(state: AppState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.max_body_bytes);
    Router::new()
        .route(CLASSIFY_PATH, post(classify_waste).options(preflight))
        .route(FUNCTION_PATH, post(classify_waste).options(preflight))
        .route("/categories", get(categories))
        .route("/health", get(health))
        .layer(body_limit)
        .layer(cors())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Permissive CORS: any origin, the headers browser clients send.
fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            AUTHORIZATION,
            CONTENT_TYPE,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
        ])
}

// OPTIONS requests without CORS request headers still get an empty 200.
async fn preflight() -> StatusCode {
    StatusCode::OK
}

async fn classify_waste(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<ClassificationResult>, ApiError> {
    let body = body.map_err(|rejection| {
        warn!("rejecting classification body: {rejection}");
        ApiError::UnreadableBody(rejection)
    })?;
    let request: ClassificationRequest = serde_json::from_slice(&body).map_err(|err| {
        warn!("rejecting classification body: {err}");
        ApiError::MalformedBody(err.to_string())
    })?;

    let result = state.service.classify(&request).await?;
    Ok(Json(result))
}

async fn categories(State(state): State<AppState>) -> Json<Vec<&'static TaxonomyEntry>> {
    Json(state.service.taxonomy().entries().collect())
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
