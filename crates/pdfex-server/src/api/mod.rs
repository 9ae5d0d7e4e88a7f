mod products;

use std::sync::Arc;

use axum::{
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use pdfex_catalogue::{CatalogueController, CatalogueError};
use pdfex_core::Environment;
use pdfex_store::ProductStore;
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{request_id, RequestId};
use crate::pages;

/// Shared handler state: the one catalogue session this process serves.
pub struct AppState<S> {
    pub catalogue: Arc<CatalogueController<S>>,
    pub env: Environment,
}

// Manual impl so `S` itself need not be `Clone`.
impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            catalogue: Arc::clone(&self.catalogue),
            env: self.env,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

impl ResponseMeta {
    pub(crate) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" => StatusCode::BAD_REQUEST,
            "conflict" => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

/// Refused catalogue commands are conflicts with the session's current
/// state, not server faults.
pub(crate) fn map_catalogue_error(request_id: String, error: &CatalogueError) -> ApiError {
    tracing::debug!(error = %error, "catalogue command refused");
    ApiError::new(request_id, "conflict", error.to_string())
}

/// Runs the session's first load if nobody has triggered it yet. A load
/// already in flight is not an error here; the caller renders the loading
/// state instead.
pub(crate) async fn ensure_session_started<S: ProductStore>(
    catalogue: &CatalogueController<S>,
) {
    if let Err(e) = catalogue.ensure_started().await {
        tracing::debug!(error = %e, "initial load already running");
    }
}

fn build_cors(env: Environment) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-request-id"),
        ]);
    match env {
        // Production serves the page and its API from a single origin.
        Environment::Production => cors,
        Environment::Development | Environment::Test => {
            cors.allow_origin(tower_http::cors::Any)
        }
    }
}

pub fn build_app<S: ProductStore + 'static>(state: AppState<S>) -> Router {
    let cors = build_cors(state.env);
    Router::new()
        .route("/", get(pages::index::<S>))
        .route("/load-more", post(pages::load_more::<S>))
        .route("/reload", post(pages::reload::<S>))
        .route("/api/v1/products", get(products::list_products::<S>))
        .route("/api/v1/products/next", post(products::load_next::<S>))
        .route("/health", get(health))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(cors)
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(Extension(req_id): Extension<RequestId>) -> impl IntoResponse {
    Json(ApiResponse {
        data: HealthData { status: "ok" },
        meta: ResponseMeta::new(req_id.0),
    })
}
