mod products;
mod storefront;

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use takana_catalog::{CatalogCache, CatalogClient, CatalogState};
use tokio::sync::Mutex;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{request_id, request_span, RequestId};
use crate::view::Views;

#[derive(Clone)]
pub struct AppState {
    /// Held across the fetch so concurrent renders share one attempt.
    pub catalog: Arc<Mutex<CatalogCache>>,
    pub client: CatalogClient,
    pub views: Arc<Views>,
}

impl AppState {
    #[must_use]
    pub fn new(client: CatalogClient, cache: CatalogCache, views: Views) -> Self {
        Self {
            catalog: Arc::new(Mutex::new(cache)),
            client,
            views: Arc::new(views),
        }
    }

    /// Runs the fetch half of a render cycle.
    ///
    /// The render's start time is taken before waiting on the lock, so a
    /// render queued behind a failing fetch reuses that fetch's outcome.
    pub async fn load_catalog(&self) -> CatalogState {
        let started_at = Utc::now();
        let mut cache = self.catalog.lock().await;
        cache.get_or_fetch(&self.client, started_at).await
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
    catalog: &'static str,
    fetched_at: Option<DateTime<Utc>>,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
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
            "catalog_unavailable" => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static("x-request-id")])
}

fn api_router() -> Router<AppState> {
    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/products", get(products::list_products))
        .layer(build_cors())
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(storefront::storefront_page))
        .route("/refresh", post(storefront::refresh_catalog))
        .merge(api_router())
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(request_id))
                .layer(TraceLayer::new_for_http().make_span_with(request_span)),
        )
        .with_state(state)
}

/// Reports the cache state without triggering a fetch. A busy cache lock
/// means a fetch is in flight.
async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    let catalog = state
        .catalog
        .try_lock()
        .map_or(CatalogState::Fetching, |cache| cache.status());

    Json(ApiResponse {
        data: HealthData {
            status: "ok",
            catalog: catalog.name(),
            fetched_at: catalog.fetched_at(),
        },
        meta: ResponseMeta::new(req_id.0),
    })
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
