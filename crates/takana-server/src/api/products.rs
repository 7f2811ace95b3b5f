use axum::{
    extract::{Query, State},
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use takana_core::{filter_products, inquiry_url, PriceBounds, Product};

use crate::middleware::RequestId;
use crate::view::StorefrontQuery;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct ProductItem {
    name: String,
    price: f64,
    price_per_kilo: Option<f64>,
    description: String,
    categories: Vec<String>,
    image_url: Option<String>,
    inquiry_url: String,
}

impl ProductItem {
    fn new(product: &Product, base_url: &str) -> Self {
        Self {
            name: product.name.clone(),
            price: product.price,
            price_per_kilo: product.price_per_kilo,
            description: product.description.clone(),
            categories: product.categories.clone(),
            image_url: product.image_url(base_url),
            inquiry_url: inquiry_url(product),
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct SelectedRange {
    min: f64,
    max: f64,
}

#[derive(Debug, Serialize)]
pub(super) struct CatalogView {
    status: &'static str,
    fetched_at: Option<DateTime<Utc>>,
    categories: Vec<String>,
    price_bounds: PriceBounds,
    selected_category: String,
    selected_range: SelectedRange,
    products: Vec<ProductItem>,
}

/// `GET /api/v1/products`: the filtered catalog as JSON, using the same
/// query parameters as the storefront page.
pub(super) async fn list_products(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<StorefrontQuery>,
) -> Result<Json<ApiResponse<CatalogView>>, ApiError> {
    let catalog_state = state.load_catalog().await;

    let Some(catalog) = catalog_state.catalog() else {
        return Err(ApiError::new(
            req_id.0,
            "catalog_unavailable",
            "catalog could not be fetched and nothing is cached",
        ));
    };

    let selection = query.resolve(catalog);
    let base_url = state.client.base_url();
    let products = filter_products(catalog, &selection.criteria)
        .into_iter()
        .map(|p| ProductItem::new(p, base_url))
        .collect();

    Ok(Json(ApiResponse {
        data: CatalogView {
            status: catalog_state.name(),
            fetched_at: catalog_state.fetched_at(),
            categories: selection.categories,
            price_bounds: selection.bounds,
            selected_category: selection.criteria.category.label().to_string(),
            selected_range: SelectedRange {
                min: selection.criteria.price_min,
                max: selection.criteria.price_max,
            },
            products,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}
