use axum::{
    extract::{Query, RawQuery, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use takana_catalog::CatalogState;

use crate::view::{StorefrontPage, StorefrontQuery};

use super::AppState;

/// `GET /`: one full render cycle of the storefront.
pub(super) async fn storefront_page(
    State(state): State<AppState>,
    Query(query): Query<StorefrontQuery>,
    RawQuery(raw_query): RawQuery,
) -> Response {
    let catalog = state.load_catalog().await;
    let return_to = raw_query.map_or_else(|| "/".to_string(), |q| format!("/?{q}"));
    let page = StorefrontPage::build(&catalog, &query, state.client.base_url(), return_to);

    let status = if matches!(catalog, CatalogState::Failed { .. }) {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    };

    match state.views.render_storefront(&page) {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "storefront template failed to render");
            (StatusCode::INTERNAL_SERVER_ERROR, "internal error").into_response()
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct RefreshForm {
    pub return_to: Option<String>,
}

/// `POST /refresh`: invalidates the cache and sends the user back to the
/// page they were on, which then refetches.
pub(super) async fn refresh_catalog(
    State(state): State<AppState>,
    Form(form): Form<RefreshForm>,
) -> Redirect {
    state.catalog.lock().await.invalidate();
    Redirect::to(&local_return_path(form.return_to.as_deref()))
}

/// Accepts only same-origin paths so the refresh form cannot be used as an
/// open redirect.
fn local_return_path(raw: Option<&str>) -> String {
    match raw {
        Some(path) if path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') => {
            path.to_string()
        }
        _ => "/".to_string(),
    }
}
