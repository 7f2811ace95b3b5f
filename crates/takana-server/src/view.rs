//! View models and HTML rendering for the storefront page.

use serde::{Deserialize, Serialize};
use takana_catalog::CatalogState;
use takana_core::{
    discover_categories, filter_products, format_price, inquiry_url, CategoryFilter,
    FilterCriteria, PriceBounds, Product, ALL_CATEGORIES,
};

/// Cards per grid row.
pub const GRID_COLUMNS: usize = 3;

const STOREFRONT_TEMPLATE: &str = "storefront.html";

/// Control-surface inputs as they arrive in the query string.
///
/// Prices are taken as text so that empty or malformed inputs fall back to
/// the catalog bounds instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct StorefrontQuery {
    pub category: Option<String>,
    pub name: Option<String>,
    pub price_min: Option<String>,
    pub price_max: Option<String>,
}

/// Filter inputs resolved against a live catalog.
#[derive(Debug, Clone)]
pub struct Selection {
    pub categories: Vec<String>,
    pub bounds: PriceBounds,
    pub criteria: FilterCriteria,
    /// The name filter exactly as typed, for redisplay.
    pub name_input: String,
}

impl StorefrontQuery {
    #[must_use]
    pub fn resolve(&self, catalog: &[Product]) -> Selection {
        let categories = discover_categories(catalog);
        let bounds = PriceBounds::from_catalog(catalog);
        let category = CategoryFilter::from_selection(self.category.as_deref(), &categories);
        let (lo, hi) = bounds.select(
            parse_price(self.price_min.as_deref()),
            parse_price(self.price_max.as_deref()),
        );
        let name_input = self.name.clone().unwrap_or_default();
        let criteria = FilterCriteria::new(category, &name_input, lo, hi);

        Selection {
            categories,
            bounds,
            criteria,
            name_input,
        }
    }
}

fn parse_price(raw: Option<&str>) -> Option<f64> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<f64>().ok())
}

/// One product card, with every display string precomputed.
#[derive(Debug, Clone, Serialize)]
pub struct ProductCard {
    pub name: String,
    pub price_label: String,
    pub price_per_kilo_label: Option<String>,
    pub description: String,
    pub image_url: Option<String>,
    pub inquiry_url: String,
}

impl ProductCard {
    #[must_use]
    pub fn new(product: &Product, base_url: &str) -> Self {
        Self {
            name: product.name.clone(),
            price_label: format_price(product.price),
            price_per_kilo_label: product.price_per_kilo.map(format_price),
            description: product.description.clone(),
            image_url: product.image_url(base_url),
            inquiry_url: inquiry_url(product),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BannerKind {
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct Banner {
    pub kind: BannerKind,
    pub message: &'static str,
}

impl Banner {
    #[must_use]
    pub fn for_state(state: &CatalogState) -> Option<Self> {
        match state {
            CatalogState::Ready { .. } => Some(Self {
                kind: BannerKind::Success,
                message: "✅ Productos cargados desde el servidor",
            }),
            CatalogState::Degraded { .. } => Some(Self {
                kind: BannerKind::Warning,
                message: "⚠️ No se pudo conectar al backend. Mostrando datos guardados.",
            }),
            CatalogState::Failed { .. } => Some(Self {
                kind: BannerKind::Error,
                message: "🚫 Tienda cerrada temporalmente. No hay datos.",
            }),
            CatalogState::Idle | CatalogState::Fetching => None,
        }
    }
}

/// Sidebar filter widgets. Absent when the render cycle failed.
#[derive(Debug, Clone, Serialize)]
pub struct FilterControls {
    /// `"Todas"` followed by the discovered categories.
    pub category_options: Vec<String>,
    pub selected_category: String,
    pub name_input: String,
    pub bounds_min: String,
    pub bounds_max: String,
    pub selected_min: String,
    pub selected_max: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct StorefrontPage {
    pub banner: Option<Banner>,
    pub controls: Option<FilterControls>,
    /// Cards chunked into rows of [`GRID_COLUMNS`]. Empty when nothing matched.
    pub rows: Vec<Vec<ProductCard>>,
    pub result_count: usize,
    /// `false` when the cycle failed and no grid or notice is shown.
    pub show_results: bool,
    /// Where the refresh form sends the user back to.
    pub return_to: String,
}

impl StorefrontPage {
    /// Runs the filtering and rendering half of a render cycle.
    ///
    /// `Ready` and `Degraded` states are filtered and laid out; any other
    /// state produces a page with only the banner and the refresh control.
    #[must_use]
    pub fn build(
        state: &CatalogState,
        query: &StorefrontQuery,
        base_url: &str,
        return_to: String,
    ) -> Self {
        let banner = Banner::for_state(state);

        let Some(catalog) = state.catalog() else {
            return Self {
                banner,
                controls: None,
                rows: Vec::new(),
                result_count: 0,
                show_results: false,
                return_to,
            };
        };

        let selection = query.resolve(catalog);
        let cards: Vec<ProductCard> = filter_products(catalog, &selection.criteria)
            .into_iter()
            .filter(|p| p.is_displayable())
            .map(|p| ProductCard::new(p, base_url))
            .collect();
        let result_count = cards.len();
        let rows = cards.chunks(GRID_COLUMNS).map(<[_]>::to_vec).collect();

        let mut category_options = Vec::with_capacity(selection.categories.len() + 1);
        category_options.push(ALL_CATEGORIES.to_string());
        category_options.extend(selection.categories.iter().cloned());

        let controls = FilterControls {
            category_options,
            selected_category: selection.criteria.category.label().to_string(),
            name_input: selection.name_input.clone(),
            bounds_min: selection.bounds.min.to_string(),
            bounds_max: selection.bounds.max.to_string(),
            selected_min: selection.criteria.price_min.to_string(),
            selected_max: selection.criteria.price_max.to_string(),
        };

        Self {
            banner,
            controls: Some(controls),
            rows,
            result_count,
            show_results: true,
            return_to,
        }
    }
}

/// Compiled page templates.
pub struct Views {
    env: minijinja::Environment<'static>,
}

impl Views {
    /// Compiles the bundled templates.
    ///
    /// # Errors
    ///
    /// Returns a [`minijinja::Error`] if a template fails to parse.
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = minijinja::Environment::new();
        env.add_template(
            STOREFRONT_TEMPLATE,
            include_str!("../templates/storefront.html"),
        )?;
        Ok(Self { env })
    }

    /// Renders the storefront page. Output is HTML-escaped.
    ///
    /// # Errors
    ///
    /// Returns a [`minijinja::Error`] if rendering fails.
    pub fn render_storefront(&self, page: &StorefrontPage) -> Result<String, minijinja::Error> {
        self.env
            .get_template(STOREFRONT_TEMPLATE)?
            .render(minijinja::context! { page => page })
    }
}

#[cfg(test)]
#[path = "view_test.rs"]
mod tests;
