//! Catalog filtering by category, name substring, and price range.
//!
//! Everything here is pure: the storefront derives a fresh
//! [`FilterCriteria`] from the control-surface inputs on every render and
//! applies it to the in-memory catalog.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::products::Product;

/// Category selector value meaning "do not filter by category".
pub const ALL_CATEGORIES: &str = "Todas";

/// Slider bounds used when the catalog has no priced products.
const EMPTY_CATALOG_BOUNDS: (f64, f64) = (0.0, 1000.0);

/// Added to the upper bound when every product shares one price.
const DEGENERATE_RANGE_WIDENING: f64 = 1.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryFilter {
    All,
    Only(String),
}

impl CategoryFilter {
    /// Interprets a selector value against the discovered category list.
    ///
    /// Absent values, the [`ALL_CATEGORIES`] sentinel, and labels that are not
    /// in `known` all map to [`CategoryFilter::All`], mirroring a select box
    /// that can only hold one of its listed options.
    #[must_use]
    pub fn from_selection(selection: Option<&str>, known: &[String]) -> Self {
        match selection {
            Some(label) if label != ALL_CATEGORIES && known.iter().any(|k| k == label) => {
                Self::Only(label.to_string())
            }
            _ => Self::All,
        }
    }

    /// The label shown as selected in the category selector.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::All => ALL_CATEGORIES,
            Self::Only(label) => label.as_str(),
        }
    }
}

/// Inclusive price interval offered by the price slider, derived from the
/// live catalog.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceBounds {
    pub min: f64,
    pub max: f64,
}

impl PriceBounds {
    /// Computes slider bounds from the catalog's min and max price.
    ///
    /// An empty catalog yields `(0, 1000)`. A catalog whose products all share
    /// one price gets its upper bound widened by `1.0` so the range is never
    /// degenerate.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn from_catalog(catalog: &[Product]) -> Self {
        let mut prices = catalog.iter().map(|p| p.price).filter(|p| p.is_finite());

        let Some(first) = prices.next() else {
            return Self {
                min: EMPTY_CATALOG_BOUNDS.0,
                max: EMPTY_CATALOG_BOUNDS.1,
            };
        };

        let (min, mut max) = prices.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));

        if min == max {
            max += DEGENERATE_RANGE_WIDENING;
        }

        Self { min, max }
    }

    /// Turns user-supplied slider values into a valid selection within the
    /// bounds. Missing ends default to the full range; an inverted selection
    /// is swapped.
    #[must_use]
    pub fn select(&self, lo: Option<f64>, hi: Option<f64>) -> (f64, f64) {
        let clamp = |v: f64| v.clamp(self.min, self.max);
        let lo = lo.filter(|v| v.is_finite()).map_or(self.min, clamp);
        let hi = hi.filter(|v| v.is_finite()).map_or(self.max, clamp);
        if lo > hi {
            (hi, lo)
        } else {
            (lo, hi)
        }
    }
}

/// One render cycle's filter inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    pub category: CategoryFilter,
    /// Lower-cased and trimmed; empty means "no name filter".
    name_query: String,
    pub price_min: f64,
    pub price_max: f64,
}

impl FilterCriteria {
    #[must_use]
    pub fn new(category: CategoryFilter, name_query: &str, price_min: f64, price_max: f64) -> Self {
        Self {
            category,
            name_query: name_query.trim().to_lowercase(),
            price_min,
            price_max,
        }
    }

    /// Criteria that accept every product priced within `bounds`.
    #[must_use]
    pub fn unfiltered(bounds: PriceBounds) -> Self {
        Self::new(CategoryFilter::All, "", bounds.min, bounds.max)
    }

    /// The normalized name query.
    #[must_use]
    pub fn name_query(&self) -> &str {
        &self.name_query
    }

    /// Returns `true` if the product passes all three checks.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        if let CategoryFilter::Only(category) = &self.category {
            if !product.in_category(category) {
                return false;
            }
        }

        if !self.name_query.is_empty() && !product.name.to_lowercase().contains(&self.name_query)
        {
            return false;
        }

        (self.price_min..=self.price_max).contains(&product.price)
    }
}

/// Returns the products matching `criteria`, preserving catalog order.
#[must_use]
pub fn filter_products<'a>(catalog: &'a [Product], criteria: &FilterCriteria) -> Vec<&'a Product> {
    catalog.iter().filter(|p| criteria.matches(p)).collect()
}

/// Returns the distinct category labels across the catalog, sorted.
#[must_use]
pub fn discover_categories(catalog: &[Product]) -> Vec<String> {
    catalog
        .iter()
        .flat_map(|p| p.categories.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
#[path = "filter_test.rs"]
mod tests;
