//! Validation from raw wire records to [`takana_core::Product`].

use takana_core::{Product, DEFAULT_DESCRIPTION};

use crate::error::CatalogError;
use crate::types::RawProduct;

/// Normalizes one raw record at position `index` of the response.
///
/// # Errors
///
/// Returns [`CatalogError::MissingField`] if the name is absent, blank, or
/// not a string, or if the price is absent or not a finite number. Off-type
/// optional fields are defaulted instead.
pub fn normalize_product(raw: RawProduct, index: usize) -> Result<Product, CatalogError> {
    let name = raw
        .name
        .and_then(into_string)
        .filter(|n| !n.trim().is_empty())
        .ok_or(CatalogError::MissingField {
            index,
            field: "name",
        })?;

    let price = raw
        .price
        .as_ref()
        .and_then(as_finite_number)
        .ok_or(CatalogError::MissingField {
            index,
            field: "price",
        })?;

    // Zero, null, and non-numeric values all mean "no per-kilo price".
    let price_per_kilo = raw
        .price_per_kilo
        .as_ref()
        .and_then(as_finite_number)
        .filter(|p| *p != 0.0);

    Ok(Product {
        name,
        price,
        price_per_kilo,
        description: raw
            .description
            .and_then(into_string)
            .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
        categories: raw.categories.map(string_labels).unwrap_or_default(),
        image_path: raw
            .image_url
            .and_then(into_string)
            .filter(|p| !p.is_empty()),
    })
}

/// Normalizes a whole response, dropping records that fail validation.
///
/// Returns the usable products in response order along with the number of
/// records that were skipped.
#[must_use]
pub fn normalize_catalog(raw: Vec<RawProduct>) -> (Vec<Product>, usize) {
    let total = raw.len();
    let products: Vec<Product> = raw
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match normalize_product(record, index) {
            Ok(product) => Some(product),
            Err(e) => {
                tracing::debug!(error = %e, "skipping catalog record");
                None
            }
        })
        .collect();
    let skipped = total - products.len();
    (products, skipped)
}

fn into_string(value: serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s),
        _ => None,
    }
}

/// Keeps the string entries of a `categories` array, in order.
fn string_labels(value: serde_json::Value) -> Vec<String> {
    match value {
        serde_json::Value::Array(items) => items.into_iter().filter_map(into_string).collect(),
        _ => Vec::new(),
    }
}

fn as_finite_number(value: &serde_json::Value) -> Option<f64> {
    value.as_f64().filter(|v| v.is_finite())
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
