//! Wire types for the backend's `GET /api/products` endpoint.
//!
//! The endpoint returns a bare JSON array of product objects with camelCase
//! keys. Every field is optional on the wire; [`crate::normalize`] decides
//! which records are usable. Unknown keys (`id`, `stock`, ...) are ignored.
//!
//! ### `price` / `pricePerKilo`
//! Numbers in practice (`500`, `1250.5`). They are kept as raw JSON values so
//! that a single record with a malformed price is quarantined instead of
//! failing the whole catalog.
//!
//! ### `description`, `categories`, `imageUrl`
//! Also raw values. A string description, an array of string labels, and a
//! root-relative image path such as `"/uploads/pan.jpg"` are the expected
//! shapes; anything else falls back to the field's default in normalization
//! rather than rejecting the response.

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProduct {
    #[serde(default)]
    pub name: Option<serde_json::Value>,

    #[serde(default)]
    pub price: Option<serde_json::Value>,

    #[serde(default)]
    pub price_per_kilo: Option<serde_json::Value>,

    #[serde(default)]
    pub description: Option<serde_json::Value>,

    #[serde(default)]
    pub categories: Option<serde_json::Value>,

    #[serde(default)]
    pub image_url: Option<serde_json::Value>,
}
