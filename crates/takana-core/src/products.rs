use serde::{Deserialize, Serialize};

/// Shown in place of a product description when the backend omits one.
pub const DEFAULT_DESCRIPTION: &str = "Sin descripción disponible.";

/// A catalog entry that passed validation at the fetch boundary: it has a
/// non-empty name and a numeric price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub price: f64,
    /// Per-kilo price. `None` when absent or zero.
    pub price_per_kilo: Option<f64>,
    /// Falls back to [`DEFAULT_DESCRIPTION`] during normalization.
    pub description: String,
    /// Category labels as sent by the backend; membership tests ignore order.
    pub categories: Vec<String>,
    /// Root-relative image path, e.g. `"/images/pan.jpg"`.
    pub image_path: Option<String>,
}

impl Product {
    /// Returns `true` if the product can be rendered as a card.
    ///
    /// Normalization already rejects records without a name or price; this is
    /// the render-time guard for products built by other means.
    #[must_use]
    pub fn is_displayable(&self) -> bool {
        !self.name.trim().is_empty() && self.price.is_finite()
    }

    /// Returns `true` if `category` is one of the product's labels (exact match).
    #[must_use]
    pub fn in_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }

    /// Comma-joined category labels, e.g. `"Panadería, Integral"`.
    #[must_use]
    pub fn categories_label(&self) -> String {
        self.categories.join(", ")
    }

    /// Resolves the image path against the backend base URL by plain
    /// concatenation. No path normalization is performed.
    #[must_use]
    pub fn image_url(&self, base_url: &str) -> Option<String> {
        self.image_path
            .as_deref()
            .filter(|p| !p.is_empty())
            .map(|p| format!("{base_url}{p}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pan() -> Product {
        Product {
            name: "Pan".to_string(),
            price: 500.0,
            price_per_kilo: None,
            description: "Integral".to_string(),
            categories: vec!["Panadería".to_string(), "Integral".to_string()],
            image_path: Some("/images/pan.jpg".to_string()),
        }
    }

    #[test]
    fn image_url_concatenates_base_and_path() {
        assert_eq!(
            pan().image_url("http://localhost:8080").as_deref(),
            Some("http://localhost:8080/images/pan.jpg")
        );
    }

    #[test]
    fn image_url_does_not_normalize_slashes() {
        assert_eq!(
            pan().image_url("http://localhost:8080/").as_deref(),
            Some("http://localhost:8080//images/pan.jpg")
        );
    }

    #[test]
    fn image_url_is_none_without_path() {
        let mut product = pan();
        product.image_path = None;
        assert!(product.image_url("http://localhost:8080").is_none());
        product.image_path = Some(String::new());
        assert!(product.image_url("http://localhost:8080").is_none());
    }

    #[test]
    fn categories_label_joins_with_comma() {
        assert_eq!(pan().categories_label(), "Panadería, Integral");
    }

    #[test]
    fn in_category_is_exact_match() {
        let product = pan();
        assert!(product.in_category("Panadería"));
        assert!(!product.in_category("panadería"));
        assert!(!product.in_category("Pan"));
    }

    #[test]
    fn blank_name_is_not_displayable() {
        let mut product = pan();
        assert!(product.is_displayable());
        product.name = "   ".to_string();
        assert!(!product.is_displayable());
    }

    #[test]
    fn nan_price_is_not_displayable() {
        let mut product = pan();
        product.price = f64::NAN;
        assert!(!product.is_displayable());
    }
}
