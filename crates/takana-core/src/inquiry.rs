//! Pre-filled WhatsApp inquiry links for product cards.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::products::Product;

/// Recipient of every purchase inquiry.
pub const CONTACT_PHONE: &str = "2615586001";

const CHAT_BASE_URL: &str = "https://wa.me";

/// Characters left unescaped in the `text` parameter: ASCII alphanumerics
/// plus `-`, `.`, `_`, `~` and `/`.
const MESSAGE_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'/');

/// Formats a price with the currency symbol, e.g. `500.0` → `"$500"`.
#[must_use]
pub fn format_price(price: f64) -> String {
    format!("${price}")
}

/// Builds the inquiry message for a product.
#[must_use]
pub fn inquiry_message(product: &Product) -> String {
    format!(
        "Hola, me interesa el producto:\n\
         Nombre: {name}\n\
         Descripción: {description}\n\
         Categoría(s): {categories}\n\
         Precio: {price}",
        name = product.name,
        description = product.description,
        categories = product.categories_label(),
        price = format_price(product.price),
    )
}

/// Builds the chat deep link, e.g.
/// `https://wa.me/2615586001?text=Hola%2C%20me%20interesa...`.
#[must_use]
pub fn inquiry_url(product: &Product) -> String {
    let message = inquiry_message(product);
    let encoded = utf8_percent_encode(&message, MESSAGE_ENCODE_SET);
    format!("{CHAT_BASE_URL}/{CONTACT_PHONE}?text={encoded}")
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
            categories: vec!["Panadería".to_string()],
            image_path: None,
        }
    }

    #[test]
    fn message_contains_every_field() {
        let message = inquiry_message(&pan());
        assert!(message.starts_with("Hola, me interesa el producto:\n"));
        assert!(message.contains("Nombre: Pan\n"));
        assert!(message.contains("Descripción: Integral\n"));
        assert!(message.contains("Categoría(s): Panadería\n"));
        assert!(message.ends_with("Precio: $500"));
    }

    #[test]
    fn message_joins_multiple_categories() {
        let mut product = pan();
        product.categories.push("Sin TACC".to_string());
        assert!(inquiry_message(&product).contains("Categoría(s): Panadería, Sin TACC\n"));
    }

    #[test]
    fn fractional_price_keeps_decimals() {
        assert_eq!(format_price(12.5), "$12.5");
        assert_eq!(format_price(500.0), "$500");
    }

    #[test]
    fn url_targets_fixed_recipient() {
        assert!(inquiry_url(&pan()).starts_with("https://wa.me/2615586001?text="));
    }

    #[test]
    fn url_percent_encodes_spaces_colons_and_newlines() {
        let url = inquiry_url(&pan());
        assert!(url.contains("Nombre%3A%20Pan%0A"), "got: {url}");
        assert!(url.contains("Precio%3A%20%24500"), "got: {url}");
        assert!(!url.contains(' '));
        assert!(!url.contains('\n'));
    }

    #[test]
    fn url_percent_encodes_non_ascii_as_utf8() {
        let url = inquiry_url(&pan());
        assert!(url.contains("Panader%C3%ADa"), "got: {url}");
        assert!(url.contains("Descripci%C3%B3n"), "got: {url}");
    }

    #[test]
    fn url_escapes_query_delimiters_in_product_text() {
        let mut product = pan();
        product.name = "Pan & Co #1 = 100%?".to_string();
        let url = inquiry_url(&product);
        let text = url.split_once("?text=").map(|(_, t)| t).unwrap();
        assert!(!text.contains('&'));
        assert!(!text.contains('#'));
        assert!(!text.contains('='));
        assert!(!text.contains('?'));
        assert!(text.contains("Pan%20%26%20Co%20%231%20%3D%20100%25%3F"));
    }
}
