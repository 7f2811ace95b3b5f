pub mod cache;
pub mod client;
pub mod error;
pub mod normalize;
pub mod state;
pub mod types;

pub use cache::{CatalogCache, DEFAULT_TTL};
pub use client::{CatalogClient, CatalogSource, PRODUCTS_PATH};
pub use error::CatalogError;
pub use normalize::{normalize_catalog, normalize_product};
pub use state::CatalogState;
pub use types::RawProduct;
