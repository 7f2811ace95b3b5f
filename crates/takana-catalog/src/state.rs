//! Render-cycle states of the storefront catalog.
//!
//! ```text
//! Idle ──► Fetching ──► Ready
//!                  ├──► Degraded   (fetch failed, stale catalog served)
//!                  └──► Failed     (fetch failed, nothing cached)
//! ```
//!
//! A fresh cache hit goes straight from `Idle` to `Ready`. `Ready` and
//! `Degraded` proceed to filtering and rendering; `Failed` ends the cycle.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use takana_core::Product;

#[derive(Debug, Clone)]
pub enum CatalogState {
    /// Nothing has been fetched yet.
    Idle,
    /// A fetch is in flight.
    Fetching,
    Ready {
        catalog: Arc<[Product]>,
        fetched_at: DateTime<Utc>,
    },
    /// The latest fetch failed; `catalog` is the last good one.
    Degraded {
        catalog: Arc<[Product]>,
        fetched_at: DateTime<Utc>,
        reason: String,
    },
    /// The latest fetch failed and no catalog was ever fetched.
    Failed { reason: String },
}

impl CatalogState {
    /// Short lowercase name, used in logs and the health endpoint.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Fetching => "fetching",
            Self::Ready { .. } => "ready",
            Self::Degraded { .. } => "degraded",
            Self::Failed { .. } => "failed",
        }
    }

    /// The catalog to filter and render, if this state has one.
    #[must_use]
    pub fn catalog(&self) -> Option<&[Product]> {
        match self {
            Self::Ready { catalog, .. } | Self::Degraded { catalog, .. } => Some(&**catalog),
            Self::Idle | Self::Fetching | Self::Failed { .. } => None,
        }
    }

    #[must_use]
    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Ready { fetched_at, .. } | Self::Degraded { fetched_at, .. } => Some(*fetched_at),
            Self::Idle | Self::Fetching | Self::Failed { .. } => None,
        }
    }

    /// Why the latest fetch failed, for `Degraded` and `Failed`.
    #[must_use]
    pub fn failure_reason(&self) -> Option<&str> {
        match self {
            Self::Degraded { reason, .. } | Self::Failed { reason } => Some(reason.as_str()),
            Self::Idle | Self::Fetching | Self::Ready { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Arc<[Product]> {
        Arc::from(vec![Product {
            name: "Pan".to_string(),
            price: 500.0,
            price_per_kilo: None,
            description: String::new(),
            categories: Vec::new(),
            image_path: None,
        }])
    }

    #[test]
    fn ready_and_degraded_expose_catalog() {
        let now = Utc::now();
        let ready = CatalogState::Ready {
            catalog: catalog(),
            fetched_at: now,
        };
        let degraded = CatalogState::Degraded {
            catalog: catalog(),
            fetched_at: now,
            reason: "connection refused".to_string(),
        };
        assert_eq!(ready.catalog().map(<[Product]>::len), Some(1));
        assert_eq!(degraded.catalog().map(<[Product]>::len), Some(1));
        assert_eq!(ready.fetched_at(), Some(now));
        assert_eq!(degraded.failure_reason(), Some("connection refused"));
        assert!(ready.failure_reason().is_none());
    }

    #[test]
    fn failed_has_no_catalog() {
        let failed = CatalogState::Failed {
            reason: "timeout".to_string(),
        };
        assert!(failed.catalog().is_none());
        assert!(failed.fetched_at().is_none());
        assert_eq!(failed.failure_reason(), Some("timeout"));
        assert_eq!(failed.name(), "failed");
    }

    #[test]
    fn idle_and_fetching_have_no_catalog() {
        assert!(CatalogState::Idle.catalog().is_none());
        assert!(CatalogState::Fetching.catalog().is_none());
        assert_eq!(CatalogState::Idle.name(), "idle");
        assert_eq!(CatalogState::Fetching.name(), "fetching");
    }
}
