//! Time-bounded memo of the last good catalog.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, TimeDelta, Utc};
use takana_core::Product;

use crate::client::CatalogSource;
use crate::state::CatalogState;

/// How long a fetched catalog is served before it is refetched.
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

#[derive(Debug, Clone)]
struct CachedCatalog {
    products: Arc<[Product]>,
    fetched_at: DateTime<Utc>,
}

/// Holds the last successfully fetched catalog and when it was fetched.
///
/// The cache never discards a good catalog: expiry and [`invalidate`] only
/// force the next [`get_or_fetch`] to hit the source, and the old catalog
/// remains the fallback if that fetch fails.
///
/// [`invalidate`]: CatalogCache::invalidate
/// [`get_or_fetch`]: CatalogCache::get_or_fetch
#[derive(Debug)]
pub struct CatalogCache {
    ttl: TimeDelta,
    entry: Option<CachedCatalog>,
    invalidated: bool,
    last_error: Option<String>,
    /// When the latest fetch attempt returned, on the caller's clock.
    last_attempt_at: Option<DateTime<Utc>>,
}

impl CatalogCache {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl: TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX),
            entry: None,
            invalidated: false,
            last_error: None,
            last_attempt_at: None,
        }
    }

    /// Returns `true` if a catalog is cached, not invalidated, and younger
    /// than the TTL at `now`.
    #[must_use]
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        !self.invalidated
            && self
                .entry
                .as_ref()
                .is_some_and(|e| now - e.fetched_at < self.ttl)
    }

    /// Forces the next [`CatalogCache::get_or_fetch`] to refetch.
    pub fn invalidate(&mut self) {
        self.invalidated = true;
        tracing::info!("catalog cache invalidated");
    }

    /// Serves the cached catalog if fresh, otherwise fetches from `source`.
    ///
    /// On fetch failure the last good catalog is served as
    /// [`CatalogState::Degraded`]; with nothing cached the result is
    /// [`CatalogState::Failed`].
    ///
    /// `now` is when the caller started its render. A caller that started
    /// before the latest failed attempt returned was waiting on that attempt,
    /// so it gets the attempt's outcome instead of fetching again. Renders
    /// that start afterwards retry.
    pub async fn get_or_fetch<S: CatalogSource>(
        &mut self,
        source: &S,
        now: DateTime<Utc>,
    ) -> CatalogState {
        if let Some(entry) = self.entry.as_ref().filter(|_| self.is_fresh(now)) {
            return CatalogState::Ready {
                catalog: Arc::clone(&entry.products),
                fetched_at: entry.fetched_at,
            };
        }

        if self.last_error.is_some() && self.last_attempt_at.is_some_and(|at| at >= now) {
            tracing::debug!("catalog fetch just failed; reusing its outcome");
            return self.status();
        }

        tracing::debug!(state = CatalogState::Fetching.name(), "refreshing catalog");

        let started = Instant::now();
        let outcome = source.fetch_catalog().await;
        self.last_attempt_at =
            Some(now + TimeDelta::from_std(started.elapsed()).unwrap_or(TimeDelta::zero()));

        match outcome {
            Ok(products) => {
                let entry = CachedCatalog {
                    products: Arc::from(products),
                    fetched_at: now,
                };
                let state = CatalogState::Ready {
                    catalog: Arc::clone(&entry.products),
                    fetched_at: now,
                };
                self.entry = Some(entry);
                self.invalidated = false;
                self.last_error = None;
                state
            }
            Err(e) => {
                let reason = e.to_string();
                self.last_error = Some(reason.clone());
                match &self.entry {
                    Some(entry) => {
                        tracing::warn!(
                            error = %e,
                            fetched_at = %entry.fetched_at,
                            "catalog fetch failed; serving stale catalog"
                        );
                        CatalogState::Degraded {
                            catalog: Arc::clone(&entry.products),
                            fetched_at: entry.fetched_at,
                            reason,
                        }
                    }
                    None => {
                        tracing::error!(error = %e, "catalog fetch failed with nothing cached");
                        CatalogState::Failed { reason }
                    }
                }
            }
        }
    }

    /// Describes the cache without fetching.
    ///
    /// A stale or invalidated catalog still reports `Ready` until a refetch
    /// actually fails.
    #[must_use]
    pub fn status(&self) -> CatalogState {
        match (&self.entry, &self.last_error) {
            (None, None) => CatalogState::Idle,
            (None, Some(reason)) => CatalogState::Failed {
                reason: reason.clone(),
            },
            (Some(entry), None) => CatalogState::Ready {
                catalog: Arc::clone(&entry.products),
                fetched_at: entry.fetched_at,
            },
            (Some(entry), Some(reason)) => CatalogState::Degraded {
                catalog: Arc::clone(&entry.products),
                fetched_at: entry.fetched_at,
                reason: reason.clone(),
            },
        }
    }
}

impl Default for CatalogCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

#[cfg(test)]
#[path = "cache_test.rs"]
mod tests;
