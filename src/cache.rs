//! Memoised path matching.
//!
//! [`MatchCache`] is an LRU cache from request path to the outcome of
//! [`TreeRouteStack::match_path`](crate::TreeRouteStack::match_path),
//! including misses. It is gated behind the `cache` feature and uses the
//! [`lru`] crate internally.
//!
//! The owning stack clears the cache on every change to its routes, base URL
//! or default parameters. [`CacheStats`] tracks hits, misses and
//! invalidations.
//!
//! # Examples
//!
//! ```
//! use mvc_router::cache::MatchCache;
//! use mvc_router::{RouteMatch, RouteParams};
//!
//! let mut cache = MatchCache::new();
//! cache.insert("/".to_string(), Some(RouteMatch::new(RouteParams::new())));
//!
//! assert!(cache.get("/").is_some());
//! assert_eq!(cache.stats().hits, 1);
//! ```

use crate::route_match::RouteMatch;
use crate::{debug_log, trace_log};
use lru::LruCache;
use std::fmt;
use std::num::NonZeroUsize;

/// Counters tracking cache effectiveness.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from the cache.
    pub hits: usize,
    /// Lookups that had to run the matcher.
    pub misses: usize,
    /// Number of full invalidations (via [`MatchCache::clear`]).
    pub invalidations: usize,
}

impl CacheStats {
    /// Return the hit rate as a value in `0.0..=1.0`.
    ///
    /// Returns `0.0` if no lookups have been performed.
    #[allow(clippy::cast_precision_loss)]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// LRU cache of match outcomes keyed by path.
///
/// The outer `Option` of [`get`](Self::get) is the cache lookup, the inner
/// one the cached match result, so a remembered miss reads `Some(None)`.
pub struct MatchCache {
    entries: LruCache<String, Option<RouteMatch>>,
    stats: CacheStats,
}

impl MatchCache {
    const DEFAULT_CAPACITY: usize = 1000;

    /// Create a cache holding up to 1000 paths.
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Create a cache with a custom capacity. Zero is raised to one.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(capacity),
            stats: CacheStats::default(),
        }
    }

    /// Look up the remembered match outcome for `path`.
    pub fn get(&mut self, path: &str) -> Option<Option<RouteMatch>> {
        if let Some(entry) = self.entries.get(path) {
            self.stats.hits += 1;
            trace_log!("Match cache hit for path: '{}'", path);
            Some(entry.clone())
        } else {
            self.stats.misses += 1;
            trace_log!("Match cache miss for path: '{}'", path);
            None
        }
    }

    /// Remember the match outcome for `path`.
    pub fn insert(&mut self, path: String, outcome: Option<RouteMatch>) {
        self.entries.push(path, outcome);
    }

    /// Drop every entry and count an invalidation.
    pub fn clear(&mut self) {
        let removed = self.entries.len();
        self.entries.clear();
        self.stats.invalidations += 1;
        debug_log!(
            "Match cache cleared: {} entries removed ({} total invalidations, hit rate: {:.1}%)",
            removed,
            self.stats.invalidations,
            self.stats.hit_rate() * 100.0
        );
    }

    /// Current statistics.
    pub const fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Number of remembered paths.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no path is remembered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for MatchCache {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MatchCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatchCache")
            .field("len", &self.entries.len())
            .field("cap", &self.entries.cap())
            .field("stats", &self.stats)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::RouteParams;

    #[test]
    fn test_cache_creation() {
        let cache = MatchCache::new();
        assert!(cache.is_empty());
        assert_eq!(cache.stats().hits, 0);
    }

    #[test]
    fn test_cache_miss() {
        let mut cache = MatchCache::new();
        assert!(cache.get("/blog").is_none());
        assert_eq!(cache.stats().misses, 1);
    }

    #[test]
    fn test_remembered_no_match() {
        let mut cache = MatchCache::new();
        cache.insert("/nowhere".to_string(), None);

        assert_eq!(cache.get("/nowhere"), Some(None));
        assert_eq!(cache.stats().hits, 1);
    }

    #[test]
    fn test_cache_clear() {
        let mut cache = MatchCache::new();
        cache.insert("/".to_string(), Some(RouteMatch::new(RouteParams::new())));
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.stats().invalidations, 1);
    }

    #[test]
    fn test_lru_eviction() {
        let mut cache = MatchCache::with_capacity(1);
        cache.insert("/a".to_string(), None);
        cache.insert("/b".to_string(), None);

        assert!(cache.get("/a").is_none());
        assert!(cache.get("/b").is_some());
    }

    #[test]
    fn test_hit_rate_calculation() {
        let mut cache = MatchCache::new();
        cache.get("/a");
        cache.get("/b");
        cache.get("/c");

        cache.insert("/a".to_string(), None);
        cache.insert("/b".to_string(), None);

        cache.get("/a");
        cache.get("/b");

        assert_eq!(cache.stats().hits, 2);
        assert_eq!(cache.stats().misses, 3);
        assert!((cache.stats().hit_rate() - 0.4).abs() < 0.001);
    }
}
