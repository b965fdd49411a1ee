use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;

use crate::data::filter::FilterSelection;
use crate::data::model::Dataset;
use crate::error::DashboardError;
use crate::summary::{DashboardSummary, SummaryOptions};

// ---------------------------------------------------------------------------
// Memoized summaries keyed by (dataset version, selection, options)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    version: u64,
    selection: FilterSelection,
    options: SummaryOptions,
}

/// Bounded memo of [`DashboardSummary`] values.
///
/// Each dashboard session owns one; nothing here is shared across sessions.
/// When full, the least recently used entry is evicted.
pub struct SummaryCache {
    cache: LruCache<CacheKey, Arc<DashboardSummary>>,
    hits: u64,
    misses: u64,
}

impl SummaryCache {
    /// A capacity of 0 is treated as 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        SummaryCache {
            cache: LruCache::new(capacity),
            hits: 0,
            misses: 0,
        }
    }

    /// Return the cached summary for this key, computing it on a miss.
    pub fn get_or_compute(
        &mut self,
        dataset: &Dataset,
        selection: &FilterSelection,
        options: &SummaryOptions,
    ) -> Result<Arc<DashboardSummary>, DashboardError> {
        let key = CacheKey {
            version: dataset.version(),
            selection: selection.clone(),
            options: options.clone(),
        };

        if let Some(hit) = self.cache.get(&key) {
            self.hits += 1;
            return Ok(Arc::clone(hit));
        }

        self.misses += 1;
        let summary = Arc::new(DashboardSummary::compute(dataset, selection, options)?);
        if let Some((evicted, _)) = self.cache.push(key, Arc::clone(&summary)) {
            log::trace!("Evicted cached summary for dataset v{}", evicted.version);
        }
        Ok(summary)
    }

    /// Drop every entry (e.g. after loading a different file).
    pub fn clear(&mut self) {
        self.cache.clear();
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// (hits, misses) since creation.
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }
}

impl std::fmt::Debug for SummaryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SummaryCache")
            .field("len", &self.cache.len())
            .field("capacity", &self.cache.cap())
            .field("hits", &self.hits)
            .field("misses", &self.misses)
            .finish()
    }
}
