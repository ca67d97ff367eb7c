//! Route-keyed memoization of rendered asset markup.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::models::CacheEntry;

/// Get-or-insert store of render results, one entry per route.
///
/// Entries are never refreshed. Concurrent misses for the same route may both compute an
/// entry; the first one stored is kept.
#[derive(Debug, Default)]
pub struct RenderCache {
  entries: RwLock<HashMap<String, Arc<CacheEntry>>>,
}

impl RenderCache {
  /// Create an empty cache.
  pub fn new() -> Self {
    Self::default()
  }

  /// Look up the entry for `route`.
  pub fn get(&self, route: &str) -> Option<Arc<CacheEntry>> {
    self
      .entries
      .read()
      .unwrap_or_else(PoisonError::into_inner)
      .get(route)
      .cloned()
  }

  /// Store `entry` under `route` unless one already exists, returning the stored entry.
  pub fn insert(&self, route: &str, entry: CacheEntry) -> Arc<CacheEntry> {
    self
      .entries
      .write()
      .unwrap_or_else(PoisonError::into_inner)
      .entry(route.to_string())
      .or_insert_with(|| Arc::new(entry))
      .clone()
  }

  /// Number of cached routes.
  pub fn len(&self) -> usize {
    self
      .entries
      .read()
      .unwrap_or_else(PoisonError::into_inner)
      .len()
  }

  /// Returns `true` when nothing has been rendered yet.
  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Drop every entry.
  pub fn clear(&self) {
    self
      .entries
      .write()
      .unwrap_or_else(PoisonError::into_inner)
      .clear();
  }
}
