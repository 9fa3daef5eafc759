use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use dashmap::DashMap;

use super::discover::list_report_names;

/// Listing of one directory as of a given modification time
#[derive(Debug, Clone)]
struct CachedListing {
    modified: SystemTime,
    names: Arc<Vec<String>>,
}

/// Per-resolver directory listing cache
///
/// Keyed by directory path and invalidated by the directory's modification
/// time: an entry is served only while the directory's mtime still equals the
/// one recorded when it was listed. Adding, removing or renaming a report
/// bumps the mtime and forces a fresh listing. Owned by one resolver, never
/// shared process-wide.
///
/// Only the mtime is checked on a hit. A permission change (`chmod`) does not
/// bump it, so a directory that became unreadable keeps serving the cached
/// names where an uncached resolver would fall back to the configured token.
/// On filesystems with coarse (one second) timestamps, a change made within
/// the same tick as the cached listing is also missed until the next change.
#[derive(Debug, Default)]
pub struct ListingCache {
    listings: DashMap<PathBuf, CachedListing>,
}

impl ListingCache {
    pub fn new() -> Self {
        Self {
            listings: DashMap::new(),
        }
    }

    /// Sorted report names in `dir`, from cache when still fresh.
    ///
    /// When the mtime cannot be read the cache is bypassed and any stale entry
    /// for `dir` is dropped.
    pub fn listing(&self, dir: &Path) -> Option<Arc<Vec<String>>> {
        let modified = match std::fs::metadata(dir).and_then(|m| m.modified()) {
            Ok(modified) => modified,
            Err(_) => {
                self.listings.remove(dir);
                return list_report_names(dir).map(Arc::new);
            }
        };

        if let Some(cached) = self.listings.get(dir) {
            if cached.modified == modified {
                tracing::trace!(dir = %dir.display(), "Listing cache hit");
                return Some(Arc::clone(&cached.names));
            }
        }

        let names = Arc::new(list_report_names(dir)?);
        self.insert(dir.to_path_buf(), modified, Arc::clone(&names));
        Some(names)
    }

    fn insert(&self, dir: PathBuf, modified: SystemTime, names: Arc<Vec<String>>) {
        self.listings.insert(dir, CachedListing { modified, names });
    }

    pub fn remove(&self, dir: &Path) {
        self.listings.remove(dir);
    }

    pub fn clear(&self) {
        self.listings.clear();
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}
