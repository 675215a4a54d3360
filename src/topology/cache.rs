//! Cache invalidation utilities and the per-grid face-area cache.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;

use crate::geometry::area::{FaceAreaConfig, FaceAreas};
use crate::mesh_error::GridError;

/// Anything that caches products derived from a topology should implement
/// this.
pub trait InvalidateCache {
    /// Invalidate *all* internal caches so future queries recompute correctly.
    fn invalidate_cache(&mut self);
}

// Blanket impl for Box<T>
impl<T: InvalidateCache + ?Sized> InvalidateCache for Box<T> {
    #[inline]
    fn invalidate_cache(&mut self) {
        (**self).invalidate_cache();
    }
}

/// Memoized face areas, one entry per [`FaceAreaConfig`].
///
/// The engine runs outside the lock; only the insert-if-absent step is
/// serialized. Two concurrent misses on the same key may both compute, in
/// which case the first stored result is kept and returned to both callers.
#[derive(Debug, Default)]
pub struct FaceAreaCache {
    entries: Mutex<HashMap<FaceAreaConfig, Arc<FaceAreas>>>,
    computations: AtomicUsize,
}

impl FaceAreaCache {
    /// Cached areas for `key`, if present.
    pub fn get(&self, key: &FaceAreaConfig) -> Option<Arc<FaceAreas>> {
        self.entries.lock().get(key).cloned()
    }

    /// Return the cached entry for `key`, or run `compute` and store it.
    ///
    /// Errors from `compute` are returned as-is and nothing is stored.
    pub fn get_or_compute<F>(&self, key: FaceAreaConfig, compute: F) -> Result<Arc<FaceAreas>, GridError>
    where
        F: FnOnce() -> Result<FaceAreas, GridError>,
    {
        if let Some(hit) = self.get(&key) {
            log::trace!("face-area cache hit for {key:?}");
            return Ok(hit);
        }
        let computed = Arc::new(compute()?);
        self.computations.fetch_add(1, Ordering::Relaxed);
        let mut entries = self.entries.lock();
        Ok(Arc::clone(entries.entry(key).or_insert(computed)))
    }

    /// Number of distinct configurations stored.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Returns `true` if nothing has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// How many times the cache ran the area engine.
    pub fn computations(&self) -> usize {
        self.computations.load(Ordering::Relaxed)
    }
}

impl InvalidateCache for FaceAreaCache {
    fn invalidate_cache(&mut self) {
        self.entries.get_mut().clear();
    }
}
