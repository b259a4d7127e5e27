// ============================================================================
// Transform Coefficient Cache
// Lazily grown, per-order tables of roots of unity shared across threads
// ============================================================================

use crate::numeric::{NumericError, NumericResult};
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

type TableBuilder<T> = Box<dyn Fn(u32) -> Vec<T> + Send + Sync>;

/// Cache of twiddle tables keyed by transform order.
///
/// The table for order `k` holds the first `2^(k-1)` powers of a primitive
/// `2^k`-th root of unity. Tables are built once under the write lock and are
/// immutable afterwards; readers clone the `Arc` and never block each other.
pub struct TwiddleCache<T> {
    max_order: u32,
    tables: RwLock<Vec<Arc<[T]>>>,
    builder: TableBuilder<T>,
}

impl<T: Send + Sync> TwiddleCache<T> {
    /// Create an empty cache that refuses orders above `max_order`.
    pub fn new(max_order: u32, builder: impl Fn(u32) -> Vec<T> + Send + Sync + 'static) -> Self {
        Self {
            max_order,
            tables: RwLock::new(Vec::new()),
            builder: Box::new(builder),
        }
    }

    /// Largest order this cache will build.
    #[inline]
    pub fn max_order(&self) -> u32 {
        self.max_order
    }

    /// Highest order built so far, if any.
    pub fn built_order(&self) -> Option<u32> {
        let built = self.tables.read().len();
        built.checked_sub(1).map(|order| order as u32)
    }

    /// Make sure every table up to `order` exists.
    ///
    /// # Errors
    /// Returns `CapacityExceeded` if `order` is above the configured maximum.
    pub fn ensure(&self, order: u32) -> NumericResult<()> {
        if order > self.max_order {
            return Err(NumericError::CapacityExceeded {
                requested_order: order,
                max_order: self.max_order,
            });
        }

        if self.tables.read().len() > order as usize {
            return Ok(());
        }

        let mut tables = self.tables.write();
        // Another thread may have grown the cache while we waited for the lock
        while tables.len() <= order as usize {
            let next = tables.len() as u32;
            tables.push(Arc::from((self.builder)(next)));
            tracing::debug!(order = next, "built transform table");
        }

        Ok(())
    }

    /// Get the table for `order`, building it first if needed.
    pub fn table(&self, order: u32) -> NumericResult<Arc<[T]>> {
        self.ensure(order)?;
        Ok(Arc::clone(&self.tables.read()[order as usize]))
    }
}

impl<T> fmt::Debug for TwiddleCache<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TwiddleCache")
            .field("max_order", &self.max_order)
            .field("built", &self.tables.read().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_lazy_growth() {
        let cache = TwiddleCache::new(10, |order| vec![order; 1usize << order]);
        assert_eq!(cache.built_order(), None);

        let table = cache.table(3).unwrap();
        assert_eq!(table.len(), 8);
        assert!(table.iter().all(|&v| v == 3));
        assert_eq!(cache.built_order(), Some(3));

        // Lower orders were built along the way
        assert_eq!(cache.table(1).unwrap().len(), 2);
        assert_eq!(cache.built_order(), Some(3));
    }

    #[test]
    fn test_ensure_is_idempotent() {
        let builds = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&builds);
        let cache = TwiddleCache::new(8, move |order| {
            counter.fetch_add(1, Ordering::SeqCst);
            vec![0u8; 1usize << order]
        });

        cache.ensure(5).unwrap();
        cache.ensure(5).unwrap();
        cache.ensure(2).unwrap();
        assert_eq!(builds.load(Ordering::SeqCst), 6);
    }

    #[test]
    fn test_capacity_exceeded() {
        let cache = TwiddleCache::new(4, |order| vec![0u8; 1usize << order]);
        assert_eq!(
            cache.ensure(5),
            Err(NumericError::CapacityExceeded {
                requested_order: 5,
                max_order: 4
            })
        );
        assert_eq!(cache.built_order(), None);
    }

    #[test]
    fn test_concurrent_readers_share_tables() {
        let cache = Arc::new(TwiddleCache::new(12, |order| vec![1u32; 1usize << order]));

        crossbeam::scope(|scope| {
            for _ in 0..4 {
                let cache = Arc::clone(&cache);
                scope.spawn(move |_| {
                    let table = cache.table(12).unwrap();
                    assert_eq!(table.len(), 4096);
                });
            }
        })
        .unwrap();

        assert_eq!(cache.built_order(), Some(12));
    }
}
