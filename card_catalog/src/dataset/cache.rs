//! Lock-free, read-mostly cache for the loaded catalog snapshot.
//!
//! Readers call [`snapshot`] which loads an `Arc<CatalogSnapshot>` with no
//! locking contention. Writers call [`install_catalog`] after loading the
//! dataset to atomically swap in a new snapshot.
//!
//! Implementation notes:
//! - Uses `arc-swap` for atomic pointer swaps + cheap reads (no RwLock).
//! - Initializes to an empty snapshot; until you call `install_catalog`, all
//!   views render over zero entries.
//! - There is no invalidation path. The dataset is static for the process
//!   lifetime, so a swap only ever happens at startup or in tests.

use std::sync::Arc;

use arc_swap::ArcSwap;
use once_cell::sync::Lazy;

use crate::dataset::CatalogSnapshot;

/// Global cache: starts empty; replaced by `install_catalog`.
static CATALOG: Lazy<ArcSwap<CatalogSnapshot>> =
    Lazy::new(|| ArcSwap::from_pointee(CatalogSnapshot::default()));

/// Publishes a loaded snapshot process-wide, replacing the previous one.
///
/// Safe to call from any thread; readers see either the old or new snapshot.
pub fn install_catalog(snapshot: CatalogSnapshot) {
    CATALOG.store(Arc::new(snapshot));
}

/// Returns an `Arc` handle to the current snapshot for iteration or inspection.
pub fn snapshot() -> Arc<CatalogSnapshot> {
    CATALOG.load_full()
}

/// Resets the cache to an empty snapshot. Useful for tests.
pub fn clear_catalog_cache() {
    CATALOG.store(Arc::new(CatalogSnapshot::default()));
}
