//! CatalogHandle: shared, hot-reloadable reference to the current catalog.
//!
//! Readers take an `Arc` snapshot and evaluate against it; a reload builds a
//! complete new catalog and swaps the pointer, so a reader sees either the old
//! catalog or the new one, never a mix.

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use tracing::{info, warn};

use crate::errors::{CatalogError, CatalogResult};

use super::TierCatalog;

pub struct CatalogHandle {
    current: RwLock<Arc<TierCatalog>>,
    source: Option<PathBuf>,
}

impl CatalogHandle {
    /// Wrap an already-validated catalog. `reload` is unavailable.
    pub fn new(catalog: TierCatalog) -> Self {
        Self {
            current: RwLock::new(Arc::new(catalog)),
            source: None,
        }
    }

    /// Load the catalog from `path` and remember the path for `reload`.
    /// Fails if the initial load fails; a host must not start without one.
    pub fn load(path: &Path) -> CatalogResult<Self> {
        let catalog = TierCatalog::load(path)?;
        info!(path = %path.display(), tiers = catalog.len(), "Catalog handle initialised");
        Ok(Self {
            current: RwLock::new(Arc::new(catalog)),
            source: Some(path.to_path_buf()),
        })
    }

    /// The catalog as of now. Later publishes do not affect the snapshot.
    pub fn snapshot(&self) -> Arc<TierCatalog> {
        match self.current.read() {
            Ok(guard) => Arc::clone(&*guard),
            Err(poisoned) => Arc::clone(&*poisoned.into_inner()),
        }
    }

    /// Replace the current catalog.
    pub fn publish(&self, catalog: TierCatalog) {
        let next = Arc::new(catalog);
        match self.current.write() {
            Ok(mut guard) => *guard = next,
            Err(poisoned) => *poisoned.into_inner() = next,
        }
    }

    /// Re-read the source file and publish it. On any error the previous
    /// catalog stays in place.
    pub fn reload(&self) -> CatalogResult<()> {
        let path = self.source.as_ref().ok_or(CatalogError::NoSource)?;

        match TierCatalog::load(path) {
            Ok(catalog) => {
                info!(path = %path.display(), tiers = catalog.len(), "Catalog reloaded");
                self.publish(catalog);
                Ok(())
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Catalog reload rejected, keeping previous catalog");
                Err(e)
            }
        }
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}
