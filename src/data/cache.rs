use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use log::debug;

use super::loader::load_file;
use super::model::Catalog;
use crate::error::Result;

// ---------------------------------------------------------------------------
// Source identity
// ---------------------------------------------------------------------------

/// Identity of a source file: a change to any field invalidates the cache.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceKey {
    pub path: PathBuf,
    pub modified: Option<SystemTime>,
    pub len: u64,
}

impl SourceKey {
    pub fn for_path(path: &Path) -> Result<Self> {
        let meta = std::fs::metadata(path)?;
        Ok(SourceKey {
            path: path.to_path_buf(),
            modified: meta.modified().ok(),
            len: meta.len(),
        })
    }
}

// ---------------------------------------------------------------------------
// Cache store
// ---------------------------------------------------------------------------

/// Storage backing a [`CachedLoader`]. Values are shared read-only.
pub trait CatalogStore {
    fn get(&self, key: &SourceKey) -> Option<Arc<Catalog>>;
    fn insert(&mut self, key: SourceKey, catalog: Arc<Catalog>);
}

/// In-memory store. Keeps only the latest entry per path.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<PathBuf, (SourceKey, Arc<Catalog>)>,
}

impl MemoryStore {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl CatalogStore for MemoryStore {
    fn get(&self, key: &SourceKey) -> Option<Arc<Catalog>> {
        self.entries
            .get(&key.path)
            .filter(|(stored, _)| stored == key)
            .map(|(_, catalog)| Arc::clone(catalog))
    }

    fn insert(&mut self, key: SourceKey, catalog: Arc<Catalog>) {
        self.entries.insert(key.path.clone(), (key, catalog));
    }
}

// ---------------------------------------------------------------------------
// CachedLoader
// ---------------------------------------------------------------------------

/// Load-once wrapper around [`load_file`]. Repeated loads of an unchanged
/// file return the same `Arc<Catalog>`.
#[derive(Debug, Default)]
pub struct CachedLoader<S: CatalogStore = MemoryStore> {
    store: S,
}

impl CachedLoader<MemoryStore> {
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::default())
    }
}

impl<S: CatalogStore> CachedLoader<S> {
    pub fn new(store: S) -> Self {
        CachedLoader { store }
    }

    pub fn load(&mut self, path: &Path) -> Result<Arc<Catalog>> {
        let key = SourceKey::for_path(path)?;
        if let Some(hit) = self.store.get(&key) {
            debug!("catalog cache hit for {}", path.display());
            return Ok(hit);
        }
        debug!("catalog cache miss for {}", path.display());
        let catalog = Arc::new(load_file(path)?);
        self.store.insert(key, Arc::clone(&catalog));
        Ok(catalog)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
