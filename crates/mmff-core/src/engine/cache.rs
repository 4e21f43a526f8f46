use crate::core::forcefield::params::ParameterTable;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};
use tracing::debug;

pub type SharedTable = Arc<ParameterTable>;

/// Parsed parameter tables shared between force-field instances, keyed by
/// source identifier (usually the file path).
///
/// A table is inserted only once it is fully parsed, so readers either see no
/// entry or a complete table. The cache holds one reference to every stored
/// table; replacing or removing an entry drops that reference, and the table
/// itself is freed once the last force-field instance using it goes away.
#[derive(Debug, Default)]
pub struct ParametersCache {
    tables: Mutex<HashMap<String, SharedTable>>,
}

impl ParametersCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide cache for callers that do not manage their own.
    pub fn global() -> &'static ParametersCache {
        static GLOBAL: OnceLock<ParametersCache> = OnceLock::new();
        GLOBAL.get_or_init(ParametersCache::new)
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, SharedTable>> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get(&self, source_id: &str) -> Option<SharedTable> {
        self.lock().get(source_id).cloned()
    }

    /// Stores `table` under `source_id` and returns the entry it replaced.
    pub fn store(&self, source_id: impl Into<String>, table: SharedTable) -> Option<SharedTable> {
        let source_id = source_id.into();
        debug!("Storing parameter table for '{}'.", source_id);
        self.lock().insert(source_id, table)
    }

    /// Evicts `source_id`; the next `get_or_load` for it parses the source again.
    pub fn remove(&self, source_id: &str) -> Option<SharedTable> {
        self.lock().remove(source_id)
    }

    /// Returns the cached table for `source_id`, running `load` on a miss.
    ///
    /// The boolean is `true` when the table came from the cache. `load` runs
    /// without holding the lock; if another thread publishes a table for the
    /// same identifier in the meantime, that table wins and the freshly parsed
    /// one is dropped. Failed loads leave the cache untouched.
    pub fn get_or_load<E>(
        &self,
        source_id: &str,
        load: impl FnOnce() -> Result<ParameterTable, E>,
    ) -> Result<(SharedTable, bool), E> {
        if let Some(table) = self.get(source_id) {
            debug!("Parameter cache hit for '{}'.", source_id);
            return Ok((table, true));
        }

        let loaded = Arc::new(load()?);
        let mut tables = self.lock();
        let published = tables
            .entry(source_id.to_string())
            .or_insert_with(|| Arc::clone(&loaded));
        let from_cache = !Arc::ptr_eq(published, &loaded);
        if from_cache {
            debug!("Parameter table for '{}' was published concurrently.", source_id);
        } else {
            debug!("Cached new parameter table for '{}'.", source_id);
        }
        Ok((Arc::clone(published), from_cache))
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }
}
