use std::sync::{
    Arc, PoisonError, RwLock,
    atomic::{AtomicUsize, Ordering},
};

use hashbrown::HashMap;
use tracing::debug;

use crate::{
    error::Result,
    search::{Connection, Poi},
    store::GraphStore,
};

/// Read-through cache in front of another [`GraphStore`].
///
/// The first request for a building goes to the inner store; later requests
/// are served from memory until [`invalidate`](Self::invalidate) is called for
/// that building. Errors from the inner store are not cached.
pub struct CachedGraphStore<S: GraphStore> {
    inner: S,
    pois: RwLock<HashMap<String, Arc<[Poi]>>>,
    connections: RwLock<HashMap<String, Arc<[Connection]>>>,
    misses: AtomicUsize,
}

impl<S: GraphStore> CachedGraphStore<S> {
    pub fn new(inner: S) -> Self {
        CachedGraphStore {
            inner,
            pois: RwLock::new(HashMap::new()),
            connections: RwLock::new(HashMap::new()),
            misses: AtomicUsize::new(0),
        }
    }

    /// Drops every cached list of `building`.
    pub fn invalidate(&self, building: &str) {
        self.pois
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(building);
        self.connections
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(building);
    }

    /// Number of lookups that had to reach the inner store.
    pub fn misses(&self) -> usize {
        self.misses.load(Ordering::Relaxed)
    }

    fn read_through<T: ?Sized>(
        &self,
        cache: &RwLock<HashMap<String, Arc<T>>>,
        building: &str,
        fetch: impl FnOnce(&S) -> Result<Arc<T>>,
    ) -> Result<Arc<T>> {
        if let Some(hit) = cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(building)
        {
            return Ok(Arc::clone(hit));
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        debug!(building, "graph store cache miss");
        let fetched = fetch(&self.inner)?;
        cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(building.to_string(), Arc::clone(&fetched));
        Ok(fetched)
    }
}

impl<S: GraphStore> GraphStore for CachedGraphStore<S> {
    fn pois(&self, building: &str) -> Result<Arc<[Poi]>> {
        self.read_through(&self.pois, building, |inner| inner.pois(building))
    }

    fn connections(&self, building: &str) -> Result<Arc<[Connection]>> {
        self.read_through(&self.connections, building, |inner| {
            inner.connections(building)
        })
    }
}
