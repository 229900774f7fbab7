use std::sync::Arc;

use hashbrown::HashMap;

use crate::{
    error::{NavError, Result},
    search::{Connection, Poi},
};

/// Source of the POIs and connections that make up a building's route graph.
///
/// Lists are handed out behind `Arc` so that caching layers can share one copy
/// between concurrent requests.
pub trait GraphStore {
    fn pois(&self, building: &str) -> Result<Arc<[Poi]>>;

    fn connections(&self, building: &str) -> Result<Arc<[Connection]>>;
}

/// The POIs and connections of one building.
#[derive(Clone, Debug, Default)]
pub struct BuildingData {
    pub pois: Arc<[Poi]>,
    pub connections: Arc<[Connection]>,
}

impl BuildingData {
    pub fn new(pois: Vec<Poi>, connections: Vec<Connection>) -> Self {
        BuildingData {
            pois: pois.into(),
            connections: connections.into(),
        }
    }
}

/// In-memory graph store keyed by building id.
#[derive(Clone, Debug, Default)]
pub struct MemoryGraphStore {
    buildings: HashMap<String, BuildingData>,
}

impl MemoryGraphStore {
    pub fn new() -> Self {
        MemoryGraphStore::default()
    }

    /// Adds or replaces a building.
    pub fn insert(&mut self, building: impl Into<String>, data: BuildingData) {
        self.buildings.insert(building.into(), data);
    }

    fn building(&self, building: &str) -> Result<&BuildingData> {
        self.buildings
            .get(building)
            .ok_or_else(|| NavError::UnknownBuilding(building.to_string()))
    }
}

impl GraphStore for MemoryGraphStore {
    fn pois(&self, building: &str) -> Result<Arc<[Poi]>> {
        Ok(Arc::clone(&self.building(building)?.pois))
    }

    fn connections(&self, building: &str) -> Result<Arc<[Connection]>> {
        Ok(Arc::clone(&self.building(building)?.connections))
    }
}
