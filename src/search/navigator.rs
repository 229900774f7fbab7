use std::{
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    thread,
};

use serde::Deserialize;
use tracing::{debug, info};

use crate::{
    error::Result,
    search::{Route, RouteGraph, WeightPolicy, shortest_path},
    statistics::Stats,
    store::GraphStore,
};

/// How many queries a worker claims at a time in [`route_many`].
const BATCH_SIZE: usize = 64;

/// One `from -> to` request inside a batch.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct RouteQuery {
    pub from: String,
    pub to: String,
}

impl RouteQuery {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        RouteQuery {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Routes between POIs of buildings held in a [`GraphStore`].
pub struct Navigator<S: GraphStore> {
    store: S,
    policy: WeightPolicy,
}

impl<S: GraphStore> Navigator<S> {
    pub fn new(store: S, policy: WeightPolicy) -> Self {
        Navigator { store, policy }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Builds the route graph of `building` from the store's current data.
    pub fn graph(&self, building: &str) -> Result<RouteGraph> {
        let pois = self.store.pois(building)?;
        let connections = self.store.connections(building)?;
        debug!(
            building,
            pois = pois.len(),
            connections = connections.len(),
            "building route graph"
        );
        RouteGraph::build(&pois, &connections, self.policy)
    }

    /// Shortest route between two POIs of `building`.
    ///
    /// The graph is rebuilt on every call so the route always reflects the
    /// stored connections. An unreachable target or an unknown POI yields an
    /// empty route; only store and weight errors are reported as `Err`.
    pub fn route(&self, building: &str, from: &str, to: &str) -> Result<Route> {
        let graph = self.graph(building)?;
        let mut stats = Stats::new();
        let route = shortest_path(&graph, from, to, &mut stats);
        debug!(building, from, to, stops = route.len(), %stats, "route computed");
        Ok(route)
    }
}

/// Runs a batch of route queries over one shared graph on `num_threads` workers.
///
/// Workers claim queries in fixed-size batches from a shared counter, keep
/// local results and counters, and are merged at the end. Routes come back in
/// query order.
pub fn route_many(
    graph: Arc<RouteGraph>,
    queries: Arc<Vec<RouteQuery>>,
    num_threads: usize,
) -> (Vec<Route>, Stats) {
    let num_queries = queries.len();
    let num_threads = num_threads.max(1);
    let next_batch = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..num_threads)
        .map(|_| {
            let graph = Arc::clone(&graph);
            let queries = Arc::clone(&queries);
            let next_batch = Arc::clone(&next_batch);

            thread::spawn(move || {
                let mut local_results = Vec::new();
                let mut local_stats = Stats::new();

                loop {
                    let batch_start = next_batch.fetch_add(BATCH_SIZE, Ordering::Relaxed);
                    if batch_start >= num_queries {
                        break;
                    }
                    let batch_end = std::cmp::min(batch_start + BATCH_SIZE, num_queries);

                    for (offset, query) in queries[batch_start..batch_end].iter().enumerate() {
                        let route = shortest_path(&graph, &query.from, &query.to, &mut local_stats);
                        local_results.push((batch_start + offset, route));
                    }
                }

                (local_results, local_stats)
            })
        })
        .collect();

    let mut indexed = Vec::with_capacity(num_queries);
    let mut combined_stats = Stats::new();
    for handle in handles {
        match handle.join() {
            Ok((local_results, local_stats)) => {
                indexed.extend(local_results);
                combined_stats = combined_stats.merge(&local_stats);
            }
            // a search never panics on valid ids; surface anything else as-is
            Err(payload) => std::panic::resume_unwind(payload),
        }
    }

    indexed.sort_unstable_by_key(|(index, _)| *index);
    info!(
        queries = num_queries,
        threads = num_threads,
        %combined_stats,
        "route batch finished"
    );
    (indexed.into_iter().map(|(_, route)| route).collect(), combined_stats)
}
