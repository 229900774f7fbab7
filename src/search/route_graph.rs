use hashbrown::HashMap;
use tracing::{debug, info, warn};

use crate::{
    error::{NavError, Result},
    search::{Connection, Edge, Poi, Vertex, VertexId, WeightPolicy, parse_weight},
    sets::fixed::FixedEdgeSet,
};

/// Undirected weighted graph of a building's POIs, used for route search.
///
/// # Invariants
/// - `vertices[i]` is the vertex with id `i`, and `index` maps each `puid` to exactly one id.
/// - Every edge target is a valid index into `vertices`.
/// - Edges come in pairs: for each edge `a -> b` of weight `w` there is an edge `b -> a` of weight `w`.
///
/// The graph is immutable once built. It holds no search state, so any number
/// of searches may run over one shared instance.
pub struct RouteGraph {
    vertices: Vec<Vertex>,
    index: HashMap<String, VertexId>,
}

impl RouteGraph {
    /// Builds the graph from a building's POIs and connections.
    ///
    /// - Each POI becomes one vertex keyed by `puid`; a repeated `puid`
    ///   replaces the earlier record in place.
    /// - A connection naming an unknown POI is skipped.
    /// - A connection whose weight cannot be parsed, or parses to a negative
    ///   or non-finite value, is handled according to `policy`. Unknown endpoints are checked first, so a connection that
    ///   would be skipped anyway never triggers [`WeightPolicy::Reject`].
    /// - Every accepted connection adds an edge in each direction with the same weight.
    ///
    /// # Errors
    /// [`NavError::InvalidWeight`] under [`WeightPolicy::Reject`].
    pub fn build(pois: &[Poi], connections: &[Connection], policy: WeightPolicy) -> Result<Self> {
        let mut records: Vec<Poi> = Vec::with_capacity(pois.len());
        let mut index: HashMap<String, VertexId> = HashMap::with_capacity(pois.len());

        for poi in pois {
            match index.get(&poi.puid) {
                Some(existing) => records[existing.internal] = poi.clone(),
                None => {
                    index.insert(poi.puid.clone(), VertexId { internal: records.len() });
                    records.push(poi.clone());
                }
            }
        }

        let mut adjacency: Vec<Vec<Edge>> = vec![Vec::new(); records.len()];
        let mut skipped = 0usize;
        let mut defaulted = 0usize;

        for connection in connections {
            let (Some(&a), Some(&b)) = (index.get(&connection.pois_a), index.get(&connection.pois_b))
            else {
                debug!(
                    pois_a = %connection.pois_a,
                    pois_b = %connection.pois_b,
                    "skipping connection with unknown endpoint"
                );
                skipped += 1;
                continue;
            };

            let weight = match usable_weight(&connection.weight) {
                Some(weight) => weight,
                None => match policy {
                    WeightPolicy::Zero => {
                        warn!(
                            pois_a = %connection.pois_a,
                            pois_b = %connection.pois_b,
                            raw = %connection.weight,
                            "unusable connection weight, using 0.0"
                        );
                        defaulted += 1;
                        0.0
                    }
                    WeightPolicy::Skip => {
                        warn!(
                            pois_a = %connection.pois_a,
                            pois_b = %connection.pois_b,
                            raw = %connection.weight,
                            "unusable connection weight, dropping connection"
                        );
                        skipped += 1;
                        continue;
                    }
                    WeightPolicy::Reject => {
                        return Err(NavError::InvalidWeight {
                            pois_a: connection.pois_a.clone(),
                            pois_b: connection.pois_b.clone(),
                            raw: connection.weight.clone(),
                        });
                    }
                },
            };

            adjacency[a.internal].push(Edge { weight, target: b });
            adjacency[b.internal].push(Edge { weight, target: a });
        }

        let vertices: Vec<Vertex> = records
            .into_iter()
            .zip(adjacency)
            .map(|(poi, edges)| Vertex {
                poi,
                edges: FixedEdgeSet::new(edges),
            })
            .collect();

        let graph = RouteGraph { vertices, index };
        info!(
            vertices = graph.len(),
            edges = graph.edge_count(),
            skipped,
            defaulted,
            "route graph built"
        );
        Ok(graph)
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Number of directed edges (twice the number of accepted connections).
    pub fn edge_count(&self) -> usize {
        self.vertices.iter().map(|v| v.edges.len()).sum()
    }

    pub fn vertex_id(&self, puid: &str) -> Option<VertexId> {
        self.index.get(puid).copied()
    }

    /// # Panics
    /// Panics if `id` does not belong to this graph.
    pub fn vertex(&self, id: VertexId) -> &Vertex {
        &self.vertices[id.internal]
    }

    pub fn poi(&self, puid: &str) -> Option<&Poi> {
        self.vertex_id(puid).map(|id| &self.vertex(id).poi)
    }

    /// Smallest weight among the edges from `from` to `to`, if they are adjacent.
    pub fn edge_weight(&self, from: &str, to: &str) -> Option<f64> {
        let from = self.vertex_id(from)?;
        let to = self.vertex_id(to)?;
        self.vertex(from)
            .edges
            .iter()
            .filter(|e| e.target == to)
            .map(|e| e.weight)
            .min_by(f64::total_cmp)
    }
}

/// Dijkstra needs non-negative finite weights; anything else goes through the policy.
fn usable_weight(raw: &str) -> Option<f64> {
    parse_weight(raw).filter(|w| w.is_finite() && *w >= 0.0)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn pois(ids: &[&str]) -> Vec<Poi> {
        ids.iter().map(|&id| Poi::new(id)).collect()
    }

    #[test]
    fn test_connections_are_undirected() {
        let graph = RouteGraph::build(
            &pois(&["A", "B", "C"]),
            &[Connection::new("A", "B", "2.0"), Connection::new("B", "C", "3.0")],
            WeightPolicy::Zero,
        )
        .unwrap();

        assert_eq!(graph.len(), 3);
        assert_eq!(graph.edge_count(), 4);
        assert_eq!(graph.edge_weight("A", "B"), Some(2.0));
        assert_eq!(graph.edge_weight("B", "A"), Some(2.0));
        assert_eq!(graph.edge_weight("C", "B"), Some(3.0));
        assert_eq!(graph.edge_weight("A", "C"), None);
    }

    #[test]
    fn test_every_edge_has_a_reverse_twin() {
        let graph = RouteGraph::build(
            &pois(&["A", "B", "C", "D"]),
            &[
                Connection::new("A", "B", "1"),
                Connection::new("B", "A", "4"),
                Connection::new("C", "D", "2.5"),
                Connection::new("D", "D", "1"),
            ],
            WeightPolicy::Zero,
        )
        .unwrap();

        for i in 0..graph.len() {
            let id = VertexId { internal: i };
            for edge in graph.vertex(id).edges.iter() {
                let reverse = graph
                    .vertex(edge.target)
                    .edges
                    .iter()
                    .filter(|e| e.target == id && e.weight == edge.weight)
                    .count();
                assert!(reverse >= 1, "edge {:?} -> {:?} has no twin", id, edge.target);
            }
        }
        // parallel connections keep both weights; the lighter one is reported
        assert_eq!(graph.edge_weight("B", "A"), Some(1.0));
    }

    #[test]
    fn test_duplicate_poi_last_write_wins() {
        let first = Poi::new("A").with_attribute("name", "old");
        let second = Poi::new("A").with_attribute("name", "new");
        let graph = RouteGraph::build(
            &[first, Poi::new("B"), second],
            &[Connection::new("A", "B", "1")],
            WeightPolicy::Zero,
        )
        .unwrap();

        assert_eq!(graph.len(), 2);
        assert_eq!(graph.poi("A").unwrap().attributes["name"], json!("new"));
        assert_eq!(graph.edge_weight("A", "B"), Some(1.0));
    }

    #[test]
    fn test_unknown_endpoints_are_skipped() {
        let graph = RouteGraph::build(
            &pois(&["A", "B"]),
            &[Connection::new("A", "Z", "1"), Connection::new("A", "B", "1")],
            WeightPolicy::Reject,
        )
        .unwrap();
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_unknown_endpoint_with_bad_weight_is_skipped_not_rejected() {
        let graph = RouteGraph::build(
            &pois(&["A"]),
            &[Connection::new("A", "Z", "oops")],
            WeightPolicy::Reject,
        )
        .unwrap();
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_zero_policy_defaults_weight() {
        let graph = RouteGraph::build(
            &pois(&["A", "B"]),
            &[Connection::new("A", "B", "n/a")],
            WeightPolicy::Zero,
        )
        .unwrap();
        assert_eq!(graph.edge_weight("A", "B"), Some(0.0));
    }

    #[test]
    fn test_skip_policy_drops_connection() {
        let graph = RouteGraph::build(
            &pois(&["A", "B"]),
            &[Connection::new("A", "B", "n/a")],
            WeightPolicy::Skip,
        )
        .unwrap();
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_reject_policy_fails_build() {
        let err = RouteGraph::build(
            &pois(&["A", "B"]),
            &[Connection::new("A", "B", "n/a")],
            WeightPolicy::Reject,
        )
        .err()
        .unwrap();
        assert!(matches!(err, NavError::InvalidWeight { raw, .. } if raw == "n/a"));
    }

    #[test]
    fn test_negative_weight_goes_through_policy() {
        let connections = [Connection::new("A", "B", "-1"), Connection::new("B", "C", "1")];
        let ids = pois(&["A", "B", "C"]);

        let err = RouteGraph::build(&ids, &connections, WeightPolicy::Reject)
            .err()
            .unwrap();
        assert!(matches!(err, NavError::InvalidWeight { raw, .. } if raw == "-1"));

        let zeroed = RouteGraph::build(&ids, &connections, WeightPolicy::Zero).unwrap();
        assert_eq!(zeroed.edge_weight("A", "B"), Some(0.0));

        let skipped = RouteGraph::build(&ids, &connections, WeightPolicy::Skip).unwrap();
        assert_eq!(skipped.edge_weight("A", "B"), None);
        assert_eq!(skipped.edge_weight("B", "C"), Some(1.0));
    }

    #[test]
    fn test_number_weights_keep_their_value() {
        let connections: Vec<Connection> = serde_json::from_value(json!([
            {"pois_a": "A", "pois_b": "B", "weight": 1.5e-7},
            {"pois_a": "B", "pois_b": "C", "weight": 1e21}
        ]))
        .unwrap();
        let graph =
            RouteGraph::build(&pois(&["A", "B", "C"]), &connections, WeightPolicy::Reject).unwrap();
        assert_eq!(graph.edge_weight("A", "B"), Some(1.5e-7));
        assert_eq!(graph.edge_weight("B", "C"), Some(1e21));
    }

    #[test]
    fn test_locale_weights() {
        let graph = RouteGraph::build(
            &pois(&["A", "B"]),
            &[Connection::new("A", "B", "1,250.75")],
            WeightPolicy::Reject,
        )
        .unwrap();
        assert_eq!(graph.edge_weight("A", "B"), Some(1250.75));
    }

    #[test]
    fn test_empty_graph() {
        let graph = RouteGraph::build(&[], &[], WeightPolicy::Zero).unwrap();
        assert!(graph.is_empty());
        assert_eq!(graph.vertex_id("A"), None);
    }
}
