use std::{cmp::Reverse, collections::BinaryHeap};

use serde::Serialize;

use crate::{
    search::{Poi, RouteGraph, VertexId},
    sets::{
        candidates::{FrontierEntry, TotalF64},
        visited::{VisitedBitset, VisitorSet},
    },
    statistics::Stats,
};

/// A walking route: the POIs from source to target and the distance
/// travelled on arrival at each of them.
///
/// An empty route means there is no path, or one of the endpoints is not in
/// the graph.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Route {
    pois: Vec<Poi>,
    distances: Vec<f64>,
}

impl Route {
    pub fn empty() -> Self {
        Route::default()
    }

    pub fn is_empty(&self) -> bool {
        self.pois.is_empty()
    }

    /// Number of stops, endpoints included.
    pub fn len(&self) -> usize {
        self.pois.len()
    }

    pub fn pois(&self) -> &[Poi] {
        &self.pois
    }

    /// Cumulative distance at each stop; the first is always `0.0`.
    pub fn distances(&self) -> &[f64] {
        &self.distances
    }

    /// Distance to the target, `None` for an empty route.
    pub fn total(&self) -> Option<f64> {
        self.distances.last().copied()
    }

    pub fn puids(&self) -> impl Iterator<Item = &str> {
        self.pois.iter().map(|p| p.puid.as_str())
    }
}

/// Finds a minimum-weight path between the POIs `from` and `to` (exact `puid` match).
///
/// Dijkstra with a binary heap and lazy deletion: a vertex may be pushed more
/// than once and only its first pop is expanded. All scratch state is local to
/// the call, so any number of searches can share one graph.
///
/// Returns `[from]` when `from == to`.
pub fn shortest_path(graph: &RouteGraph, from: &str, to: &str, stats: &mut Stats) -> Route {
    stats.bump_searches();

    let (Some(source), Some(target)) = (graph.vertex_id(from), graph.vertex_id(to)) else {
        return Route::empty();
    };

    let mut distance = vec![f64::INFINITY; graph.len()];
    let mut predecessor: Vec<Option<VertexId>> = vec![None; graph.len()];
    let mut visited = VisitedBitset::new(graph.len());
    let mut frontier = BinaryHeap::new();

    distance[source.internal] = 0.0;
    frontier.push(Reverse(FrontierEntry {
        distance: TotalF64(0.0),
        vertex: source,
    }));

    while let Some(Reverse(FrontierEntry { distance: d, vertex })) = frontier.pop() {
        if !visited.insert(vertex) {
            continue;
        }
        if d.is_infinite() {
            break;
        }
        stats.bump_settled();

        if vertex == target {
            return reconstruct(graph, &distance, &predecessor, target);
        }

        let edges = &graph.vertex(vertex).edges;
        stats.bump_edges(edges.len());
        for edge in edges.iter() {
            if visited.contains(edge.target) {
                continue;
            }
            let candidate = d.0 + edge.weight;
            if candidate < distance[edge.target.internal] {
                distance[edge.target.internal] = candidate;
                predecessor[edge.target.internal] = Some(vertex);
                frontier.push(Reverse(FrontierEntry {
                    distance: TotalF64(candidate),
                    vertex: edge.target,
                }));
            }
        }
    }

    Route::empty()
}

fn reconstruct(
    graph: &RouteGraph,
    distance: &[f64],
    predecessor: &[Option<VertexId>],
    target: VertexId,
) -> Route {
    let mut chain = vec![target];
    let mut current = target;
    while let Some(previous) = predecessor[current.internal] {
        chain.push(previous);
        current = previous;
    }
    chain.reverse();

    Route {
        pois: chain.iter().map(|&v| graph.vertex(v).poi.clone()).collect(),
        distances: chain.iter().map(|v| distance[v.internal]).collect(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rand::{Rng, SeedableRng, rngs::StdRng};

    use super::*;
    use crate::search::{Connection, WeightPolicy};

    fn graph(ids: &[&str], connections: &[(&str, &str, &str)]) -> RouteGraph {
        let pois: Vec<Poi> = ids.iter().map(|&id| Poi::new(id)).collect();
        let connections: Vec<Connection> = connections
            .iter()
            .map(|&(a, b, w)| Connection::new(a, b, w))
            .collect();
        RouteGraph::build(&pois, &connections, WeightPolicy::Zero).unwrap()
    }

    fn search(graph: &RouteGraph, from: &str, to: &str) -> Route {
        shortest_path(graph, from, to, &mut Stats::new())
    }

    fn assert_consistent(graph: &RouteGraph, route: &Route) {
        let puids: Vec<&str> = route.puids().collect();
        assert_eq!(route.distances()[0], 0.0);
        for (i, pair) in puids.windows(2).enumerate() {
            let weight = graph.edge_weight(pair[0], pair[1]).unwrap();
            assert_eq!(route.distances()[i] + weight, route.distances()[i + 1]);
        }
    }

    #[test]
    fn test_path_through_middle_vertex() {
        let g = graph(&["A", "B", "C"], &[("A", "B", "2.0"), ("B", "C", "3.0")]);
        let route = search(&g, "A", "C");

        assert_eq!(route.puids().collect::<Vec<_>>(), vec!["A", "B", "C"]);
        assert_eq!(route.distances(), &[0.0, 2.0, 5.0]);
        assert_eq!(route.total(), Some(5.0));
        assert_consistent(&g, &route);
    }

    #[test]
    fn test_replacing_connections_changes_route() {
        let g = graph(&["A", "B", "C"], &[("B", "C", "3.0"), ("A", "C", "10.0")]);
        let route = search(&g, "A", "C");

        assert_eq!(route.puids().collect::<Vec<_>>(), vec!["A", "C"]);
        assert_eq!(route.total(), Some(10.0));
    }

    #[test]
    fn test_prefers_lighter_detour() {
        let g = graph(
            &["A", "B", "C", "D"],
            &[("A", "D", "10"), ("A", "B", "1"), ("B", "C", "1"), ("C", "D", "1")],
        );
        let route = search(&g, "D", "A");
        assert_eq!(route.puids().collect::<Vec<_>>(), vec!["D", "C", "B", "A"]);
        assert_eq!(route.total(), Some(3.0));
    }

    #[test]
    fn test_disconnected_gives_empty() {
        let g = graph(&["A", "B", "C", "D"], &[("A", "B", "1"), ("C", "D", "1")]);
        let route = search(&g, "A", "D");
        assert!(route.is_empty());
        assert_eq!(route.total(), None);
    }

    #[test]
    fn test_self_path() {
        let g = graph(&["A", "B"], &[("A", "B", "1")]);
        let route = search(&g, "A", "A");
        assert_eq!(route.puids().collect::<Vec<_>>(), vec!["A"]);
        assert_eq!(route.distances(), &[0.0]);

        // also without any edge
        let lonely = graph(&["A"], &[]);
        assert_eq!(search(&lonely, "A", "A").len(), 1);
    }

    #[test]
    fn test_negative_weight_is_zeroed_and_search_terminates() {
        let g = graph(&["A", "B", "C"], &[("A", "B", "-1"), ("B", "C", "1")]);
        let route = search(&g, "A", "C");
        assert_eq!(route.puids().collect::<Vec<_>>(), vec!["A", "B", "C"]);
        assert_eq!(route.total(), Some(1.0));
        assert_consistent(&g, &route);
    }

    #[test]
    fn test_settled_vertices_are_not_relaxed_again() {
        // zero-weight cycle back into the source
        let g = graph(
            &["A", "B", "C", "D"],
            &[("A", "B", "0"), ("B", "C", "0"), ("C", "A", "0"), ("C", "D", "2")],
        );
        let mut stats = Stats::new();
        let route = shortest_path(&g, "A", "D", &mut stats);
        assert_eq!(route.total(), Some(2.0));
        assert_eq!(route.puids().next(), Some("A"));
        assert_eq!(route.puids().last(), Some("D"));
        assert!(route.len() <= 4);
        assert_consistent(&g, &route);
    }

    #[test]
    fn test_unknown_endpoints_give_empty() {
        let g = graph(&["A", "B"], &[("A", "B", "1")]);
        assert!(search(&g, "A", "Z").is_empty());
        assert!(search(&g, "Z", "A").is_empty());
        assert!(search(&g, "a", "B").is_empty());
    }

    #[test]
    fn test_route_carries_poi_records() {
        let pois = vec![
            Poi::new("A").with_attribute("name", "Lobby"),
            Poi::new("B").with_attribute("name", "Lift"),
        ];
        let g = RouteGraph::build(&pois, &[Connection::new("A", "B", "4")], WeightPolicy::Zero)
            .unwrap();
        let route = search(&g, "A", "B");
        assert_eq!(route.pois(), pois.as_slice());
    }

    #[test]
    fn test_stats_are_counted() {
        let g = graph(&["A", "B", "C"], &[("A", "B", "2.0"), ("B", "C", "3.0")]);
        let mut stats = Stats::new();
        shortest_path(&g, "A", "C", &mut stats);
        shortest_path(&g, "A", "Z", &mut stats);

        assert_eq!(stats.get_searches(), 2);
        assert_eq!(stats.get_vertices_settled(), 3);
        // A has one edge, B has two; C is the target and is not expanded
        assert_eq!(stats.get_edges_relaxed(), 3);
    }

    /// Single-source distances by edge relaxation until fixpoint.
    fn bellman_ford(graph: &RouteGraph, source: VertexId) -> Vec<f64> {
        let mut distance = vec![f64::INFINITY; graph.len()];
        distance[source.internal] = 0.0;
        for _ in 0..graph.len() {
            let mut changed = false;
            for i in 0..graph.len() {
                let from = VertexId { internal: i };
                if distance[i].is_infinite() {
                    continue;
                }
                for edge in graph.vertex(from).edges.iter() {
                    let candidate = distance[i] + edge.weight;
                    if candidate < distance[edge.target.internal] {
                        distance[edge.target.internal] = candidate;
                        changed = true;
                    }
                }
            }
            if !changed {
                break;
            }
        }
        distance
    }

    fn random_graph(rng: &mut StdRng, n: usize, m: usize) -> RouteGraph {
        let ids: Vec<String> = (0..n).map(|i| format!("p{i}")).collect();
        let pois: Vec<Poi> = ids.iter().map(Poi::new).collect();
        let connections: Vec<Connection> = (0..m)
            .map(|_| {
                let a = rng.random_range(0..n);
                let b = rng.random_range(0..n);
                let w: f64 = rng.random_range(0.0..20.0);
                Connection::new(ids[a].clone(), ids[b].clone(), format!("{w:.2}"))
            })
            .collect();
        RouteGraph::build(&pois, &connections, WeightPolicy::Reject).unwrap()
    }

    #[test]
    fn test_agrees_with_bellman_ford_on_random_graphs() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..30 {
            let n = rng.random_range(2..25);
            let m = rng.random_range(0..3 * n);
            let g = random_graph(&mut rng, n, m);

            let source = rng.random_range(0..n);
            let expected = bellman_ford(&g, VertexId { internal: source });
            for target in 0..n {
                let route = search(&g, &format!("p{source}"), &format!("p{target}"));
                if expected[target].is_infinite() {
                    assert!(route.is_empty(), "p{source} -> p{target} should be unreachable");
                } else {
                    let total = route.total().unwrap();
                    assert!(
                        (total - expected[target]).abs() < 1e-9,
                        "p{source} -> p{target}: {total} vs {}",
                        expected[target]
                    );
                    assert_eq!(route.puids().next(), Some(format!("p{source}").as_str()));
                    assert_eq!(route.puids().last(), Some(format!("p{target}").as_str()));
                    assert_consistent(&g, &route);
                }
            }
        }
    }

    #[test]
    fn test_concurrent_searches_share_graph() {
        let mut rng = StdRng::seed_from_u64(7);
        let g = Arc::new(random_graph(&mut rng, 40, 120));
        let expected: Vec<Option<f64>> = (0..40)
            .map(|t| search(&g, "p0", &format!("p{t}")).total())
            .collect();

        std::thread::scope(|scope| {
            for _ in 0..4 {
                let g = Arc::clone(&g);
                let expected = &expected;
                scope.spawn(move || {
                    let mut stats = Stats::new();
                    for (t, want) in expected.iter().enumerate() {
                        let route = shortest_path(&g, "p0", &format!("p{t}"), &mut stats);
                        assert_eq!(route.total(), *want);
                    }
                });
            }
        });
    }
}
