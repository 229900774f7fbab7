use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Stats {
    searches: usize,
    vertices_settled: usize,
    edges_relaxed: usize,
    buckets_scored: usize,
    readings_examined: usize,
}

impl Stats {
    pub fn new() -> Self {
        Stats::default()
    }

    /// Record that a new shortest path search has been started
    pub fn bump_searches(&mut self) {
        self.searches += 1
    }

    /// Record that a vertex has been popped from the frontier with its final distance
    pub fn bump_settled(&mut self) {
        self.vertices_settled += 1
    }

    /// Record that a bunch of edges were looked at while expanding a settled vertex
    pub fn bump_edges(&mut self, edge_amount: usize) {
        self.edges_relaxed += edge_amount
    }

    /// Record the work done by one floor classification
    pub fn bump_classification(&mut self, buckets: usize, readings: usize) {
        self.buckets_scored += buckets;
        self.readings_examined += readings;
    }

    pub fn get_searches(&self) -> usize {
        self.searches
    }

    pub fn get_vertices_settled(&self) -> usize {
        self.vertices_settled
    }

    pub fn get_edges_relaxed(&self) -> usize {
        self.edges_relaxed
    }

    pub fn get_buckets_scored(&self) -> usize {
        self.buckets_scored
    }

    pub fn get_readings_examined(&self) -> usize {
        self.readings_examined
    }

    /// Sums two sets of counters, typically those of two worker threads.
    pub fn merge(&self, other: &Stats) -> Stats {
        Stats {
            searches: self.searches + other.searches,
            vertices_settled: self.vertices_settled + other.vertices_settled,
            edges_relaxed: self.edges_relaxed + other.edges_relaxed,
            buckets_scored: self.buckets_scored + other.buckets_scored,
            readings_examined: self.readings_examined + other.readings_examined,
        }
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "searches : {}, settled : {}, edges : {}, buckets : {}, readings : {}",
            self.searches,
            self.vertices_settled,
            self.edges_relaxed,
            self.buckets_scored,
            self.readings_examined
        )
    }
}
