use tracing::info;

/// Counters accumulated over one search.
#[derive(Debug, Clone, Default)]
pub struct Stats {
    /// Nodes removed from the frontier and expanded.
    pub expanded_nodes: usize,
    /// Successor states produced by the domain across all expansions.
    pub generated_successors: usize,
    /// Successors discarded because an existing entry for the same state
    /// already had an equal or lower g.
    pub dominated_successors: usize,
    /// Visited entries moved back into the frontier by a cheaper rediscovery.
    pub reopened_nodes: usize,
    /// Cost of the reconstructed path; meaningful only after success.
    pub cost: f32,
    /// Wall time of a `solve` run in microseconds; zero when the caller
    /// drove `step` directly.
    pub time_us: u128,
}

impl Stats {
    pub fn print(&self) {
        info!(
            "Cost {:?} Time(microseconds) {:?} Expanded nodes {:?} Generated successors {:?} Dominated {:?} Reopened {:?}",
            self.cost,
            self.time_us,
            self.expanded_nodes,
            self.generated_successors,
            self.dominated_successors,
            self.reopened_nodes
        );
    }
}
