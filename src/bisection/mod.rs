//! Recursive bisection of the node-based graph
//!
//! Repeatedly splits the node set into two balanced halves with a small
//! boundary, recursing on each half until cells reach the configured size.
//! Each node ends up with a bisection ID encoding its path through the
//! hierarchy: the decision at depth `k` occupies bit `31 - k`, so the most
//! significant bit is the root split and nodes share a cell at depth `d`
//! exactly when their IDs agree on the top `d` bits.
//!
//! The recursion works on slices of one node-ID permutation array: a split
//! reorders the cell's slice in place and hands the two disjoint sub-slices
//! to `rayon::join`. The ID array is shared, but every node is written by
//! exactly one task per depth (the halves are a true set partition), so the
//! atomic cells never contend; they exist to satisfy aliasing, not to lock.

mod split;

use std::sync::atomic::{AtomicU32, Ordering};

use log::{info, warn};

use crate::error::PartitionError;
use crate::graph::BisectionGraph;
use crate::{BisectionID, NodeID};

use split::bisect_cell;

/// Width of a bisection ID; recursion cannot encode more levels than this.
pub const NUM_BISECTION_BITS: u32 = 32;

/// Validated at construction; infeasible values are rejected before any
/// recursion starts.
#[derive(Debug, Clone)]
pub struct BisectionConfig {
    /// Cells at or below this size are not split further.
    pub maximum_cell_size: u32,
    /// Tolerated deviation from an exact halving, in (0, 1). A split of a
    /// cell of `n` nodes is legal only if `min(s1, s2) / n >= (1 - balance) / 2`.
    pub balance: f64,
    /// Weight of the balance deviation against the cut size when choosing
    /// among candidate splits.
    pub boundary_factor: f64,
    /// Boundary-refinement passes per candidate split.
    pub num_optimizing_cuts: u32,
}

impl Default for BisectionConfig {
    fn default() -> Self {
        Self {
            maximum_cell_size: 4096,
            balance: 0.25,
            boundary_factor: 0.25,
            num_optimizing_cuts: 10,
        }
    }
}

impl BisectionConfig {
    /// Smallest legal side fraction of any split.
    fn min_side_ratio(&self) -> f64 {
        (1.0 - self.balance) / 2.0
    }

    fn validate(&self) -> Result<(), PartitionError> {
        let infeasible = |detail: String| PartitionError::InfeasibleConfiguration { detail };

        if self.maximum_cell_size == 0 {
            return Err(infeasible("maximum_cell_size must be positive".into()));
        }
        if !self.balance.is_finite() || self.balance <= 0.0 || self.balance >= 1.0 {
            return Err(infeasible(format!(
                "balance must lie strictly between 0 and 1, got {}",
                self.balance
            )));
        }
        if !self.boundary_factor.is_finite() || self.boundary_factor < 0.0 {
            return Err(infeasible(format!(
                "boundary_factor must be finite and non-negative, got {}",
                self.boundary_factor
            )));
        }

        // The engine only ever splits cells larger than maximum_cell_size.
        // Over those sizes the worst achievable ratio floor(n/2)/n occurs at
        // the smallest odd splittable size; if even that violates the
        // balance bound, some cell would be unsplittable and the failure
        // belongs here, not deep in the recursion.
        let smallest = u64::from(self.maximum_cell_size) + 1;
        let worst = if smallest % 2 == 1 { smallest } else { smallest + 1 };
        if ((worst / 2) as f64) / (worst as f64) < self.min_side_ratio() {
            return Err(infeasible(format!(
                "balance {} admits no legal split of a cell of {} nodes",
                self.balance, worst
            )));
        }

        Ok(())
    }
}

/// The partition hierarchy, represented only by its per-node IDs.
pub struct RecursiveBisection {
    bisection_ids: Vec<BisectionID>,
}

impl RecursiveBisection {
    /// Run the bisection over the whole graph. Returns only once every
    /// cell has reached its final depth, so the IDs are complete for any
    /// holder of the value.
    pub fn new(
        config: BisectionConfig,
        graph: &BisectionGraph,
    ) -> Result<Self, PartitionError> {
        config.validate()?;

        let n = graph.number_of_nodes();
        info!(
            "bisecting {} nodes, maximum cell size {}, balance {}",
            n, config.maximum_cell_size, config.balance
        );

        #[cfg(debug_assertions)]
        assert_symmetric_adjacency(graph);

        let ids: Vec<AtomicU32> = (0..n).map(|_| AtomicU32::new(0)).collect();
        let mut order: Vec<NodeID> = (0..n).collect();

        recurse(graph, &config, &ids, &mut order, 0);

        let bisection_ids = ids.into_iter().map(AtomicU32::into_inner).collect();
        Ok(Self { bisection_ids })
    }

    /// Per-node bisection IDs, indexed by NodeID.
    pub fn bisection_ids(&self) -> &[BisectionID] {
        &self.bisection_ids
    }

    pub fn into_bisection_ids(self) -> Vec<BisectionID> {
        self.bisection_ids
    }
}

/// The refinement's flip acceptance counts out-edges only, which matches
/// the true cut change exactly when every arc is stored in both directions.
/// The extractor writes the cnbg that way; catch anything else early.
#[cfg(debug_assertions)]
fn assert_symmetric_adjacency(graph: &BisectionGraph) {
    let mut arcs = std::collections::HashSet::new();
    for node in 0..graph.number_of_nodes() {
        for edge in graph.edges(node) {
            arcs.insert((node, edge.target));
        }
    }
    for &(source, target) in &arcs {
        assert!(
            arcs.contains(&(target, source)),
            "arc {source} -> {target} has no reverse arc; cut accounting needs both directions"
        );
    }
}

fn recurse(
    graph: &BisectionGraph,
    config: &BisectionConfig,
    ids: &[AtomicU32],
    cell: &mut [NodeID],
    depth: u32,
) {
    if cell.len() <= config.maximum_cell_size as usize {
        return;
    }
    if depth >= NUM_BISECTION_BITS {
        warn!(
            "bisection depth limit reached, leaving a cell of {} nodes unsplit",
            cell.len()
        );
        return;
    }

    let split = bisect_cell(
        graph,
        cell,
        config.min_side_ratio(),
        config.boundary_factor,
        config.num_optimizing_cuts,
    );

    let bit = 1u32 << (NUM_BISECTION_BITS - 1 - depth);
    let (left, right) = cell.split_at_mut(split);
    for &node in right.iter() {
        ids[node as usize].fetch_or(bit, Ordering::Relaxed);
    }

    rayon::join(
        || recurse(graph, config, ids, left, depth + 1),
        || recurse(graph, config, ids, right, depth + 1),
    );
}
