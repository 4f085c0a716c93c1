//! Single-cell bisection: inertial initial split plus boundary refinement
//!
//! A cell is a slice of node IDs. Four sweep axes are tried: nodes are
//! ordered by the projection of their coordinate onto the axis and cut at
//! the median, then each candidate is improved by boundary-reducing flips.
//! The candidate with the best cut/balance score wins. Candidates are
//! independent and evaluated in parallel.
//!
//! Cut counts are over directed edges. The compressed node-based graph
//! stores both directions of every road segment, so the out-adjacency seen
//! here is symmetric and a flip's effect on the cut is twice its
//! out-edge gain; only the sign matters for acceptance. Debug builds
//! assert the symmetry before the recursion starts.

use rayon::prelude::*;
use rustc_hash::FxHashMap;

use crate::graph::BisectionGraph;
use crate::NodeID;

/// Sweep axes: E-W, N-S, NE-SW, NW-SE as (lon, lat) weights.
const AXES: [(i64, i64); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

struct Candidate {
    left: Vec<NodeID>,
    right: Vec<NodeID>,
    cut: usize,
    score: f64,
}

/// Split `cell` into two balanced halves with a small boundary. On return
/// the slice is reordered left half first; the returned index is the start
/// of the right half.
pub(crate) fn bisect_cell(
    graph: &BisectionGraph,
    cell: &mut [NodeID],
    min_side_ratio: f64,
    boundary_factor: f64,
    num_optimizing_cuts: u32,
) -> usize {
    debug_assert!(cell.len() >= 2);

    let cell_view: &[NodeID] = cell;
    let best = AXES
        .par_iter()
        .enumerate()
        .map(|(index, &axis)| {
            let candidate = evaluate_axis(
                graph,
                cell_view,
                axis,
                min_side_ratio,
                boundary_factor,
                num_optimizing_cuts,
            );
            (index, candidate)
        })
        .min_by(|(li, lhs), (ri, rhs)| {
            lhs.score
                .partial_cmp(&rhs.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(li.cmp(ri))
        })
        .map(|(_, candidate)| candidate)
        .unwrap();

    log::debug!(
        "cell of {} split {}/{} with cut {}",
        cell.len(),
        best.left.len(),
        best.right.len(),
        best.cut
    );

    let split = best.left.len();
    cell[..split].copy_from_slice(&best.left);
    cell[split..].copy_from_slice(&best.right);
    split
}

fn evaluate_axis(
    graph: &BisectionGraph,
    cell: &[NodeID],
    axis: (i64, i64),
    min_side_ratio: f64,
    boundary_factor: f64,
    num_optimizing_cuts: u32,
) -> Candidate {
    let n = cell.len();

    // Order along the axis; node ID breaks projection ties so the sweep is
    // deterministic across runs and thread counts.
    let mut order: Vec<NodeID> = cell.to_vec();
    order.sort_unstable_by_key(|&node| {
        let coordinate = graph.node(node);
        (
            axis.0 * i64::from(coordinate.lon) + axis.1 * i64::from(coordinate.lat),
            node,
        )
    });

    // Median cut; `true` marks the right half. Nodes absent from the map
    // are outside the cell and invisible to the refinement, which gives the
    // induced subgraph without materializing one.
    let mut side: FxHashMap<NodeID, bool> = FxHashMap::default();
    side.reserve(n);
    let half = n / 2;
    for (i, &node) in order.iter().enumerate() {
        side.insert(node, i >= half);
    }
    let mut right_size = n - half;

    let min_side = (min_side_ratio * n as f64).ceil() as usize;
    for _ in 0..num_optimizing_cuts {
        let mut moved = false;
        for &node in &order {
            let s = side[&node];
            let (mut cross, mut same) = (0usize, 0usize);
            for edge in graph.edges(node) {
                match side.get(&edge.target) {
                    Some(&t) if t != s => cross += 1,
                    Some(_) => same += 1,
                    None => {}
                }
            }
            // Flip only on a strict cut reduction that keeps both sides
            // above the balance floor.
            if cross <= same {
                continue;
            }
            let new_right = if s { right_size - 1 } else { right_size + 1 };
            let new_left = n - new_right;
            if new_right < min_side || new_left < min_side {
                continue;
            }
            side.insert(node, !s);
            right_size = new_right;
            moved = true;
        }
        if !moved {
            break;
        }
    }

    let mut cut = 0usize;
    for &node in &order {
        let s = side[&node];
        for edge in graph.edges(node) {
            if matches!(side.get(&edge.target), Some(&t) if t != s) {
                cut += 1;
            }
        }
    }

    let mut left = Vec::with_capacity(n - right_size);
    let mut right = Vec::with_capacity(right_size);
    for &node in &order {
        if side[&node] {
            right.push(node);
        } else {
            left.push(node);
        }
    }

    let imbalance = left.len().max(right.len()) as f64 / n as f64 - 0.5;
    let score = cut as f64 * (1.0 + boundary_factor * imbalance);

    Candidate {
        left,
        right,
        cut,
        score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::CnbgEdge;
    use crate::geo::Coordinate;

    // Path graph 0 - 1 - 2 - 3 laid out along the x axis.
    fn path_graph() -> BisectionGraph {
        let coordinates = (0..4).map(|i| Coordinate::new(i, 0)).collect();
        let mut edges = Vec::new();
        for i in 0u32..3 {
            edges.push(CnbgEdge { source: i, target: i + 1 });
            edges.push(CnbgEdge { source: i + 1, target: i });
        }
        BisectionGraph::new(coordinates, edges)
    }

    #[test]
    fn test_path_splits_at_middle() {
        let graph = path_graph();
        let mut cell: Vec<NodeID> = vec![0, 1, 2, 3];
        let split = bisect_cell(&graph, &mut cell, 0.375, 0.25, 10);

        assert_eq!(split, 2);
        let mut left = cell[..2].to_vec();
        left.sort_unstable();
        assert_eq!(left, vec![0, 1]);
    }

    #[test]
    fn test_split_respects_balance_floor() {
        let graph = path_graph();
        let mut cell: Vec<NodeID> = vec![0, 1, 2, 3];
        // Exact halving demanded: 2/2 is the only legal outcome.
        let split = bisect_cell(&graph, &mut cell, 0.5, 0.0, 10);
        assert_eq!(split, 2);
    }
}
