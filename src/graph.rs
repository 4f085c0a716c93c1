//! Adjacency view over the compressed node-based graph
//!
//! The partitioner needs two things from the graph: outgoing edges per node
//! and a coordinate per node (the inertial split orders nodes
//! geometrically). Both are immutable after construction, so the whole
//! structure can be shared by reference across the fork-join recursion.

use crate::formats::{CnbgEdge, CompressedNodeBasedGraph};
use crate::geo::Coordinate;
use crate::NodeID;

/// One outgoing edge of the bisection graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BisectionEdge {
    pub target: NodeID,
}

/// CSR-style adjacency: edges grouped by source, contiguous per node.
pub struct BisectionGraph {
    coordinates: Vec<Coordinate>,
    offsets: Vec<u32>,
    edges: Vec<BisectionEdge>,
}

impl BisectionGraph {
    /// Build the adjacency view. Consumes the raw edge list: grouping by
    /// source is enforced here, so callers never see a half-grouped list.
    pub fn new(coordinates: Vec<Coordinate>, mut edge_list: Vec<CnbgEdge>) -> Self {
        let n = coordinates.len();
        debug_assert!(edge_list
            .iter()
            .all(|e| (e.source as usize) < n && (e.target as usize) < n));

        edge_list.sort_unstable_by_key(|e| e.source);

        let mut offsets = vec![0u32; n + 1];
        for edge in &edge_list {
            offsets[edge.source as usize + 1] += 1;
        }
        for i in 0..n {
            offsets[i + 1] += offsets[i];
        }

        let edges = edge_list
            .into_iter()
            .map(|e| BisectionEdge { target: e.target })
            .collect();

        Self {
            coordinates,
            offsets,
            edges,
        }
    }

    pub fn from_cnbg(graph: CompressedNodeBasedGraph) -> Self {
        Self::new(graph.coordinates, graph.edges)
    }

    pub fn number_of_nodes(&self) -> u32 {
        self.coordinates.len() as u32
    }

    pub fn number_of_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn node(&self, id: NodeID) -> Coordinate {
        self.coordinates[id as usize]
    }

    /// Outgoing edges of `id`, contiguous by construction.
    pub fn edges(&self, id: NodeID) -> &[BisectionEdge] {
        let begin = self.offsets[id as usize] as usize;
        let end = self.offsets[id as usize + 1] as usize;
        &self.edges[begin..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coords(n: usize) -> Vec<Coordinate> {
        (0..n).map(|i| Coordinate::new(i as i32, 0)).collect()
    }

    #[test]
    fn test_edges_grouped_by_source() {
        // Deliberately unsorted input.
        let edge_list = vec![
            CnbgEdge { source: 2, target: 0 },
            CnbgEdge { source: 0, target: 1 },
            CnbgEdge { source: 2, target: 1 },
            CnbgEdge { source: 0, target: 2 },
        ];
        let graph = BisectionGraph::new(coords(3), edge_list);

        assert_eq!(graph.number_of_nodes(), 3);
        assert_eq!(graph.number_of_edges(), 4);

        let targets = |id: NodeID| -> Vec<NodeID> {
            graph.edges(id).iter().map(|e| e.target).collect()
        };
        let mut from0 = targets(0);
        from0.sort_unstable();
        assert_eq!(from0, vec![1, 2]);
        assert!(targets(1).is_empty());
        let mut from2 = targets(2);
        from2.sort_unstable();
        assert_eq!(from2, vec![0, 1]);
    }

    #[test]
    fn test_isolated_nodes_have_no_edges() {
        let graph = BisectionGraph::new(coords(4), Vec::new());
        for id in 0..4 {
            assert!(graph.edges(id).is_empty());
        }
    }
}
