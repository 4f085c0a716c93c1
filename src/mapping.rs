//! Node-based to edge-based graph mapping
//!
//! The edge-based graph builder assigns every node-based arc (u, v) one or
//! two edge-based IDs: `head` for the forward traversal, `tail` for the
//! backward one. This table projects the node-based partition onto the
//! edge-based routing graph: given an edge-based ID, it recovers the (u, v)
//! arc whose endpoints carry the bisection IDs.

use rustc_hash::FxHashMap;

use crate::error::PartitionError;
use crate::formats::MappingRecord;
use crate::{EdgeID, NodeID};

/// Owns the `heads` and `tails` tables, built once from the mapping file
/// and read-only afterward. Safe for concurrent lookups.
pub struct NbgEbgMapping {
    heads: FxHashMap<EdgeID, (NodeID, NodeID)>,
    tails: FxHashMap<EdgeID, (NodeID, NodeID)>,
}

impl NbgEbgMapping {
    /// Build the lookup tables. Duplicate head/tail keys overwrite
    /// (last record wins), matching the writer's contract that keys are
    /// unique; no validation pass is made here.
    pub fn from_records(records: &[MappingRecord]) -> Self {
        let mut heads = FxHashMap::default();
        let mut tails = FxHashMap::default();
        heads.reserve(records.len());
        tails.reserve(records.len());

        for record in records {
            heads.insert(record.head, (record.u, record.v));
            tails.insert(record.tail, (record.u, record.v));
        }

        Self { heads, tails }
    }

    /// The node-based arc underlying `edge_based_id`, heads first, then
    /// tails. A missing key means the edge-based graph builder and the
    /// mapping writer disagree about the ID space, which nothing at this
    /// layer can repair.
    pub fn lookup(&self, edge_based_id: EdgeID) -> Result<(NodeID, NodeID), PartitionError> {
        if let Some(&arc) = self.heads.get(&edge_based_id) {
            return Ok(arc);
        }
        if let Some(&arc) = self.tails.get(&edge_based_id) {
            return Ok(arc);
        }
        Err(PartitionError::MappingInvariantViolation {
            edge: edge_based_id,
        })
    }
}
