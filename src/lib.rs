//! Recursive bisection partitioner for node-based road graphs
//!
//! Loads the compressed node-based graph, partitions it into a hierarchy of
//! balanced low-cut cells, and emits one path-encoding bisection ID per
//! node, plus the node-based to edge-based mapping used to project the
//! partition onto the routing graph.

pub mod bisection;
pub mod border;
pub mod cli;
pub mod error;
pub mod formats;
pub mod geo;
pub mod graph;
pub mod level;
pub mod mapping;

/// Dense zero-based node identifier of the node-based graph.
pub type NodeID = u32;
/// Dense zero-based identifier of an edge-based graph node.
pub type EdgeID = u32;
/// Path encoding of a node's cell hierarchy; see `bisection`.
pub type BisectionID = u32;

pub use bisection::{BisectionConfig, RecursiveBisection, NUM_BISECTION_BITS};
pub use error::{FormatError, PartitionError};
pub use graph::BisectionGraph;
pub use level::divergence_level;
pub use mapping::NbgEbgMapping;
