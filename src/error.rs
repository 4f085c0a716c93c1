//! Error types for the partitioner
//!
//! Library-level code uses typed errors; the CLI driver wraps them with
//! anyhow context. Everything here is fatal at this layer: corrupt inputs
//! are regenerated upstream, not repaired, and a broken mapping invariant
//! is a contract breach between pipeline stages, not a transient condition.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from reading or writing the binary artifact files.
#[derive(Debug, Error)]
pub enum FormatError {
    /// Fingerprint or checksum does not match: the file is not what it
    /// claims to be, or was damaged after writing.
    #[error("corrupt file {}: {detail}", path.display())]
    CorruptFile { path: PathBuf, detail: String },

    /// The file ended before the declared counts were satisfied.
    #[error("truncated file {}", path.display())]
    TruncatedFile { path: PathBuf },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from the partitioning engine and mapping lookup.
#[derive(Debug, Error)]
pub enum PartitionError {
    /// The configuration cannot produce a legal split for some cell size.
    /// Detected once, before recursion starts.
    #[error("infeasible configuration: {detail}")]
    InfeasibleConfiguration { detail: String },

    /// An edge-based ID has no node-based arc in the mapping. The mapping
    /// file is expected to be total over every ID the caller queries.
    #[error("mapping invariant violation: edge-based id {edge} has no node-based arc")]
    MappingInvariantViolation { edge: u32 },

    #[error(transparent)]
    Format(#[from] FormatError),
}
