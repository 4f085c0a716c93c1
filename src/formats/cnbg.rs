///! cnbg format - compressed node-based graph (edge list + coordinate table)
///!
///! Layout (little-endian):
///! | fingerprint | edge_count u64 | node_count u64 |
///! | edge_count x (source u32, target u32) | node_count x (lon i32, lat i32) |
///! | crc64 u64 |
///!
///! Gets written by the extractor stage; the partitioner only ever reads it,
///! but a writer is kept here for tooling and round-trip tests.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use super::crc::{ChecksummedReader, ChecksummedWriter};
use crate::error::FormatError;
use crate::geo::Coordinate;
use crate::NodeID;

const MAGIC: u32 = 0x434E_4247; // "CNBG"
const VERSION: u16 = 1;

/// One directed edge of the compressed node-based graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CnbgEdge {
    pub source: NodeID,
    pub target: NodeID,
}

/// Edge list plus coordinate table, exactly as persisted. The edge list is
/// not assumed sorted here; grouping by source happens when the bisection
/// graph is built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompressedNodeBasedGraph {
    pub edges: Vec<CnbgEdge>,
    pub coordinates: Vec<Coordinate>,
}

pub struct CnbgFile;

impl CnbgFile {
    /// Write a compressed node-based graph to file
    pub fn write<P: AsRef<Path>>(
        path: P,
        graph: &CompressedNodeBasedGraph,
    ) -> Result<(), FormatError> {
        let file = BufWriter::new(File::create(path.as_ref())?);
        let mut writer = ChecksummedWriter::new(file, MAGIC, VERSION)?;

        writer.put(&(graph.edges.len() as u64).to_le_bytes())?;
        writer.put(&(graph.coordinates.len() as u64).to_le_bytes())?;

        for edge in &graph.edges {
            writer.put(&edge.source.to_le_bytes())?;
            writer.put(&edge.target.to_le_bytes())?;
        }
        for coordinate in &graph.coordinates {
            writer.put(&coordinate.lon.to_le_bytes())?;
            writer.put(&coordinate.lat.to_le_bytes())?;
        }

        writer.finish()
    }

    /// Read a compressed node-based graph from file.
    ///
    /// Fingerprint mismatch fails before any count is read; a short read
    /// anywhere is `TruncatedFile`; a checksum mismatch is `CorruptFile`.
    pub fn read<P: AsRef<Path>>(path: P) -> Result<CompressedNodeBasedGraph, FormatError> {
        let path = path.as_ref();
        let file = BufReader::new(File::open(path)?);
        let mut reader = ChecksummedReader::new(file, path, MAGIC, VERSION)?;

        let mut counts = [0u8; 16];
        reader.take(&mut counts)?;
        let num_edges = u64::from_le_bytes(counts[0..8].try_into().unwrap());
        let num_nodes = u64::from_le_bytes(counts[8..16].try_into().unwrap());

        let mut edges = Vec::with_capacity(num_edges as usize);
        let mut record = [0u8; 8];
        for _ in 0..num_edges {
            reader.take(&mut record)?;
            edges.push(CnbgEdge {
                source: NodeID::from_le_bytes(record[0..4].try_into().unwrap()),
                target: NodeID::from_le_bytes(record[4..8].try_into().unwrap()),
            });
        }

        let mut coordinates = Vec::with_capacity(num_nodes as usize);
        for _ in 0..num_nodes {
            reader.take(&mut record)?;
            coordinates.push(Coordinate::new(
                i32::from_le_bytes(record[0..4].try_into().unwrap()),
                i32::from_le_bytes(record[4..8].try_into().unwrap()),
            ));
        }

        reader.finish()?;
        Ok(CompressedNodeBasedGraph { edges, coordinates })
    }
}
