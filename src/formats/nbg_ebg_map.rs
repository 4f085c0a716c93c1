///! nbg_ebg_map format - node-based to edge-based graph mapping
///!
///! Layout (little-endian):
///! | fingerprint | mapping_count u64 |
///! | mapping_count x (u u32, v u32, head_edge_id u32, tail_edge_id u32) |
///! | crc64 u64 |
///!
///! Each record declares that edge-based ID `head` is the forward direction
///! and `tail` the backward direction of node-based arc (u, v). The file
///! layer hands out flat records; `mapping::NbgEbgMapping` owns the lookup
///! tables built from them.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use super::crc::{ChecksummedReader, ChecksummedWriter};
use crate::error::FormatError;
use crate::{EdgeID, NodeID};

const MAGIC: u32 = 0x4E42_4542; // "NBEB"
const VERSION: u16 = 1;

/// One (u, v, head, tail) quadruple from the mapping file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MappingRecord {
    pub u: NodeID,
    pub v: NodeID,
    pub head: EdgeID,
    pub tail: EdgeID,
}

pub struct NbgEbgMapFile;

impl NbgEbgMapFile {
    /// Write mapping records to file
    pub fn write<P: AsRef<Path>>(path: P, records: &[MappingRecord]) -> Result<(), FormatError> {
        let file = BufWriter::new(File::create(path.as_ref())?);
        let mut writer = ChecksummedWriter::new(file, MAGIC, VERSION)?;

        writer.put(&(records.len() as u64).to_le_bytes())?;
        for record in records {
            writer.put(&record.u.to_le_bytes())?;
            writer.put(&record.v.to_le_bytes())?;
            writer.put(&record.head.to_le_bytes())?;
            writer.put(&record.tail.to_le_bytes())?;
        }

        writer.finish()
    }

    /// Read mapping records from file
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Vec<MappingRecord>, FormatError> {
        let path = path.as_ref();
        let file = BufReader::new(File::open(path)?);
        let mut reader = ChecksummedReader::new(file, path, MAGIC, VERSION)?;

        let mut count_bytes = [0u8; 8];
        reader.take(&mut count_bytes)?;
        let num_mappings = u64::from_le_bytes(count_bytes);

        let mut records = Vec::with_capacity(num_mappings as usize);
        let mut record = [0u8; 16];
        for _ in 0..num_mappings {
            reader.take(&mut record)?;
            records.push(MappingRecord {
                u: NodeID::from_le_bytes(record[0..4].try_into().unwrap()),
                v: NodeID::from_le_bytes(record[4..8].try_into().unwrap()),
                head: EdgeID::from_le_bytes(record[8..12].try_into().unwrap()),
                tail: EdgeID::from_le_bytes(record[12..16].try_into().unwrap()),
            });
        }

        reader.finish()?;
        Ok(records)
    }
}
