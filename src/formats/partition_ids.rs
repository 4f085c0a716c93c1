///! partition_ids format - per-node bisection IDs
///!
///! Layout (little-endian):
///! | fingerprint | node_count u64 | node_count x bisection_id u32 | crc64 u64 |
///!
///! Produced by the partitioner, consumed by the multi-level index builder.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use super::crc::{ChecksummedReader, ChecksummedWriter};
use crate::error::FormatError;
use crate::BisectionID;

const MAGIC: u32 = 0x4250_5254; // "BPRT"
const VERSION: u16 = 1;

pub struct PartitionIdsFile;

impl PartitionIdsFile {
    /// Write bisection IDs to file, one u32 per node in NodeID order
    pub fn write<P: AsRef<Path>>(path: P, ids: &[BisectionID]) -> Result<(), FormatError> {
        let file = BufWriter::new(File::create(path.as_ref())?);
        let mut writer = ChecksummedWriter::new(file, MAGIC, VERSION)?;

        writer.put(&(ids.len() as u64).to_le_bytes())?;
        for &id in ids {
            writer.put(&id.to_le_bytes())?;
        }

        writer.finish()
    }

    /// Read bisection IDs from file
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Vec<BisectionID>, FormatError> {
        let path = path.as_ref();
        let file = BufReader::new(File::open(path)?);
        let mut reader = ChecksummedReader::new(file, path, MAGIC, VERSION)?;

        let mut count_bytes = [0u8; 8];
        reader.take(&mut count_bytes)?;
        let node_count = u64::from_le_bytes(count_bytes);

        let mut ids = Vec::with_capacity(node_count as usize);
        let mut record = [0u8; 4];
        for _ in 0..node_count {
            reader.take(&mut record)?;
            ids.push(BisectionID::from_le_bytes(record));
        }

        reader.finish()?;
        Ok(ids)
    }
}
