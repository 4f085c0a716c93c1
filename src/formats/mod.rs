///! Binary file formats consumed and produced by the partitioner

use std::io::Read;
use std::path::Path;

use crate::error::FormatError;

mod crc;

pub mod cnbg;
pub mod nbg_ebg_map;
pub mod partition_ids;

pub use cnbg::{CnbgEdge, CnbgFile, CompressedNodeBasedGraph};
pub use nbg_ebg_map::{MappingRecord, NbgEbgMapFile};
pub use partition_ids::PartitionIdsFile;

/// Read exactly `buf.len()` bytes, mapping an early EOF to `TruncatedFile`.
pub(crate) fn read_exact_or_truncated<R: Read>(
    reader: &mut R,
    buf: &mut [u8],
    path: &Path,
) -> Result<(), FormatError> {
    reader.read_exact(buf).map_err(|e| match e.kind() {
        std::io::ErrorKind::UnexpectedEof => FormatError::TruncatedFile {
            path: path.to_path_buf(),
        },
        _ => FormatError::Io(e),
    })
}
