///! Checksummed I/O for the binary artifact files
///!
///! Every artifact shares one shape, little-endian throughout:
///! | magic u32 | version u16 | reserved u16 | counts | payload | crc64 |
///! The wrappers here emit/verify the fingerprint and thread a CRC-64-ISO
///! digest through every byte ahead of the footer, so the format modules
///! only describe their record layout.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use crc::{Crc, CRC_64_GO_ISO};

use super::read_exact_or_truncated;
use crate::error::FormatError;

static CRC64: Crc<u64> = Crc::<u64>::new(&CRC_64_GO_ISO);

/// Writes the fingerprint up front, digests everything it emits, and
/// appends the checksum footer on `finish`.
pub(crate) struct ChecksummedWriter<W: Write> {
    inner: W,
    digest: crc::Digest<'static, u64>,
}

impl<W: Write> ChecksummedWriter<W> {
    pub fn new(inner: W, magic: u32, version: u16) -> Result<Self, FormatError> {
        let mut writer = Self {
            inner,
            digest: CRC64.digest(),
        };
        writer.put(&magic.to_le_bytes())?;
        writer.put(&version.to_le_bytes())?;
        writer.put(&0u16.to_le_bytes())?;
        Ok(writer)
    }

    pub fn put(&mut self, bytes: &[u8]) -> Result<(), FormatError> {
        self.inner.write_all(bytes)?;
        self.digest.update(bytes);
        Ok(())
    }

    pub fn finish(self) -> Result<(), FormatError> {
        let Self { mut inner, digest } = self;
        inner.write_all(&digest.finalize().to_le_bytes())?;
        inner.flush()?;
        Ok(())
    }
}

/// Verifies the fingerprint before handing out any payload byte and the
/// checksum footer at the end; everything in between goes through `take`.
pub(crate) struct ChecksummedReader<R: Read> {
    inner: R,
    digest: crc::Digest<'static, u64>,
    path: PathBuf,
}

impl<R: Read> ChecksummedReader<R> {
    pub fn new(inner: R, path: &Path, magic: u32, version: u16) -> Result<Self, FormatError> {
        let mut reader = Self {
            inner,
            digest: CRC64.digest(),
            path: path.to_path_buf(),
        };

        let mut header = [0u8; 8];
        reader.take(&mut header)?;
        let file_magic = u32::from_le_bytes(header[0..4].try_into().unwrap());
        let file_version = u16::from_le_bytes(header[4..6].try_into().unwrap());
        if file_magic != magic {
            return Err(reader.corrupt(format!(
                "bad magic {file_magic:#010x}, expected {magic:#010x}"
            )));
        }
        if file_version != version {
            return Err(reader.corrupt(format!(
                "unsupported version {file_version}, expected {version}"
            )));
        }

        Ok(reader)
    }

    pub fn take(&mut self, buf: &mut [u8]) -> Result<(), FormatError> {
        read_exact_or_truncated(&mut self.inner, buf, &self.path)?;
        self.digest.update(buf);
        Ok(())
    }

    /// Consume the footer and fail with `CorruptFile` unless it matches
    /// the digest of everything read so far.
    pub fn finish(self) -> Result<(), FormatError> {
        let Self {
            mut inner,
            digest,
            path,
        } = self;

        let mut footer = [0u8; 8];
        read_exact_or_truncated(&mut inner, &mut footer, &path)?;
        let stored = u64::from_le_bytes(footer);
        let computed = digest.finalize();
        if stored != computed {
            return Err(FormatError::CorruptFile {
                path,
                detail: format!("crc mismatch: stored {stored:016x}, computed {computed:016x}"),
            });
        }
        Ok(())
    }

    fn corrupt(&self, detail: String) -> FormatError {
        FormatError::CorruptFile {
            path: self.path.clone(),
            detail,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAGIC: u32 = 0x5445_5354; // "TEST"

    fn written_payload(value: u64) -> Vec<u8> {
        let mut buffer = Vec::new();
        let mut writer = ChecksummedWriter::new(&mut buffer, MAGIC, 1).unwrap();
        writer.put(&value.to_le_bytes()).unwrap();
        writer.finish().unwrap();
        buffer
    }

    #[test]
    fn test_footer_covers_every_written_byte() {
        let buffer = written_payload(42);

        let mut reader =
            ChecksummedReader::new(buffer.as_slice(), Path::new("t.bin"), MAGIC, 1).unwrap();
        let mut payload = [0u8; 8];
        reader.take(&mut payload).unwrap();
        assert_eq!(u64::from_le_bytes(payload), 42);
        reader.finish().unwrap();
    }

    #[test]
    fn test_wrong_magic_rejected_before_payload() {
        let buffer = written_payload(42);
        match ChecksummedReader::new(buffer.as_slice(), Path::new("t.bin"), 0xBAD, 1) {
            Err(FormatError::CorruptFile { .. }) => {}
            other => panic!("expected CorruptFile, got {:?}", other.is_ok()),
        }
    }

    #[test]
    fn test_flipped_payload_byte_fails_footer() {
        let mut buffer = written_payload(42);
        buffer[10] ^= 0xFF;

        let mut reader =
            ChecksummedReader::new(buffer.as_slice(), Path::new("t.bin"), MAGIC, 1).unwrap();
        let mut payload = [0u8; 8];
        reader.take(&mut payload).unwrap();
        match reader.finish() {
            Err(FormatError::CorruptFile { detail, .. }) => {
                assert!(detail.contains("crc mismatch"));
            }
            other => panic!("expected CorruptFile, got {other:?}"),
        }
    }
}
