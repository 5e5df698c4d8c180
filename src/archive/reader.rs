use flate2::Crc;
use flate2::write::DeflateDecoder;
use std::io::{self, Write};
use std::sync::Arc;

use crate::io::ReadAt;
use anyhow::{Result, bail};

use super::parser::ZipParser;
use super::structures::{CompressionMethod, ZipEntry};

/// Compressed bytes fetched per read
pub const CHUNK_SIZE: usize = 64 * 1024;

/// Read access to the members of a ZIP archive
pub struct ZipArchive<R: ReadAt> {
    parser: ZipParser<R>,
}

impl<R: ReadAt> ZipArchive<R> {
    pub fn new(reader: Arc<R>) -> Self {
        Self {
            parser: ZipParser::new(reader),
        }
    }

    /// All entries, in central directory order
    pub async fn entries(&self) -> Result<Vec<ZipEntry>> {
        self.parser.list_entries().await
    }

    /// Prepare a decoding stream over one entry's data.
    ///
    /// Rejects entries that cannot be decoded and checks that the data lies
    /// inside the archive; nothing past the local header is read yet.
    pub async fn open_entry(&self, entry: &ZipEntry) -> Result<EntryReader<R>> {
        if entry.is_encrypted() {
            bail!("{} is encrypted", entry.name);
        }
        if let CompressionMethod::Unknown(_) = entry.method {
            bail!(
                "{} uses unsupported compression ({})",
                entry.name,
                entry.method
            );
        }

        let offset = self.parser.data_offset(entry).await?;
        let archive_size = self.parser.reader().size();
        if offset.saturating_add(entry.compressed_size) > archive_size {
            bail!(
                "{} claims {} bytes of data at offset {}, past the end of the archive",
                entry.name,
                entry.compressed_size,
                offset
            );
        }

        Ok(EntryReader::new(self.parser.reader().clone(), offset, entry))
    }
}

/// Decoded contents of one entry, pushed chunk by chunk into a writer.
pub struct EntryReader<R: ReadAt> {
    reader: Arc<R>,
    offset: u64,
    compressed_size: u64,
    method: CompressionMethod,
    expected_crc: u32,
    expected_size: u64,
}

impl<R: ReadAt> EntryReader<R> {
    fn new(reader: Arc<R>, offset: u64, entry: &ZipEntry) -> Self {
        Self {
            reader,
            offset,
            compressed_size: entry.compressed_size,
            method: entry.method,
            expected_crc: entry.crc32,
            expected_size: entry.uncompressed_size,
        }
    }

    /// Decode the whole entry into `out` and hand it back.
    ///
    /// At most [`CHUNK_SIZE`] compressed bytes are held at a time. Once the
    /// data is exhausted the decoded length and CRC-32 are compared with the
    /// central directory; a mismatch is [`io::ErrorKind::InvalidData`].
    pub async fn decode_into<W: Write>(self, out: W) -> io::Result<W> {
        let mut checked = Checked::new(out, self.expected_crc, self.expected_size);
        if self.method == CompressionMethod::Deflate {
            let mut decoder = DeflateDecoder::new(checked);
            self.pump(&mut decoder).await?;
            checked = decoder.finish()?;
        } else {
            self.pump(&mut checked).await?;
        }
        checked.finish()
    }

    async fn pump<W: Write>(&self, sink: &mut W) -> io::Result<()> {
        let end = self.offset + self.compressed_size;
        let mut buf = vec![0u8; CHUNK_SIZE.min(self.compressed_size as usize)];
        let mut offset = self.offset;

        while offset < end {
            let n = buf.len().min((end - offset) as usize);
            self.reader
                .read_exact_at(offset, &mut buf[..n])
                .await
                .map_err(io::Error::other)?;
            sink.write_all(&buf[..n])?;
            offset += n as u64;
        }
        Ok(())
    }
}

/// Passes decoded bytes through while tracking their length and CRC-32.
struct Checked<W> {
    inner: W,
    crc: Crc,
    written: u64,
    expected_crc: u32,
    expected_size: u64,
}

impl<W: Write> Checked<W> {
    fn new(inner: W, expected_crc: u32, expected_size: u64) -> Self {
        Self {
            inner,
            crc: Crc::new(),
            written: 0,
            expected_crc,
            expected_size,
        }
    }

    fn finish(self) -> io::Result<W> {
        if self.written != self.expected_size {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "decoded {} bytes, expected {}",
                    self.written, self.expected_size
                ),
            ));
        }
        // A recorded CRC of zero means the archiver did not store one
        if self.expected_crc != 0 && self.crc.sum() != self.expected_crc {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "checksum mismatch: {:08x} != {:08x}",
                    self.crc.sum(),
                    self.expected_crc
                ),
            ));
        }
        Ok(self.inner)
    }
}

impl<W: Write> Write for Checked<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.written += buf.len() as u64;
        if self.written > self.expected_size {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("entry decodes past its declared {} bytes", self.expected_size),
            ));
        }
        self.crc.update(buf);
        self.inner.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
