//! Central directory parsing.
//!
//! ZIP files are read from the end:
//! 1. Find the End of Central Directory (EOCD) at the file's end
//! 2. If ZIP64, follow the locator to the ZIP64 EOCD
//! 3. Read the Central Directory in one request and parse every header
//! 4. For each entry to be read, consult its Local File Header for the
//!    start of its data
//!
//! Only the archive's tail and the scanned entries are ever fetched, which
//! keeps remote archives cheap.

use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{Cursor, Read};
use std::sync::Arc;

use crate::io::ReadAt;
use anyhow::{Context, Result, bail};

use super::structures::*;

/// Maximum ZIP comment size allowed by the format (65535 bytes).
const MAX_COMMENT_SIZE: u64 = 65535;

/// Reads ZIP structures from any [`ReadAt`] source.
pub struct ZipParser<R: ReadAt> {
    reader: Arc<R>,
    size: u64,
}

impl<R: ReadAt> ZipParser<R> {
    pub fn new(reader: Arc<R>) -> Self {
        let size = reader.size();
        Self { reader, size }
    }

    /// Find and parse the End of Central Directory record.
    ///
    /// Returns the record and its offset. Archives with a trailing comment
    /// are handled by scanning backwards for the signature.
    pub async fn find_eocd(&self) -> Result<(EndOfCentralDirectory, u64)> {
        let eocd_size = EndOfCentralDirectory::SIZE as u64;
        if self.size < eocd_size {
            bail!("Not a valid ZIP file: only {} bytes", self.size);
        }

        // Common case: no comment, record sits at the very end
        let offset = self.size - eocd_size;
        let mut buf = vec![0u8; EndOfCentralDirectory::SIZE];
        self.reader.read_exact_at(offset, &mut buf).await?;
        if &buf[0..4] == EndOfCentralDirectory::SIGNATURE && buf[20..22] == [0, 0] {
            return Ok((EndOfCentralDirectory::from_bytes(&buf)?, offset));
        }

        let window = (MAX_COMMENT_SIZE + eocd_size).min(self.size);
        let window_start = self.size - window;
        let mut buf = vec![0u8; window as usize];
        self.reader.read_exact_at(window_start, &mut buf).await?;

        let last = buf.len() - EndOfCentralDirectory::SIZE;
        for i in (0..=last).rev() {
            if &buf[i..i + 4] != EndOfCentralDirectory::SIGNATURE {
                continue;
            }
            // The comment must run exactly to the end of the file
            let comment_len = u16::from_le_bytes([buf[i + 20], buf[i + 21]]) as usize;
            if comment_len == buf.len() - i - EndOfCentralDirectory::SIZE {
                let eocd = EndOfCentralDirectory::from_bytes(
                    &buf[i..i + EndOfCentralDirectory::SIZE],
                )?;
                return Ok((eocd, window_start + i as u64));
            }
        }

        bail!("Not a valid ZIP file: End of Central Directory not found")
    }

    /// Read the ZIP64 End of Central Directory that precedes `eocd_offset`.
    pub async fn read_zip64_eocd(&self, eocd_offset: u64) -> Result<Zip64EndOfCentralDirectory> {
        let locator_offset = eocd_offset
            .checked_sub(Zip64Locator::SIZE as u64)
            .context("ZIP64 End of Central Directory Locator missing")?;
        let mut buf = vec![0u8; Zip64Locator::SIZE];
        self.reader.read_exact_at(locator_offset, &mut buf).await?;
        let locator = Zip64Locator::from_bytes(&buf)?;

        let mut buf = vec![0u8; Zip64EndOfCentralDirectory::MIN_SIZE];
        self.reader
            .read_exact_at(locator.eocd64_offset, &mut buf)
            .await?;
        Zip64EndOfCentralDirectory::from_bytes(&buf)
    }

    /// Parse every central directory header, in directory order.
    pub async fn list_entries(&self) -> Result<Vec<ZipEntry>> {
        let (eocd, eocd_offset) = self.find_eocd().await?;

        let (cd_offset, cd_size, total_entries) = if eocd.is_zip64() {
            let eocd64 = self.read_zip64_eocd(eocd_offset).await?;
            (eocd64.cd_offset, eocd64.cd_size, eocd64.total_entries)
        } else {
            (
                eocd.cd_offset as u64,
                eocd.cd_size as u64,
                eocd.total_entries as u64,
            )
        };

        if cd_offset.saturating_add(cd_size) > self.size {
            bail!(
                "Central Directory ({} bytes at {}) extends past the end of the archive",
                cd_size,
                cd_offset
            );
        }
        if total_entries.saturating_mul(CDFH_MIN_SIZE as u64) > cd_size {
            bail!(
                "Central Directory of {} bytes cannot hold {} entries",
                cd_size,
                total_entries
            );
        }

        let mut cd = vec![0u8; cd_size as usize];
        self.reader.read_exact_at(cd_offset, &mut cd).await?;

        let mut cursor = Cursor::new(cd.as_slice());
        let mut entries = Vec::with_capacity(total_entries as usize);
        for index in 0..total_entries {
            let entry = parse_cdfh(&mut cursor)
                .with_context(|| format!("Central Directory entry {index} is malformed"))?;
            entries.push(entry);
        }

        Ok(entries)
    }

    /// Offset where `entry`'s (possibly compressed) data begins.
    ///
    /// The local header's name and extra field lengths can differ from the
    /// central directory's, so the local header is read.
    pub async fn data_offset(&self, entry: &ZipEntry) -> Result<u64> {
        let mut lfh = [0u8; LFH_SIZE];
        self.reader.read_exact_at(entry.lfh_offset, &mut lfh).await?;
        if &lfh[0..4] != LFH_SIGNATURE {
            bail!("Invalid Local File Header at offset {}", entry.lfh_offset);
        }

        let name_len = u16::from_le_bytes([lfh[26], lfh[27]]) as u64;
        let extra_len = u16::from_le_bytes([lfh[28], lfh[29]]) as u64;
        Ok(entry.lfh_offset + LFH_SIZE as u64 + name_len + extra_len)
    }

    pub fn reader(&self) -> &Arc<R> {
        &self.reader
    }
}

/// Parse one Central Directory File Header at the cursor.
fn parse_cdfh(cursor: &mut Cursor<&[u8]>) -> Result<ZipEntry> {
    let mut sig = [0u8; 4];
    cursor.read_exact(&mut sig)?;
    if sig != CDFH_SIGNATURE {
        bail!("Invalid Central Directory File Header");
    }

    let version_made_by = cursor.read_u16::<LittleEndian>()?;
    let _version_needed = cursor.read_u16::<LittleEndian>()?;
    let flags = cursor.read_u16::<LittleEndian>()?;
    let method = cursor.read_u16::<LittleEndian>()?;
    let _last_mod_time = cursor.read_u16::<LittleEndian>()?;
    let _last_mod_date = cursor.read_u16::<LittleEndian>()?;
    let crc32 = cursor.read_u32::<LittleEndian>()?;
    let mut compressed_size = cursor.read_u32::<LittleEndian>()? as u64;
    let mut uncompressed_size = cursor.read_u32::<LittleEndian>()? as u64;
    let name_len = cursor.read_u16::<LittleEndian>()?;
    let extra_len = cursor.read_u16::<LittleEndian>()?;
    let comment_len = cursor.read_u16::<LittleEndian>()?;
    let _disk_number_start = cursor.read_u16::<LittleEndian>()?;
    let _internal_attrs = cursor.read_u16::<LittleEndian>()?;
    let external_attrs = cursor.read_u32::<LittleEndian>()?;
    let mut lfh_offset = cursor.read_u32::<LittleEndian>()? as u64;

    let mut name = vec![0u8; name_len as usize];
    cursor.read_exact(&mut name)?;
    let name = String::from_utf8_lossy(&name).into_owned();

    // ZIP64 values are present only for header fields saturated to 0xFFFFFFFF,
    // in the order uncompressed, compressed, offset.
    let extra_end = cursor.position() + extra_len as u64;
    while cursor.position() + 4 <= extra_end {
        let id = cursor.read_u16::<LittleEndian>()?;
        let len = cursor.read_u16::<LittleEndian>()? as u64;
        let field_end = cursor.position() + len;

        if id == ZIP64_EXTRA_ID {
            for field in [&mut uncompressed_size, &mut compressed_size, &mut lfh_offset] {
                if *field == 0xFFFF_FFFF && cursor.position() + 8 <= field_end {
                    *field = cursor.read_u64::<LittleEndian>()?;
                }
            }
        }
        cursor.set_position(field_end);
    }

    cursor.set_position(extra_end + comment_len as u64);
    if cursor.position() > cursor.get_ref().len() as u64 {
        bail!("Central Directory File Header for {name} is truncated");
    }

    Ok(ZipEntry {
        name,
        version_made_by,
        method: CompressionMethod::from(method),
        flags,
        crc32,
        compressed_size,
        uncompressed_size,
        lfh_offset,
        external_attrs,
    })
}
