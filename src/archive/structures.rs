use byteorder::{LittleEndian, ReadBytesExt};
use std::io::Cursor;

use anyhow::{Result, bail};

/// ZIP compression methods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionMethod {
    Stored,
    Deflate,
    Unknown(u16),
}

impl From<u16> for CompressionMethod {
    fn from(value: u16) -> Self {
        match value {
            0 => CompressionMethod::Stored,
            8 => CompressionMethod::Deflate,
            other => CompressionMethod::Unknown(other),
        }
    }
}

impl std::fmt::Display for CompressionMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompressionMethod::Stored => f.write_str("stored"),
            CompressionMethod::Deflate => f.write_str("deflate"),
            CompressionMethod::Unknown(v) => write!(f, "method {v}"),
        }
    }
}

/// End of Central Directory record - 22 bytes plus comment
pub struct EndOfCentralDirectory {
    pub disk_entries: u16,
    pub total_entries: u16,
    pub cd_size: u32,
    pub cd_offset: u32,
}

impl EndOfCentralDirectory {
    pub const SIGNATURE: &'static [u8] = b"PK\x05\x06";
    pub const SIZE: usize = 22;

    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < Self::SIZE || &data[0..4] != Self::SIGNATURE {
            bail!("Invalid End of Central Directory");
        }

        // Skip disk number and disk-with-central-directory
        let mut cursor = Cursor::new(&data[8..]);
        Ok(Self {
            disk_entries: cursor.read_u16::<LittleEndian>()?,
            total_entries: cursor.read_u16::<LittleEndian>()?,
            cd_size: cursor.read_u32::<LittleEndian>()?,
            cd_offset: cursor.read_u32::<LittleEndian>()?,
        })
    }

    pub fn is_zip64(&self) -> bool {
        self.disk_entries == 0xFFFF
            || self.total_entries == 0xFFFF
            || self.cd_size == 0xFFFF_FFFF
            || self.cd_offset == 0xFFFF_FFFF
    }
}

/// ZIP64 End of Central Directory Locator - 20 bytes
pub struct Zip64Locator {
    pub eocd64_offset: u64,
}

impl Zip64Locator {
    pub const SIGNATURE: &'static [u8] = b"PK\x06\x07";
    pub const SIZE: usize = 20;

    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < Self::SIZE || &data[0..4] != Self::SIGNATURE {
            bail!("Invalid ZIP64 End of Central Directory Locator");
        }
        let mut cursor = Cursor::new(&data[8..]);
        Ok(Self {
            eocd64_offset: cursor.read_u64::<LittleEndian>()?,
        })
    }
}

/// ZIP64 End of Central Directory - 56 bytes minimum
pub struct Zip64EndOfCentralDirectory {
    pub total_entries: u64,
    pub cd_size: u64,
    pub cd_offset: u64,
}

impl Zip64EndOfCentralDirectory {
    pub const SIGNATURE: &'static [u8] = b"PK\x06\x06";
    pub const MIN_SIZE: usize = 56;

    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < Self::MIN_SIZE || &data[0..4] != Self::SIGNATURE {
            bail!("Invalid ZIP64 End of Central Directory");
        }
        // Skip record size, versions, disk numbers and the per-disk entry count
        let mut cursor = Cursor::new(&data[32..]);
        Ok(Self {
            total_entries: cursor.read_u64::<LittleEndian>()?,
            cd_size: cursor.read_u64::<LittleEndian>()?,
            cd_offset: cursor.read_u64::<LittleEndian>()?,
        })
    }
}

/// Central Directory File Header (CDFH) - 46 bytes minimum
pub const CDFH_SIGNATURE: &[u8] = b"PK\x01\x02";
pub const CDFH_MIN_SIZE: usize = 46;

/// Local File Header (LFH) - 30 bytes
pub const LFH_SIGNATURE: &[u8] = b"PK\x03\x04";
pub const LFH_SIZE: usize = 30;

/// ZIP64 extended information extra field
pub const ZIP64_EXTRA_ID: u16 = 0x0001;

/// General purpose flag bit marking an encrypted entry
pub const FLAG_ENCRYPTED: u16 = 0x0001;

/// Host systems in the high byte of "version made by"
const HOST_MSDOS: u8 = 0;
const HOST_UNIX: u8 = 3;
const HOST_NTFS: u8 = 11;
const HOST_VFAT: u8 = 14;
const HOST_MACOS: u8 = 19;

/// MS-DOS directory attribute
const MSDOS_DIR: u32 = 0x10;
/// Unix file type bits and the directory type, from the upper 16 bits of
/// the external attributes
const UNIX_TYPE_MASK: u32 = 0o170000;
const UNIX_DIR: u32 = 0o040000;

/// One member of an archive, as described by the central directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZipEntry {
    pub name: String,
    pub version_made_by: u16,
    pub method: CompressionMethod,
    pub flags: u16,
    pub crc32: u32,
    pub compressed_size: u64,
    pub uncompressed_size: u64,
    pub lfh_offset: u64,
    pub external_attrs: u32,
}

impl ZipEntry {
    /// A trailing slash marks a directory, and so do the host's own
    /// attributes when the archiver recorded them.
    pub fn is_dir(&self) -> bool {
        if self.name.ends_with('/') {
            return true;
        }
        match (self.version_made_by >> 8) as u8 {
            HOST_UNIX | HOST_MACOS => (self.external_attrs >> 16) & UNIX_TYPE_MASK == UNIX_DIR,
            HOST_MSDOS | HOST_NTFS | HOST_VFAT => self.external_attrs & MSDOS_DIR != 0,
            _ => false,
        }
    }

    pub fn is_encrypted(&self) -> bool {
        self.flags & FLAG_ENCRYPTED != 0
    }
}
