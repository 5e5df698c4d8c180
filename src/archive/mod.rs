//! ZIP archive reading.
//!
//! - [`structures`]: fixed-layout records (EOCD, ZIP64 records, entries)
//! - [`parser`]: central directory parsing over a [`ReadAt`](crate::io::ReadAt) source
//! - [`reader`]: per-entry decoding streams with size and CRC-32 checks
//!
//! ## Supported Features
//!
//! - Standard ZIP format and ZIP64 extensions
//! - STORED and DEFLATE entries
//!
//! ## Limitations
//!
//! - No encryption support
//! - No multi-disk archives
//! - No BZIP2, LZMA, or other compression methods

mod parser;
mod reader;
mod structures;

pub use parser::ZipParser;
pub use reader::{EntryReader, ZipArchive};
pub use structures::*;
