#![allow(dead_code)]

use anyhow::Result;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Build an archive in memory. Names ending in `/` become directories.
pub fn build_zip(method: CompressionMethod, members: &[(&str, &str)]) -> Result<Vec<u8>> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = || SimpleFileOptions::default().compression_method(method);

    for (name, content) in members {
        if name.ends_with('/') {
            writer.add_directory(*name, options())?;
        } else {
            writer.start_file(*name, options())?;
            writer.write_all(content.as_bytes())?;
        }
    }

    Ok(writer.finish()?.into_inner())
}

/// Write a DEFLATE archive into `dir` and return its path.
pub fn write_zip(dir: &Path, file_name: &str, members: &[(&str, &str)]) -> Result<PathBuf> {
    write_bytes(dir, file_name, &build_zip(CompressionMethod::Deflated, members)?)
}

pub fn write_bytes(dir: &Path, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
    let path = dir.join(file_name);
    std::fs::write(&path, bytes)?;
    Ok(path)
}

/// Offset of the first occurrence of `needle` in `haystack`.
pub fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Offset of the first central directory header
pub fn central_header(archive: &[u8]) -> usize {
    find(archive, b"PK\x01\x02").expect("archive has a central directory")
}
