use super::ReadAt;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::fs::File;
use std::path::Path;

/// Archive stored on the local filesystem
pub struct LocalFileReader {
    file: File,
    size: u64,
}

impl LocalFileReader {
    pub fn open(path: &Path) -> Result<Self> {
        let file =
            File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
        let metadata = file.metadata()?;
        if metadata.is_dir() {
            anyhow::bail!("{} is a directory", path.display());
        }
        Ok(Self {
            file,
            size: metadata.len(),
        })
    }
}

#[async_trait]
impl ReadAt for LocalFileReader {
    async fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<usize> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::FileExt;
            Ok(self.file.read_at(buf, offset)?)
        }

        #[cfg(windows)]
        {
            // seek_read moves the cursor, which nothing else relies on
            use std::os::windows::fs::FileExt;
            Ok(self.file.seek_read(buf, offset)?)
        }

        #[cfg(not(any(unix, windows)))]
        {
            use std::io::{Read, Seek, SeekFrom};
            let mut file = &self.file;
            file.seek(SeekFrom::Start(offset))?;
            Ok(file.read(buf)?)
        }
    }

    fn size(&self) -> u64 {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn reads_at_offset() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(b"PK archive bytes").unwrap();

        let reader = LocalFileReader::open(tmp.path()).unwrap();
        assert_eq!(reader.size(), 16);

        let mut buf = [0u8; 7];
        reader.read_exact_at(3, &mut buf).await.unwrap();
        assert_eq!(&buf, b"archive");
    }

    #[test]
    fn rejects_missing_and_directory_paths() {
        let dir = tempfile::tempdir().unwrap();
        assert!(LocalFileReader::open(&dir.path().join("missing.zip")).is_err());
        assert!(LocalFileReader::open(dir.path()).is_err());
    }
}
