//! Byte sources an archive can be read from.

mod http;
mod local;

pub use http::HttpRangeReader;
pub use local::LocalFileReader;

use anyhow::{Result, bail};
use async_trait::async_trait;

/// Random access reads from an archive source
#[async_trait]
pub trait ReadAt: Send + Sync {
    /// Read data at the specified offset into the buffer, returning how many
    /// bytes were read. A short read is not an error.
    async fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<usize>;

    /// Total size of the source in bytes
    fn size(&self) -> u64;

    /// Fill `buf` completely starting at `offset`.
    async fn read_exact_at(&self, offset: u64, buf: &mut [u8]) -> Result<()> {
        let mut filled = 0;
        while filled < buf.len() {
            let n = self.read_at(offset + filled as u64, &mut buf[filled..]).await?;
            if n == 0 {
                bail!(
                    "Unexpected end of data at offset {} ({} of {} bytes read)",
                    offset,
                    filled,
                    buf.len()
                );
            }
            filled += n;
        }
        Ok(())
    }
}

/// Check whether an archive location names a remote HTTP(S) resource.
pub fn is_http_url(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Source that hands out at most `chunk` bytes per call.
    struct Trickle {
        data: Vec<u8>,
        chunk: usize,
    }

    #[async_trait]
    impl ReadAt for Trickle {
        async fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<usize> {
            let start = (offset as usize).min(self.data.len());
            let n = buf.len().min(self.chunk).min(self.data.len() - start);
            buf[..n].copy_from_slice(&self.data[start..start + n]);
            Ok(n)
        }

        fn size(&self) -> u64 {
            self.data.len() as u64
        }
    }

    #[tokio::test]
    async fn read_exact_at_joins_short_reads() {
        let src = Trickle {
            data: (0u8..32).collect(),
            chunk: 3,
        };
        let mut buf = [0u8; 10];
        src.read_exact_at(5, &mut buf).await.unwrap();
        assert_eq!(buf, [5, 6, 7, 8, 9, 10, 11, 12, 13, 14]);
    }

    #[tokio::test]
    async fn read_exact_at_fails_past_end() {
        let src = Trickle {
            data: vec![1, 2, 3],
            chunk: 8,
        };
        let mut buf = [0u8; 4];
        assert!(src.read_exact_at(1, &mut buf).await.is_err());
    }

    #[test]
    fn detects_http_locations() {
        assert!(is_http_url("https://example.com/a.zip"));
        assert!(is_http_url("http://localhost:8080/a.zip"));
        assert!(!is_http_url("archives/http.zip"));
    }
}
