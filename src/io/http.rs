use async_trait::async_trait;
use reqwest::{Client, StatusCode, header};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::{debug, warn};

use super::ReadAt;
use anyhow::{Context, Result, anyhow, bail};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_ATTEMPTS: u32 = 10;

/// Archive served over HTTP(S), fetched piecewise with Range requests.
///
/// Only the central directory and the entries being scanned are downloaded.
pub struct HttpRangeReader {
    client: Client,
    url: String,
    size: u64,
    transferred: AtomicU64,
}

impl HttpRangeReader {
    /// Send a HEAD request to `url` and check that it can serve byte ranges.
    pub async fn connect(url: &str) -> Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        let resp = client
            .head(url)
            .send()
            .await
            .with_context(|| format!("HEAD {url} failed"))?;
        if !resp.status().is_success() {
            bail!("HEAD {} returned {}", url, resp.status());
        }

        let headers = resp.headers();
        let ranges = headers
            .get(header::ACCEPT_RANGES)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("none");
        if !ranges.contains("bytes") {
            bail!("{url} does not accept byte Range requests");
        }

        let size = headers
            .get(header::CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| anyhow!("{url} did not report a Content-Length"))?;
        debug!(url, size, "remote archive reachable");

        Ok(Self {
            client,
            url: url.to_string(),
            size,
            transferred: AtomicU64::new(0),
        })
    }

    /// Bytes received from the network so far
    pub fn transferred_bytes(&self) -> u64 {
        self.transferred.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl ReadAt for HttpRangeReader {
    async fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<usize> {
        if buf.is_empty() || offset >= self.size {
            return Ok(0);
        }

        let last = (offset + buf.len() as u64 - 1).min(self.size - 1);
        let wanted = (last - offset + 1) as usize;
        let mut received = 0;
        let mut attempt = 0;

        while received < wanted {
            let range = format!("bytes={}-{}", offset + received as u64, last);
            match self
                .client
                .get(&self.url)
                .header(header::RANGE, &range)
                .send()
                .await
            {
                Ok(resp) => {
                    if resp.status() != StatusCode::PARTIAL_CONTENT {
                        bail!("GET {} ({}) returned {}", self.url, range, resp.status());
                    }
                    let body = resp.bytes().await?;
                    if body.is_empty() {
                        bail!("GET {} ({}) returned an empty body", self.url, range);
                    }
                    let n = body.len().min(wanted - received);
                    buf[received..received + n].copy_from_slice(&body[..n]);
                    received += n;
                    self.transferred.fetch_add(n as u64, Ordering::Relaxed);
                }
                Err(e) if e.is_timeout() || e.is_connect() => {
                    attempt += 1;
                    if attempt >= MAX_ATTEMPTS {
                        bail!("giving up on {} after {} attempts: {}", self.url, attempt, e);
                    }
                    warn!(attempt, max = MAX_ATTEMPTS, error = %e, "range request failed, retrying");
                    tokio::time::sleep(Duration::from_millis(500 * attempt as u64)).await;
                }
                Err(e) => return Err(e.into()),
            }
        }

        Ok(received)
    }

    fn size(&self) -> u64 {
        self.size
    }
}
