//! HTTP fetcher for the country list.
//!
//! This module provides:
//!
//! - `Fetcher`: the single-operation transport the store depends on
//! - `HttpFetcher`: the `reqwest` implementation used by the binary
//! - `FetchError`: why a fetch produced no usable bytes
//!
//! A fetch only succeeds with a non-empty body from a 2xx response. Decoding is
//! left to the caller.

use std::future::Future;
use std::time::{Duration, Instant};

use thiserror::Error;

/// User agent for requests
const USER_AGENT: &str = concat!("countries/", env!("CARGO_PKG_VERSION"));

/// Why a fetch failed
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection, TLS, timeout or body read failure
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response status outside 200-299
    #[error("HTTP {0}")]
    Status(u16),

    /// 2xx response without a body
    #[error("Empty response body")]
    EmptyBody,
}

/// Performs a single GET and yields the raw body.
///
/// Implementations complete exactly once per call and never panic on
/// transport problems; every failure is reported as a `FetchError`.
pub trait Fetcher: Send + Sync + 'static {
    fn get(&self, url: &str) -> impl Future<Output = Result<Vec<u8>, FetchError>> + Send;
}

/// `reqwest`-backed fetcher
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Create a fetcher whose requests give up after `timeout`
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self::with_client(client))
    }

    /// Wrap an already configured client
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Fetcher for HttpFetcher {
    fn get(&self, url: &str) -> impl Future<Output = Result<Vec<u8>, FetchError>> + Send {
        let request = self
            .client
            .get(url)
            .header("Accept", "application/json");
        let url = url.to_string();

        async move {
            let start = Instant::now();
            let response = request.send().await?;

            let status = response.status();
            if !status.is_success() {
                tracing::warn!("GET {} returned {}", url, status);
                return Err(FetchError::Status(status.as_u16()));
            }

            let body = response.bytes().await?;
            if body.is_empty() {
                tracing::warn!("GET {} returned an empty body", url);
                return Err(FetchError::EmptyBody);
            }

            tracing::info!(
                "Fetched {} bytes from {} in {:.1}s",
                body.len(),
                url,
                start.elapsed().as_secs_f32()
            );
            Ok(body.to_vec())
        }
    }
}
