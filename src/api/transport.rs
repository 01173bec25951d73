//! Network transport behind the caching client
//!
//! The client only needs "GET this URL, give me the body", so the transport is a
//! narrow trait. [`HttpTransport`] talks to the real API; [`MockTransport`]
//! serves canned bodies for tests and counts how often it was asked.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use reqwest::Client;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors raised by a transport
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed (connection, timeout, body read)
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },
}

/// Fetches raw response bodies by URL
#[async_trait]
pub trait Transport: Send + Sync {
    /// Performs a GET request and returns the body on a success status
    async fn get(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// Transport backed by a `reqwest` client
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Creates a transport whose requests give up after `timeout`
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        debug!(url, "GET");
        let response = self.client.get(url).send().await.map_err(|e| {
            warn!(url, error = %e, "request failed");
            e
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(url, status = status.as_u16(), "unexpected status");
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}

/// In-memory transport for tests
///
/// URLs without a registered body answer with HTTP 404.
#[derive(Debug, Default)]
pub struct MockTransport {
    bodies: Mutex<HashMap<String, Vec<u8>>>,
    calls: AtomicUsize,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a transport pre-populated with `(url, body)` pairs
    pub fn with_bodies(
        bodies: impl IntoIterator<Item = (impl Into<String>, impl Into<Vec<u8>>)>,
    ) -> Self {
        let transport = Self::new();
        for (url, body) in bodies {
            transport.insert(url, body);
        }
        transport
    }

    /// Registers (or replaces) the body served for `url`
    pub fn insert(&self, url: impl Into<String>, body: impl Into<Vec<u8>>) {
        self.bodies.lock().insert(url.into(), body.into());
    }

    /// Number of `get` calls made so far, successful or not
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.bodies
            .lock()
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::Status {
                url: url.to_string(),
                status: 404,
            })
    }
}
