//! Time-based in-memory cache for raw API responses
//!
//! Provides an `ExpiringCache` that maps request URLs to response bodies. Entries
//! are removed by a background sweep task rather than on lookup, so a lookup only
//! ever sees what the last sweep left behind.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, warn};

/// Shortest TTL the sweep will run with
pub const MIN_TTL: Duration = Duration::from_millis(1);

/// A single cached response body
#[derive(Debug)]
struct CacheEntry {
    /// When the entry was inserted
    created_at: Instant,
    /// The raw response body
    value: Vec<u8>,
}

type Entries = Arc<Mutex<HashMap<String, CacheEntry>>>;

/// In-memory key/bytes cache with a background expiry sweep
///
/// The sweep wakes once per TTL and drops every entry whose age at wake time is
/// at least the TTL, so an entry lives for at least one TTL and at most two.
/// All access goes through one mutex; the sweep holds it for a whole pass and
/// never across an await point.
///
/// Must be constructed from within a Tokio runtime. The sweep task stops when the
/// cache is dropped or [`ExpiringCache::shutdown`] is called.
#[derive(Debug)]
pub struct ExpiringCache {
    entries: Entries,
    ttl: Duration,
    shutdown_tx: mpsc::Sender<()>,
}

impl ExpiringCache {
    /// Creates an empty cache and spawns its sweep task
    ///
    /// # Arguments
    /// * `ttl` - Both the expiry threshold and the sweep interval; raised to
    ///   [`MIN_TTL`] if shorter
    ///
    /// # Panics
    /// Panics if called outside a Tokio runtime.
    pub fn new(ttl: Duration) -> Self {
        if ttl < MIN_TTL {
            warn!(?ttl, min = ?MIN_TTL, "cache TTL too short, clamping");
        }
        let ttl = ttl.max(MIN_TTL);
        let entries: Entries = Arc::new(Mutex::new(HashMap::new()));
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);

        // Created here rather than in the task so the first deadline is anchored
        // to construction time, not to whenever the task first gets polled.
        let mut ticker = tokio::time::interval_at(Instant::now() + ttl, ttl);
        let sweep_entries = Arc::clone(&entries);

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        sweep(&sweep_entries, ttl);
                    }
                    _ = shutdown_rx.recv() => {
                        debug!("cache sweep stopped");
                        break;
                    }
                }
            }
        });

        Self {
            entries,
            ttl,
            shutdown_tx,
        }
    }

    /// Inserts or replaces the entry for `key`, stamping it with the current time
    pub fn put(&self, key: impl Into<String>, value: Vec<u8>) {
        let key = key.into();
        let mut entries = self.entries.lock();
        debug!(key = %key, bytes = value.len(), "cache put");
        entries.insert(
            key,
            CacheEntry {
                created_at: Instant::now(),
                value,
            },
        );
    }

    /// Returns a copy of the stored value if the sweep has not removed it yet
    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        let entries = self.entries.lock();
        match entries.get(key) {
            Some(entry) => {
                debug!(key, "cache hit");
                Some(entry.value.clone())
            }
            None => {
                debug!(key, "cache miss");
                None
            }
        }
    }

    /// Number of entries currently held
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Whether the cache holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// The configured time-to-live
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Stops the background sweep; entries already present are kept
    pub async fn shutdown(&self) {
        let _ = self.shutdown_tx.send(()).await;
    }
}

/// Removes every entry at least `ttl` old, in one locked pass
fn sweep(entries: &Mutex<HashMap<String, CacheEntry>>, ttl: Duration) {
    let now = Instant::now();
    let mut entries = entries.lock();
    let before = entries.len();
    entries.retain(|_, entry| now.duration_since(entry.created_at) < ttl);
    let removed = before - entries.len();
    if removed > 0 {
        debug!(removed, remaining = entries.len(), "cache sweep");
    }
}
