//! Cache module for memoizing API responses in memory
//!
//! This module provides an expiring cache that stores raw response bodies keyed by
//! request URL. Entries are evicted by a background sweep once they are older than
//! the configured TTL (time-to-live); nothing is persisted across runs.

mod expiring;

pub use expiring::{ExpiringCache, MIN_TTL};
