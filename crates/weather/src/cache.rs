//! TTL cache for provider responses.

use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Response cache with per-entry expiry.
///
/// Keyed by request URL. Keeps repeated polls inside a scheduling window
/// from re-spending provider quota; entries expire after the TTL and are
/// overwritten on the next successful fetch.
#[derive(Debug)]
pub struct ResponseCache {
    ttl: Duration,
    entries: HashMap<String, (Instant, String)>,
}

impl ResponseCache {
    /// Default cache TTL, in seconds.
    pub const DEFAULT_TTL_SECS: u64 = 300;

    /// Create a cache with the given TTL.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    /// Cached body for a key, if present and fresh.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).and_then(|(stored, body)| {
            if stored.elapsed() < self.ttl {
                Some(body.as_str())
            } else {
                None
            }
        })
    }

    /// Store a response body.
    pub fn put(&mut self, key: &str, body: String) {
        self.entries.insert(key.to_string(), (Instant::now(), body));
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new(Duration::from_secs(Self::DEFAULT_TTL_SECS))
    }
}
