use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::Result;

/// Memoization with a time-to-live, handed explicitly to whoever fetches.
/// Entries live in memory only; there is no persistence layer anywhere in
/// this crate.
#[derive(Debug)]
pub struct TtlCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, Slot>>,
}

#[derive(Debug, Clone)]
struct Slot {
    body: String,
    stored_at: Instant,
}

impl TtlCache {
    pub fn new(ttl: Duration) -> Self {
        TtlCache {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        let guard = self.entries.lock().expect("cache lock poisoned");
        let slot = guard.get(key)?;
        if slot.stored_at.elapsed() >= self.ttl {
            return None;
        }
        Some(slot.body.clone())
    }

    pub fn put(&self, key: &str, body: String) {
        let mut guard = self.entries.lock().expect("cache lock poisoned");
        guard.insert(
            key.to_string(),
            Slot {
                body,
                stored_at: Instant::now(),
            },
        );
    }

    /// Memoized computation. Failures are not cached, so the next call
    /// retries the fetch.
    pub fn get_or_fetch(
        &self,
        key: &str,
        fetch: impl FnOnce() -> Result<String>,
    ) -> Result<String> {
        if let Some(body) = self.get(key) {
            return Ok(body);
        }
        let body = fetch()?;
        self.put(key, body.clone());
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_within_ttl() {
        let cache = TtlCache::new(Duration::from_secs(3600));
        cache.put("k", "body".to_string());
        assert_eq!(cache.get("k"), Some("body".to_string()));
        assert_eq!(cache.get("other"), None);
    }

    #[test]
    fn zero_ttl_never_hits() {
        let cache = TtlCache::new(Duration::ZERO);
        cache.put("k", "body".to_string());
        assert_eq!(cache.get("k"), None);
    }

    #[test]
    fn get_or_fetch_memoizes_and_retries_on_error() {
        let cache = TtlCache::new(Duration::from_secs(3600));
        let mut calls = 0;
        let _ = cache.get_or_fetch("k", || {
            calls += 1;
            Err(anyhow::anyhow!("down"))
        });
        let first = cache
            .get_or_fetch("k", || {
                calls += 1;
                Ok("body".to_string())
            })
            .unwrap();
        let second = cache
            .get_or_fetch("k", || {
                calls += 1;
                Ok("never used".to_string())
            })
            .unwrap();
        assert_eq!(first, "body");
        assert_eq!(second, "body");
        assert_eq!(calls, 2);
    }
}
