//! Concurrent key → bucket registry.
//!
//! Backed by a [`DashMap`], whose shards are independently locked. Every
//! per-key operation runs under that key's shard write lock, which gives
//! three guarantees:
//!
//! - first access creates exactly one bucket, even when many callers race;
//! - refill and consume for one key cannot interleave, so the last token is
//!   spent at most once;
//! - [`KeyRegistry::sweep`] removes an entry while holding the same lock a
//!   lookup needs, so a key is never handed out after it was removed.
//!
//! The number of distinct keys is not bounded. An attacker cycling through
//! source addresses grows the map until the janitor's eviction horizon
//! catches up; this is an accepted limitation.

use std::time::Duration;

use dashmap::DashMap;
use dashmap::mapref::one::RefMut;
use tokio::time::Instant;

use crate::config::RouteLimit;
use crate::key::RequestKey;
use crate::rate_limit::TokenBucket;

// Registry entry - a bucket plus when its key was last requested
#[derive(Debug)]
pub struct RegistryEntry {
    pub bucket: TokenBucket,
    pub last_seen: Instant,
}

#[derive(Debug, Default)]
pub struct KeyRegistry {
    entries: DashMap<RequestKey, RegistryEntry>,
}

impl KeyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the entry for `key`, creating a full bucket if there is none,
    /// and marks the key as seen at `now`.
    ///
    /// The returned guard holds the shard lock. Drop it before awaiting.
    /// The key is only cloned when a new entry is inserted.
    pub fn get_or_create(
        &self,
        key: &RequestKey,
        limit: &RouteLimit,
        now: Instant,
    ) -> RefMut<'_, RequestKey, RegistryEntry> {
        let mut entry = match self.entries.get_mut(key) {
            Some(entry) => entry,
            None => self.entries.entry(key.clone()).or_insert_with(|| RegistryEntry {
                bucket: TokenBucket::new(limit.rate, limit.burst, now),
                last_seen: now,
            }),
        };
        entry.last_seen = now;
        entry
    }

    /// Get-or-create plus one consume attempt, under a single lock.
    pub fn admit(&self, key: &RequestKey, limit: &RouteLimit, now: Instant) -> bool {
        self.get_or_create(key, limit, now).bucket.try_consume_at(now)
    }

    /// Removes every entry idle for longer than `expire_after` and returns
    /// how many went.
    pub fn sweep(&self, expire_after: Duration, now: Instant) -> usize {
        let mut evicted = 0;
        self.entries.retain(|_, entry| {
            let keep = now.saturating_duration_since(entry.last_seen) <= expire_after;
            if !keep {
                evicted += 1;
            }
            keep
        });
        evicted
    }

    pub fn contains(&self, key: &RequestKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
