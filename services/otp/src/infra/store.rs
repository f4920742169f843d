use std::sync::Arc;

use chrono::Duration;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::domain::repository::{Clock, CodeStore};
use crate::domain::types::{CodeEntry, Identifier, Verification};

/// Process-local code store over a sharded map.
///
/// `verify` runs under the key's shard lock and `sweep` takes the same locks
/// shard by shard, so the expiry check and the eviction are atomic with
/// respect to each other. Different identifiers only contend when they hash
/// to the same shard.
pub struct InMemoryCodeStore {
    entries: DashMap<String, CodeEntry>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl InMemoryCodeStore {
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
            clock,
        }
    }

    /// Snapshot of the pending entry, without consuming it.
    pub fn peek(&self, identifier: &Identifier) -> Option<CodeEntry> {
        self.entries
            .get(identifier.as_str())
            .map(|entry| entry.value().clone())
    }
}

impl CodeStore for InMemoryCodeStore {
    fn issue(&self, identifier: &Identifier, code: &str) {
        let entry = CodeEntry {
            code: code.to_owned(),
            issued_at: self.clock.now(),
        };
        if self
            .entries
            .insert(identifier.as_str().to_owned(), entry)
            .is_some()
        {
            tracing::debug!(identifier = %identifier.masked(), "replaced pending code");
        }
    }

    fn verify(&self, identifier: &Identifier, supplied: &str) -> Verification {
        match self.entries.entry(identifier.as_str().to_owned()) {
            Entry::Vacant(_) => Verification::NotFound,
            Entry::Occupied(occupied) => {
                if occupied.get().is_expired(self.clock.now(), self.ttl) {
                    occupied.remove();
                    Verification::Expired
                } else if occupied.get().code == supplied {
                    occupied.remove();
                    Verification::Success
                } else {
                    Verification::Mismatch
                }
            }
        }
    }

    fn sweep(&self) -> usize {
        let now = self.clock.now();
        let mut evicted = 0;
        self.entries.retain(|_, entry| {
            let keep = !entry.is_expired(now, self.ttl);
            if !keep {
                evicted += 1;
            }
            keep
        });
        evicted
    }

    fn ttl(&self) -> Duration {
        self.ttl
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
