use serde::{Deserialize, Serialize};

/// Timestamps the fetch layer keeps for each cached entry.
///
/// The values themselves live in the fetch layer; the policy only ever
/// looks at when an entry was fetched and when it was last read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryTimestamps {
    /// Unix timestamp in milliseconds of the last successful fetch.
    pub last_fetched_at: i64,
    /// Unix timestamp in milliseconds of the last read by a consumer.
    pub last_accessed_at: i64,
}

impl EntryTimestamps {
    /// A freshly fetched entry, accessed at the same instant.
    pub fn fetched(now_ms: i64) -> Self {
        EntryTimestamps {
            last_fetched_at: now_ms,
            last_accessed_at: now_ms,
        }
    }

    /// Record a read.
    pub fn touch(&mut self, now_ms: i64) {
        self.last_accessed_at = now_ms;
    }

    /// Record a successful fetch. This also counts as an access.
    pub fn mark_fetched(&mut self, now_ms: i64) {
        self.last_fetched_at = now_ms;
        self.last_accessed_at = now_ms;
    }

    /// Milliseconds since the last fetch. Future timestamps count as zero.
    pub fn since_fetched(&self, now_ms: i64) -> u64 {
        elapsed(self.last_fetched_at, now_ms)
    }

    /// Milliseconds since the last access. Future timestamps count as zero.
    pub fn since_accessed(&self, now_ms: i64) -> u64 {
        elapsed(self.last_accessed_at, now_ms)
    }
}

fn elapsed(since: i64, now_ms: i64) -> u64 {
    u64::try_from(now_ms.saturating_sub(since)).unwrap_or(0)
}

/// Where an entry sits in its lifecycle.
///
/// `Fresh -> Stale` happens by elapsed time alone. `Evicted` is terminal;
/// a later request starts a new entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryState {
    /// Fetched within the staleness window.
    Fresh,
    /// Past the staleness window, still served, eligible for background refresh.
    Stale,
    /// Unused past the eviction window.
    Evicted,
}
