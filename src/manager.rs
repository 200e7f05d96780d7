use std::sync::Arc;

use crate::builder::CacheManagerBuilder;
use crate::entry::{EntryState, EntryTimestamps};
use crate::error::ConfigError;
use crate::policy::{BuildMode, CachePolicyConfig, CachePolicyOverrides};
use crate::refresh::{AbortSignal, RefreshRegistry, RefreshTicket};
use crate::utils::Clock;

/// Kind of data-fetch operation for retry purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Read,
    Write,
}

/// Shared authority for how fetched data is retried, staled and evicted.
///
/// Built once at boot and handed to every consumer behind an `Arc`. The
/// policy cannot change after construction; only the set of in-flight
/// refreshes does.
pub struct CacheManager {
    config: CachePolicyConfig,
    clock: Arc<dyn Clock>,
    refreshes: RefreshRegistry,
}

impl CacheManager {
    /// Build a manager for the current build mode with `overrides` applied.
    pub fn new(overrides: CachePolicyOverrides) -> Result<Self, ConfigError> {
        Self::builder().overrides(overrides).build()
    }

    pub fn builder() -> CacheManagerBuilder {
        CacheManagerBuilder::new()
    }

    pub(crate) fn from_parts(config: CachePolicyConfig, clock: Arc<dyn Clock>) -> Self {
        tracing::debug!(
            "Cache manager created: stale_after_ms={}, evict_after_ms={}, read_retries={}, write_retries={}, refetch_on_focus={}",
            config.stale_after_ms,
            config.evict_after_ms,
            config.read_retry_count,
            config.write_retry_count,
            config.refetch_on_focus
        );
        CacheManager {
            config,
            clock,
            refreshes: RefreshRegistry::new(),
        }
    }

    pub fn config(&self) -> &CachePolicyConfig {
        &self.config
    }

    /// Current time according to the manager's clock.
    pub fn now_ms(&self) -> i64 {
        self.clock.now_ms()
    }

    /// True once `stale_after_ms` has passed since the last fetch.
    pub fn is_stale(&self, entry: &EntryTimestamps) -> bool {
        self.is_stale_at(entry, self.now_ms())
    }

    pub fn is_stale_at(&self, entry: &EntryTimestamps, now_ms: i64) -> bool {
        entry.since_fetched(now_ms) >= self.config.stale_after_ms
    }

    /// True once `evict_after_ms` has passed since the last access.
    pub fn is_evictable(&self, entry: &EntryTimestamps) -> bool {
        self.is_evictable_at(entry, self.now_ms())
    }

    pub fn is_evictable_at(&self, entry: &EntryTimestamps, now_ms: i64) -> bool {
        entry.since_accessed(now_ms) >= self.config.evict_after_ms
    }

    pub fn entry_state(&self, entry: &EntryTimestamps) -> EntryState {
        self.entry_state_at(entry, self.now_ms())
    }

    pub fn entry_state_at(&self, entry: &EntryTimestamps, now_ms: i64) -> EntryState {
        if self.is_evictable_at(entry, now_ms) {
            EntryState::Evicted
        } else if self.is_stale_at(entry, now_ms) {
            EntryState::Stale
        } else {
            EntryState::Fresh
        }
    }

    /// Retries allowed after the first failed attempt.
    pub fn retry_count_for(&self, kind: OperationKind) -> u32 {
        match kind {
            OperationKind::Read => self.config.read_retry_count,
            OperationKind::Write => self.config.write_retry_count,
        }
    }

    pub fn should_refetch_on_focus(&self) -> bool {
        self.config.refetch_on_focus
    }

    /// Start a background refresh for `key`.
    ///
    /// Returns `None` if one is already in flight for `key` or the manager
    /// has been shut down.
    pub fn begin_refresh(&self, key: &str) -> Option<RefreshTicket> {
        self.refreshes.begin(key)
    }

    /// Abort signal of the refresh in flight for `key`, if any.
    pub fn abort_signal(&self, key: &str) -> Option<AbortSignal> {
        self.refreshes.signal(key)
    }

    /// Abort the refresh in flight for `key`. Returns whether there was one.
    pub fn abort_refresh(&self, key: &str) -> bool {
        self.refreshes.abort(key)
    }

    /// Called by the fetch layer when it purges `key`.
    pub fn evict(&self, key: &str) {
        if self.refreshes.abort(key) {
            tracing::debug!("Evicted entry with refresh in flight: key={}", key);
        }
    }

    /// Focus-regain hook.
    ///
    /// When refetch-on-focus is enabled, begins a refresh for every entry
    /// that is stale but not evictable and returns the tickets. Entries with
    /// a refresh already in flight are skipped.
    pub fn focus_refetch<'a, I>(&self, entries: I) -> Vec<RefreshTicket>
    where
        I: IntoIterator<Item = (&'a str, &'a EntryTimestamps)>,
    {
        if !self.should_refetch_on_focus() {
            return Vec::new();
        }

        let now = self.now_ms();
        let tickets: Vec<_> = entries
            .into_iter()
            .filter(|(_, entry)| self.entry_state_at(entry, now) == EntryState::Stale)
            .filter_map(|(key, _)| self.begin_refresh(key))
            .collect();

        tracing::debug!("Focus refetch started: count={}", tickets.len());
        tickets
    }

    pub fn in_flight_refreshes(&self) -> usize {
        self.refreshes.in_flight_count()
    }

    /// Tear down on application unmount: abort every refresh and refuse new ones.
    pub fn shutdown(&self) {
        self.refreshes.shutdown();
    }

    pub fn is_shut_down(&self) -> bool {
        self.refreshes.is_shut_down()
    }
}

impl std::fmt::Debug for CacheManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheManager")
            .field("config", &self.config)
            .field("in_flight_refreshes", &self.in_flight_refreshes())
            .finish()
    }
}

/// Build a manager for the current build mode, applying `overrides` if given.
pub fn create_cache_manager(
    overrides: Option<CachePolicyOverrides>,
) -> Result<CacheManager, ConfigError> {
    CacheManager::builder()
        .mode(BuildMode::current())
        .overrides(overrides.unwrap_or_default())
        .build()
}
