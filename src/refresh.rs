//! Abort signals for in-flight background refreshes.
//!
//! At most one refresh is tracked per cache key. Every refresh token is a
//! child of one root token, so shutting the registry down aborts them all.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio_util::sync::CancellationToken;

/// Signal a fetch layer polls or awaits to stop a refresh early.
#[derive(Debug, Clone)]
pub struct AbortSignal {
    token: CancellationToken,
}

impl AbortSignal {
    pub fn is_aborted(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Resolves once the refresh is aborted.
    pub async fn aborted(&self) {
        self.token.cancelled().await;
    }
}

struct InFlight {
    id: u64,
    token: CancellationToken,
}

struct Inner {
    root: CancellationToken,
    next_id: AtomicU64,
    in_flight: Mutex<HashMap<String, InFlight>>,
}

impl Inner {
    fn lock(&self) -> MutexGuard<'_, HashMap<String, InFlight>> {
        self.in_flight.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Tracks in-flight refreshes by cache key.
#[derive(Clone)]
pub struct RefreshRegistry {
    inner: Arc<Inner>,
}

impl Default for RefreshRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl RefreshRegistry {
    pub fn new() -> Self {
        RefreshRegistry {
            inner: Arc::new(Inner {
                root: CancellationToken::new(),
                next_id: AtomicU64::new(0),
                in_flight: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// Start tracking a refresh for `key`.
    ///
    /// Returns `None` if a refresh for `key` is already in flight or the
    /// registry has been shut down.
    pub fn begin(&self, key: &str) -> Option<RefreshTicket> {
        let mut map = self.inner.lock();
        if self.inner.root.is_cancelled() {
            tracing::debug!("Refusing refresh after shutdown: key={}", key);
            return None;
        }
        if map.contains_key(key) {
            tracing::debug!("Refresh already in flight: key={}", key);
            return None;
        }

        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        let token = self.inner.root.child_token();
        map.insert(
            key.to_string(),
            InFlight {
                id,
                token: token.clone(),
            },
        );

        Some(RefreshTicket {
            key: key.to_string(),
            id,
            signal: AbortSignal { token },
            inner: Arc::clone(&self.inner),
        })
    }

    /// Signal of the refresh currently in flight for `key`.
    pub fn signal(&self, key: &str) -> Option<AbortSignal> {
        self.inner.lock().get(key).map(|in_flight| AbortSignal {
            token: in_flight.token.clone(),
        })
    }

    pub fn is_in_flight(&self, key: &str) -> bool {
        self.inner.lock().contains_key(key)
    }

    pub fn in_flight_count(&self) -> usize {
        self.inner.lock().len()
    }

    /// Abort and forget the refresh for `key`. Returns whether one was in flight.
    pub fn abort(&self, key: &str) -> bool {
        let removed = self.inner.lock().remove(key);
        match removed {
            Some(in_flight) => {
                in_flight.token.cancel();
                tracing::debug!("Aborted refresh: key={}", key);
                true
            }
            None => false,
        }
    }

    /// Abort every refresh and refuse new ones.
    pub fn shutdown(&self) {
        self.inner.root.cancel();
        let drained = {
            let mut map = self.inner.lock();
            let count = map.len();
            map.clear();
            count
        };
        tracing::debug!("Refresh registry shut down: aborted={}", drained);
    }

    pub fn is_shut_down(&self) -> bool {
        self.inner.root.is_cancelled()
    }
}

/// Handle for one in-flight refresh. Dropping it ends the refresh.
pub struct RefreshTicket {
    key: String,
    id: u64,
    signal: AbortSignal,
    inner: Arc<Inner>,
}

impl RefreshTicket {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn signal(&self) -> AbortSignal {
        self.signal.clone()
    }

    pub fn is_aborted(&self) -> bool {
        self.signal.is_aborted()
    }

    /// Mark the refresh as finished.
    pub fn finish(self) {}
}

impl Drop for RefreshTicket {
    fn drop(&mut self) {
        let mut map = self.inner.lock();
        // The key may already belong to a newer refresh after an abort.
        if map.get(&self.key).is_some_and(|f| f.id == self.id) {
            map.remove(&self.key);
        }
    }
}

impl std::fmt::Debug for RefreshTicket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshTicket")
            .field("key", &self.key)
            .field("aborted", &self.is_aborted())
            .finish()
    }
}
