//! Bounded retry driver for the fetch layer.
//!
//! The policy supplies the retry count; the caller supplies the backoff.

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::error::RetryError;
use crate::manager::{CacheManager, OperationKind};
use crate::refresh::AbortSignal;

/// Delay between attempts, chosen by the caller.
#[derive(Clone)]
pub enum Backoff {
    /// Retry immediately.
    None,
    /// Wait the same time before every retry.
    Fixed(Duration),
    /// Wait `base * 2^(retry - 1)`, capped at `max`.
    Exponential { base: Duration, max: Duration },
    /// Compute the delay from the 1-based retry number.
    Custom(Arc<dyn Fn(u32) -> Duration + Send + Sync>),
}

impl Backoff {
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(u32) -> Duration + Send + Sync + 'static,
    {
        Backoff::Custom(Arc::new(f))
    }

    /// Delay before the `retry`-th retry (1-based).
    pub fn delay(&self, retry: u32) -> Duration {
        match self {
            Backoff::None => Duration::ZERO,
            Backoff::Fixed(delay) => *delay,
            Backoff::Exponential { base, max } => {
                let factor = 2u32.checked_pow(retry.saturating_sub(1)).unwrap_or(u32::MAX);
                base.saturating_mul(factor).min(*max)
            }
            Backoff::Custom(f) => f(retry),
        }
    }
}

impl fmt::Debug for Backoff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backoff::None => f.write_str("None"),
            Backoff::Fixed(delay) => f.debug_tuple("Fixed").field(delay).finish(),
            Backoff::Exponential { base, max } => f
                .debug_struct("Exponential")
                .field("base", base)
                .field("max", max)
                .finish(),
            Backoff::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Run `op` with up to `retry_count_for(kind)` retries after the first attempt.
///
/// `op` receives the 1-based attempt number. Retries happen silently; only
/// the last failure is reported. If `signal` is aborted the driver stops
/// before the next attempt or during a backoff sleep.
pub async fn run_with_retries<T, E, F, Fut>(
    manager: &CacheManager,
    kind: OperationKind,
    backoff: &Backoff,
    signal: Option<&AbortSignal>,
    mut op: F,
) -> Result<T, RetryError<E>>
where
    E: std::error::Error + 'static,
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let max_attempts = manager.retry_count_for(kind).saturating_add(1);
    let mut attempt = 0;

    loop {
        if signal.is_some_and(AbortSignal::is_aborted) {
            return Err(RetryError::Aborted { attempts: attempt });
        }

        attempt += 1;
        let err = match op(attempt).await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };

        if attempt >= max_attempts {
            tracing::debug!(
                "Retries exhausted: kind={:?}, attempts={}, error={}",
                kind,
                attempt,
                err
            );
            return Err(RetryError::Exhausted {
                attempts: attempt,
                source: err,
            });
        }

        let delay = backoff.delay(attempt);
        tracing::debug!(
            "Attempt failed, retrying: kind={:?}, attempt={}, delay_ms={}, error={}",
            kind,
            attempt,
            delay.as_millis(),
            err
        );

        match signal {
            Some(signal) => {
                tokio::select! {
                    _ = tokio::time::sleep(delay) => {}
                    _ = signal.aborted() => {
                        return Err(RetryError::Aborted { attempts: attempt });
                    }
                }
            }
            None => tokio::time::sleep(delay).await,
        }
    }
}
