//! Integration tests for variant resolution and the shared cache policy.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use ui_swr_kit::{
    AppProviders, Backoff, BuildMode, ButtonProps, ButtonVariant, CacheManager,
    CachePolicyOverrides, ConfigError, EntryState, EntryTimestamps, GroupBuilder,
    InvalidSelectionError, ManualClock, OperationKind, ResolutionRequest, RetryError, UiKit,
    VariantSchema, create_cache_manager, run_with_retries,
};

// ============================================================================
// Test Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
#[error("origin unavailable")]
struct OriginDown;

// ============================================================================
// Fake Fetch Layer
// ============================================================================

/// Minimal fetch layer: owns the entries, asks the manager what to do.
struct FakeFetchLayer {
    manager: Arc<CacheManager>,
    entries: HashMap<String, (String, EntryTimestamps)>,
    origin_calls: Arc<AtomicUsize>,
    failures_before_success: usize,
}

impl FakeFetchLayer {
    fn new(manager: Arc<CacheManager>, failures_before_success: usize) -> Self {
        FakeFetchLayer {
            manager,
            entries: HashMap::new(),
            origin_calls: Arc::new(AtomicUsize::new(0)),
            failures_before_success,
        }
    }

    async fn read(&mut self, key: &str) -> Result<String, RetryError<OriginDown>> {
        let now = self.manager.now_ms();

        if let Some((_, timestamps)) = self.entries.get(key)
            && self.manager.entry_state_at(timestamps, now) == EntryState::Evicted
        {
            self.manager.evict(key);
            self.entries.remove(key);
        }

        if let Some((value, timestamps)) = self.entries.get_mut(key)
            && self.manager.entry_state_at(timestamps, now) == EntryState::Fresh
        {
            timestamps.touch(now);
            return Ok(value.clone());
        }

        let calls = self.origin_calls.clone();
        let failures = self.failures_before_success;
        let key_owned = key.to_string();
        let value = run_with_retries(
            &self.manager,
            OperationKind::Read,
            &Backoff::Fixed(Duration::from_millis(10)),
            None,
            move |_attempt| {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                let key = key_owned.clone();
                async move {
                    if n < failures {
                        Err(OriginDown)
                    } else {
                        Ok(format!("value for {key}"))
                    }
                }
            },
        )
        .await?;

        self.entries.insert(
            key.to_string(),
            (value.clone(), EntryTimestamps::fetched(self.manager.now_ms())),
        );
        Ok(value)
    }
}

fn manager_with_clock(
    clock: Arc<ManualClock>,
    overrides: CachePolicyOverrides,
) -> Arc<CacheManager> {
    Arc::new(
        CacheManager::builder()
            .mode(BuildMode::Production)
            .overrides(overrides)
            .clock(clock)
            .build()
            .unwrap(),
    )
}

fn example_button_schema() -> VariantSchema {
    VariantSchema::builder("btn")
        .group(
            GroupBuilder::new("variant")
                .choice("default", "btn-primary")
                .choice("outline", "btn-outline")
                .default_choice("default"),
        )
        .group(
            GroupBuilder::new("size")
                .choice("default", "h-10")
                .choice("lg", "h-11")
                .default_choice("default"),
        )
        .build()
        .unwrap()
}

// ============================================================================
// Variant Resolution Tests
// ============================================================================

#[test]
fn test_resolve_documented_example() {
    let schema = example_button_schema();
    let request = ResolutionRequest::new().select("size", "lg").extra("mt-4");
    assert_eq!(schema.resolve(&request).unwrap(), "btn btn-primary h-11 mt-4");
}

#[test]
fn test_resolve_rejects_nonexistent_choice() {
    let schema = example_button_schema();
    let request = ResolutionRequest::new().select("variant", "nonexistent");
    assert!(matches!(
        schema.resolve(&request),
        Err(InvalidSelectionError::UnknownChoice { .. })
    ));
}

#[test]
fn test_primitive_degrades_instead_of_failing() {
    let kit = UiKit::new().unwrap();
    let request = ResolutionRequest::new()
        .select("variant", "sparkly")
        .extra("mt-4");
    assert_eq!(
        kit.button_schema().resolve_or_default(&request),
        "btn btn-primary h-10 px-4 py-2 mt-4"
    );
}

#[tokio::test]
async fn test_concurrent_resolutions_do_not_interact() {
    let kit = Arc::new(UiKit::new().unwrap());

    let handles: Vec<_> = ButtonVariant::ALL
        .into_iter()
        .map(|variant| {
            let kit = kit.clone();
            tokio::spawn(async move {
                let props = ButtonProps {
                    variant: Some(variant),
                    ..ButtonProps::default()
                };
                (variant, kit.button(&props))
            })
        })
        .collect();

    let results = futures::future::join_all(handles).await;
    for result in results {
        let (variant, classes) = result.unwrap();
        let expected = kit.button(&ButtonProps {
            variant: Some(variant),
            ..ButtonProps::default()
        });
        assert_eq!(classes, expected);
        assert!(classes.starts_with("btn "));
    }
}

// ============================================================================
// Cache Policy Tests
// ============================================================================

#[test]
fn test_eviction_shorter_than_staleness_fails() {
    let err = create_cache_manager(Some(
        CachePolicyOverrides::default()
            .stale_after_ms(1_000)
            .evict_after_ms(500),
    ))
    .unwrap_err();
    assert!(matches!(err, ConfigError::EvictBeforeStale { .. }));
}

#[test]
fn test_overrides_from_config_document() {
    let overrides = CachePolicyOverrides::from_json(
        r#"{"readRetryCount": 2, "writeRetryCount": 0, "staleAfterMs": 60000, "evictAfterMs": 120000}"#,
    )
    .unwrap();
    let manager = CacheManager::builder()
        .mode(BuildMode::Production)
        .overrides(overrides)
        .build()
        .unwrap();

    assert_eq!(manager.retry_count_for(OperationKind::Read), 2);
    assert_eq!(manager.retry_count_for(OperationKind::Write), 0);
    assert_eq!(manager.config().stale_after_ms, 60_000);
    assert_eq!(manager.config().evict_after_ms, 120_000);
}

#[test]
fn test_negative_document_value_fails() {
    let overrides = CachePolicyOverrides::from_json(r#"{"evictAfterMs": -1}"#).unwrap();
    let err = CacheManager::new(overrides).unwrap_err();
    assert_eq!(
        err,
        ConfigError::Negative {
            field: "evictAfterMs"
        }
    );
}

#[test]
fn test_stale_check_against_window() {
    let clock = Arc::new(ManualClock::new(10_000));
    let entry = EntryTimestamps::fetched(10_000 - 1_000);

    let short = manager_with_clock(
        clock.clone(),
        CachePolicyOverrides::default().stale_after_ms(500),
    );
    assert!(short.is_stale(&entry));

    let long = manager_with_clock(clock, CachePolicyOverrides::default().stale_after_ms(5_000));
    assert!(!long.is_stale(&entry));
}

#[test]
fn test_refetch_on_focus_by_mode() {
    let dev = AppProviders::new(BuildMode::Development, CachePolicyOverrides::default()).unwrap();
    assert!(dev.cache_manager().should_refetch_on_focus());

    let prod = AppProviders::new(BuildMode::Production, CachePolicyOverrides::default()).unwrap();
    assert!(!prod.cache_manager().should_refetch_on_focus());
}

// ============================================================================
// Fetch Layer Lifecycle Tests
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_fresh_entry_served_without_origin_call() {
    let clock = Arc::new(ManualClock::new(0));
    let manager = manager_with_clock(
        clock.clone(),
        CachePolicyOverrides::default()
            .stale_after_ms(1_000)
            .evict_after_ms(5_000),
    );
    let mut layer = FakeFetchLayer::new(manager, 0);

    assert_eq!(layer.read("user:1").await.unwrap(), "value for user:1");
    clock.advance(500);
    assert_eq!(layer.read("user:1").await.unwrap(), "value for user:1");
    assert_eq!(layer.origin_calls.load(Ordering::SeqCst), 1);

    // Stale: the layer goes back to origin.
    clock.advance(600);
    layer.read("user:1").await.unwrap();
    assert_eq!(layer.origin_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn test_evicted_entry_starts_over() {
    let clock = Arc::new(ManualClock::new(0));
    let manager = manager_with_clock(
        clock.clone(),
        CachePolicyOverrides::default()
            .stale_after_ms(1_000)
            .evict_after_ms(2_000),
    );
    let mut layer = FakeFetchLayer::new(manager.clone(), 0);

    layer.read("user:1").await.unwrap();
    let ticket = manager.begin_refresh("user:1").unwrap();

    clock.advance(2_000);
    layer.read("user:1").await.unwrap();

    assert!(ticket.is_aborted());
    assert_eq!(layer.origin_calls.load(Ordering::SeqCst), 2);
    let (_, timestamps) = &layer.entries["user:1"];
    assert_eq!(manager.entry_state(timestamps), EntryState::Fresh);
}

#[tokio::test(start_paused = true)]
async fn test_reads_retry_up_to_configured_count() {
    let clock = Arc::new(ManualClock::new(0));
    let manager = manager_with_clock(clock, CachePolicyOverrides::default());

    // Three failures are absorbed by three retries.
    let mut layer = FakeFetchLayer::new(manager.clone(), 3);
    assert!(layer.read("user:1").await.is_ok());
    assert_eq!(layer.origin_calls.load(Ordering::SeqCst), 4);

    // Four failures exhaust them.
    let mut layer = FakeFetchLayer::new(manager, 4);
    let err = layer.read("user:1").await.unwrap_err();
    assert_eq!(err.attempts(), 4);
    assert!(matches!(err, RetryError::Exhausted { .. }));
}

#[tokio::test(start_paused = true)]
async fn test_focus_refetch_refreshes_stale_entries_once() {
    let clock = Arc::new(ManualClock::new(0));
    let manager = manager_with_clock(
        clock.clone(),
        CachePolicyOverrides::default()
            .stale_after_ms(1_000)
            .evict_after_ms(10_000)
            .refetch_on_focus(true),
    );

    let entries: Vec<(String, EntryTimestamps)> = (0..5)
        .map(|i| (format!("user:{i}"), EntryTimestamps::fetched(i * 500)))
        .collect();
    clock.set(2_000);

    let tickets = manager.focus_refetch(entries.iter().map(|(k, t)| (k.as_str(), t)));
    let mut keys: Vec<_> = tickets.iter().map(|t| t.key().to_string()).collect();
    keys.sort();
    assert_eq!(keys, vec!["user:0", "user:1", "user:2"]);

    let refreshed = Arc::new(AtomicUsize::new(0));
    let tasks: Vec<_> = tickets
        .into_iter()
        .map(|ticket| {
            let manager = manager.clone();
            let refreshed = refreshed.clone();
            tokio::spawn(async move {
                let signal = ticket.signal();
                let result = run_with_retries(
                    &manager,
                    OperationKind::Read,
                    &Backoff::None,
                    Some(&signal),
                    |_| async { Ok::<_, OriginDown>(()) },
                )
                .await;
                if result.is_ok() {
                    refreshed.fetch_add(1, Ordering::SeqCst);
                }
                ticket.finish();
            })
        })
        .collect();

    for task in futures::future::join_all(tasks).await {
        task.unwrap();
    }

    assert_eq!(refreshed.load(Ordering::SeqCst), 3);
    assert_eq!(manager.in_flight_refreshes(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_unmount_aborts_pending_refresh() {
    let providers = AppProviders::new(
        BuildMode::Development,
        CachePolicyOverrides::default().read_retry_count(10),
    )
    .unwrap();
    let manager = providers.cache_manager();
    let ticket = manager.begin_refresh("user:1").unwrap();
    let signal = ticket.signal();

    let refresh = tokio::spawn({
        let manager = manager.clone();
        async move {
            run_with_retries(
                &manager,
                OperationKind::Read,
                &Backoff::Fixed(Duration::from_secs(30)),
                Some(&signal),
                |_| async { Err::<(), _>(OriginDown) },
            )
            .await
        }
    });

    tokio::time::sleep(Duration::from_millis(10)).await;
    providers.unmount();

    let result = refresh.await.unwrap();
    assert!(matches!(result, Err(RetryError::Aborted { .. })));
    assert!(manager.begin_refresh("user:2").is_none());
}
