//! Boots the provider tree, renders a few primitives and walks one cache
//! entry through its lifecycle.
//!
//! Run with `APP_ENV=development RUST_LOG=debug` to see focus refetch and
//! the debug logs.

use std::sync::Arc;
use std::time::Duration;

use ui_swr_kit::{
    AppProviders, Backoff, BadgeProps, BadgeVariant, BuildMode, ButtonProps, ButtonSize,
    ButtonVariant, CacheManager, CachePolicyOverrides, CardPart, EntryTimestamps, ManualClock,
    OperationKind, ResolutionRequest, UiKit, run_with_retries,
};

#[derive(Debug, thiserror::Error)]
#[error("origin timed out")]
struct Timeout;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Schemas are built once; a broken schema stops the program here.
    let kit = UiKit::new()?;

    let cta = kit.button(&ButtonProps {
        variant: Some(ButtonVariant::Default),
        size: Some(ButtonSize::Lg),
        class_name: Some("mt-4".into()),
        ..ButtonProps::default()
    });
    let badge = kit.badge(&BadgeProps {
        variant: Some(BadgeVariant::Secondary),
        class_name: None,
    });
    let card = kit.card(CardPart::Card, Some("p-6"));
    println!("button: {cta}");
    println!("badge:  {badge}");
    println!("card:   {card}");

    // An unknown choice degrades to defaults and logs a warning.
    let fallback = kit
        .button_schema()
        .resolve_or_default(&ResolutionRequest::new().select("variant", "sparkly"));
    println!("fallback: {fallback}");

    // Policy overrides could come from a config file.
    let overrides =
        CachePolicyOverrides::from_json(r#"{"staleAfterMs": 1000, "evictAfterMs": 5000}"#)?;
    let mode = BuildMode::from_env();
    let clock = Arc::new(ManualClock::new(0));
    let manager = CacheManager::builder()
        .mode(mode)
        .overrides(overrides)
        .clock(clock.clone())
        .build()?;
    let providers = AppProviders::with_manager(mode, Arc::new(manager));
    let cache = providers.cache_manager();

    println!(
        "mode={:?} devtools={} theme={}",
        providers.mode(),
        providers.devtools_enabled(),
        providers.theme().root_class(None, false)
    );

    let mut entry = EntryTimestamps::fetched(cache.now_ms());
    println!("t=0     {:?}", cache.entry_state(&entry));

    clock.advance(1_500);
    entry.touch(cache.now_ms());
    println!("t=1500  {:?}", cache.entry_state(&entry));

    for ticket in cache.focus_refetch([("landing:stats", &entry)]) {
        let signal = ticket.signal();
        let result = run_with_retries(
            &cache,
            OperationKind::Read,
            &Backoff::Exponential {
                base: Duration::from_millis(10),
                max: Duration::from_millis(100),
            },
            Some(&signal),
            |attempt| async move {
                if attempt < 2 {
                    Err(Timeout)
                } else {
                    Ok(attempt)
                }
            },
        )
        .await;
        println!("focus refetch of {}: {:?}", ticket.key(), result);
        entry.mark_fetched(cache.now_ms());
    }

    clock.advance(6_000);
    println!("t=7500  {:?}", cache.entry_state(&entry));

    providers.unmount();
    Ok(())
}
