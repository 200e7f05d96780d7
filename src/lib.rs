//! ui-swr-kit - Variant class resolution and a shared stale-while-revalidate cache policy
//!
//! This library provides the two pieces of a landing-page front end that carry
//! real rules:
//! - A variant resolver that turns a closed option schema into a class string
//! - UI primitive schemas (button, badge, card) built on it
//! - A cache manager deciding staleness, eviction, retries and focus refetch
//! - Abort signals for in-flight background refreshes
//!
//! # Example
//!
//! ```
//! use ui_swr_kit::{
//!     AppProviders, BuildMode, ButtonProps, ButtonSize, CachePolicyOverrides, EntryTimestamps,
//!     UiKit,
//! };
//!
//! let kit = UiKit::new().unwrap();
//! let classes = kit.button(&ButtonProps {
//!     size: Some(ButtonSize::Lg),
//!     class_name: Some("mt-4".into()),
//!     ..ButtonProps::default()
//! });
//! assert_eq!(classes, "btn btn-primary h-11 rounded-md px-8 mt-4");
//!
//! let providers = AppProviders::new(BuildMode::Production, CachePolicyOverrides::default()).unwrap();
//! let cache = providers.cache_manager();
//! let entry = EntryTimestamps::fetched(cache.now_ms());
//! assert!(!cache.is_stale(&entry));
//! ```

mod builder;
mod entry;
mod error;
mod manager;
mod policy;
pub mod primitives;
mod providers;
mod refresh;
mod request;
mod resolver;
mod retry;
mod schema;
mod theme;
mod utils;

// Re-export public API
pub use builder::CacheManagerBuilder;
pub use entry::{EntryState, EntryTimestamps};
pub use error::{ConfigError, InvalidSelectionError, RetryError, SchemaError};
pub use manager::{CacheManager, OperationKind, create_cache_manager};
pub use policy::{BUILD_MODE_ENV, BuildMode, CachePolicyConfig, CachePolicyOverrides};
pub use primitives::{
    BadgeProps, BadgeVariant, ButtonProps, ButtonSize, ButtonVariant, CardPart, UiKit,
};
pub use providers::AppProviders;
pub use refresh::{AbortSignal, RefreshRegistry, RefreshTicket};
pub use request::ResolutionRequest;
pub use resolver::{join_tokens, resolve, resolve_or_default};
pub use retry::{Backoff, run_with_retries};
pub use schema::{GroupBuilder, SchemaBuilder, VariantGroup, VariantSchema};
pub use theme::{ColorScheme, ThemeConfig, ThemePreference};
pub use utils::{Clock, ManualClock, SystemClock, now_ms};
