//! Application-wide context built once at boot.
//!
//! Consumers receive what they need from [`AppProviders`] explicitly rather
//! than looking it up.

use std::sync::Arc;

use crate::error::ConfigError;
use crate::manager::CacheManager;
use crate::policy::{BuildMode, CachePolicyOverrides};
use crate::theme::ThemeConfig;

#[derive(Debug)]
pub struct AppProviders {
    mode: BuildMode,
    cache_manager: Arc<CacheManager>,
    theme: ThemeConfig,
}

impl AppProviders {
    /// Build the shared cache manager and theme config for `mode`.
    ///
    /// A bad cache policy is fatal; the error should abort boot.
    pub fn new(mode: BuildMode, overrides: CachePolicyOverrides) -> Result<Self, ConfigError> {
        let cache_manager = CacheManager::builder()
            .mode(mode)
            .overrides(overrides)
            .build()?;
        Ok(Self::with_manager(mode, Arc::new(cache_manager)))
    }

    /// Use an already built manager, e.g. one with a test clock.
    pub fn with_manager(mode: BuildMode, cache_manager: Arc<CacheManager>) -> Self {
        tracing::debug!(
            "Providers mounted: mode={:?}, devtools={}",
            mode,
            mode.is_development()
        );
        AppProviders {
            mode,
            cache_manager,
            theme: ThemeConfig::default(),
        }
    }

    pub fn mode(&self) -> BuildMode {
        self.mode
    }

    /// Shared handle to the cache manager.
    pub fn cache_manager(&self) -> Arc<CacheManager> {
        Arc::clone(&self.cache_manager)
    }

    pub fn theme(&self) -> &ThemeConfig {
        &self.theme
    }

    /// Data-fetch devtools are only mounted in development.
    pub fn devtools_enabled(&self) -> bool {
        self.mode.is_development()
    }

    /// Application unmount: abort every in-flight refresh.
    pub fn unmount(self) {
        self.cache_manager.shutdown();
        tracing::debug!("Providers unmounted");
    }
}
