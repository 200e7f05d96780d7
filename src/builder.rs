//! Builder API for creating the shared cache manager.

use std::sync::Arc;

use crate::error::ConfigError;
use crate::manager::CacheManager;
use crate::policy::{BuildMode, CachePolicyConfig, CachePolicyOverrides};
use crate::utils::{Clock, SystemClock};

/// Builder for [`CacheManager`].
///
/// # Example
///
/// ```
/// use ui_swr_kit::{BuildMode, CacheManager, CachePolicyOverrides, OperationKind};
///
/// let manager = CacheManager::builder()
///     .mode(BuildMode::Production)
///     .overrides(CachePolicyOverrides::default().read_retry_count(5))
///     .build()
///     .unwrap();
///
/// assert_eq!(manager.retry_count_for(OperationKind::Read), 5);
/// assert!(!manager.should_refetch_on_focus());
/// ```
pub struct CacheManagerBuilder {
    mode: Option<BuildMode>,
    overrides: CachePolicyOverrides,
    clock: Option<Arc<dyn Clock>>,
}

impl CacheManagerBuilder {
    pub fn new() -> Self {
        CacheManagerBuilder {
            mode: None,
            overrides: CachePolicyOverrides::default(),
            clock: None,
        }
    }

    /// Build mode deciding the `refetch_on_focus` default.
    ///
    /// Defaults to [`BuildMode::current`].
    pub fn mode(mut self, mode: BuildMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Overrides applied on top of the mode's defaults.
    pub fn overrides(mut self, overrides: CachePolicyOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Clock used for staleness and eviction checks. Defaults to [`SystemClock`].
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Validate the policy and build the manager.
    pub fn build(self) -> Result<CacheManager, ConfigError> {
        let mode = self.mode.unwrap_or_else(BuildMode::current);
        let config = CachePolicyConfig::with_overrides(mode, &self.overrides)?;
        let clock: Arc<dyn Clock> = match self.clock {
            Some(clock) => clock,
            None => Arc::new(SystemClock),
        };
        Ok(CacheManager::from_parts(config, clock))
    }
}

impl Default for CacheManagerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
