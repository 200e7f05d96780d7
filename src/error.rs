/// Error raised while building a [`VariantSchema`](crate::VariantSchema).
///
/// Schemas are built once when a primitive is defined, so this error is meant
/// to abort startup rather than be handled.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// A group was declared without any choices.
    #[error("variant group '{group}' has no choices")]
    EmptyGroup { group: String },
    /// A group was declared without a default choice.
    #[error("variant group '{group}' has no default choice")]
    MissingDefault { group: String },
    /// The default choice is not one of the group's choices.
    #[error("default choice '{choice}' is not a choice of variant group '{group}'")]
    UnknownDefault { group: String, choice: String },
    /// Two groups share a name.
    #[error("variant group '{group}' is declared twice")]
    DuplicateGroup { group: String },
    /// Two choices of one group share a name.
    #[error("choice '{choice}' is declared twice in variant group '{group}'")]
    DuplicateChoice { group: String, choice: String },
}

/// Error raised when a resolution request does not match its schema.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidSelectionError {
    #[error("unknown variant group '{group}'")]
    UnknownGroup { group: String },
    #[error("unknown choice '{choice}' for variant group '{group}'")]
    UnknownChoice { group: String, choice: String },
}

impl InvalidSelectionError {
    /// The group the bad selection targeted.
    pub fn group(&self) -> &str {
        match self {
            InvalidSelectionError::UnknownGroup { group } => group,
            InvalidSelectionError::UnknownChoice { group, .. } => group,
        }
    }
}

/// Error raised while constructing a cache policy.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A numeric option was negative.
    #[error("cache policy option '{field}' must not be negative")]
    Negative { field: &'static str },
    /// A retry count does not fit in a `u32`.
    #[error("cache policy option '{field}' is too large")]
    RetryCountOverflow { field: &'static str },
    /// Entries would be evicted before they become stale.
    #[error(
        "evictAfterMs ({evict_after_ms}) must be greater than or equal to staleAfterMs ({stale_after_ms})"
    )]
    EvictBeforeStale {
        stale_after_ms: u64,
        evict_after_ms: u64,
    },
    /// An overrides document could not be parsed.
    #[error("invalid cache policy document: {0}")]
    Parse(String),
}

/// Error returned by [`run_with_retries`](crate::run_with_retries).
#[derive(Debug, thiserror::Error)]
pub enum RetryError<E>
where
    E: std::error::Error + 'static,
{
    /// Every allowed attempt failed; `source` is the last failure.
    #[error("operation failed after {attempts} attempt(s): {source}")]
    Exhausted {
        attempts: u32,
        #[source]
        source: E,
    },
    /// The refresh was aborted before it could complete.
    #[error("operation aborted after {attempts} attempt(s)")]
    Aborted { attempts: u32 },
}

impl<E> RetryError<E>
where
    E: std::error::Error + 'static,
{
    /// Number of attempts that were started.
    pub fn attempts(&self) -> u32 {
        match self {
            RetryError::Exhausted { attempts, .. } => *attempts,
            RetryError::Aborted { attempts } => *attempts,
        }
    }
}
