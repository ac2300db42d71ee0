use virtual_range::ParseAxisError;

/// Rejected [`crate::TrackerConfig`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    Axis(#[from] ParseAxisError),

    #[error("debounce ({debounce_ms} ms) and throttle ({throttle_ms} ms) cannot both be set")]
    ConflictingRateLimit { debounce_ms: u64, throttle_ms: u64 },
}
