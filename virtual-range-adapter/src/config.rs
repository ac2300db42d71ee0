use alloc::string::{String, ToString};

use virtual_range::{Axis, TrackerOptions};

use crate::{ConfigError, ControllerOptions, RateLimit};

/// Plain-data configuration, as a host would receive it from a settings file or a
/// scripting layer.
///
/// Field names follow the camelCase convention of such sources when (de)serialized. Missing
/// fields take their defaults. Call [`Self::into_options`] to validate and convert.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct TrackerConfig {
    pub item_count: i64,
    pub buffer: i64,
    /// `vertical` or `horizontal`.
    pub direction: String,
    /// Milliseconds. 0 disables debouncing.
    pub debounce_time: i64,
    /// Milliseconds. 0 disables throttling.
    pub throttle_time: i64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            item_count: 0,
            buffer: 1,
            direction: Axis::Vertical.as_str().to_string(),
            debounce_time: 0,
            throttle_time: 0,
        }
    }
}

impl TrackerConfig {
    /// Validates the configuration.
    ///
    /// Negative numbers clamp to 0. Fails on an unknown direction or when both a debounce and
    /// a throttle time are set.
    pub fn into_options(self) -> Result<ControllerOptions, ConfigError> {
        let axis: Axis = self.direction.parse()?;
        let item_count = clamp_count("itemCount", self.item_count);
        let buffer = clamp_count("buffer", self.buffer);
        let debounce_ms = clamp_ms("debounceTime", self.debounce_time);
        let throttle_ms = clamp_ms("throttleTime", self.throttle_time);

        let rate_limit = match (debounce_ms, throttle_ms) {
            (0, 0) => RateLimit::None,
            (wait_ms, 0) => RateLimit::Debounce { wait_ms },
            (0, wait_ms) => RateLimit::Throttle { wait_ms },
            (debounce_ms, throttle_ms) => {
                vwarn!(debounce_ms, throttle_ms, "rejected config: conflicting rate limits");
                return Err(ConfigError::ConflictingRateLimit {
                    debounce_ms,
                    throttle_ms,
                });
            }
        };

        let tracker = TrackerOptions::new(item_count)
            .with_buffer(buffer)
            .with_axis(axis);
        Ok(ControllerOptions::new(tracker).with_rate_limit(rate_limit))
    }
}

fn clamp_count(_field: &'static str, value: i64) -> usize {
    if value < 0 {
        vwarn!(field = _field, value, "negative value clamped to 0");
        return 0;
    }
    usize::try_from(value).unwrap_or(usize::MAX)
}

fn clamp_ms(_field: &'static str, value: i64) -> u64 {
    if value < 0 {
        vwarn!(field = _field, value, "negative value clamped to 0");
        return 0;
    }
    value.unsigned_abs()
}
