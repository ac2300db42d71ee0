use alloc::string::{String, ToString};

/// Returned when a string is neither `vertical` nor `horizontal`.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid scroll axis `{value}` (expected `vertical` or `horizontal`)")]
pub struct ParseAxisError {
    value: String,
}

impl ParseAxisError {
    pub(crate) fn new(value: &str) -> Self {
        Self {
            value: value.to_string(),
        }
    }

    /// The rejected input (trimmed).
    pub fn value(&self) -> &str {
        &self.value
    }
}
