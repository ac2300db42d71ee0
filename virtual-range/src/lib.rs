//! Incremental render-window tracking for virtual scrolling.
//!
//! Given a very large ordered list whose item sizes are unknown until rendered, this crate
//! decides which contiguous window of indexes must be materialized to fill a scrollable
//! viewport, without ever enumerating the whole list:
//!
//! - [`SizeLedger`]: per-index sizes with cumulative `front`/`behind` offsets. Unmeasured
//!   items carry an estimate (a fixed hint, or a damped running average of measured sizes).
//! - [`SizeLedger::index_at_offset`]: offset → index lookup in `O(log n)`.
//! - [`SizeLedger::build_window`]: expands a start index into a window covering the
//!   viewport, plus an overscan buffer.
//! - [`RangeTracker`]: the orchestrator. Tracks scroll direction, applies the early-exit
//!   policy on scroll and emits a new [`Range`] only when the window actually moves.
//!
//! It is UI-agnostic. The host (DOM binding, TUI, test fake) is expected to provide:
//! - the item count and the measured sizes of rendered items
//! - viewport size, scroll offset and scroll extent
//! - container visibility
//!
//! [`ScrollHost`] spells that contract out; the `virtual-range-adapter` crate drives a tracker
//! against it, including debouncing/throttling and scroll-to-end retries.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod error;
mod fenwick;
mod host;
mod ledger;
mod options;
mod search;
mod state;
mod tracker;
mod types;
mod window;

#[cfg(test)]
mod tests;

pub use error::ParseAxisError;
pub use host::ScrollHost;
pub use ledger::{LedgerEntry, SizeLedger};
pub use options::{OnScrollCallback, OnUpdateCallback, TrackerOptions};
pub use state::{DIRECTION_DEADBAND, ScrollState};
pub use tracker::RangeTracker;
pub use types::{Axis, Measurement, Phase, Range, ScrollDirection, ScrollEvent, ScrollTarget};
pub use window::Window;
