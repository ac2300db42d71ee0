//! Host-side plumbing for the `virtual-range` tracker.
//!
//! `virtual-range` decides which window of a list to render but never touches a platform or a
//! clock. This crate supplies what a host integration needs around it, still without any UI
//! bindings:
//!
//! - [`Controller`]: runs the report-then-recompute cycle against a
//!   [`virtual_range::ScrollHost`], applies front-size scroll corrections and owns the
//!   bounded scroll-to-end retry loop.
//! - [`ScrollScheduler`] / [`RateLimit`]: debounce or throttle scroll signals, driven by
//!   explicit `now_ms` timestamps.
//! - [`TrackerConfig`]: plain-data configuration with validation into [`ControllerOptions`].
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod config;
mod controller;
mod error;
mod scheduler;


pub use config::TrackerConfig;
pub use controller::{Controller, ControllerOptions};
pub use error::ConfigError;
pub use scheduler::{RateLimit, ScrollScheduler};
