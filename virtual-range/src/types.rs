use core::fmt;
use core::str::FromStr;

use crate::ParseAxisError;

/// The scroll axis the host measures along.
///
/// The tracker itself is axis-agnostic; the axis is handed to the [`crate::ScrollHost`] so it
/// knows which dimension (height/width, top/left) to report.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Axis {
    #[default]
    Vertical,
    Horizontal,
}

impl Axis {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Vertical => "vertical",
            Self::Horizontal => "horizontal",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Axis {
    type Err = ParseAxisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("vertical") {
            Ok(Self::Vertical)
        } else if s.eq_ignore_ascii_case("horizontal") {
            Ok(Self::Horizontal)
        } else {
            Err(ParseAxisError::new(s))
        }
    }
}

/// Direction of the last scroll movement.
///
/// `Forward` means the offset decreased (moving toward index 0); `Backward` means it
/// increased (moving toward the last index). "No movement" is represented as `None` wherever
/// a direction is optional.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ScrollDirection {
    Forward,
    Backward,
}

impl ScrollDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::Backward => "backward",
        }
    }
}

/// A freshly measured item size reported by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Measurement {
    pub index: usize,
    pub size: u32,
}

impl Measurement {
    pub fn new(index: usize, size: u32) -> Self {
        Self { index, size }
    }

    /// Builds a measurement from a sub-pixel size, rounding half away from zero.
    ///
    /// Negative and NaN sizes become 0 (and are then skipped by the tracker).
    pub fn from_subpixel(index: usize, size: f32) -> Self {
        Self {
            index,
            size: round_size(size),
        }
    }
}

impl From<(usize, u32)> for Measurement {
    fn from((index, size): (usize, u32)) -> Self {
        Self { index, size }
    }
}

pub(crate) fn round_size(size: f32) -> u32 {
    if size.is_nan() || size <= 0.0 {
        return 0;
    }
    // In f64 so `x + 0.5` cannot round up for values just below one half. `as` saturates at
    // u32::MAX; for non-negative input floor(x + 0.5) rounds half up.
    (f64::from(size) + 0.5) as u32
}

/// The window of indexes to render, plus the cumulative sizes around it.
///
/// `start..=end` is inclusive on both sides and already contains the overscan buffer.
/// For a non-empty list, `front + span(start..=end) + behind == total`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    pub start: usize,
    pub end: usize,
    /// Cumulative size of all items before `start`.
    pub front: u64,
    /// Cumulative size of all items after `end`.
    pub behind: u64,
    /// Full scrollable extent of the list.
    pub total: u64,
}

impl Range {
    /// Number of indexes in the window.
    ///
    /// An empty list still yields a `0..=0` range; callers render nothing when the item count
    /// is zero.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start).saturating_add(1)
    }

    pub fn contains(&self, index: usize) -> bool {
        self.start <= index && index <= self.end
    }

    /// Size of the rendered span, derived from the other fields.
    pub fn span(&self) -> u64 {
        self.total
            .saturating_sub(self.front)
            .saturating_sub(self.behind)
    }

    pub(crate) fn same_window(&self, other: &Self) -> bool {
        self.start == other.start && self.end == other.end
    }
}

/// Notification emitted on every processed scroll signal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollEvent {
    /// The list is non-empty and the offset is at (or before) the leading edge.
    pub top: bool,
    /// The viewport reaches the end of the scroll extent (within one unit).
    pub bottom: bool,
    pub offset: u64,
    pub direction: Option<ScrollDirection>,
}

/// Lifecycle phase of a [`crate::RangeTracker`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// No measurement cycle has completed; ranges are built from estimates.
    Cold,
    /// At least one measurement batch has been applied.
    Warm,
    /// The host container is invisible; every recompute request is a no-op.
    Suspended,
}

/// Where `scroll_to_index` wants the host to go.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollTarget {
    /// Scroll to this absolute offset.
    Offset(u64),
    /// The index is past the last item: keep scrolling to the end of the extent.
    End,
}
