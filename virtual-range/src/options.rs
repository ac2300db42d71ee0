use alloc::sync::Arc;

use crate::{Axis, Range, ScrollEvent};

/// Fired after every processed scroll signal.
pub type OnScrollCallback = Arc<dyn Fn(&ScrollEvent) + Send + Sync>;

/// Fired whenever the tracker replaces its [`Range`].
pub type OnUpdateCallback = Arc<dyn Fn(&Range) + Send + Sync>;

/// Configuration for [`crate::RangeTracker`].
///
/// Cheap to clone: callbacks are stored in `Arc`s so hosts can tweak a field and hand the
/// options back through `RangeTracker::set_options`.
pub struct TrackerOptions {
    pub item_count: usize,
    /// Extra indexes rendered on each side of the visible window.
    pub buffer: usize,
    pub axis: Axis,
    /// Fixed size used for unmeasured items instead of the running average.
    ///
    /// `None` (or `Some(0)`) falls back to the average of measured sizes.
    pub estimated_size: Option<u32>,
    /// Distance from the scroll container's origin to the list's leading edge.
    ///
    /// Subtracted from scroll offsets before mapping them to indexes, and added back by
    /// `scroll_to_index`.
    pub leading_offset: u64,
    pub on_scroll: Option<OnScrollCallback>,
    pub on_update: Option<OnUpdateCallback>,
}

impl TrackerOptions {
    pub fn new(item_count: usize) -> Self {
        Self {
            item_count,
            buffer: 1,
            axis: Axis::Vertical,
            estimated_size: None,
            leading_offset: 0,
            on_scroll: None,
            on_update: None,
        }
    }

    pub fn with_buffer(mut self, buffer: usize) -> Self {
        self.buffer = buffer;
        self
    }

    pub fn with_axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    pub fn with_estimated_size(mut self, estimated_size: Option<u32>) -> Self {
        self.estimated_size = estimated_size;
        self
    }

    pub fn with_leading_offset(mut self, leading_offset: u64) -> Self {
        self.leading_offset = leading_offset;
        self
    }

    pub fn with_on_scroll(
        mut self,
        on_scroll: Option<impl Fn(&ScrollEvent) + Send + Sync + 'static>,
    ) -> Self {
        self.on_scroll = on_scroll.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_update(
        mut self,
        on_update: Option<impl Fn(&Range) + Send + Sync + 'static>,
    ) -> Self {
        self.on_update = on_update.map(|f| Arc::new(f) as _);
        self
    }
}

impl Default for TrackerOptions {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Clone for TrackerOptions {
    fn clone(&self) -> Self {
        Self {
            item_count: self.item_count,
            buffer: self.buffer,
            axis: self.axis,
            estimated_size: self.estimated_size,
            leading_offset: self.leading_offset,
            on_scroll: self.on_scroll.clone(),
            on_update: self.on_update.clone(),
        }
    }
}

impl core::fmt::Debug for TrackerOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TrackerOptions")
            .field("item_count", &self.item_count)
            .field("buffer", &self.buffer)
            .field("axis", &self.axis)
            .field("estimated_size", &self.estimated_size)
            .field("leading_offset", &self.leading_offset)
            .finish_non_exhaustive()
    }
}
