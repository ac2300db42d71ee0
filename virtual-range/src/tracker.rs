use alloc::sync::Arc;

use crate::{
    LedgerEntry, Measurement, Phase, Range, ScrollDirection, ScrollEvent, ScrollState,
    ScrollTarget, SizeLedger, TrackerOptions, Window,
};

/// Decides which contiguous window of a large list must be rendered.
///
/// The tracker owns the [`SizeLedger`], the scroll state and the current [`Range`]. It holds
/// no platform objects and no timers: the host feeds it measurements, scroll readouts and
/// visibility, and re-renders whenever a new `Range` is returned (or `on_update` fires).
///
/// A typical host cycle is report-then-recompute:
/// 1. render `range().start..=range().end`,
/// 2. [`Self::report_measurements`] with the rendered sizes,
/// 3. [`Self::refresh`] or [`Self::on_scroll`].
///
/// See the `virtual-range-adapter` crate for a controller that runs this cycle against a
/// [`crate::ScrollHost`].
#[derive(Clone, Debug)]
pub struct RangeTracker {
    options: TrackerOptions,
    ledger: SizeLedger,
    range: Range,
    scroll: ScrollState,
    client_size: u32,
    visible: bool,
    warm: bool,
    // The stored range went stale while suspended; the next refresh must emit.
    stale: bool,
}

impl RangeTracker {
    /// Creates a tracker in the `Cold` phase with a best-effort range built from estimates.
    ///
    /// Nothing is emitted until the first `refresh`/`on_scroll`.
    pub fn new(options: TrackerOptions) -> Self {
        vdebug!(
            item_count = options.item_count,
            buffer = options.buffer,
            axis = options.axis.as_str(),
            "RangeTracker::new"
        );
        let mut ledger = SizeLedger::with_size_hint(options.estimated_size);
        ledger.fill_from(0, options.item_count);
        let mut t = Self {
            options,
            ledger,
            range: Range::default(),
            scroll: ScrollState::default(),
            client_size: 0,
            visible: true,
            warm: false,
            stale: false,
        };
        t.range = t.compute(0, 0);
        t
    }

    pub fn options(&self) -> &TrackerOptions {
        &self.options
    }

    pub fn ledger(&self) -> &SizeLedger {
        &self.ledger
    }

    pub fn range(&self) -> Range {
        self.range
    }

    pub fn scroll_state(&self) -> ScrollState {
        self.scroll
    }

    pub fn scroll_direction(&self) -> Option<ScrollDirection> {
        self.scroll.direction
    }

    pub fn phase(&self) -> Phase {
        if !self.visible {
            Phase::Suspended
        } else if self.warm {
            Phase::Warm
        } else {
            Phase::Cold
        }
    }

    pub fn is_suspended(&self) -> bool {
        !self.visible
    }

    pub fn item_count(&self) -> usize {
        self.options.item_count
    }

    pub fn last_index(&self) -> usize {
        self.options.item_count.saturating_sub(1)
    }

    pub fn average_size(&self) -> u32 {
        self.ledger.average_size()
    }

    /// Measured size of `index`, else the current estimate.
    pub fn size(&self, index: usize) -> u32 {
        self.ledger.size(index)
    }

    pub fn entry(&self, index: usize) -> Option<LedgerEntry> {
        self.ledger.entry(index)
    }

    pub fn total_size(&self) -> u64 {
        self.ledger.total()
    }

    /// Replaces the options, rebuilding only what changed.
    ///
    /// Returns the new range if it changed (and emits `on_update`).
    pub fn set_options(&mut self, options: TrackerOptions) -> Option<Range> {
        let prev_count = self.options.item_count;
        let prev_hint = self.options.estimated_size;
        self.options = options;
        vtrace!(
            item_count = self.options.item_count,
            buffer = self.options.buffer,
            "RangeTracker::set_options"
        );

        if self.options.estimated_size != prev_hint {
            self.ledger.set_size_hint(self.options.estimated_size);
        }
        if self.options.item_count != prev_count {
            self.ledger.resize(self.options.item_count);
        }
        self.recompute()
    }

    /// Clones the current options, applies `f`, then delegates to [`Self::set_options`].
    pub fn update_options(&mut self, f: impl FnOnce(&mut TrackerOptions)) -> Option<Range> {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next)
    }

    /// Truncates or extends the ledger to `count` items and recomputes the range against
    /// the last known viewport.
    pub fn set_item_count(&mut self, count: usize) -> Option<Range> {
        if self.options.item_count == count {
            return None;
        }
        vdebug!(from = self.options.item_count, to = count, "set_item_count");
        self.options.item_count = count;
        self.ledger.resize(count);
        self.recompute()
    }

    pub fn set_buffer(&mut self, buffer: usize) -> Option<Range> {
        if self.options.buffer == buffer {
            return None;
        }
        self.options.buffer = buffer;
        self.recompute()
    }

    /// Sets (or clears) the fixed size used for unmeasured items.
    pub fn set_estimated_size(&mut self, estimated_size: Option<u32>) -> Option<Range> {
        if self.options.estimated_size == estimated_size {
            return None;
        }
        self.options.estimated_size = estimated_size;
        self.ledger.set_size_hint(estimated_size);
        self.recompute()
    }

    /// Takes effect on the next recompute.
    pub fn set_leading_offset(&mut self, leading_offset: u64) {
        self.options.leading_offset = leading_offset;
    }

    pub fn set_on_scroll(
        &mut self,
        on_scroll: Option<impl Fn(&ScrollEvent) + Send + Sync + 'static>,
    ) {
        self.options.on_scroll = on_scroll.map(|f| Arc::new(f) as _);
    }

    pub fn set_on_update(&mut self, on_update: Option<impl Fn(&Range) + Send + Sync + 'static>) {
        self.options.on_update = on_update.map(|f| Arc::new(f) as _);
    }

    /// Enters or leaves the `Suspended` phase.
    ///
    /// Leaving it does not recompute anything; call [`Self::refresh`] afterwards.
    pub fn set_container_visible(&mut self, visible: bool) {
        if self.visible == visible {
            return;
        }
        vdebug!(visible, "set_container_visible");
        self.visible = visible;
    }

    /// Feeds freshly measured sizes into the ledger and blends them into the average.
    ///
    /// Measurements for indexes outside the list and zero sizes are skipped. The range is
    /// not touched.
    ///
    /// Returns a scroll correction: while scrolling forward, if the item at `range().start`
    /// turns out to differ from its ledger size, the returned delta should be added to the
    /// host scroll offset so content above the viewport does not jump. Otherwise 0.
    pub fn report_measurements<I>(&mut self, measurements: I) -> i64
    where
        I: IntoIterator,
        I::Item: Into<Measurement>,
    {
        if !self.visible {
            vtrace!("report_measurements: suspended");
            return 0;
        }

        let count = self.options.item_count;
        let track_start = self.warm && self.scroll.is_forward();
        let mut correction = 0i64;
        let mut sum = 0u64;
        let mut n = 0usize;

        for m in measurements {
            let Measurement { index, size } = m.into();
            if index >= count {
                vwarn!(index, count, "report_measurements: index out of range");
                continue;
            }
            if size == 0 {
                continue;
            }
            if track_start && index == self.range.start {
                correction = i64::from(size) - i64::from(self.ledger.size(index));
            }
            self.ledger.set_size(index, size);
            sum = sum.saturating_add(u64::from(size));
            n += 1;
        }

        if n == 0 {
            return 0;
        }
        self.ledger.update_average(sum, n);
        self.warm = true;
        vdebug!(
            measured = n,
            average = self.ledger.average_size(),
            correction,
            "report_measurements"
        );
        correction
    }

    /// Processes a scroll signal.
    ///
    /// Updates the scroll state, emits a [`ScrollEvent`], then recomputes the window unless
    /// it cannot usefully change: no direction, forward at `start == 0`, or backward at
    /// `end == last_index`. A recomputed window that moves against the scroll direction is
    /// discarded. Returns the new range only when `start` or `end` changed.
    ///
    /// While suspended this is a no-op.
    pub fn on_scroll(
        &mut self,
        offset: u64,
        client_size: u32,
        scroll_extent: u64,
    ) -> Option<Range> {
        if !self.visible {
            vtrace!(offset, "on_scroll: suspended");
            return None;
        }
        self.client_size = client_size;
        let direction = self.scroll.advance(offset);

        let event = ScrollEvent {
            top: self.options.item_count > 0 && offset == 0,
            bottom: u64::from(client_size)
                .saturating_add(offset)
                .saturating_add(1)
                >= scroll_extent,
            offset,
            direction,
        };
        vtrace!(offset, direction = direction.map(|d| d.as_str()), "on_scroll");
        if let Some(cb) = &self.options.on_scroll {
            cb(&event);
        }

        let last = self.last_index();
        match direction {
            None => return None,
            Some(ScrollDirection::Forward) if self.range.start == 0 => return None,
            Some(ScrollDirection::Backward) if self.range.end == last => return None,
            _ => {}
        }

        let next = self.compute(offset, client_size);
        if next.same_window(&self.range) {
            return None;
        }
        let against_direction = match direction {
            Some(ScrollDirection::Forward) => next.start > self.range.start,
            Some(ScrollDirection::Backward) => next.start < self.range.start,
            None => false,
        };
        if against_direction {
            vtrace!(
                start = next.start,
                current = self.range.start,
                "on_scroll: window moved against direction"
            );
            return None;
        }
        self.replace(next)
    }

    /// Rebuilds every cumulative offset and recomputes the range from scratch.
    ///
    /// Emits whenever any field of the range changed (total-size drift included). Calling it
    /// twice with nothing in between returns `None` the second time. No-op while suspended.
    pub fn refresh(&mut self, offset: u64, client_size: u32) -> Option<Range> {
        if !self.visible {
            vtrace!("refresh: suspended");
            return None;
        }
        self.client_size = client_size;
        self.scroll.offset = offset;
        self.ledger.rebuild();
        let next = self.compute(offset, client_size);
        self.replace(next)
    }

    /// Resolves the scroll position that brings `index` to the leading edge.
    ///
    /// Indexes past the last item resolve to [`ScrollTarget::End`].
    pub fn scroll_to_index(&self, index: usize) -> ScrollTarget {
        if index > self.last_index() {
            return ScrollTarget::End;
        }
        let front = self.ledger.front(index);
        ScrollTarget::Offset(front.saturating_add(self.options.leading_offset))
    }

    /// Forgets every measurement and the average, returning to the `Cold` phase.
    pub fn reset_measurements(&mut self) {
        vdebug!(measured = self.ledger.measured_len(), "reset_measurements");
        self.ledger.clear_measurements();
        self.warm = false;
    }

    /// Computes the range for `offset` without touching any state.
    pub fn range_for(&self, offset: u64, client_size: u32) -> Range {
        self.compute(offset, client_size)
    }

    fn recompute(&mut self) -> Option<Range> {
        if !self.visible {
            // Keep the stored range inside the (possibly shrunk) list until visibility
            // returns; the next refresh reports it.
            self.range = self.ledger.range_of(Window {
                start: self.range.start,
                end: self.range.end,
            });
            self.stale = true;
            return None;
        }
        let next = self.compute(self.scroll.offset, self.client_size);
        self.replace(next)
    }

    fn replace(&mut self, next: Range) -> Option<Range> {
        if next == self.range && !self.stale {
            return None;
        }
        self.stale = false;
        self.range = next;
        vdebug!(
            start = next.start,
            end = next.end,
            front = next.front,
            behind = next.behind,
            total = next.total,
            "range updated"
        );
        if let Some(cb) = &self.options.on_update {
            cb(&self.range);
        }
        Some(next)
    }

    fn compute(&self, offset: u64, client_size: u32) -> Range {
        if self.ledger.is_empty() {
            return Range::default();
        }
        let buffer = self.options.buffer;
        if self.ledger.estimate() == 0 {
            // Nothing measured and no hint: render a few leading items so the host has
            // something to measure.
            return self.ledger.range_of(Window {
                start: 0,
                end: buffer.min(self.ledger.last_index()),
            });
        }
        let offset_in_list = offset.saturating_sub(self.options.leading_offset);
        let start = self.ledger.index_at_offset(offset_in_list);
        let window = self.ledger.build_window(start, client_size, buffer);
        self.ledger.range_of(window)
    }
}
