use alloc::vec::Vec;

use virtual_range::{
    Axis, Measurement, Range, RangeTracker, ScrollHost, ScrollTarget, TrackerOptions,
};

use crate::{RateLimit, ScrollScheduler};

/// Configuration for [`Controller`].
#[derive(Clone, Debug)]
pub struct ControllerOptions {
    pub tracker: TrackerOptions,
    pub rate_limit: RateLimit,
    /// Delay between scroll-to-end attempts.
    pub scroll_to_end_retry_ms: u64,
    /// Gives up after this many attempts. `None` retries until the end is reached.
    pub scroll_to_end_max_attempts: Option<u32>,
}

impl ControllerOptions {
    pub fn new(tracker: TrackerOptions) -> Self {
        Self {
            tracker,
            rate_limit: RateLimit::None,
            scroll_to_end_retry_ms: 5,
            scroll_to_end_max_attempts: None,
        }
    }

    pub fn with_rate_limit(mut self, rate_limit: RateLimit) -> Self {
        self.rate_limit = rate_limit;
        self
    }

    pub fn with_scroll_to_end_retry_ms(mut self, retry_ms: u64) -> Self {
        self.scroll_to_end_retry_ms = retry_ms;
        self
    }

    pub fn with_scroll_to_end_max_attempts(mut self, max_attempts: Option<u32>) -> Self {
        self.scroll_to_end_max_attempts = max_attempts;
        self
    }
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self::new(TrackerOptions::default())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct ScrollToEnd {
    next_ms: u64,
    attempts: u32,
}

/// Drives a [`RangeTracker`] against a [`ScrollHost`].
///
/// The controller holds no timers. Adapters drive it by calling:
/// - `on_scroll_event(now_ms)` whenever the container scrolls
/// - `tick(now_ms)` from a frame loop or timer (rate-limited scroll handling and scroll-to-end
///   retries run from here)
/// - `refresh()` after rendering a new range, on resize, or when visibility changes
///
/// Every cycle reports the host's rendered sizes before recomputing the range.
#[derive(Debug)]
pub struct Controller<H> {
    host: H,
    tracker: RangeTracker,
    scheduler: ScrollScheduler,
    retry_ms: u64,
    max_attempts: Option<u32>,
    scroll_to_end: Option<ScrollToEnd>,
}

impl<H: ScrollHost> Controller<H> {
    /// Creates the tracker and runs the first refresh against `host`.
    pub fn new(host: H, options: ControllerOptions) -> Self {
        let mut c = Self {
            host,
            tracker: RangeTracker::new(options.tracker),
            scheduler: ScrollScheduler::new(options.rate_limit),
            retry_ms: options.scroll_to_end_retry_ms,
            max_attempts: options.scroll_to_end_max_attempts,
            scroll_to_end: None,
        };
        c.refresh();
        c
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn tracker(&self) -> &RangeTracker {
        &self.tracker
    }

    pub fn tracker_mut(&mut self) -> &mut RangeTracker {
        &mut self.tracker
    }

    pub fn into_parts(self) -> (H, RangeTracker) {
        (self.host, self.tracker)
    }

    pub fn range(&self) -> Range {
        self.tracker.range()
    }

    pub fn rate_limit(&self) -> RateLimit {
        self.scheduler.rate_limit()
    }

    /// Replaces the rate-limiting policy. A pending scroll run is dropped.
    pub fn set_rate_limit(&mut self, rate_limit: RateLimit) {
        vdebug!(?rate_limit, "set_rate_limit");
        self.scheduler.set_rate_limit(rate_limit);
    }

    pub fn is_scroll_pending(&self) -> bool {
        self.scheduler.is_pending()
    }

    pub fn is_scrolling_to_end(&self) -> bool {
        self.scroll_to_end.is_some()
    }

    /// Re-reads visibility, measurements and geometry from the host and recomputes the range.
    pub fn refresh(&mut self) -> Option<Range> {
        if !self.sync_visibility() {
            return None;
        }
        let axis = self.axis();
        self.tracker
            .set_leading_offset(self.host.leading_offset(axis));
        self.measure();
        let offset = self.host.scroll_offset(axis);
        let client_size = self.host.client_size(axis);
        self.tracker.refresh(offset, client_size)
    }

    /// Call this when the host container scrolls.
    ///
    /// Handled right away unless the rate limit defers it to a later [`Self::tick`].
    pub fn on_scroll_event(&mut self, now_ms: u64) -> Option<Range> {
        if self.scheduler.signal(now_ms) {
            self.handle_scroll()
        } else {
            vtrace!(now_ms, due_ms = self.scheduler.due_ms(), "scroll deferred");
            None
        }
    }

    /// Runs due work: a deferred scroll, then a scroll-to-end retry.
    ///
    /// Returns the new range if the deferred scroll moved it.
    pub fn tick(&mut self, now_ms: u64) -> Option<Range> {
        let range = if self.scheduler.poll(now_ms) {
            self.handle_scroll()
        } else {
            None
        };
        self.retry_scroll_to_end(now_ms);
        range
    }

    /// Scrolls so that `index` sits at the leading edge. Indexes past the end scroll to the
    /// end instead.
    pub fn scroll_to_index(&mut self, index: usize, now_ms: u64) {
        match self.tracker.scroll_to_index(index) {
            ScrollTarget::Offset(offset) => self.scroll_to_offset(offset),
            ScrollTarget::End => self.scroll_to_end(now_ms),
        }
    }

    pub fn scroll_to_offset(&mut self, offset: u64) {
        let axis = self.axis();
        self.host.set_scroll_offset(axis, offset);
    }

    /// Jumps to the current scroll extent and keeps retrying from [`Self::tick`] while the
    /// extent grows under newly measured items.
    pub fn scroll_to_end(&mut self, now_ms: u64) {
        self.jump_to_extent();
        self.scroll_to_end = Some(ScrollToEnd {
            next_ms: now_ms.saturating_add(self.retry_ms),
            attempts: 1,
        });
    }

    pub fn cancel_scroll_to_end(&mut self) {
        self.scroll_to_end = None;
    }

    /// Resizes the list, then refreshes against the host.
    pub fn set_item_count(&mut self, count: usize) -> Option<Range> {
        let changed = self.tracker.set_item_count(count);
        self.refresh().or(changed)
    }

    pub fn reset_measurements(&mut self) {
        self.tracker.reset_measurements();
    }

    fn axis(&self) -> Axis {
        self.tracker.options().axis
    }

    fn sync_visibility(&mut self) -> bool {
        let visible = self.host.is_container_visible();
        self.tracker.set_container_visible(visible);
        visible
    }

    fn handle_scroll(&mut self) -> Option<Range> {
        if !self.sync_visibility() {
            return None;
        }
        let axis = self.axis();
        self.measure();
        let offset = self.host.scroll_offset(axis);
        let client_size = self.host.client_size(axis);
        let extent = self.host.scroll_extent(axis);
        self.tracker.on_scroll(offset, client_size, extent)
    }

    fn measure(&mut self) {
        let axis = self.axis();
        let mut batch = Vec::new();
        self.host.for_each_rendered(axis, &mut |m: Measurement| batch.push(m));
        if batch.is_empty() {
            return;
        }
        let correction = self.tracker.report_measurements(batch);
        if correction != 0 {
            let offset = self
                .host
                .scroll_offset(axis)
                .saturating_add_signed(correction);
            vdebug!(correction, offset, "front size correction");
            self.host.set_scroll_offset(axis, offset);
        }
    }

    fn jump_to_extent(&mut self) {
        let axis = self.axis();
        let extent = self.host.scroll_extent(axis);
        self.host.set_scroll_offset(axis, extent);
    }

    fn retry_scroll_to_end(&mut self, now_ms: u64) {
        let Some(mut state) = self.scroll_to_end else {
            return;
        };
        if now_ms < state.next_ms {
            return;
        }

        let axis = self.axis();
        let reach = self
            .host
            .scroll_offset(axis)
            .saturating_add(u64::from(self.host.client_size(axis)))
            .saturating_add(1);
        if reach >= self.host.scroll_extent(axis) {
            vdebug!(attempts = state.attempts, "scroll_to_end: reached");
            self.scroll_to_end = None;
            return;
        }
        if self.max_attempts.is_some_and(|max| state.attempts >= max) {
            vwarn!(attempts = state.attempts, "scroll_to_end: giving up");
            self.scroll_to_end = None;
            return;
        }

        self.jump_to_extent();
        state.attempts += 1;
        state.next_ms = now_ms.saturating_add(self.retry_ms);
        vtrace!(attempts = state.attempts, "scroll_to_end: retry");
        self.scroll_to_end = Some(state);
    }
}
