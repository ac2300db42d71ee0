use crate::*;

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::str::FromStr;
use std::sync::Mutex;

use proptest::prelude::*;

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_range_u64(&mut self, start: u64, end_exclusive: u64) -> u64 {
        debug_assert!(start < end_exclusive);
        start + (self.next_u64() % (end_exclusive - start))
    }

    fn gen_range_u32(&mut self, start: u32, end_exclusive: u32) -> u32 {
        self.gen_range_u64(start as u64, end_exclusive as u64) as u32
    }
}

fn m(index: usize, size: u32) -> Measurement {
    Measurement::new(index, size)
}

fn ledger_from(sizes: &[u32]) -> SizeLedger {
    let mut ledger = SizeLedger::new();
    ledger.fill_from(0, sizes.len());
    for (i, &size) in sizes.iter().enumerate() {
        ledger.set_size(i, size);
    }
    ledger
}

fn expected_front(sizes: &[u32], index: usize) -> u64 {
    sizes[..index].iter().map(|&s| s as u64).sum()
}

/// Lowest index whose `behind` reaches `offset`, clamped to the last index.
fn expected_index_at_offset(sizes: &[u32], offset: u64) -> usize {
    let mut behind = 0u64;
    for (i, &size) in sizes.iter().enumerate() {
        behind += size as u64;
        if behind >= offset {
            return i;
        }
    }
    sizes.len().saturating_sub(1)
}

fn fixed_tracker(count: usize, size: u32, buffer: usize) -> RangeTracker {
    RangeTracker::new(
        TrackerOptions::new(count)
            .with_buffer(buffer)
            .with_estimated_size(Some(size)),
    )
}

fn assert_range_consistent(t: &RangeTracker) {
    let r = t.range();
    if t.item_count() == 0 {
        assert_eq!(r, Range::default());
        return;
    }
    assert!(r.start <= r.end, "start > end: {r:?}");
    assert!(r.end <= t.last_index(), "end past last index: {r:?}");
    let span = t.ledger().span(r.start, r.end);
    assert_eq!(r.front + span + r.behind, r.total, "range does not add up: {r:?}");
    assert_eq!(r.total, t.total_size());
}

#[test]
fn fixed_size_window_at_top() {
    let mut t = fixed_tracker(1000, 50, 1);
    let r = t.refresh(0, 500).unwrap();
    assert_eq!(r.start, 0);
    // Items 0..=10 are the first to exceed 500, plus one buffered item.
    assert_eq!(r.end, 11);
    assert_eq!(r.front, 0);
    assert_eq!(r.total, 50_000);
    assert_eq!(r.behind, 50_000 - 12 * 50);
    assert_range_consistent(&t);
}

#[test]
fn cold_start_bootstraps_then_warms_up() {
    let mut t = RangeTracker::new(TrackerOptions::new(1000));
    assert_eq!(t.phase(), Phase::Cold);
    // Nothing to estimate from: only a few leading items are requested.
    assert_eq!(t.range().start, 0);
    assert_eq!(t.range().end, 1);
    assert_eq!(t.total_size(), 0);

    t.report_measurements([m(0, 50), m(1, 50)]);
    assert_eq!(t.phase(), Phase::Warm);
    assert_eq!(t.average_size(), 50);

    let r = t.refresh(0, 500).unwrap();
    assert_eq!((r.start, r.end, r.front), (0, 11, 0));
    assert_eq!(r.total, 50_000);
}

#[test]
fn first_batch_sets_average_for_unmeasured_items() {
    let mut t = RangeTracker::new(TrackerOptions::new(1000));
    t.report_measurements((0..10).map(|i| Measurement::new(i, 40)));
    assert_eq!(t.average_size(), 40);
    assert_eq!(t.size(500), 40);
    assert!(!t.ledger().is_measured(500));
    assert_eq!(t.total_size(), 40_000);
}

#[test]
fn later_batches_blend_with_previous_average() {
    let mut ledger = SizeLedger::new();
    ledger.fill_from(0, 10);
    assert!(ledger.update_average(4 * 40, 4));
    assert_eq!(ledger.average_size(), 40);
    assert!(ledger.update_average(4 * 60, 4));
    assert_eq!(ledger.average_size(), 50);
    // (45 + 50) / 2 = 47.5 rounds away from zero.
    assert!(ledger.update_average(2 * 45, 2));
    assert_eq!(ledger.average_size(), 48);
    assert!(!ledger.update_average(0, 0));
}

#[test]
fn first_average_rounds_half_up() {
    let mut ledger = SizeLedger::new();
    ledger.fill_from(0, 4);
    ledger.update_average(3, 2);
    assert_eq!(ledger.average_size(), 2);
    // Unmeasured entries follow the new estimate.
    assert_eq!(ledger.total(), 8);
}

#[test]
fn ledger_chains_offsets() {
    let sizes = [10u32, 0, 25, 7, 3];
    let ledger = ledger_from(&sizes);
    for i in 0..sizes.len() {
        let e = ledger.entry(i).unwrap();
        assert_eq!(e.size, sizes[i]);
        assert_eq!(e.front, expected_front(&sizes, i));
        assert_eq!(e.front + e.size as u64, e.behind);
        if let Some(next) = ledger.entry(i + 1) {
            assert_eq!(e.behind, next.front);
        }
    }
    assert_eq!(ledger.entry(sizes.len()), None);
    assert_eq!(ledger.total(), 45);
}

#[test]
fn fill_from_extends_with_estimate_and_truncate_drops_tail() {
    let mut ledger = ledger_from(&[10, 20]);
    ledger.update_average(30, 2);
    assert_eq!(ledger.estimate(), 15);

    ledger.fill_from(2, 5);
    assert_eq!(ledger.len(), 5);
    assert_eq!(ledger.entry(4).unwrap().front, 30 + 2 * 15);
    assert_eq!(ledger.total(), 75);

    ledger.truncate(1);
    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger.measured_len(), 1);
    assert_eq!(ledger.total(), 10);

    ledger.resize(3);
    assert_eq!(ledger.total(), 10 + 2 * 15);
}

#[test]
fn size_hint_overrides_average() {
    let mut ledger = ledger_from(&[10, 20]);
    ledger.fill_from(2, 4);
    ledger.update_average(30, 2);
    ledger.set_size_hint(Some(100));
    assert_eq!(ledger.size(3), 100);
    assert_eq!(ledger.size(0), 10);
    assert_eq!(ledger.total(), 230);

    ledger.set_size_hint(Some(0));
    assert_eq!(ledger.size_hint(), None);
    assert_eq!(ledger.size(3), 15);
}

#[test]
fn index_at_offset_prefers_lower_index_on_boundaries() {
    let ledger = ledger_from(&[10, 10, 10]);
    assert_eq!(ledger.index_at_offset(0), 0);
    assert_eq!(ledger.index_at_offset(10), 0);
    assert_eq!(ledger.index_at_offset(11), 1);
    assert_eq!(ledger.index_at_offset(20), 1);
    assert_eq!(ledger.index_at_offset(30), 2);
    assert_eq!(ledger.index_at_offset(10_000), 2);
    assert_eq!(SizeLedger::new().index_at_offset(5), 0);
}

#[test]
fn index_at_offset_skips_zero_sized_items() {
    let sizes = [5u32, 0, 0, 3];
    let ledger = ledger_from(&sizes);
    for offset in 0..=10 {
        assert_eq!(
            ledger.index_at_offset(offset),
            expected_index_at_offset(&sizes, offset),
            "offset={offset}"
        );
    }
}

#[test]
fn window_covers_viewport_plus_buffer() {
    let ledger = ledger_from(&[50; 100]);
    let w = ledger.build_window(20, 500, 0);
    assert_eq!((w.start, w.end), (20, 30));
    assert!(ledger.span(w.start, w.end) > 500);

    let w = ledger.build_window(20, 500, 3);
    assert_eq!((w.start, w.end), (17, 33));

    let w = ledger.build_window(95, 500, 2);
    assert_eq!((w.start, w.end), (93, 99));

    let w = ledger.build_window(1, 500, 5);
    assert_eq!(w.start, 0);
}

#[test]
fn window_on_empty_ledger_is_zero() {
    let ledger = SizeLedger::new();
    assert_eq!(ledger.build_window(7, 500, 1), Window::default());
    assert_eq!(ledger.range_of(Window { start: 3, end: 9 }), Range::default());
}

#[test]
fn scrolling_backward_moves_the_window() {
    let mut t = fixed_tracker(1000, 50, 1);
    t.refresh(0, 500);
    let r = t.on_scroll(1000, 500, 50_000).unwrap();
    // 1000 is the boundary between items 19 and 20; the lower one wins.
    assert_eq!((r.start, r.end), (18, 30));
    assert_eq!(r.front, 18 * 50);
    assert_eq!(t.scroll_direction(), Some(ScrollDirection::Backward));
    assert_range_consistent(&t);

    let r = t.on_scroll(200, 500, 50_000).unwrap();
    assert_eq!(t.scroll_direction(), Some(ScrollDirection::Forward));
    assert_eq!((r.start, r.end), (2, 14));
}

#[test]
fn forward_scroll_at_start_is_skipped() {
    let mut t = fixed_tracker(1000, 50, 1);
    t.refresh(40, 500);
    assert_eq!(t.range().start, 0);
    let before = t.range();
    assert_eq!(t.on_scroll(5, 500, 50_000), None);
    assert_eq!(t.scroll_direction(), Some(ScrollDirection::Forward));
    assert_eq!(t.range(), before);
}

#[test]
fn backward_scroll_at_last_index_is_skipped() {
    let mut t = fixed_tracker(20, 50, 1);
    t.refresh(0, 500);
    t.on_scroll(500, 500, 1000).unwrap();
    assert_eq!(t.range().end, 19);
    let before = t.range();
    assert_eq!(t.on_scroll(520, 500, 1000), None);
    assert_eq!(t.range(), before);
}

#[test]
fn jitter_within_deadband_has_no_direction() {
    let mut t = fixed_tracker(1000, 50, 1);
    t.refresh(1000, 500);
    let before = t.range();
    assert_eq!(t.on_scroll(1001, 500, 50_000), None);
    assert_eq!(t.scroll_direction(), None);
    assert_eq!(t.on_scroll(1000, 500, 50_000), None);
    assert_eq!(t.scroll_state().offset, 1000);
    assert_eq!(t.range(), before);
}

/// Measures `0..=50` at 50, then settles the window for offset 2000: `38..=50`.
fn tracker_measured_at_2000() -> RangeTracker {
    let mut t = RangeTracker::new(TrackerOptions::new(1000));
    t.report_measurements((0..=50).map(|i| m(i, 50)));
    let r = t.refresh(2000, 500).unwrap();
    assert_eq!((r.start, r.end), (38, 50));
    t
}

#[test]
fn forward_scroll_drops_window_that_moves_backward() {
    let mut t = tracker_measured_at_2000();
    // Items above the window shrink, so offset 1900 now lands far below index 38.
    t.report_measurements((0..38).map(|i| m(i, 10)));
    assert_eq!(t.average_size(), 30);
    let before = t.range();

    let extent = t.total_size();
    assert_eq!(t.on_scroll(1900, 500, extent), None);
    assert_eq!(t.scroll_direction(), Some(ScrollDirection::Forward));
    assert_eq!(t.range(), before);
    assert_eq!(t.range_for(1900, 500).start, 78);

    let r = t.refresh(1900, 500).unwrap();
    assert_eq!((r.start, r.end), (78, 96));
    assert_range_consistent(&t);
}

#[test]
fn backward_scroll_drops_window_that_moves_forward() {
    let mut t = tracker_measured_at_2000();
    // Items above the window grow, so offset 2100 now lands well above index 38.
    t.report_measurements((0..38).map(|i| m(i, 100)));
    let before = t.range();

    let extent = t.total_size();
    assert_eq!(t.on_scroll(2100, 500, extent), None);
    assert_eq!(t.scroll_direction(), Some(ScrollDirection::Backward));
    assert_eq!(t.range(), before);

    let r = t.refresh(2100, 500).unwrap();
    assert_eq!((r.start, r.end), (19, 26));
    assert_range_consistent(&t);
}

#[test]
fn average_change_reprices_unmeasured_entries() {
    let mut ledger = SizeLedger::new();
    ledger.fill_from(0, 1000);
    for i in (0..1000).step_by(97) {
        ledger.set_size(i, 10 + i as u32 % 13);
    }
    for (sum, n) in [(400u64, 10usize), (90, 3), (1_000, 4), (7, 7)] {
        ledger.update_average(sum, n);
        let estimate = ledger.average_size();
        let mut front = 0u64;
        for i in 0..1000 {
            let e = ledger.entry(i).unwrap();
            if ledger.is_measured(i) {
                assert_eq!(e.size, 10 + i as u32 % 13);
            } else {
                assert_eq!(e.size, estimate);
            }
            assert_eq!(e.front, front, "index {i}");
            front = e.behind;
        }
        assert_eq!(ledger.total(), front);
        assert_eq!(ledger.index_at_offset(front), 999);
    }
}

#[test]
fn large_list_scroll_session_stays_consistent() {
    let count = 2_000_000usize;
    let size_of = |i: usize| 20 + (i * 7919 % 61) as u32;
    let mut t = RangeTracker::new(TrackerOptions::new(count));
    let client = 600u32;
    t.refresh(0, client);
    let mut measured_sum = 0u64;
    let mut offset = 0u64;
    let mut moved = 0;

    for _ in 0..300 {
        let r = t.range();
        for i in r.start..=r.end {
            if !t.ledger().is_measured(i) {
                measured_sum += u64::from(size_of(i));
            }
        }
        t.report_measurements((r.start..=r.end).map(|i| m(i, size_of(i))));

        let unmeasured = (count - t.ledger().measured_len()) as u64;
        assert_eq!(
            t.total_size(),
            measured_sum + unmeasured * u64::from(t.average_size())
        );

        offset += 300;
        if let Some(r) = t.on_scroll(offset, client, t.total_size()) {
            moved += 1;
            assert!(r.front <= offset);
            assert_eq!(r.total, t.total_size());
            assert_range_consistent(&t);
        }
    }
    assert!(moved > 100, "window moved only {moved} times");
}

#[test]
fn scroll_events_report_edges() {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    let mut t = RangeTracker::new(
        TrackerOptions::new(20)
            .with_estimated_size(Some(50))
            .with_on_scroll(Some(move |e: &ScrollEvent| sink.lock().unwrap().push(*e))),
    );
    t.refresh(100, 500);
    t.on_scroll(0, 500, 1000);
    t.on_scroll(499, 500, 1000);
    t.on_scroll(300, 500, 1000);

    let events = events.lock().unwrap();
    assert_eq!(events.len(), 3);
    assert!(events[0].top && !events[0].bottom);
    assert_eq!(events[0].direction, Some(ScrollDirection::Forward));
    // 500 + 499 + 1 >= 1000: within one unit of the end.
    assert!(!events[1].top && events[1].bottom);
    assert_eq!(events[1].direction, Some(ScrollDirection::Backward));
    assert!(!events[2].top && !events[2].bottom);
    assert_eq!(events[2].offset, 300);
}

#[test]
fn empty_list_is_never_at_top() {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    let mut t = RangeTracker::new(
        TrackerOptions::new(0).with_on_scroll(Some(move |e: &ScrollEvent| {
            sink.lock().unwrap().push(*e);
        })),
    );
    t.refresh(10, 500);
    t.on_scroll(0, 500, 0);
    assert!(!events.lock().unwrap()[0].top);
    assert_eq!(t.range(), Range::default());
}

#[test]
fn refresh_is_idempotent() {
    let updates = Arc::new(Mutex::new(0usize));
    let sink = Arc::clone(&updates);
    let mut t = RangeTracker::new(
        TrackerOptions::new(500)
            .with_on_update(Some(move |_: &Range| *sink.lock().unwrap() += 1)),
    );
    t.report_measurements((0..4u32).map(|i| m(i as usize, 30 + i)));
    let first = t.refresh(250, 400).unwrap();
    assert_eq!(t.refresh(250, 400), None);
    assert_eq!(t.range(), first);
    assert_eq!(*updates.lock().unwrap(), 1);
}

#[test]
fn refresh_emits_on_total_drift_only() {
    let mut t = fixed_tracker(100, 50, 1);
    t.refresh(0, 500);
    // Re-measure an item far below the window: indexes stay, `behind`/`total` drift.
    t.report_measurements([m(90, 80)]);
    let r = t.refresh(0, 500).unwrap();
    assert_eq!((r.start, r.end), (0, 11));
    assert_eq!(r.total, 100 * 50 + 30);
}

#[test]
fn suspended_tracker_ignores_everything() {
    let updates = Arc::new(Mutex::new(0usize));
    let sink = Arc::clone(&updates);
    let mut t = RangeTracker::new(
        TrackerOptions::new(1000)
            .with_estimated_size(Some(50))
            .with_on_update(Some(move |_: &Range| *sink.lock().unwrap() += 1)),
    );
    t.refresh(0, 500);
    assert_eq!(*updates.lock().unwrap(), 1);

    t.set_container_visible(false);
    assert_eq!(t.phase(), Phase::Suspended);
    let before = t.range();
    assert_eq!(t.on_scroll(5000, 500, 50_000), None);
    assert_eq!(t.refresh(5000, 500), None);
    assert_eq!(t.report_measurements([m(0, 10)]), 0);
    assert_eq!(t.range(), before);
    assert_eq!(t.scroll_state().offset, 0);
    assert_eq!(*updates.lock().unwrap(), 1);

    t.set_container_visible(true);
    let r = t.refresh(5000, 500).unwrap();
    assert_eq!(r.start, 98);
    assert_eq!(*updates.lock().unwrap(), 2);
}

#[test]
fn count_change_while_suspended_is_reported_on_refresh() {
    let mut t = fixed_tracker(1000, 50, 1);
    t.refresh(0, 500);
    t.set_container_visible(false);
    assert_eq!(t.set_item_count(5), None);
    // The stored range is kept inside the shrunk list.
    assert_eq!(t.range().end, 4);
    t.set_container_visible(true);
    let r = t.refresh(0, 500).unwrap();
    assert_eq!((r.start, r.end, r.total), (0, 4, 250));
}

#[test]
fn item_count_changes_resize_the_ledger() {
    let mut t = fixed_tracker(1000, 50, 1);
    t.refresh(0, 500);
    let r = t.set_item_count(5).unwrap();
    assert_eq!((r.start, r.end, r.behind, r.total), (0, 4, 0, 250));
    assert_eq!(t.ledger().len(), 5);

    let r = t.set_item_count(2000).unwrap();
    assert_eq!(r.end, 11);
    assert_eq!(r.total, 100_000);

    let r = t.set_item_count(0).unwrap();
    assert_eq!(r, Range::default());
    assert_eq!(t.set_item_count(0), None);
}

#[test]
fn buffer_and_hint_changes_recompute() {
    let mut t = fixed_tracker(1000, 50, 1);
    t.refresh(1000, 500);
    let r = t.set_buffer(3).unwrap();
    assert_eq!((r.start, r.end), (16, 32));
    let r = t.set_estimated_size(Some(100)).unwrap();
    assert_eq!(r.total, 100_000);
    assert_eq!(
        t.update_options(|o| o.buffer = 0).map(|r| (r.start, r.end)),
        Some((9, 14))
    );
}

#[test]
fn leading_offset_shifts_the_list() {
    let mut t = RangeTracker::new(
        TrackerOptions::new(1000)
            .with_estimated_size(Some(50))
            .with_leading_offset(300),
    );
    let r = t.refresh(300, 500).unwrap();
    assert_eq!(r.start, 0);
    assert_eq!(t.scroll_to_index(4), ScrollTarget::Offset(300 + 200));
}

#[test]
fn scroll_to_index_past_the_end_targets_the_end() {
    let t = fixed_tracker(1000, 50, 1);
    assert_eq!(t.scroll_to_index(999), ScrollTarget::Offset(999 * 50));
    assert_eq!(t.scroll_to_index(1000), ScrollTarget::End);
    assert_eq!(t.scroll_to_index(2000), ScrollTarget::End);
}

#[test]
fn measurements_outside_the_list_or_empty_are_skipped() {
    let mut t = RangeTracker::new(TrackerOptions::new(10));
    t.report_measurements([m(3, 0), m(10, 99), m(42, 7)]);
    assert_eq!(t.phase(), Phase::Cold);
    assert_eq!(t.ledger().measured_len(), 0);

    t.report_measurements([Measurement::from_subpixel(2, 19.5)]);
    assert_eq!(t.size(2), 20);
    assert_eq!(t.average_size(), 20);
}

#[test]
fn forward_scroll_remeasure_of_start_returns_correction() {
    let mut t = fixed_tracker(1000, 50, 1);
    t.report_measurements((0..12).map(|i| m(i, 50)));
    t.refresh(0, 500);
    t.on_scroll(2000, 500, 50_000).unwrap();
    t.on_scroll(1500, 500, 50_000).unwrap();
    let start = t.range().start;
    assert_eq!(t.scroll_direction(), Some(ScrollDirection::Forward));

    let correction = t.report_measurements([m(start, 70), m(start + 1, 50)]);
    assert_eq!(correction, 20);
    assert_eq!(t.size(start), 70);

    // Not scrolling forward: nothing to correct.
    t.on_scroll(1500, 500, 50_000);
    assert_eq!(t.report_measurements([m(start, 90)]), 0);
}

#[test]
fn reset_measurements_returns_to_cold() {
    let mut t = RangeTracker::new(TrackerOptions::new(100));
    t.report_measurements([m(0, 30), m(1, 30)]);
    assert_eq!(t.phase(), Phase::Warm);
    t.reset_measurements();
    assert_eq!(t.phase(), Phase::Cold);
    assert_eq!(t.average_size(), 0);
    assert_eq!(t.total_size(), 0);
    assert!(!t.ledger().has_measurements());
}

#[test]
fn axis_parses_case_insensitively() {
    assert_eq!(Axis::from_str("vertical"), Ok(Axis::Vertical));
    assert_eq!(Axis::from_str(" Horizontal "), Ok(Axis::Horizontal));
    let err = Axis::from_str("diagonal").unwrap_err();
    assert_eq!(err.value(), "diagonal");
    assert_eq!(Axis::Horizontal.to_string(), "horizontal");
}

#[test]
fn subpixel_sizes_round_half_away_from_zero() {
    assert_eq!(Measurement::from_subpixel(0, 40.5).size, 41);
    assert_eq!(Measurement::from_subpixel(0, 40.49).size, 40);
    assert_eq!(Measurement::from_subpixel(0, -3.0).size, 0);
    assert_eq!(Measurement::from_subpixel(0, f32::NAN).size, 0);
    // Largest f32 below one half; adding 0.5 in f32 would round it up to 1.
    assert_eq!(Measurement::from_subpixel(0, 0.499_999_97).size, 0);
    assert_eq!(Measurement::from_subpixel(0, 2.5).size, 3);
}

#[test]
fn randomized_scroll_session_keeps_range_consistent() {
    let mut rng = Lcg::new(0x5eed);
    let count = 5_000usize;
    let mut t = RangeTracker::new(TrackerOptions::new(count).with_buffer(2));
    let truth: Vec<u32> = (0..count).map(|_| rng.gen_range_u32(10, 120)).collect();

    let client = 600u32;
    let mut offset = 0u64;
    for _ in 0..300 {
        let r = t.range();
        t.report_measurements((r.start..=r.end).map(|i| (i, truth[i])));
        t.refresh(offset, client);
        assert_range_consistent(&t);

        let extent = t.total_size();
        offset = rng.gen_range_u64(0, extent.max(1));
        t.on_scroll(offset, client, extent);
        assert_range_consistent(&t);
    }
}

fn sizes_strategy() -> impl Strategy<Value = Vec<u32>> {
    prop::collection::vec(0u32..100, 1..200)
}

proptest! {
    #[test]
    fn index_at_offset_brackets_offset(sizes in sizes_strategy(), raw in 0u64..25_000) {
        let ledger = ledger_from(&sizes);
        let total = ledger.total();
        let offset = raw % (total + 50);
        let i = ledger.index_at_offset(offset);
        prop_assert_eq!(i, expected_index_at_offset(&sizes, offset));
        prop_assert!(i < sizes.len());
        if offset <= total {
            let e = ledger.entry(i).unwrap();
            prop_assert!(e.front <= offset && offset <= e.behind, "{:?} vs {}", e, offset);
        } else {
            prop_assert_eq!(i, sizes.len() - 1);
        }
    }

    #[test]
    fn index_at_offset_is_monotonic(sizes in sizes_strategy(), a in 0u64..20_000, b in 0u64..20_000) {
        let ledger = ledger_from(&sizes);
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(ledger.index_at_offset(lo) <= ledger.index_at_offset(hi));
    }

    #[test]
    fn entries_stay_chained_after_mutations(
        sizes in sizes_strategy(),
        updates in prop::collection::vec((0usize..250, 0u32..300), 0..40),
        count in 0usize..300,
    ) {
        let mut ledger = ledger_from(&sizes);
        for (index, size) in updates {
            ledger.set_size(index, size);
        }
        ledger.update_average(500, 7);
        ledger.resize(count);
        prop_assert_eq!(ledger.len(), count);
        let mut front = 0u64;
        for i in 0..count {
            let e = ledger.entry(i).unwrap();
            prop_assert_eq!(e.front, front);
            prop_assert_eq!(e.front + e.size as u64, e.behind);
            front = e.behind;
        }
        prop_assert_eq!(ledger.total(), front);
    }

    #[test]
    fn partially_measured_search_matches_linear_scan(
        count in 1usize..300,
        measured in prop::collection::vec((0usize..300, 0u32..120), 0..60),
        batches in prop::collection::vec((0u64..2_000, 1usize..20), 0..5),
        hint in prop::option::of(0u32..80),
        raw in 0u64..40_000,
    ) {
        let mut ledger = SizeLedger::new();
        ledger.fill_from(0, count);
        for (index, size) in measured {
            ledger.set_size(index, size);
        }
        for (sum, n) in batches {
            ledger.update_average(sum, n);
        }
        ledger.set_size_hint(hint);

        let sizes: Vec<u32> = (0..count).map(|i| ledger.size(i)).collect();
        for i in 0..count {
            prop_assert_eq!(ledger.front(i), expected_front(&sizes, i));
        }
        let offset = raw % (ledger.total() + 50);
        prop_assert_eq!(
            ledger.index_at_offset(offset),
            expected_index_at_offset(&sizes, offset)
        );
    }

    #[test]
    fn window_covers_viewport_unless_clamped(
        sizes in sizes_strategy(),
        start in 0usize..250,
        client in 0u32..2_000,
        buffer in 0usize..4,
    ) {
        let ledger = ledger_from(&sizes);
        let w = ledger.build_window(start, client, buffer);
        prop_assert!(w.start <= w.end);
        prop_assert!(w.end <= ledger.last_index());
        if w.end != ledger.last_index() {
            prop_assert!(ledger.span(w.start, w.end) >= client as u64);
        }
    }

    #[test]
    fn forward_scroll_never_moves_start_off_zero(
        offsets in prop::collection::vec(0u64..3_000, 1..20),
    ) {
        let mut t = fixed_tracker(200, 40, 1);
        t.refresh(20, 400);
        prop_assert_eq!(t.range().start, 0);
        let mut prev = 20u64;
        for offset in offsets {
            let forward = offset + DIRECTION_DEADBAND < prev;
            let start_before = t.range().start;
            t.on_scroll(offset, 400, 8_000);
            if forward && start_before == 0 {
                prop_assert_eq!(t.range().start, 0);
            }
            prev = offset;
        }
    }

    #[test]
    fn backward_scroll_never_moves_end_off_last(
        offsets in prop::collection::vec(0u64..3_000, 1..20),
    ) {
        let mut t = fixed_tracker(60, 40, 1);
        t.refresh(2_000, 400);
        prop_assert_eq!(t.range().end, 59);
        let mut prev = 2_000u64;
        for offset in offsets {
            let backward = offset > prev + DIRECTION_DEADBAND;
            let end_before = t.range().end;
            t.on_scroll(offset, 400, 2_400);
            if backward && end_before == 59 {
                prop_assert_eq!(t.range().end, 59);
            }
            prev = offset;
        }
    }
}
