// Example: unknown sizes, learned from rendered items.
use virtual_range::{Measurement, RangeTracker, TrackerOptions};

fn main() {
    // Row heights the "renderer" would report.
    let heights: Vec<u32> = (0..10_000).map(|i| 20 + (i % 7) * 6).collect();
    let client = 480;

    let mut t = RangeTracker::new(TrackerOptions::new(heights.len()).with_buffer(3));
    println!("phase={:?} range={:?}", t.phase(), t.range());

    // Report-then-recompute until the window stops moving.
    for round in 0..10 {
        let r = t.range();
        t.report_measurements((r.start..=r.end).map(|i| Measurement::new(i, heights[i])));
        match t.refresh(0, client) {
            Some(r) => println!(
                "round {round}: {}..={} average={} total={}",
                r.start,
                r.end,
                t.average_size(),
                r.total
            ),
            None => break,
        }
    }

    // Sub-pixel sizes from a layout engine round half away from zero.
    t.report_measurements([Measurement::from_subpixel(0, 25.5)]);
    println!("size(0)={} phase={:?}", t.size(0), t.phase());
}
