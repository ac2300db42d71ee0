// Example: fixed-size list, scrolling back and forth.
use virtual_range::{RangeTracker, ScrollTarget, TrackerOptions};

fn main() {
    let mut t = RangeTracker::new(
        TrackerOptions::new(1_000_000)
            .with_buffer(2)
            .with_estimated_size(Some(24)),
    );

    let client = 600;
    let extent = t.total_size();
    println!("total_size={extent}");
    println!("first range={:?}", t.refresh(0, client));

    for offset in [4_800, 120_000, 119_000, 0] {
        match t.on_scroll(offset, client, extent) {
            Some(r) => println!("offset={offset} -> {}..={} front={}", r.start, r.end, r.front),
            None => println!("offset={offset} -> unchanged ({:?})", t.scroll_direction()),
        }
    }

    if let ScrollTarget::Offset(off) = t.scroll_to_index(500_000) {
        println!("scroll_to_index(500000) -> offset={off}");
        println!("range there={:?}", t.range_for(off, client));
    }
}
