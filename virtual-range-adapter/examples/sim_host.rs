// Example: a controller driving a simulated scroll container.
use virtual_range::{Axis, Measurement, ScrollHost};
use virtual_range_adapter::{Controller, RateLimit, TrackerConfig};

struct Pane {
    heights: Vec<u32>,
    rendered: Option<(usize, usize)>,
    client: u32,
    offset: u64,
}

impl Pane {
    fn extent(&self) -> u64 {
        self.heights.iter().map(|&h| h as u64).sum()
    }
}

impl ScrollHost for Pane {
    fn for_each_rendered(&self, _axis: Axis, f: &mut dyn FnMut(Measurement)) {
        if let Some((start, end)) = self.rendered {
            for i in start..=end {
                f(Measurement::new(i, self.heights[i]));
            }
        }
    }

    fn client_size(&self, _axis: Axis) -> u32 {
        self.client
    }

    fn scroll_offset(&self, _axis: Axis) -> u64 {
        self.offset
    }

    fn scroll_extent(&self, _axis: Axis) -> u64 {
        self.extent()
    }

    fn set_scroll_offset(&mut self, _axis: Axis, offset: u64) {
        self.offset = offset.min(self.extent().saturating_sub(self.client as u64));
    }

    fn is_container_visible(&self) -> bool {
        self.client > 0
    }
}

fn main() {
    let config = TrackerConfig {
        item_count: 5_000,
        buffer: 2,
        throttle_time: 16,
        ..TrackerConfig::default()
    };
    let options = match config.into_options() {
        Ok(options) => options,
        Err(err) => {
            eprintln!("bad config: {err}");
            return;
        }
    };

    let pane = Pane {
        heights: (0..5_000).map(|i| 18 + (i % 5) * 4).collect(),
        rendered: None,
        client: 400,
        offset: 0,
    };
    let mut c = Controller::new(pane, options);

    // Render whatever the controller asks for, then let it measure.
    for _ in 0..3 {
        let r = c.range();
        c.host_mut().rendered = Some((r.start, r.end));
        c.refresh();
    }
    println!("after warm-up: {:?} average={}", c.range(), c.tracker().average_size());

    // A burst of scroll events, throttled to one run per 16 ms.
    let mut now_ms = 0;
    for step in 1..=20u64 {
        now_ms += 4;
        c.host_mut().offset = step * 150;
        c.on_scroll_event(now_ms);
        if let Some(r) = c.tick(now_ms) {
            c.host_mut().rendered = Some((r.start, r.end));
            println!("t={now_ms} offset={} -> {}..={}", step * 150, r.start, r.end);
        }
    }

    c.set_rate_limit(RateLimit::None);
    c.scroll_to_index(usize::MAX, now_ms);
    while c.is_scrolling_to_end() {
        now_ms += 5;
        c.tick(now_ms);
    }
    c.on_scroll_event(now_ms);
    println!("scrolled to end: offset={} range={:?}", c.host().offset, c.range());
}
