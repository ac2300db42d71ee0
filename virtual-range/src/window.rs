use crate::{Range, SizeLedger};

/// An inclusive index window, overscan included.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Window {
    pub start: usize,
    pub end: usize,
}

impl SizeLedger {
    /// Expands `start` into a window that covers `client_size`.
    ///
    /// Walks forward from `start` accumulating sizes until the span exceeds `client_size`,
    /// stopping at that index, then widens both sides by `buffer` (clamped to
    /// `0..=last_index`). The un-buffered span is always `> client_size` unless the walk hit
    /// the last index. An empty ledger yields `0..=0`.
    pub fn build_window(&self, start: usize, client_size: u32, buffer: usize) -> Window {
        if self.is_empty() {
            return Window::default();
        }
        let last = self.last_index();
        let start = start.min(last);
        let client = u64::from(client_size);

        let mut end = start;
        let mut span = u64::from(self.size(start));
        while span <= client && end < last {
            end += 1;
            span = span.saturating_add(u64::from(self.size(end)));
        }

        Window {
            start: start.saturating_sub(buffer),
            end: end.saturating_add(buffer).min(last),
        }
    }

    /// Resolves a window into a [`Range`] against the current offsets.
    pub fn range_of(&self, window: Window) -> Range {
        if self.is_empty() {
            return Range::default();
        }
        let last = self.last_index();
        let end = window.end.min(last);
        let start = window.start.min(end);
        let total = self.total();
        Range {
            start,
            end,
            front: self.front(start),
            behind: total.saturating_sub(self.behind(end)),
            total,
        }
    }
}
