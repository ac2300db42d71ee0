use alloc::vec::Vec;

use crate::fenwick::Fenwick;

/// One ledger record: an item's size and where it sits in the scrollable extent.
///
/// `front` is the cumulative size of every item before this one and `behind == front + size`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LedgerEntry {
    pub size: u32,
    pub front: u64,
    pub behind: u64,
}

/// Per-index sizes with cumulative offsets, dense over `0..len`.
///
/// Measured sizes are trusted as-is. Every other index reads as the current estimate (the
/// fixed size hint when set, else the running average of measured sizes). Estimates are never
/// stored: one Fenwick tree sums measured sizes and another counts measured indexes, so
/// `front(i) = measured_before(i) + unmeasured_before(i) * estimate`. Moving the estimate is
/// `O(1)`; single updates, `front`/`behind` lookups and offset searches are `O(log n)`.
#[derive(Clone, Debug)]
pub struct SizeLedger {
    // Measured size, 0 for unmeasured entries.
    sizes: Vec<u32>,
    measured: Vec<bool>,
    measured_len: usize,
    sums: Fenwick,
    counts: Fenwick,
    average: u32,
    size_hint: Option<u32>,
}

impl Default for SizeLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl SizeLedger {
    pub fn new() -> Self {
        Self::with_size_hint(None)
    }

    pub fn with_size_hint(size_hint: Option<u32>) -> Self {
        Self {
            sizes: Vec::new(),
            measured: Vec::new(),
            measured_len: 0,
            sums: Fenwick::new(),
            counts: Fenwick::new(),
            average: 0,
            size_hint: size_hint.filter(|&s| s > 0),
        }
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// The highest valid index, or 0 for an empty ledger.
    pub fn last_index(&self) -> usize {
        self.len().saturating_sub(1)
    }

    /// Running average of measured sizes; 0 until the first measurement batch.
    pub fn average_size(&self) -> u32 {
        self.average
    }

    pub fn size_hint(&self) -> Option<u32> {
        self.size_hint
    }

    /// The size assumed for any index that has not been measured.
    pub fn estimate(&self) -> u32 {
        self.size_hint.unwrap_or(self.average)
    }

    pub fn is_measured(&self, index: usize) -> bool {
        self.measured.get(index).copied().unwrap_or(false)
    }

    pub fn has_measurements(&self) -> bool {
        self.measured_len > 0
    }

    pub fn measured_len(&self) -> usize {
        self.measured_len
    }

    /// Measured size of `index` when present, else the current estimate.
    pub fn size(&self, index: usize) -> u32 {
        if self.is_measured(index) {
            self.sizes[index]
        } else {
            self.estimate()
        }
    }

    /// Cumulative size of all items before `index` (clamped to `len`).
    pub fn front(&self, index: usize) -> u64 {
        let index = index.min(self.len());
        let measured = self.counts.prefix_sum(index);
        let unmeasured = (index as u64).saturating_sub(measured);
        self.sums
            .prefix_sum(index)
            .saturating_add(unmeasured.saturating_mul(u64::from(self.estimate())))
    }

    /// Cumulative size of all items up to and including `index` (clamped to `len`).
    pub fn behind(&self, index: usize) -> u64 {
        self.front(index.saturating_add(1))
    }

    pub fn entry(&self, index: usize) -> Option<LedgerEntry> {
        if index >= self.len() {
            return None;
        }
        let size = self.size(index);
        let front = self.front(index);
        Some(LedgerEntry {
            size,
            front,
            behind: front.saturating_add(u64::from(size)),
        })
    }

    pub fn total(&self) -> u64 {
        let unmeasured = (self.len() - self.measured_len) as u64;
        self.sums
            .total()
            .saturating_add(unmeasured.saturating_mul(u64::from(self.estimate())))
    }

    /// Sum of sizes over `start..=end`.
    pub fn span(&self, start: usize, end: usize) -> u64 {
        if start > end {
            return 0;
        }
        self.behind(end).saturating_sub(self.front(start))
    }

    /// Stores a trusted measurement and returns the signed change against the previous
    /// ledger size. Indexes outside `0..len` are ignored.
    pub fn set_size(&mut self, index: usize, size: u32) -> i64 {
        if index >= self.len() {
            return 0;
        }
        let prev = self.size(index);
        if !self.measured[index] {
            self.measured[index] = true;
            self.measured_len += 1;
            self.counts.add(index, 1);
            self.sums.add(index, i64::from(size));
            self.sizes[index] = size;
        } else if self.sizes[index] != size {
            self.sums
                .add(index, i64::from(size) - i64::from(self.sizes[index]));
            self.sizes[index] = size;
        }
        i64::from(size) - i64::from(prev)
    }

    /// Blends a batch of `n` fresh measurements summing to `sum` into the average.
    ///
    /// The first batch sets `round(sum / n)`; later batches set
    /// `round((sum / n + previous) / 2)`. Unmeasured entries follow the new value without
    /// being touched. Returns whether it moved.
    pub fn update_average(&mut self, sum: u64, n: usize) -> bool {
        if n == 0 {
            return false;
        }
        let n = n as u64;
        let prev = u64::from(self.average);
        // Integer forms of round-half-up over non-negative operands:
        // round(s / n) = (2s + n) / 2n and round((s / n + p) / 2) = (s + pn + n) / 2n.
        let next = if prev == 0 {
            sum.saturating_mul(2).saturating_add(n) / n.saturating_mul(2)
        } else {
            sum.saturating_add(prev.saturating_mul(n)).saturating_add(n) / n.saturating_mul(2)
        };
        let next = u32::try_from(next).unwrap_or(u32::MAX);
        if next == self.average {
            return false;
        }
        self.average = next;
        true
    }

    /// Makes the ledger dense through `count` entries, chaining offsets forward from the last
    /// `behind`. Unmeasured entries in `start..count` read as the current estimate.
    ///
    /// `start` must not be past the current length. Never shrinks the ledger; see
    /// [`Self::truncate`].
    pub fn fill_from(&mut self, start: usize, count: usize) {
        let len = self.len();
        debug_assert!(start <= len, "fill_from({start}, {count}) past len {len}");
        if count <= len {
            return;
        }
        let added = count - len;
        self.sizes.resize(count, 0);
        self.measured.resize(count, false);
        if added > len {
            // Bulk growth: an `O(n)` rebuild beats `added` pushes.
            self.rebuild();
        } else {
            for _ in 0..added {
                self.sums.push(0);
                self.counts.push(0);
            }
        }
    }

    /// Drops every entry at or after `count`.
    pub fn truncate(&mut self, count: usize) {
        if count >= self.len() {
            return;
        }
        let dropped = self.measured[count..].iter().filter(|&&m| m).count();
        self.measured_len -= dropped;
        self.sizes.truncate(count);
        self.measured.truncate(count);
        self.sums.truncate(count);
        self.counts.truncate(count);
    }

    /// Truncates or extends the ledger to exactly `count` entries.
    pub fn resize(&mut self, count: usize) {
        if count < self.len() {
            self.truncate(count);
        } else {
            self.fill_from(self.len(), count);
        }
    }

    /// Sets the fixed size hint. `None` and `Some(0)` fall back to the average.
    pub fn set_size_hint(&mut self, size_hint: Option<u32>) {
        self.size_hint = size_hint.filter(|&s| s > 0);
    }

    /// Recomputes every cumulative offset from the stored measurements.
    pub fn rebuild(&mut self) {
        self.sums = Fenwick::from_values(self.sizes.iter().copied());
        self.counts = Fenwick::from_values(self.measured.iter().map(|&m| u32::from(m)));
    }

    /// Forgets every measurement and the average, keeping the length.
    pub fn clear_measurements(&mut self) {
        self.sizes.iter_mut().for_each(|s| *s = 0);
        self.measured.iter_mut().for_each(|m| *m = false);
        self.measured_len = 0;
        self.average = 0;
        self.rebuild();
    }

    pub(crate) fn sums(&self) -> &Fenwick {
        &self.sums
    }

    pub(crate) fn counts(&self) -> &Fenwick {
        &self.counts
    }
}
