use alloc::vec::Vec;
use core::cmp;

/// Prefix sums over per-item values (binary indexed tree).
///
/// The ledger keeps two of these: measured sizes, and a 0/1 count of which indexes are
/// measured.
#[derive(Clone, Debug)]
pub(crate) struct Fenwick {
    tree: Vec<u64>, // 1-indexed
    total: u64,
    max_bit: usize,
}

impl Fenwick {
    pub(crate) fn new() -> Self {
        Self {
            tree: alloc::vec![0],
            total: 0,
            max_bit: 0,
        }
    }

    /// Builds the tree in `O(n)`.
    pub(crate) fn from_values(values: impl IntoIterator<Item = u32>) -> Self {
        let mut tree = alloc::vec![0u64];
        let mut total = 0u64;
        for v in values {
            let v = u64::from(v);
            total = total.saturating_add(v);
            tree.push(v);
        }
        let n = tree.len() - 1;
        for i in 1..=n {
            let j = i + lsb(i);
            if j <= n {
                tree[j] = tree[j].saturating_add(tree[i]);
            }
        }
        Self {
            tree,
            total,
            max_bit: highest_power_of_two_leq(n),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.tree.len().saturating_sub(1)
    }

    pub(crate) fn truncate(&mut self, new_len: usize) {
        if new_len >= self.len() {
            return;
        }
        self.total = self.prefix_sum(new_len);
        self.tree.truncate(new_len + 1);
        self.max_bit = highest_power_of_two_leq(new_len);
    }

    /// Appends one value in `O(log n)`.
    pub(crate) fn push(&mut self, value: u32) {
        let value = u64::from(value);
        let new_len = self.len() + 1;
        // tree[i] covers the last lsb(i) values ending at i; everything but the new value is
        // already summed by the existing prefix sums.
        let covered_from = new_len - lsb(new_len);
        let before = self
            .prefix_sum(new_len - 1)
            .saturating_sub(self.prefix_sum(covered_from));
        self.tree.push(before.saturating_add(value));
        self.total = self.total.saturating_add(value);
        self.max_bit = highest_power_of_two_leq(new_len);
    }

    pub(crate) fn add(&mut self, index: usize, delta: i64) {
        let n = self.len();
        if index >= n || delta == 0 {
            return;
        }
        self.total = apply_delta(self.total, delta);
        let mut i = index + 1;
        while i <= n {
            debug_assert!(
                delta >= 0 || self.tree[i] >= delta.unsigned_abs(),
                "Fenwick underflow (idx={i}, cur={}, delta={delta})",
                self.tree[i]
            );
            self.tree[i] = apply_delta(self.tree[i], delta);
            i += lsb(i);
        }
    }

    /// Sum of the first `count` values (clamped to `len`).
    pub(crate) fn prefix_sum(&self, count: usize) -> u64 {
        let mut i = cmp::min(count, self.len());
        let mut sum = 0u64;
        while i > 0 {
            sum = sum.saturating_add(self.tree[i]);
            i &= i - 1;
        }
        sum
    }

    pub(crate) fn total(&self) -> u64 {
        self.total
    }

    /// Returns the largest `k` such that
    /// `prefix_sum(k) + (k - counts.prefix_sum(k)) * fill <= target`.
    ///
    /// `self` holds the stored values and `counts` flags (0/1) which of them are stored; every
    /// other slot weighs `fill`. Both trees must have the same length. Binary descent over the
    /// two trees at once, `O(log n)`.
    pub(crate) fn lower_bound_filled(
        &self,
        counts: &Fenwick,
        fill: u64,
        mut target: u64,
    ) -> usize {
        let n = self.len().min(counts.len());
        let mut idx = 0usize;
        let mut bit = self.max_bit;
        while bit != 0 {
            let next = idx + bit;
            if next <= n {
                // `idx` is a multiple of `2 * bit`, so node `next` covers exactly `bit` slots.
                let filled = (bit as u64).saturating_sub(counts.tree[next]);
                let node = self.tree[next].saturating_add(filled.saturating_mul(fill));
                if node <= target {
                    target -= node;
                    idx = next;
                }
            }
            bit >>= 1;
        }
        idx
    }
}

fn apply_delta(value: u64, delta: i64) -> u64 {
    if delta >= 0 {
        value.saturating_add(delta.unsigned_abs())
    } else {
        value.saturating_sub(delta.unsigned_abs())
    }
}

fn lsb(i: usize) -> usize {
    i & i.wrapping_neg()
}

fn highest_power_of_two_leq(n: usize) -> usize {
    if n == 0 {
        return 0;
    }
    let mut p = 1usize;
    while p <= n / 2 {
        p <<= 1;
    }
    p
}
