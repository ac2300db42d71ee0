use crate::SizeLedger;

impl SizeLedger {
    /// Maps a list-relative offset to the index whose `[front, behind]` bracket contains it.
    ///
    /// On an exact boundary (`behind[i] == front[i + 1] == offset`) the lower index wins.
    /// Offsets past the end clamp to the last index; an empty ledger yields 0.
    ///
    /// Runs a binary descent over the cumulative sums in `O(log n)`.
    pub fn index_at_offset(&self, offset: u64) -> usize {
        if self.is_empty() || offset == 0 {
            return 0;
        }
        // The largest `k` with `front[k] < offset` is the lowest index whose `behind`
        // reaches `offset`.
        let estimate = u64::from(self.estimate());
        let k = self.sums().lower_bound_filled(self.counts(), estimate, offset - 1);
        k.min(self.last_index())
    }
}
