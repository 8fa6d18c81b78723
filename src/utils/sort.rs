use core::cmp::Ordering;

/// Ranking order for `(word, count)` pairs.
/// - count descending
/// - ties broken by word ascending (byte-wise)
#[inline(always)]
pub fn frequency_order<W: AsRef<str>>(a: &(W, u64), b: &(W, u64)) -> Ordering {
    b.1.cmp(&a.1).then_with(|| a.0.as_ref().cmp(b.0.as_ref()))
}

/// Sorts the whole list by [`frequency_order`].
#[inline]
pub fn sort_by_frequency<W: AsRef<str>>(entries: &mut [(W, u64)]) {
    entries.sort_unstable_by(frequency_order);
}

/// Keeps the `k` best entries by [`frequency_order`], sorted.
///
/// Partitions first so only the kept prefix is fully sorted.
/// Complexity: O(n + k log k)
pub fn top_k_by_frequency<W: AsRef<str>>(mut entries: Vec<(W, u64)>, k: usize) -> Vec<(W, u64)> {
    if k == 0 {
        return Vec::new();
    }
    if k < entries.len() {
        entries.select_nth_unstable_by(k - 1, frequency_order);
        entries.truncate(k);
    }
    sort_by_frequency(&mut entries);
    entries
}
