//! Fenwick tree (binary indexed tree) over slot occupancy counts.
//!
//! Used by the vector codec to place merge-order entries in `O(log n)`:
//! encoding finds the `k`-th free slot, decoding counts occupied slots
//! before a position.

/// Binary indexed tree over `len` slots, each holding a count.
///
/// Indices passed to the public methods are 0-based; internally the tree
/// is stored 1-based.
#[derive(Debug, Clone)]
pub(crate) struct FenwickTree {
    tree: Vec<usize>,
}

impl FenwickTree {
    /// Creates a tree over `len` slots, all counts zero.
    pub fn new_empty(len: usize) -> Self {
        FenwickTree {
            tree: vec![0; len + 1],
        }
    }

    /// Creates a tree over `len` slots, every slot holding count one.
    pub fn new_filled(len: usize) -> Self {
        // With all counts one, node i covers exactly lowbit(i) slots
        let tree = (0..=len).map(|i| i & i.wrapping_neg()).collect();
        FenwickTree { tree }
    }

    /// Returns the number of slots.
    pub fn len(&self) -> usize {
        self.tree.len() - 1
    }

    /// Increments the count of slot `index` by one.
    pub fn increment(&mut self, index: usize) {
        let mut i = index + 1;
        while i < self.tree.len() {
            self.tree[i] += 1;
            i += i & i.wrapping_neg();
        }
    }

    /// Decrements the count of slot `index` by one.
    pub fn decrement(&mut self, index: usize) {
        let mut i = index + 1;
        while i < self.tree.len() {
            debug_assert!(self.tree[i] > 0);
            self.tree[i] -= 1;
            i += i & i.wrapping_neg();
        }
    }

    /// Returns the sum of the counts of slots `0..end`.
    pub fn prefix_count(&self, end: usize) -> usize {
        let mut sum = 0;
        let mut i = end;
        while i > 0 {
            sum += self.tree[i];
            i -= i & i.wrapping_neg();
        }
        sum
    }

    /// Returns the smallest slot index whose inclusive prefix count exceeds `k`,
    /// i.e. the `k`-th (0-based) occupied slot when counts are zero or one.
    ///
    /// Returns `len()` if the total count is at most `k`.
    pub fn find_nth(&self, k: usize) -> usize {
        let len = self.len();
        let mut pos = 0;
        let mut remaining = k + 1;
        let mut step = if len == 0 { 0 } else { 1 << len.ilog2() };

        while step > 0 {
            let next = pos + step;
            if next <= len && self.tree[next] < remaining {
                pos = next;
                remaining -= self.tree[next];
            }
            step >>= 1;
        }

        pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1)]
    #[case(7)]
    #[case(8)]
    #[case(13)]
    fn test_filled_prefix_counts(#[case] len: usize) {
        let fenwick = FenwickTree::new_filled(len);
        for end in 0..=len {
            assert_eq!(fenwick.prefix_count(end), end);
        }
    }

    #[test]
    fn test_find_nth_after_removals() {
        let mut fenwick = FenwickTree::new_filled(6);
        fenwick.decrement(1);
        fenwick.decrement(4);
        // occupied: 0, 2, 3, 5
        assert_eq!(fenwick.find_nth(0), 0);
        assert_eq!(fenwick.find_nth(1), 2);
        assert_eq!(fenwick.find_nth(2), 3);
        assert_eq!(fenwick.find_nth(3), 5);
        assert_eq!(fenwick.find_nth(4), 6);
    }

    #[test]
    fn test_increment_from_empty() {
        let mut fenwick = FenwickTree::new_empty(5);
        fenwick.increment(3);
        fenwick.increment(0);
        assert_eq!(fenwick.prefix_count(0), 0);
        assert_eq!(fenwick.prefix_count(1), 1);
        assert_eq!(fenwick.prefix_count(3), 1);
        assert_eq!(fenwick.prefix_count(4), 2);
        assert_eq!(fenwick.prefix_count(5), 2);
        assert_eq!(fenwick.find_nth(1), 3);
    }
}
