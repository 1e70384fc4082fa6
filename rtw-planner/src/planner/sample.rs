//! Deterministic stride down-sampling.
//!
//! Used to cap both the number of seed flights and the branching factor of
//! each search step. Stride sampling keeps the relative order of the input
//! and spreads the survivors roughly evenly over it, so the search tree size
//! is bounded and identical from run to run.

use std::num::NonZeroUsize;

/// Thin `items` to at most `k` elements by taking every `len / k`-th item.
///
/// Returns the input unchanged when it already has `k` or fewer items.
/// Otherwise returns the items at `0, stride, 2 * stride, ...` for exactly
/// `k` items, where `stride = len / k`; the tail beyond `stride * k` is
/// never selected.
///
/// # Examples
///
/// ```
/// use std::num::NonZeroUsize;
/// use rtw_planner::planner::down_sample;
///
/// let k = NonZeroUsize::new(3).unwrap();
/// assert_eq!(down_sample(&[0, 1, 2, 3, 4, 5, 6], k), vec![0, 2, 4]);
/// assert_eq!(down_sample(&[0, 1], k), vec![0, 1]);
/// ```
pub fn down_sample<T: Clone>(items: &[T], k: NonZeroUsize) -> Vec<T> {
    let k = k.get();
    if items.len() <= k {
        return items.to_vec();
    }

    let stride = items.len() / k;
    items.iter().step_by(stride).take(k).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn k(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn short_input_unchanged() {
        assert_eq!(down_sample(&[1, 2, 3], k(3)), vec![1, 2, 3]);
        assert_eq!(down_sample(&[1, 2, 3], k(10)), vec![1, 2, 3]);
    }

    #[test]
    fn empty_input() {
        let empty: [u8; 0] = [];
        assert!(down_sample(&empty, k(4)).is_empty());
    }

    #[test]
    fn exact_multiple() {
        let items: Vec<usize> = (0..10).collect();
        assert_eq!(down_sample(&items, k(5)), vec![0, 2, 4, 6, 8]);
    }

    #[test]
    fn remainder_is_truncated() {
        // stride = 11 / 2 = 5, so index 10 is never reached
        let items: Vec<usize> = (0..11).collect();
        assert_eq!(down_sample(&items, k(2)), vec![0, 5]);
    }

    #[test]
    fn k_of_one_takes_first() {
        assert_eq!(down_sample(&["a", "b", "c"], k(1)), vec!["a"]);
    }
}
