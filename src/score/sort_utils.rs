use std::cmp::Ordering;

/// Standard competition ranks (1, 1, 3) for items already sorted best first.
///
/// An item shares the previous item's rank when `same_score` says their keys are equal.
#[must_use]
pub fn competition_ranks<T>(sorted: &[T], same_score: impl Fn(&T, &T) -> bool) -> Vec<u32> {
    let mut ranks = Vec::with_capacity(sorted.len());
    let mut rank = 1;
    for (i, item) in sorted.iter().enumerate() {
        if i > 0 && !same_score(&sorted[i - 1], item) {
            rank = i as u32 + 1;
        }
        ranks.push(rank);
    }
    ranks
}

/// Higher points first, then more holes completed.
#[must_use]
pub fn points_then_holes(a: (f64, u32), b: (f64, u32)) -> Ordering {
    b.0.total_cmp(&a.0).then_with(|| b.1.cmp(&a.1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ties_skip_following_rank() {
        let scores = [36, 34, 34, 30, 30, 30, 12];
        let ranks = competition_ranks(&scores, |a, b| a == b);
        assert_eq!(ranks, vec![1, 2, 2, 4, 4, 4, 7]);
    }

    #[test]
    fn empty_input_has_no_ranks() {
        let scores: [i32; 0] = [];
        assert!(competition_ranks(&scores, |a, b| a == b).is_empty());
    }
}
