use rand::Rng;

/// How sample indices are picked from a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionPolicy {
    /// The first `n` rows, in order.
    #[default]
    Sequential,
    /// `n` distinct rows drawn uniformly without replacement.
    Random,
}

/// Pick up to `n` row indices out of `size`.
///
/// The result never holds more than `min(n, size)` entries, and every entry
/// is `< size`. Random draws come back in draw order, not sorted.
pub fn select_indices<R: Rng + ?Sized>(
    size: usize,
    n: usize,
    policy: SelectionPolicy,
    rng: &mut R,
) -> Vec<usize> {
    let count = n.min(size);
    match policy {
        SelectionPolicy::Sequential => (0..count).collect(),
        SelectionPolicy::Random => rand::seq::index::sample(rng, size, count).into_vec(),
    }
}

/// Clamp a requested row index to the last valid row. `None` for an empty
/// dataset.
pub fn clamp_index(size: usize, index: usize) -> Option<usize> {
    size.checked_sub(1).map(|last| index.min(last))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::BTreeSet;

    #[test]
    fn sequential_takes_prefix() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(select_indices(10, 3, SelectionPolicy::Sequential, &mut rng), [0, 1, 2]);
        assert_eq!(
            select_indices(4, 10, SelectionPolicy::Sequential, &mut rng),
            [0, 1, 2, 3]
        );
        assert!(select_indices(0, 3, SelectionPolicy::Sequential, &mut rng).is_empty());
    }

    #[test]
    fn random_draws_distinct_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for size in [1usize, 2, 5, 50] {
            for n in [0usize, 1, 3, 60] {
                let picked = select_indices(size, n, SelectionPolicy::Random, &mut rng);
                assert_eq!(picked.len(), n.min(size));
                assert!(picked.iter().all(|&i| i < size));
                let unique: BTreeSet<_> = picked.iter().collect();
                assert_eq!(unique.len(), picked.len());
            }
        }
    }

    #[test]
    fn random_with_same_seed_repeats() {
        let a = select_indices(100, 5, SelectionPolicy::Random, &mut StdRng::seed_from_u64(42));
        let b = select_indices(100, 5, SelectionPolicy::Random, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn random_on_empty_dataset_is_empty() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(select_indices(0, 3, SelectionPolicy::Random, &mut rng).is_empty());
    }

    #[test]
    fn clamp_index_never_overflows() {
        assert_eq!(clamp_index(5, 0), Some(0));
        assert_eq!(clamp_index(5, 4), Some(4));
        assert_eq!(clamp_index(5, 99), Some(4));
        assert_eq!(clamp_index(1, usize::MAX), Some(0));
        assert_eq!(clamp_index(0, 0), None);
    }
}
