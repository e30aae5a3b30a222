//! `C(n,k)` choose and ordered-choose generators.
//!
//! Ported from the C reference implementation's `choose`/`ordered_choose`
//! counting functions and `subset_helper`/`permute` generators: every
//! unordered k-subset of `{0..n}` (as a sorted tuple) for `do_choose`, and
//! every ordered k-permutation of `{0..n}` for `do_ordered_choose`. Both are
//! produced in increasing lexicographic order of the chosen index tuple,
//! which the coloring enumerator (`crate::graph::static_a::coloring`) relies
//! on when it splits a block's positions into "newly colored" vs "already
//! colored" index sets.

use itertools::Itertools;

use crate::utils::arena::Arr2dFixed;

/// `n choose k`.
pub fn choose(n: usize, k: usize) -> usize {
    if k == 0 {
        return 1;
    }
    if k > n {
        return 0;
    }
    // n * choose(n-1, k-1) / k, as in the original, but computed iteratively
    // to avoid overflow on recursion depth for the n <= 31 domain this crate
    // targets.
    (n - k + 1..=n).product::<usize>() / (1..=k).product::<usize>()
}

/// `(n choose k) * k!`: the number of ordered k-tuples drawn from `{0..n}`.
pub fn ordered_choose(n: usize, k: usize) -> usize {
    if k == 0 {
        return 1;
    }
    ((n - k + 1)..=n).product()
}

/// Every unordered k-subset of `{0..n}`, each as a sorted row, in increasing
/// lexicographic order.
pub fn do_choose(n: usize, k: usize) -> Arr2dFixed {
    let mut result = Arr2dFixed::new_empty(k, choose(n, k));
    for combo in (0..n).combinations(k) {
        let row: Vec<i32> = combo.into_iter().map(|v| v as i32).collect();
        result.append_row(&row);
    }
    result
}

/// Every ordered k-permutation drawn from `{0..n}`, in the order produced by
/// first choosing the sorted k-subset and then permuting it (matches the
/// original's `subset_helper(...,ordered=true)` -> `permute`).
pub fn do_ordered_choose(n: usize, k: usize) -> Arr2dFixed {
    let mut result = Arr2dFixed::new_empty(k, ordered_choose(n, k));
    for combo in (0..n).combinations(k) {
        for perm in combo.into_iter().permutations(k) {
            let row: Vec<i32> = perm.into_iter().map(|v| v as i32).collect();
            result.append_row(&row);
        }
    }
    result
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn choose_matches_factorial_identity() {
        assert_eq!(choose(5, 0), 1);
        assert_eq!(choose(5, 5), 1);
        assert_eq!(choose(5, 2), 10);
        assert_eq!(choose(6, 3), 20);
    }

    #[test]
    fn ordered_choose_is_choose_times_k_factorial() {
        for n in 0..8 {
            for k in 0..=n {
                let fact_k: usize = (1..=k).product::<usize>().max(1);
                assert_eq!(ordered_choose(n, k), choose(n, k) * fact_k);
            }
        }
    }

    #[test]
    fn do_choose_produces_sorted_rows_in_order() {
        let arr = do_choose(4, 2);
        assert_eq!(arr.len(), 6);
        let rows: Vec<Vec<i32>> = arr.iter_rows().map(|r| r.to_vec()).collect();
        assert_eq!(
            rows,
            vec![
                vec![0, 1],
                vec![0, 2],
                vec![0, 3],
                vec![1, 2],
                vec![1, 3],
                vec![2, 3],
            ]
        );
    }

    #[test]
    fn do_ordered_choose_produces_every_permutation_of_every_subset() {
        let arr = do_ordered_choose(4, 2);
        assert_eq!(arr.len(), 12);
        let rows: std::collections::HashSet<Vec<i32>> =
            arr.iter_rows().map(|r| r.to_vec()).collect();
        for i in 0..4 {
            for j in 0..4 {
                if i != j {
                    assert!(rows.contains(&vec![i, j]));
                }
            }
        }
    }
}
