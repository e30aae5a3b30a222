//! Upper bound on the number of colors, derived from clique distribution
//! over legal states.
//!
//! Ported from the C reference implementation's `num_colors_upper_bound`.
//! Assumes `legal_states` holds only the non-redundant half (top bit of
//! each state clear), per the design note on this function's known
//! degeneracy (see DESIGN.md).

use crate::utils::arena::Arr2dFixed;

fn log2_floor(a: usize) -> i32 {
    if a == 0 {
        return -1;
    }
    (usize::BITS - 1 - a.leading_zeros()) as i32
}

/// Derive an upper bound on `k` from the number of legal states and the
/// bit-pattern distribution of each clique over them.
///
/// `cliques` is a variable-row array, one row per clique, each an ordered
/// list of vertex indices (size >= 2). `legal_states` holds one legal state
/// per row (the non-redundant half, top bit clear).
pub fn num_colors_upper_bound(
    cliques: &crate::utils::arena::Arr2dVar,
    legal_states: &Arr2dFixed,
) -> i32 {
    let mut upper_bound = log2_floor(legal_states.len()) + 1;

    for clique_idx in 0..cliques.len() {
        let clique = cliques.row(clique_idx);
        let size = clique.len();
        let max = 1usize << (size - 1);
        let mut counts = vec![0usize; max];

        for row in legal_states.iter_rows() {
            let state = row[0] as u32;
            let mut bits = 0usize;
            for (b, &v) in clique.iter().enumerate() {
                if (state >> (v as usize)) & 1 == 1 {
                    bits += 1 << b;
                }
            }
            if bits >= max {
                bits = 2 * max - bits - 1;
            }
            counts[bits] += 1;
        }

        let min = counts.iter().copied().min().unwrap_or(legal_states.len());
        upper_bound = upper_bound.min(log2_floor(min << size));
    }

    upper_bound
}
