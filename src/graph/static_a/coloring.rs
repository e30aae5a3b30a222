//! Coloring enumeration and reduction.
//!
//! Ported from the C reference implementation's `find_all_colorings(_impl)`
//! and `reduce_colorings`/`make_canonical_form`, plus the
//! `O(|cols|^2 * |isos|)` fallback reducer from its older
//! `kill_permutations_and_isos`/`is_color_permutation_iso`, kept here as a
//! cross-check oracle and as the natural fast path when a graph has no
//! automorphisms beyond the identity.

use crate::graph::Graph;
use crate::utils::arena::{Arr2dFixed, Arr2dVar};
use crate::utils::combinatorics::{do_choose, do_ordered_choose};

/// Every coloring of `g` using exactly `num_cols` colors, anchored so that
/// `partition`'s first block (a clique) is colored `0, 1, ..., |block0|-1`
/// in its stored vertex order. Because that anchor is fixed, the colorings
/// returned are already pairwise non-equivalent under color relabeling
/// alone; `reduce_colorings` still needs to run to fold out graph
/// automorphisms. Precondition: `num_cols <= 32` (colors are tracked as a
/// bitmask when testing adjacency constraints).
pub fn find_all_colorings(g: &Graph, num_cols: usize, partition: &Arr2dVar) -> Arr2dFixed {
    let n = g.n();
    let mut result = Arr2dFixed::new_empty(n, 100);
    let mut current = vec![-1i32; n];
    find_all_colorings_impl(g, num_cols, 0, partition, &mut result, &mut current, 0);
    result
}

fn find_all_colorings_impl(
    g: &Graph,
    num_cols: usize,
    used_cols: usize,
    partition: &Arr2dVar,
    result: &mut Arr2dFixed,
    current: &mut Vec<i32>,
    level: usize,
) {
    let n = g.n();

    if level == partition.len() {
        result.append_row(current);
        return;
    }

    let clique_size = partition.row_size(level);
    let covered: usize = (0..=level).map(|i| partition.row_size(i)).sum();
    let remaining = n - covered;

    if level == 0 {
        if clique_size > num_cols || num_cols > n {
            return;
        }
        for i in 0..clique_size {
            let v = partition.get(0, i) as usize;
            current[v] = i as i32;
        }
        find_all_colorings_impl(g, num_cols, clique_size, partition, result, current, level + 1);
        return;
    }

    // Invariant from here on: clique_size <= used_cols <= num_cols <= n.
    let min_new_cols = (num_cols as isize - used_cols as isize - remaining as isize).max(0) as usize;
    let max_new_cols = clique_size.min(num_cols - used_cols);

    for new_cols in min_new_cols..=max_new_cols {
        // Every way to choose which `new_cols` positions in this block get
        // a brand-new color; the rest keep to already-used colors.
        let combos: Vec<Vec<usize>> = if new_cols == 0 {
            vec![Vec::new()]
        } else {
            do_choose(clique_size, new_cols)
                .iter_rows()
                .map(|r| r.iter().map(|&v| v as usize).collect())
                .collect()
        };

        for combo in &combos {
            for (j, &idx) in combo.iter().enumerate() {
                let v = partition.get(level, idx) as usize;
                current[v] = (used_cols + j) as i32;
            }

            // `combo` is sorted ascending (do_choose's guarantee), so the
            // complement within `0..clique_size` can be read off in one pass.
            let mut remaining_indices = Vec::with_capacity(clique_size - new_cols);
            let mut c1 = 0;
            for i in 0..clique_size {
                if c1 < combo.len() && combo[c1] == i {
                    c1 += 1;
                } else {
                    remaining_indices.push(i);
                }
            }
            let rem_count = remaining_indices.len();

            let mut forbidden = vec![0u32; rem_count];
            for (r, &idx) in remaining_indices.iter().enumerate() {
                let v = partition.get(level, idx) as usize;
                for k in 0..n {
                    if g.has_edge(v, k) && current[k] >= 0 {
                        forbidden[r] |= 1 << current[k];
                    }
                }
            }

            // Distribute the `rem_count` already-used colors among the
            // positions not newly colored.
            let choices: Vec<Vec<i32>> = if rem_count == 0 {
                vec![Vec::new()]
            } else {
                do_ordered_choose(used_cols, rem_count)
                    .iter_rows()
                    .map(|r| r.to_vec())
                    .collect()
            };

            for choice in &choices {
                let valid = (0..rem_count).all(|r| (forbidden[r] >> choice[r]) & 1 == 0);
                if !valid {
                    continue;
                }

                let mut new_col = current.clone();
                for (j, &idx) in remaining_indices.iter().enumerate() {
                    let v = partition.get(level, idx) as usize;
                    new_col[v] = choice[j];
                }

                find_all_colorings_impl(
                    g,
                    num_cols,
                    used_cols + new_cols,
                    partition,
                    result,
                    &mut new_col,
                    level + 1,
                );
            }

            for &idx in combo {
                let v = partition.get(level, idx) as usize;
                current[v] = -1;
            }
        }
    }
}

fn cmp_lexicographic(a: &[i32], b: &[i32]) -> std::cmp::Ordering {
    a.cmp(b)
}

/// Bring `coloring` into the lexicographically-lowest form reachable by
/// composing a graph automorphism with a color relabeling, in place.
///
/// For each automorphism, vertices are visited in the order the
/// automorphism lists them and colors are relabeled on first occurrence
/// ("the next fresh color"), with an early-out the moment the running
/// candidate provably can't beat the current best.
fn make_canonical_form(n: usize, coloring: &mut [i32], num_cols: usize, isos: &Arr2dFixed) {
    let mut best = vec![0i32; n];

    for (i, iso) in isos.iter_rows().enumerate() {
        let mut current_col = 0i32;
        let mut dict = vec![-1i32; num_cols];
        let mut is_better = i == 0;

        for j in 0..n {
            let v = iso[j] as usize;
            let old_col = coloring[v] as usize;
            let mut new_col = dict[old_col];
            if new_col < 0 {
                dict[old_col] = current_col;
                new_col = current_col;
                current_col += 1;
            }

            if !is_better && new_col > best[j] {
                break;
            }
            if !is_better && new_col < best[j] {
                is_better = true;
            }
            if is_better {
                best[j] = new_col;
            }
        }
    }

    coloring.copy_from_slice(&best);
}

/// Reduce `cols` up to color swapping and graph isomorphism.
///
/// When `isos` is trivial (identity only), nothing can be reduced beyond
/// what `find_all_colorings` already guarantees, so the input is returned
/// unchanged. Otherwise every coloring is brought to its canonical form,
/// sorted, and deduplicated.
pub fn reduce_colorings(n: usize, num_colors: usize, cols: &Arr2dFixed, isos: &Arr2dFixed) -> Arr2dFixed {
    if isos.len() <= 1 {
        let mut copy = Arr2dFixed::new_empty(cols.row_len(), cols.len());
        copy.append_all(cols);
        return copy;
    }

    let mut rows: Vec<Vec<i32>> = cols.iter_rows().map(|r| r.to_vec()).collect();
    for row in rows.iter_mut() {
        make_canonical_form(n, row, num_colors, isos);
    }
    rows.sort_by(|a, b| cmp_lexicographic(a, b));

    let mut result = Arr2dFixed::new_empty(n, rows.len());
    let mut last_idx: Option<usize> = None;
    for (i, row) in rows.iter().enumerate() {
        let is_dup = last_idx.is_some_and(|l| cmp_lexicographic(row, &rows[l]).is_eq());
        if !is_dup {
            result.append_row(row);
            last_idx = Some(i);
        }
    }
    result
}

/// Check whether `col2` is some color permutation of `col1` under the
/// automorphism `f`: i.e. whether there's a bijection on colors such that
/// `col2[j] == perm(col1[f[j]])` for every vertex `j`.
fn is_color_permutation_iso(num_cols: usize, col1: &[i32], col2: &[i32], f: &[i32]) -> bool {
    let mut swaps = vec![0i32; num_cols];
    for j in 0..col2.len() {
        let c2 = col2[j] as usize;
        let mapped = col1[f[j] as usize] + 1;
        if swaps[c2] != 0 {
            if swaps[c2] != mapped {
                return false;
            }
        } else {
            swaps[c2] = mapped;
        }
    }
    true
}

/// `O(|cols|^2 * |isos|)` reduction used as a cross-check oracle, and as
/// the natural fast path when a graph's only automorphism is the identity
/// (in which case `reduce_colorings` does no work at all, but the pairwise
/// check is still a useful sanity oracle in tests).
pub fn reduce_colorings_pairwise(num_colors: usize, cols: &Arr2dFixed, isos: &Arr2dFixed) -> Arr2dFixed {
    let mut kept: Vec<&[i32]> = Vec::new();

    'outer: for c in cols.iter_rows() {
        for r in &kept {
            for f in isos.iter_rows() {
                if is_color_permutation_iso(num_colors, c, r, f) {
                    continue 'outer;
                }
            }
        }
        kept.push(c);
    }

    let mut result = Arr2dFixed::new_empty(cols.row_len(), kept.len());
    for row in kept {
        result.append_row(row);
    }
    result
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::graph::automorphism::automorphisms;
    use crate::graph::static_a::partition::cliquewise_vertex_partition;

    fn k4() -> Graph {
        let n = 4;
        let mut m = vec![1; n * n];
        for i in 0..n {
            m[i * n + i] = 0;
        }
        Graph::new(n, m).unwrap()
    }

    fn cycle4() -> Graph {
        let n = 4;
        let mut m = vec![0; n * n];
        for (a, b) in [(0, 1), (1, 2), (2, 3), (3, 0)] {
            m[a * n + b] = 1;
            m[b * n + a] = 1;
        }
        Graph::new(n, m).unwrap()
    }

    fn is_proper(g: &Graph, coloring: &[i32]) -> bool {
        for i in 0..g.n() {
            for j in (i + 1)..g.n() {
                if g.has_edge(i, j) && coloring[i] == coloring[j] {
                    return false;
                }
            }
        }
        true
    }

    #[test]
    fn k4_has_exactly_one_4_coloring() {
        let g = k4();
        let mut cliques = Arr2dVar::new_empty(4, 1);
        cliques.append_row(&[0, 1, 2, 3]);
        let partition = cliquewise_vertex_partition(4, &cliques);
        let cols = find_all_colorings(&g, 4, &partition);
        assert_eq!(cols.len(), 1);
        assert_eq!(cols.row(0), &[0, 1, 2, 3]);
    }

    #[test]
    fn k4_has_no_3_coloring() {
        let g = k4();
        let mut cliques = Arr2dVar::new_empty(4, 1);
        cliques.append_row(&[0, 1, 2, 3]);
        let partition = cliquewise_vertex_partition(4, &cliques);
        let cols = find_all_colorings(&g, 3, &partition);
        assert!(cols.is_empty());
    }

    #[test]
    fn every_found_coloring_is_proper_and_uses_all_colors() {
        let g = cycle4();
        let mut cliques = Arr2dVar::new_empty(2, 1);
        cliques.append_row(&[0, 1]);
        let partition = cliquewise_vertex_partition(4, &cliques);
        for num_cols in 2..=4 {
            let cols = find_all_colorings(&g, num_cols, &partition);
            for row in cols.iter_rows() {
                assert!(is_proper(&g, row));
                let distinct: std::collections::HashSet<i32> = row.iter().copied().collect();
                assert_eq!(distinct.len(), num_cols);
            }
        }
    }

    #[test]
    fn reduce_colorings_agrees_with_pairwise_fallback() {
        let g = cycle4();
        let isos = automorphisms(&g);
        let mut cliques = Arr2dVar::new_empty(2, 1);
        cliques.append_row(&[0, 1]);
        let partition = cliquewise_vertex_partition(4, &cliques);
        let cols = find_all_colorings(&g, 2, &partition);

        let mut a: Vec<Vec<i32>> = reduce_colorings(4, 2, &cols, &isos)
            .iter_rows()
            .map(|r| r.to_vec())
            .collect();
        let mut b: Vec<Vec<i32>> = reduce_colorings_pairwise(2, &cols, &isos)
            .iter_rows()
            .map(|r| r.to_vec())
            .collect();
        a.sort();
        b.sort();
        assert_eq!(a, b);
    }

    #[test]
    fn reduce_colorings_is_idempotent() {
        let g = cycle4();
        let isos = automorphisms(&g);
        let mut cliques = Arr2dVar::new_empty(2, 1);
        cliques.append_row(&[0, 1]);
        let partition = cliquewise_vertex_partition(4, &cliques);
        let cols = find_all_colorings(&g, 3, &partition);
        let once = reduce_colorings(4, 3, &cols, &isos);
        let twice = reduce_colorings(4, 3, &once, &isos);
        assert_eq!(once.len(), twice.len());
    }

    #[test]
    fn trivial_automorphism_group_returns_input_unchanged() {
        let g = cycle4();
        let mut identity_only = Arr2dFixed::new_empty(4, 1);
        identity_only.append_row(&[0, 1, 2, 3]);
        let mut cliques = Arr2dVar::new_empty(2, 1);
        cliques.append_row(&[0, 1]);
        let partition = cliquewise_vertex_partition(4, &cliques);
        let cols = find_all_colorings(&g, 2, &partition);
        let reduced = reduce_colorings(4, 2, &cols, &identity_only);
        assert_eq!(reduced.len(), cols.len());
    }
}
