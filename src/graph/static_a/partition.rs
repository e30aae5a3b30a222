//! Cliquewise vertex partition: a single clique as block 0, every other
//! vertex as its own singleton block.
//!
//! Ported from the C reference implementation's
//! `cliquewise_vertex_partition`. The original's loop over `cliques`
//! literally iterates `for (int i=0; i<1; i++)` with a comment explaining
//! that, for coloring-enumeration performance, only the single largest
//! clique is ever taken as a block; every remaining vertex is appended as
//! a singleton in ascending order. `cliques` is assumed sorted by
//! descending clique size, so `cliques.row(0)` is a largest clique.

use crate::utils::arena::Arr2dVar;

/// Build the ordered vertex partition driving coloring enumeration: block 0
/// is `cliques`' first (largest) clique, every other vertex follows as a
/// singleton block in ascending order.
pub fn cliquewise_vertex_partition(n: usize, cliques: &Arr2dVar) -> Arr2dVar {
    let mut partition = Arr2dVar::new_empty(n, n);

    if !cliques.is_empty() && cliques.row_size(0) <= n {
        partition.append_row(cliques.row(0));
    }

    let mut used = vec![false; n];
    for row in partition.iter_rows() {
        for &v in row {
            used[v as usize] = true;
        }
    }

    for v in 0..n {
        if !used[v] {
            partition.append_row(&[v as i32]);
        }
    }

    partition
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn k4_partition_is_a_single_clique_block() {
        let mut cliques = Arr2dVar::new_empty(4, 1);
        cliques.append_row(&[0, 1, 2, 3]);
        let partition = cliquewise_vertex_partition(4, &cliques);
        assert_eq!(partition.len(), 1);
        assert_eq!(partition.row(0), &[0, 1, 2, 3]);
    }

    #[test]
    fn smaller_clique_leaves_remaining_vertices_as_singletons() {
        let mut cliques = Arr2dVar::new_empty(2, 1);
        cliques.append_row(&[1, 2]);
        let partition = cliquewise_vertex_partition(4, &cliques);
        assert_eq!(partition.len(), 3);
        assert_eq!(partition.row(0), &[1, 2]);
        assert_eq!(partition.row(1), &[0]);
        assert_eq!(partition.row(2), &[3]);
    }

    #[test]
    fn no_cliques_gives_all_singletons() {
        let cliques = Arr2dVar::new_empty(0, 0);
        let partition = cliquewise_vertex_partition(3, &cliques);
        assert_eq!(partition.len(), 3);
        for i in 0..3 {
            assert_eq!(partition.row(i), &[i as i32]);
        }
    }

    #[test]
    fn clique_larger_than_n_is_ignored() {
        let mut cliques = Arr2dVar::new_empty(5, 1);
        cliques.append_row(&[0, 1, 2, 3, 4]);
        let partition = cliquewise_vertex_partition(3, &cliques);
        assert_eq!(partition.len(), 3);
    }
}
