//! Graph automorphism enumeration.
//!
//! Depth-first assignment of `pi[0], pi[1], ..., pi[n-1]`: at level `l`, try
//! every candidate vertex not yet used, accept it iff it agrees with every
//! edge already fixed at a lower level. Ported one-for-one from the C
//! reference implementation's `get_isometries(_impl)`; the identity
//! permutation is always generated first since candidates are tried in
//! ascending vertex order starting from level 0.

use crate::graph::Graph;
use crate::utils::arena::Arr2dFixed;

/// Every automorphism of `g`, as rows of an `Arr2dFixed` with row length
/// `g.n()`. The identity is always row 0.
pub fn automorphisms(g: &Graph) -> Arr2dFixed {
    let n = g.n();
    let mut result = Arr2dFixed::new_empty(n, 10);
    let mut current = vec![0i32; n];
    let mut used = vec![false; n];
    search(g, &mut current, &mut used, 0, &mut result);
    result
}

fn search(g: &Graph, current: &mut [i32], used: &mut [bool], level: usize, result: &mut Arr2dFixed) {
    let n = g.n();
    if level == n {
        result.append_row(current);
        return;
    }

    for candidate in 0..n {
        if used[candidate] {
            continue;
        }

        let mut ok = true;
        for j in 0..level {
            let mapped = current[j] as usize;
            if g.has_edge(level, j) != g.has_edge(candidate, mapped) {
                ok = false;
                break;
            }
        }

        if ok {
            current[level] = candidate as i32;
            used[candidate] = true;
            search(g, current, used, level + 1, result);
            used[candidate] = false;
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn complete(n: usize) -> Graph {
        let mut m = vec![1; n * n];
        for i in 0..n {
            m[i * n + i] = 0;
        }
        Graph::new(n, m).unwrap()
    }

    fn cycle4() -> Graph {
        // 0-1, 1-2, 2-3, 3-0
        let n = 4;
        let mut m = vec![0; n * n];
        let edges = [(0, 1), (1, 2), (2, 3), (3, 0)];
        for (a, b) in edges {
            m[a * n + b] = 1;
            m[b * n + a] = 1;
        }
        Graph::new(n, m).unwrap()
    }

    #[test]
    fn identity_is_first_and_present() {
        let g = cycle4();
        let autos = automorphisms(&g);
        assert_eq!(autos.row(0), &[0, 1, 2, 3]);
    }

    #[test]
    fn k4_has_all_24_automorphisms() {
        let g = complete(4);
        let autos = automorphisms(&g);
        assert_eq!(autos.len(), 24);
    }

    #[test]
    fn c4_has_dihedral_group_of_order_8() {
        let g = cycle4();
        let autos = automorphisms(&g);
        assert_eq!(autos.len(), 8);
    }

    #[test]
    fn every_automorphism_preserves_adjacency() {
        let g = cycle4();
        let autos = automorphisms(&g);
        for row in autos.iter_rows() {
            for i in 0..g.n() {
                for j in 0..g.n() {
                    assert_eq!(
                        g.has_edge(i, j),
                        g.has_edge(row[i] as usize, row[j] as usize)
                    );
                }
            }
        }
    }
}
