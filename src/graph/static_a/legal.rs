//! Legal states: bitmask subsets whose induced subgraph and complement are
//! each nonempty and connected.
//!
//! Ported from the C reference implementation's naive, per-state legal
//! states routine and its automorphism-reduced variant. Both enumerate
//! states `s` in `[1, 2^(n-1))`, restricting to the half
//! where vertex `n-1` is unset to factor out the `s <-> !s` involution.

use crate::graph::Graph;
use crate::utils::arena::Arr2dFixed;

/// Check whether the induced subgraph on the set bits of `state`, and the
/// induced subgraph on its complement (within `n` bits), are both nonempty
/// and connected.
pub fn is_state_legal(g: &Graph, state: u32) -> bool {
    let n = g.n();
    let mut asc = Vec::with_capacity(n);
    let mut desc = Vec::with_capacity(n);
    for k in 0..n {
        if (state >> k) & 1 == 1 {
            asc.push(k);
        } else {
            desc.push(k);
        }
    }

    if asc.is_empty() || desc.is_empty() {
        return false;
    }

    subgraph_connected(g, &asc) && subgraph_connected(g, &desc)
}

/// BFS connectivity check on the induced subgraph over `vertices`.
fn subgraph_connected(g: &Graph, vertices: &[usize]) -> bool {
    let sub_size = vertices.len();
    let mut visited = vec![false; sub_size];
    let mut queue = std::collections::VecDeque::with_capacity(sub_size);

    visited[0] = true;
    queue.push_back(0usize);

    while let Some(v) = queue.pop_front() {
        let neighbors = g.neighbors(vertices[v]);
        for i in 0..sub_size {
            if !visited[i] && (neighbors >> vertices[i]) & 1 == 1 {
                visited[i] = true;
                queue.push_back(i);
            }
        }
    }

    visited.iter().all(|&v| v)
}

/// Enumerate every legal state independently (no automorphism folding).
/// `O(2^n)` calls to `is_state_legal`; kept as a cross-check reference for
/// the automorphism-reduced mode below.
pub fn all_legal_states_naive(g: &Graph) -> Arr2dFixed {
    let n = g.n();
    let max = 1u32 << (n - 1);
    let mut result = Arr2dFixed::new_empty(1, (max / 2).max(1) as usize);

    for state in 1..max {
        if is_state_legal(g, state) {
            result.append_row(&[state as i32]);
        }
    }

    result
}

/// Enumerate every legal state, deduplicating by the action of `isos` on
/// states: once a state's legality is known, every automorphism image (and
/// its `s <-> !s` fold) is marked in a dense `seen` dictionary so it isn't
/// recomputed. Ported from the C reference implementation's
/// automorphism-reduced `all_legal_states`.
pub fn all_legal_states(g: &Graph, isos: &Arr2dFixed) -> Arr2dFixed {
    let n = g.n();
    let max = 1u32 << (n - 1);
    let mut result = Arr2dFixed::new_empty(1, (max / 2).max(1) as usize);

    // -1 = unknown, 0 = known-illegal, 1 = known-legal.
    let mut dict = vec![-1i8; max as usize];

    for state in 1..max {
        if dict[state as usize] >= 0 {
            continue;
        }

        let legal = is_state_legal(g, state);

        for iso in isos.iter_rows() {
            let mut acted = 0u32;
            for i in 0..n {
                if (state >> i) & 1 == 1 {
                    acted |= 1 << (iso[i] as usize);
                }
            }
            if acted >= max {
                acted = 2 * max - acted - 1;
            }
            if dict[acted as usize] >= 0 {
                continue; // orbit might not be free under a non-dividing orbit size
            }
            dict[acted as usize] = legal as i8;
            if legal {
                result.append_row(&[acted as i32]);
            }
        }
    }

    result
}

/// Fold a state into its canonical half (`s <-> !s` within `n` bits): the
/// representative with the top (vertex `n-1`) bit clear.
pub fn fold(n: usize, state: u32) -> u32 {
    let max = 1u32 << (n - 1);
    if state < max {
        state
    } else {
        2 * max - state - 1
    }
}
