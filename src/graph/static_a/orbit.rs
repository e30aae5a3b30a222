//! Per-coloring orbit search: walk the `(Z/2)^{num_cols}` XOR-action orbit
//! of each legal state under a coloring's color classes, and report the
//! state whenever a whole orbit turns out to be legal.
//!
//! Ported from the C reference implementation's `find_legal_orbits_single`.
//! The group acting is generated by flipping all vertices of a single
//! color at once; `color_masks[c]` is exactly that flip's XOR mask.
//! Walking the whole `2^num_cols`-element group via a single-bit Gray code
//! means each step differs from the last by exactly one color flip, so the
//! whole orbit is produced with one XOR per step instead of recomputing
//! each element from scratch.

use crate::utils::arena::Arr2dFixed;

/// One legal state that generates a fully-legal orbit for some coloring,
/// plus the coloring itself.
#[derive(Debug, Clone)]
pub struct LegalOrbit {
    pub coloring: Vec<i32>,
    /// One representative legal state per legal orbit found for this
    /// coloring (there may be more than one).
    pub states: Vec<u32>,
}

/// `legal` is a dense legal/illegal dictionary over `[0, 2^(n-1))`
/// (indices are already-folded states, matching `all_legal_states`'
/// convention of only storing the half where vertex `n-1` is clear). It is
/// consumed in place: every state visited, whether or not its orbit turns
/// out legal, is cleared out over the course of a single call so the walk
/// never revisits a state's orbit twice. Each coloring needs its own fresh
/// copy of the dictionary (a different coloring's color classes act
/// differently on the same states), so callers searching several colorings
/// must re-clone `legal` before each call; `crate::worker` does this once
/// per coloring.
///
/// `stop` is polled before starting each new orbit walk; set it externally
/// (e.g. once any worker finds an orbit while only a single witness is
/// wanted) to make every worker stop promptly.
pub fn find_legal_orbits_single(
    n: usize,
    coloring: &[i32],
    legal_states: &Arr2dFixed,
    legal: &mut [bool],
    stop: &std::sync::atomic::AtomicBool,
    stop_after_first: bool,
) -> Option<LegalOrbit> {
    use std::sync::atomic::Ordering;

    let mut color_masks = vec![0u32; n];
    let mut num_cols = 0usize;
    for (i, &c) in coloring.iter().enumerate() {
        color_masks[c as usize] |= 1 << i;
        num_cols = num_cols.max(c as usize + 1);
    }

    let max_states = 1u32 << (n - 1);
    let orbit_size = 1usize << num_cols;
    let half_orbit_size = orbit_size >> 1;

    let mut found: Option<LegalOrbit> = None;
    let mut idx = 0usize;
    let mut remaining = legal_states.len();

    while remaining >= half_orbit_size {
        if stop.load(Ordering::Relaxed) {
            break;
        }

        let state = legal_states.row(idx)[0] as u32;
        if !legal[state as usize] {
            idx += 1;
            continue;
        }

        let mut orbit_legal = true;
        let mut acted = state;
        let mut binary = 0u32;

        for c in 0..orbit_size {
            if acted < max_states {
                if legal[acted as usize] {
                    remaining -= 1;
                    legal[acted as usize] = false;
                } else {
                    orbit_legal = false;
                }
            }

            // Single-bit Gray code: flip color 0's mask on odd steps,
            // otherwise flip whichever color corresponds to the lowest set
            // bit of the running Gray-code counter, then advance it.
            if c & 1 == 0 {
                binary ^= 1;
                acted ^= color_masks[0];
            } else {
                let y = binary & binary.wrapping_neg();
                binary ^= y << 1;
                acted ^= color_masks[(y.trailing_zeros() + 1) as usize];
            }
        }

        if orbit_legal {
            let entry = found.get_or_insert_with(|| LegalOrbit {
                coloring: coloring.to_vec(),
                states: Vec::new(),
            });
            entry.states.push(state);

            if stop_after_first {
                stop.store(true, Ordering::Relaxed);
                break;
            }
        }
    }

    found
}
