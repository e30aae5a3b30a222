//! Combinatorial search engine for legal orbits ("graph fiberings") over
//! vertex colorings of small graphs.
//!
//! The public entry point is [`graph_fiberings`], which, given a graph and
//! a list of its cliques, searches colorings with between `min_cols` and
//! `max_cols` colors for one whose color classes generate a fully-legal
//! orbit under the `(Z/2)^{num_cols}` flip action on legal states. Every
//! other module in this crate (`graph::static_a::*`, `worker`) exists to
//! make that search tractable: automorphism-reduced legal-state
//! enumeration, a clique-anchored coloring enumerator that never produces
//! color-equivalent duplicates, a canonical-form reducer that folds out
//! graph automorphisms, and a Gray-code orbit walk, run across a pool of
//! worker threads.
//!
//! Ported from the C reference implementation's `graph_fiberings` entry
//! point. `scheduler` additionally ports its continuous-stream variant for
//! checking many graphs (e.g. the output of `geng`) against a shared
//! thread pool.

pub mod error;
pub mod graph;
pub mod graph6;
pub mod scheduler;
pub mod utils;
pub mod worker;

pub use error::{FiberingError, Result};
pub use graph::Graph;

use graph::automorphism::automorphisms;
use graph::static_a::color_bound::num_colors_upper_bound;
use graph::static_a::coloring::{find_all_colorings, reduce_colorings};
use graph::static_a::legal::all_legal_states;
use graph::static_a::partition::cliquewise_vertex_partition;
use utils::arena::{Arr2dFixed, Arr2dVar};
use worker::OrbitSearch;

/// The colorings (and, for each, the legal states witnessing it) found to
/// have a legal orbit.
#[derive(Debug, Clone, Default)]
pub struct WitnessSet {
    /// One row per coloring with at least one legal orbit.
    pub colorings: Arr2dFixed,
    /// One row per entry in `colorings`, holding every legal-orbit
    /// representative state found for that coloring.
    pub states: Arr2dVar,
    /// Set when the search was cut short by `single_orbit` rather than
    /// having exhausted the whole `[min_cols, max_cols]` range. Per spec.md
    /// §7, an empty or partial-looking result must still let the caller
    /// tell "there's nothing more to find" apart from "we stopped early."
    pub truncated: bool,
}

impl WitnessSet {
    fn empty(n: usize) -> Self {
        Self {
            colorings: Arr2dFixed::new_empty(n, 10),
            states: Arr2dVar::new_empty(20, 10),
            truncated: false,
        }
    }

    /// Whether any witness was found: the graph "fibers".
    pub fn fibers(&self) -> bool {
        !self.colorings.is_empty()
    }
}

/// Search for legal orbits ("graph fiberings") of `adj` over colorings with
/// between `min_cols` and `max_cols` colors.
///
/// `min_cols = 0` lets the search start from the cheap chromatic-lower
/// estimate (the size of the largest supplied clique); `max_cols = 0` lets
/// it run up to the computed upper bound (see
/// [`graph::static_a::color_bound::num_colors_upper_bound`] for a caveat on
/// graphs whose only clique spans every vertex). `cliques` must be sorted
/// by descending size. When `single_orbit` is set, the search stops at the
/// first witness found, across every thread.
pub fn graph_fiberings(
    adj: &Graph,
    cliques: &Arr2dVar,
    min_cols: usize,
    max_cols: usize,
    verbose: bool,
    num_threads: usize,
    single_orbit: bool,
) -> Result<WitnessSet> {
    let n = adj.n();
    let begin = std::time::Instant::now();

    let isos = automorphisms(adj);
    let legal_states = all_legal_states(adj, &isos);
    let partitions = cliquewise_vertex_partition(n, cliques);

    if partitions.is_empty() {
        return Err(FiberingError::Precondition(
            "cliquewise_vertex_partition produced no blocks for a non-empty graph".to_string(),
        ));
    }

    let cmin = (partitions.row_size(0)).max(min_cols);
    let mut cmax = num_colors_upper_bound(cliques, &legal_states);
    if max_cols > 0 {
        cmax = cmax.min(max_cols as i32);
    }

    if verbose {
        log::info!(
            "{} legal states, {} isos; #colors <= {} (prep took {:?})",
            legal_states.len(),
            isos.len(),
            cmax,
            begin.elapsed()
        );
    }

    let mut all_orbits = WitnessSet::empty(n);

    if cmax < cmin as i32 {
        return Ok(all_orbits);
    }

    for c in cmin..=(cmax as usize) {
        let round_begin = std::time::Instant::now();
        if verbose {
            log::info!("testing {} colors...", c);
        }

        let cols = find_all_colorings(adj, c, &partitions);
        let reduced = reduce_colorings(n, c, &cols, &isos);

        if reduced.is_empty() {
            continue;
        }

        if verbose {
            log::info!("testing {} {}-colorings", reduced.len(), c);
        }

        let search = OrbitSearch::start(n, &reduced, &legal_states, num_threads, single_orbit)?;
        let orbits = search.finish()?;
        let found_orbit = !orbits.is_empty();

        for orbit in &orbits {
            all_orbits.colorings.append_row(&orbit.coloring);
            all_orbits.states.append_row(
                &orbit.states.iter().map(|&s| s as i32).collect::<Vec<_>>(),
            );
        }

        if verbose {
            log::info!(
                "{}: {} (took {:?})",
                c,
                if found_orbit { "found orbit(s)" } else { "no orbit found" },
                round_begin.elapsed()
            );
        }

        if found_orbit && single_orbit {
            all_orbits.truncated = true;
            break;
        }
    }

    Ok(all_orbits)
}
