//! Thread pool running the orbit search over a batch of colorings.
//!
//! Ported from the C reference implementation's `find_legal_orbits`,
//! `orbit_thread_enter`, `calc_update` and `calc_finish`: colorings are
//! split into contiguous index ranges, one per worker thread; each worker
//! walks its range, giving every coloring its own fresh clone of the
//! shared legal-state dictionary before searching its orbit (an orbit walk
//! consumes the dictionary it's given, see
//! `crate::graph::static_a::orbit::find_legal_orbits_single`). A shared
//! atomic `stop` flag lets `single_orbit` mode cut every other worker short
//! the moment one of them finds a witness; a shared atomic counter per
//! worker lets the caller poll progress without blocking.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use crate::error::{FiberingError, Result};
use crate::graph::static_a::orbit::{find_legal_orbits_single, LegalOrbit};
use crate::utils::arena::Arr2dFixed;

/// A still-running (or just-finished) orbit search, threaded across
/// `num_threads` workers.
pub struct OrbitSearch {
    num_threads: usize,
    num_colorings: usize,
    stop: Arc<AtomicBool>,
    num_done: Vec<Arc<AtomicUsize>>,
    begin: Instant,
    handles: Vec<thread::JoinHandle<Vec<LegalOrbit>>>,
}

/// A progress snapshot from a running `OrbitSearch`.
#[derive(Debug, Clone, Copy)]
pub struct Progress {
    pub done: usize,
    pub total: usize,
    pub fraction: f64,
    pub estimated_remaining_ms: u64,
    pub finished: bool,
}

impl OrbitSearch {
    /// Start the orbit search for every row of `colorings`, split across
    /// `num_threads` worker threads (always at least one). When
    /// `stop_after_first` is set, every worker stops as soon as any of
    /// them reports a legal orbit.
    pub fn start(
        n: usize,
        colorings: &Arr2dFixed,
        legal_states: &Arr2dFixed,
        num_threads: usize,
        stop_after_first: bool,
    ) -> Result<Self> {
        let num_threads = num_threads.max(1);
        let num_colorings = colorings.len();

        let max_states = 1usize << (n - 1);
        let mut legal_dict = vec![false; max_states];
        for row in legal_states.iter_rows() {
            legal_dict[row[0] as usize] = true;
        }
        let legal_dict = Arc::new(legal_dict);

        let stop = Arc::new(AtomicBool::new(false));
        let mut num_done = Vec::with_capacity(num_threads);
        let mut handles = Vec::with_capacity(num_threads);

        for t in 0..num_threads {
            let from = (t * num_colorings) / num_threads;
            let to = ((t + 1) * num_colorings) / num_threads;

            let colorings_chunk: Vec<Vec<i32>> = (from..to).map(|i| colorings.row(i).to_vec()).collect();
            let legal_states = legal_states.clone();
            let legal_dict = Arc::clone(&legal_dict);
            let stop = Arc::clone(&stop);
            let done = Arc::new(AtomicUsize::new(0));
            num_done.push(Arc::clone(&done));

            let handle = thread::Builder::new()
                .name(format!("orbit-worker-{t}"))
                .spawn(move || {
                    let mut out = Vec::new();
                    for coloring in &colorings_chunk {
                        if stop.load(Ordering::Relaxed) {
                            break;
                        }
                        let mut legal_copy = (*legal_dict).clone();
                        if let Some(orbit) = find_legal_orbits_single(
                            n,
                            coloring,
                            &legal_states,
                            &mut legal_copy,
                            &stop,
                            stop_after_first,
                        ) {
                            out.push(orbit);
                        }
                        done.fetch_add(1, Ordering::Relaxed);
                    }
                    out
                })
                .map_err(|e| FiberingError::ThreadSpawn(e.to_string()))?;
            handles.push(handle);
        }

        Ok(Self {
            num_threads,
            num_colorings,
            stop,
            num_done,
            begin: Instant::now(),
            handles,
        })
    }

    /// Non-blocking progress snapshot.
    pub fn progress(&self) -> Progress {
        let done: usize = self.num_done.iter().map(|d| d.load(Ordering::Relaxed)).sum();
        let fraction = if self.num_colorings == 0 {
            1.0
        } else {
            done as f64 / self.num_colorings as f64
        };
        let finished = done == self.num_colorings || self.stop.load(Ordering::Relaxed);

        let elapsed_ms = self.begin.elapsed().as_millis() as u64;
        let estimated_remaining_ms = if fraction > 0.001 {
            ((elapsed_ms as f64) * (1.0 - fraction) / fraction) as u64
        } else {
            0
        };

        Progress {
            done,
            total: self.num_colorings,
            fraction,
            estimated_remaining_ms,
            finished,
        }
    }

    /// Block until every worker finishes and collect the witnesses found.
    pub fn finish(self) -> Result<Vec<LegalOrbit>> {
        let mut result = Vec::new();
        for handle in self.handles {
            let mut orbits = handle
                .join()
                .map_err(|_| FiberingError::ThreadSpawn("worker thread panicked".to_string()))?;
            result.append(&mut orbits);
        }
        Ok(result)
    }

    pub fn num_threads(&self) -> usize {
        self.num_threads
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::graph::automorphism::automorphisms;
    use crate::graph::static_a::legal::all_legal_states;
    use crate::graph::Graph;

    fn cycle4() -> Graph {
        let n = 4;
        let mut m = vec![0; n * n];
        for (a, b) in [(0, 1), (1, 2), (2, 3), (3, 0)] {
            m[a * n + b] = 1;
            m[b * n + a] = 1;
        }
        Graph::new(n, m).unwrap()
    }

    #[test]
    fn finds_the_bipartition_orbit_single_threaded() {
        let g = cycle4();
        let isos = automorphisms(&g);
        let legal_states = all_legal_states(&g, &isos);

        let mut colorings = Arr2dFixed::new_empty(4, 1);
        colorings.append_row(&[0, 1, 0, 1]);

        let search = OrbitSearch::start(g.n(), &colorings, &legal_states, 1, false).unwrap();
        let found = search.finish().unwrap();
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn finds_the_same_orbit_with_multiple_threads() {
        let g = cycle4();
        let isos = automorphisms(&g);
        let legal_states = all_legal_states(&g, &isos);

        let mut colorings = Arr2dFixed::new_empty(4, 3);
        colorings.append_row(&[0, 1, 0, 1]);
        colorings.append_row(&[0, 1, 2, 1]);
        colorings.append_row(&[0, 1, 2, 3]);

        let search = OrbitSearch::start(g.n(), &colorings, &legal_states, 4, false).unwrap();
        let found = search.finish().unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].coloring, vec![0, 1, 0, 1]);
    }

    #[test]
    fn stop_after_first_still_finds_a_witness() {
        let g = cycle4();
        let isos = automorphisms(&g);
        let legal_states = all_legal_states(&g, &isos);

        let mut colorings = Arr2dFixed::new_empty(4, 1);
        colorings.append_row(&[0, 1, 0, 1]);

        let search = OrbitSearch::start(g.n(), &colorings, &legal_states, 2, true).unwrap();
        let found = search.finish().unwrap();
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn progress_reaches_completion() {
        let g = cycle4();
        let isos = automorphisms(&g);
        let legal_states = all_legal_states(&g, &isos);

        let mut colorings = Arr2dFixed::new_empty(4, 1);
        colorings.append_row(&[0, 1, 2, 3]);

        let search = OrbitSearch::start(g.n(), &colorings, &legal_states, 1, false).unwrap();
        let found = search.finish().unwrap();
        assert!(found.is_empty());
    }
}
