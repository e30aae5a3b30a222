//! Continuous-stream fibering checker: feed it graphs one at a time (e.g.
//! geng's output) and it spreads the work across a small fixed pool of
//! queues, each with its own worker thread.
//!
//! Ported from the C reference implementation's `fibering_queue` /
//! `fibering_scheduler` / `queue_run` / `make_scheduler` /
//! `add_to_scheduler` / `scheduler_finish`. The original used a fixed-size
//! ring buffer per queue and a busy-wait scan for a free one;
//! [`crossbeam_channel::bounded`] gives the same bounded-queue-per-worker
//! shape without hand-rolled ring-buffer bookkeeping, so `enqueue` keeps only
//! the round-robin-with-retry scheduling policy, not the buffer itself.

use std::path::Path;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam_channel::{bounded, Sender, TrySendError};
use parking_lot::Mutex;

use crate::error::{FiberingError, Result};
use crate::graph6;
use crate::graph_fiberings;
use crate::utils::arena::{Arr2dFixed, Arr2dVar};
use crate::Graph;

/// How long `enqueue` sleeps between sweeps of the queues when all of them
/// are full. Mirrors `queue_run`'s `delay(3)` poll interval.
const RETRY_DELAY: Duration = Duration::from_millis(3);

struct Job {
    adj: Graph,
    cliques: Arr2dVar,
}

struct QueueStats {
    checked: usize,
    fibering_graphs: Arr2dFixed,
}

/// Totals returned by [`StreamScheduler::finish`].
#[derive(Debug, Clone, Default)]
pub struct StreamResult {
    /// Total graphs checked across every queue.
    pub checked: usize,
    /// How many of those fibered.
    pub fibering: usize,
    /// Adjacency matrices of the fibering graphs, `n` rows each,
    /// concatenated in the order their queues happened to finish them.
    pub fibering_graphs: Arr2dFixed,
}

/// A running pool of fibering-check worker threads, each with its own
/// bounded inbox.
pub struct StreamScheduler {
    n: usize,
    senders: Vec<Sender<Job>>,
    handles: Vec<thread::JoinHandle<QueueStats>>,
    next_queue: usize,
}

impl StreamScheduler {
    /// Spin up `num_queues` worker threads, each able to buffer
    /// `capacity_per_queue` pending graphs, each running `graph_fiberings`
    /// with `threads_per_graph` threads and `single_orbit` set (a stream
    /// only needs to know *whether* a graph fibers). When `results_path` is
    /// given, every fibering graph's graph6 encoding is appended to it
    /// (newline-separated), guarded by a shared mutex the way `queue_run`
    /// guards its `fputs`/`fflush` pair.
    pub fn new(
        n: usize,
        num_queues: usize,
        capacity_per_queue: usize,
        threads_per_graph: usize,
        results_path: Option<&Path>,
    ) -> Result<Self> {
        let num_queues = num_queues.max(1);
        let capacity_per_queue = capacity_per_queue.max(1);

        let results_file = match results_path {
            Some(path) => {
                let file = std::fs::OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .map_err(FiberingError::ResultsFileOpen)?;
                Some(Arc::new(Mutex::new(file)))
            }
            None => None,
        };

        let mut senders = Vec::with_capacity(num_queues);
        let mut handles = Vec::with_capacity(num_queues);

        for q in 0..num_queues {
            let (tx, rx) = bounded::<Job>(capacity_per_queue);
            let results_file = results_file.clone();

            let handle = thread::Builder::new()
                .name(format!("fibering-queue-{q}"))
                .spawn(move || {
                    let mut checked = 0usize;
                    let mut fibering_graphs = Arr2dFixed::new_empty(n, 8);

                    for job in rx {
                        checked += 1;

                        match graph_fiberings(&job.adj, &job.cliques, 0, 0, false, threads_per_graph, true) {
                            Ok(witnesses) if witnesses.fibers() => {
                                fibering_graphs.append_all(job.adj.adj_matrix());

                                if let Some(file) = &results_file {
                                    let line = graph6::encode(&job.adj);
                                    let mut file = file.lock();
                                    use std::io::Write;
                                    let _ = writeln!(file, "{line}");
                                    let _ = file.flush();
                                }
                            }
                            Ok(_) => {}
                            Err(e) => {
                                log::warn!("graph6 stream: fibering check failed: {e}");
                            }
                        }
                    }

                    QueueStats {
                        checked,
                        fibering_graphs,
                    }
                })
                .map_err(|e| FiberingError::ThreadSpawn(e.to_string()))?;

            senders.push(tx);
            handles.push(handle);
        }

        Ok(Self {
            n,
            senders,
            handles,
            next_queue: 0,
        })
    }

    /// Hand one graph off to whichever queue has room first, scanning every
    /// queue round-robin from the one after last time's pick before
    /// sleeping and retrying. Ports `add_to_scheduler`'s free-queue scan.
    pub fn enqueue(&mut self, adj: Graph, cliques: Arr2dVar) -> Result<()> {
        let mut job = Job { adj, cliques };
        let num_queues = self.senders.len();

        loop {
            for offset in 0..num_queues {
                let idx = (self.next_queue + offset) % num_queues;
                match self.senders[idx].try_send(job) {
                    Ok(()) => {
                        self.next_queue = (idx + 1) % num_queues;
                        return Ok(());
                    }
                    Err(TrySendError::Full(returned)) => {
                        job = returned;
                    }
                    Err(TrySendError::Disconnected(_)) => {
                        return Err(FiberingError::Precondition(
                            "scheduler queue's worker thread has already exited".to_string(),
                        ));
                    }
                }
            }
            thread::sleep(RETRY_DELAY);
        }
    }

    /// How many vertices every enqueued graph must have.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Signal every queue that no more graphs are coming, wait for them to
    /// drain and finish, and aggregate their results. Ports
    /// `scheduler_finish`.
    pub fn finish(self) -> Result<StreamResult> {
        drop(self.senders); // disconnects every queue's receiver

        let mut result = StreamResult {
            checked: 0,
            fibering: 0,
            fibering_graphs: Arr2dFixed::new_empty(self.n, 8),
        };

        for handle in self.handles {
            let stats = handle
                .join()
                .map_err(|_| FiberingError::ThreadSpawn("queue worker thread panicked".to_string()))?;
            result.checked += stats.checked;
            result.fibering += stats.fibering_graphs.len() / self.n.max(1);
            result.fibering_graphs.append_all(&stats.fibering_graphs);
        }

        Ok(result)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn cycle4() -> Graph {
        let n = 4;
        let mut m = vec![0; n * n];
        for (a, b) in [(0, 1), (1, 2), (2, 3), (3, 0)] {
            m[a * n + b] = 1;
            m[b * n + a] = 1;
        }
        Graph::new(n, m).unwrap()
    }

    fn path3() -> Graph {
        let n = 3;
        let mut m = vec![0; n * n];
        for (a, b) in [(0, 1), (1, 2)] {
            m[a * n + b] = 1;
            m[b * n + a] = 1;
        }
        Graph::new(n, m).unwrap()
    }

    #[test]
    fn checks_a_single_graph_and_reports_it_fibers() {
        let mut scheduler = StreamScheduler::new(4, 1, 4, 1, None).unwrap();
        let mut cliques = Arr2dVar::new_empty(2, 2);
        cliques.append_row(&[0, 1]);
        cliques.append_row(&[1, 2]);
        scheduler.enqueue(cycle4(), cliques).unwrap();

        let result = scheduler.finish().unwrap();
        assert_eq!(result.checked, 1);
        assert_eq!(result.fibering, 1);
        assert_eq!(result.fibering_graphs.len(), 4);
    }

    #[test]
    fn spreads_a_stream_of_graphs_across_queues() {
        let mut scheduler = StreamScheduler::new(3, 2, 2, 1, None).unwrap();
        for _ in 0..5 {
            let cliques = Arr2dVar::new_empty(1, 1);
            scheduler.enqueue(path3(), cliques).unwrap();
        }
        let result = scheduler.finish().unwrap();
        assert_eq!(result.checked, 5);
    }

    #[test]
    fn writes_fibering_graphs_to_the_results_file() {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("fibering-scheduler-test-{}.txt", std::process::id()));
        let mut scheduler = StreamScheduler::new(4, 1, 4, 1, Some(&path)).unwrap();
        let mut cliques = Arr2dVar::new_empty(2, 2);
        cliques.append_row(&[0, 1]);
        cliques.append_row(&[1, 2]);
        scheduler.enqueue(cycle4(), cliques).unwrap();
        scheduler.finish().unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(!contents.trim().is_empty());
        let _ = std::fs::remove_file(&path);
    }
}
