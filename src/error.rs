//! Error taxonomy for the fibering search engine.
//!
//! Mirrors the taxonomy laid out informally by the original C implementation
//! (precondition violation / allocation failure / thread spawn failure /
//! empty result / stream IO failure), realized as a closed `Result` type
//! instead of `exit(1)`.

use thiserror::Error;

/// Everything that can go wrong while running the fibering search.
///
/// Allocation failure is deliberately not a variant here: like the original,
/// this crate treats it as non-recoverable and lets the Rust allocator abort
/// the process rather than model a recovery path that cannot be exercised.
#[derive(Debug, Error)]
pub enum FiberingError {
    /// A precondition on the input was violated (vertex count out of range,
    /// too many colors requested, a malformed clique, ...).
    #[error("precondition violated: {0}")]
    Precondition(String),

    /// A worker thread could not be spawned, or panicked while running.
    #[error("worker thread failure: {0}")]
    ThreadSpawn(String),

    /// The results file could not be opened when constructing a stream
    /// scheduler. Fatal at construction time, per spec.
    #[error("couldn't open results file: {0}")]
    ResultsFileOpen(#[source] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FiberingError>;
