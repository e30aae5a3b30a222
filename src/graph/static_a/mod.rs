//! Static Algorithms
//!
//! All of the algorithms here assume that complete knowledge of the graph is
//! known and stored in local memory: legal-state enumeration, coloring
//! enumeration/reduction, the color-count bound, the clique partition, and
//! the orbit search all walk the whole adjacency matrix up front rather than
//! streaming over it.

pub mod color_bound;
pub mod coloring;
pub mod legal;
pub mod orbit;
pub mod partition;
