//! Contains the graph data model used throughout the fibering search.
//!
//! A graph here is always a finite simple undirected graph on `n <= 31`
//! vertices, stored as its `n x n` symmetric 0/1 adjacency matrix in an
//! `Arr2dFixed` (row length `n`), per spec. A bitmask cache of each vertex's
//! neighborhood is kept alongside it, since every algorithm downstream
//! (legal-state connectivity, automorphism checks, forbidden-color
//! bookkeeping) works against bitmasks rather than the raw matrix.

use crate::error::{FiberingError, Result};
use crate::utils::arena::Arr2dFixed;

/// Largest vertex count this crate supports: legal states use `2^(n-1)`
/// as a `u32` bitmask, so `n <= 31` keeps that within 30 bits.
pub const MAX_VERTICES: usize = 31;

/// A finite simple undirected graph on `n` vertices, `n <= MAX_VERTICES`.
#[derive(Debug, Clone)]
pub struct Graph {
    n: usize,
    adj: Arr2dFixed,
    /// `neighbor_bits[v]` has bit `i` set iff `v` and `i` are adjacent.
    neighbor_bits: Vec<u32>,
}

impl Graph {
    /// Build a graph from a symmetric, zero-diagonal `n x n` 0/1 matrix
    /// given in row-major order.
    pub fn new(n: usize, adjacency: Vec<i32>) -> Result<Self> {
        if n == 0 || n > MAX_VERTICES {
            return Err(FiberingError::Precondition(format!(
                "n must be in [1, {}], got {}",
                MAX_VERTICES, n
            )));
        }
        if adjacency.len() != n * n {
            return Err(FiberingError::Precondition(format!(
                "adjacency matrix has {} entries, expected {}",
                adjacency.len(),
                n * n
            )));
        }

        let mut neighbor_bits = vec![0u32; n];
        for i in 0..n {
            for j in 0..n {
                let v = adjacency[i * n + j];
                if v != 0 && v != 1 {
                    return Err(FiberingError::Precondition(format!(
                        "adjacency entry ({}, {}) must be 0 or 1, got {}",
                        i, j, v
                    )));
                }
                if i == j && v != 0 {
                    return Err(FiberingError::Precondition(format!(
                        "adjacency matrix must have a zero diagonal, entry ({}, {}) is set",
                        i, i
                    )));
                }
                if adjacency[i * n + j] != adjacency[j * n + i] {
                    return Err(FiberingError::Precondition(
                        "adjacency matrix must be symmetric".to_string(),
                    ));
                }
                if v == 1 {
                    neighbor_bits[i] |= 1 << j;
                }
            }
        }

        Ok(Self {
            n,
            adj: Arr2dFixed::from_rows(n, adjacency),
            neighbor_bits,
        })
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn has_edge(&self, i: usize, j: usize) -> bool {
        self.adj.get(i, j) != 0
    }

    /// Bitmask of the neighbors of `v`.
    pub fn neighbors(&self, v: usize) -> u32 {
        self.neighbor_bits[v]
    }

    pub fn adj_matrix(&self) -> &Arr2dFixed {
        &self.adj
    }
}

pub mod automorphism;
pub mod static_a;
