//! graph6-style encoding of an adjacency matrix into a compact ASCII string.
//!
//! Ported from the encoder half of the C reference implementation's
//! `graph6_from_adj_matrix`. Decoding is out of scope: callers supply
//! already-decoded adjacency matrices (see the data model notes on graph6
//! input), so only the direction this crate actually needs (producing a
//! graph6 string to log or persist a witness graph) is implemented.

use crate::graph::Graph;

/// Encode `g`'s upper triangle (read column-major within each row-major
/// pair, per the graph6 format) as a graph6 string: one header byte for
/// `n`, then 6 bits of adjacency data per byte, each offset by 63 (`'?'`).
pub fn encode(g: &Graph) -> String {
    let n = g.n();
    let mut bytes = Vec::with_capacity(1 + (n * (n.saturating_sub(1))) / 12 + 1);
    bytes.push((n + 63) as u8);

    let mut curr: u8 = 0;
    let mut idx2 = 0u8;

    for i in 1..n {
        for j in 0..i {
            if g.has_edge(i, j) {
                curr += 1 << (5 - idx2);
            }

            idx2 += 1;
            if idx2 == 6 {
                bytes.push(curr + 63);
                idx2 = 0;
                curr = 0;
            }
        }
    }

    if idx2 > 0 {
        bytes.push(curr + 63);
    }

    String::from_utf8(bytes).expect("graph6 bytes are always printable ASCII")
}
