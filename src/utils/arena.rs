//! Arena buffers: growable row-major 2-D integer containers.
//!
//! Two shapes, matching the C reference implementation's `arr2d_fixed` /
//! `arr2d_var`: a fixed-row-length arena used for anything
//! where every row has the same width (automorphisms, colorings, legal
//! states stored one-per-row), and a variable-row-length arena used for
//! cliques, vertex partitions, and per-coloring orbit-seed lists.
//!
//! Both grow geometrically (ratio ~13/8, `phi_times` in the original) rather
//! than reallocating on every push, so that enumerators which append one row
//! at a time (automorphism search, coloring search) don't pay for it.

fn phi_grow(capacity: usize) -> usize {
    capacity + (capacity >> 1) + (capacity >> 3) + 1
}

/// A 2-D array of `i32`s where every row has the same length.
#[derive(Debug, Clone, Default)]
pub struct Arr2dFixed {
    data: Vec<i32>,
    row_len: usize,
}

impl Arr2dFixed {
    /// Create an empty arena for rows of length `row_len`, pre-reserving
    /// space for `capacity` rows.
    pub fn new_empty(row_len: usize, capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(row_len * capacity),
            row_len,
        }
    }

    /// Wrap a caller-supplied buffer of rows directly.
    pub fn from_rows(row_len: usize, data: Vec<i32>) -> Self {
        debug_assert_eq!(data.len() % row_len.max(1), 0);
        Self { data, row_len }
    }

    pub fn row_len(&self) -> usize {
        self.row_len
    }

    pub fn len(&self) -> usize {
        if self.row_len == 0 {
            0
        } else {
            self.data.len() / self.row_len
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append a single row.
    pub fn append_row(&mut self, row: &[i32]) {
        debug_assert_eq!(row.len(), self.row_len);
        let needed = self.data.len() + self.row_len;
        if needed > self.data.capacity() {
            self.data.reserve(phi_grow(self.data.capacity()) - self.data.len());
        }
        self.data.extend_from_slice(row);
    }

    /// Append every row of `other` (must share `row_len`).
    pub fn append_all(&mut self, other: &Arr2dFixed) {
        debug_assert_eq!(self.row_len, other.row_len);
        let needed = self.data.len() + other.data.len();
        if needed > self.data.capacity() {
            let mut target = self.data.capacity().max(1);
            while target < needed {
                target = phi_grow(target);
            }
            self.data.reserve(target - self.data.len());
        }
        self.data.extend_from_slice(&other.data);
    }

    pub fn row(&self, i: usize) -> &[i32] {
        &self.data[i * self.row_len..(i + 1) * self.row_len]
    }

    pub fn get(&self, i: usize, j: usize) -> i32 {
        self.data[i * self.row_len + j]
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[i32]> {
        self.data.chunks(self.row_len)
    }

    pub fn into_data(self) -> Vec<i32> {
        self.data
    }
}

/// A 2-D array of `i32`s whose rows may have differing lengths, stored as
/// one contiguous data buffer plus cumulative end indices (so that row `i`
/// occupies `data[end[i-1]..end[i]]`, with `end[-1] == 0`).
#[derive(Debug, Clone, Default)]
pub struct Arr2dVar {
    data: Vec<i32>,
    end_indices: Vec<usize>,
}

impl Arr2dVar {
    pub fn new_empty(total_capacity: usize, num_rows_capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(total_capacity),
            end_indices: Vec::with_capacity(num_rows_capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.end_indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.end_indices.is_empty()
    }

    pub fn total_len(&self) -> usize {
        self.data.len()
    }

    fn row_start(&self, i: usize) -> usize {
        if i == 0 {
            0
        } else {
            self.end_indices[i - 1]
        }
    }

    pub fn row_size(&self, i: usize) -> usize {
        self.end_indices[i] - self.row_start(i)
    }

    pub fn row(&self, i: usize) -> &[i32] {
        &self.data[self.row_start(i)..self.end_indices[i]]
    }

    pub fn get(&self, i: usize, j: usize) -> i32 {
        self.data[self.row_start(i) + j]
    }

    /// Append a new row.
    pub fn append_row(&mut self, row: &[i32]) {
        self.data.extend_from_slice(row);
        self.end_indices.push(self.data.len());
    }

    /// Append one more value onto the *last* row.
    ///
    /// Precondition: `self.len() > 0`.
    pub fn append_into_last_row(&mut self, val: i32) {
        let last = *self.end_indices.last().expect("append_into_last_row on empty arena");
        self.data.insert(last, val);
        let last_idx = self.end_indices.len() - 1;
        for idx in &mut self.end_indices[last_idx..] {
            *idx += 1;
        }
    }

    pub fn append_all(&mut self, other: &Arr2dVar) {
        let base = self.data.len();
        self.data.extend_from_slice(&other.data);
        self.end_indices
            .extend(other.end_indices.iter().map(|e| e + base));
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[i32]> {
        (0..self.len()).map(move |i| self.row(i))
    }
}
