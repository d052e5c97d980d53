// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Splits the width of an image into vertical bands, one per worker.

use std::ops::Range;

/// A half-open range of columns, `start..end`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PartitionRange {
    /// First column in the band.
    pub start: usize,
    /// One past the last column in the band.
    pub end: usize,
}

impl PartitionRange {
    /// Number of columns in the band.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Describes that the band has no columns.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The band as a standard range, for iterating.
    pub fn columns(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Divide `0..width` into `parts` contiguous bands.  Every band but
/// the last is `width / parts` wide; the last takes the remainder.
///
/// `parts` is clamped to `1..=width`, so no band is ever empty.  A
/// zero width produces no bands at all.
pub fn partition(parts: usize, width: usize) -> Vec<PartitionRange> {
    if width == 0 {
        return vec![];
    }
    let parts = parts.max(1).min(width);
    let base = width / parts;

    let mut ranges = Vec::with_capacity(parts);
    let mut start = 0;
    for part in 1..=parts {
        let end = if part == parts { width } else { part * base };
        ranges.push(PartitionRange { start, end });
        start = end;
    }
    ranges
}
