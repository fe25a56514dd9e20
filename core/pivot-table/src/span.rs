//! FILENAME: core/pivot-table/src/span.rs
//! Label merging for row and column headers.
//!
//! A label matrix holds one key tuple per row (or column) of the table,
//! grouped so that identical prefixes are contiguous. The cell at
//! (i, j) is merged into the cell above it when rows i-1 and i agree on
//! every label in 0..=j; otherwise it renders and spans every following
//! row that agrees with it on that same prefix.

use serde::{Deserialize, Serialize};

/// Rendering decision for one label cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpanResult {
    /// Covered by a merged cell above (or to the left); render nothing.
    Suppress,
    /// Render, covering this many consecutive rows (always >= 1).
    Span(usize),
}

impl SpanResult {
    /// The span, or `None` for a suppressed cell.
    pub fn span(&self) -> Option<usize> {
        match self {
            SpanResult::Suppress => None,
            SpanResult::Span(n) => Some(*n),
        }
    }

    pub fn is_suppressed(&self) -> bool {
        matches!(self, SpanResult::Suppress)
    }
}

/// True when both tuples agree on every position in 0..=j.
fn same_prefix<T: PartialEq>(a: &[T], b: &[T], j: usize) -> bool {
    a.get(..=j) == b.get(..=j)
}

/// Computes the span decision for the label at row `i`, column `j`.
/// A row index past the end of the matrix has nothing to render and is
/// suppressed.
pub fn compute_span<R, T>(matrix: &[R], i: usize, j: usize) -> SpanResult
where
    R: AsRef<[T]>,
    T: PartialEq,
{
    let current = match matrix.get(i) {
        Some(row) => row.as_ref(),
        None => return SpanResult::Suppress,
    };

    if i > 0 && same_prefix(matrix[i - 1].as_ref(), current, j) {
        return SpanResult::Suppress;
    }

    let len = matrix[i..]
        .iter()
        .take_while(|row| same_prefix(current, row.as_ref(), j))
        .count();
    SpanResult::Span(len)
}

/// Computes span decisions for every cell, indexed `[row][col]`.
///
/// Works column by column from run boundaries instead of rescanning each
/// prefix, and yields exactly what [`compute_span`] yields per cell.
pub fn span_matrix<R, T>(matrix: &[R]) -> Vec<Vec<SpanResult>>
where
    R: AsRef<[T]>,
    T: PartialEq,
{
    let rows = matrix.len();
    let width = matrix.first().map_or(0, |r| r.as_ref().len());
    let mut result = vec![vec![SpanResult::Suppress; width]; rows];

    // boundary[i]: row i starts a new run for the prefix 0..=j
    let mut boundary = vec![false; rows];
    for j in 0..width {
        for i in 0..rows {
            boundary[i] = i == 0
                || boundary[i]
                || matrix[i - 1].as_ref().get(j) != matrix[i].as_ref().get(j);
        }

        let mut start = 0;
        while start < rows {
            let mut end = start + 1;
            while end < rows && !boundary[end] {
                end += 1;
            }
            result[start][j] = SpanResult::Span(end - start);
            start = end;
        }
    }

    result
}
