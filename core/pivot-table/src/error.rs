//! FILENAME: core/pivot-table/src/error.rs

use std::fmt;

use thiserror::Error;

/// Which side of the cross-tabulation a key belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Row,
    Column,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Row => write!(f, "row"),
            Axis::Column => write!(f, "column"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PivotTableError {
    #[error("{axis} key {key:?} has {actual} labels, expected {expected}")]
    KeyLengthMismatch {
        axis: Axis,
        key: Vec<String>,
        expected: usize,
        actual: usize,
    },

    #[error("no aggregator for row {row_key:?}, column {col_key:?}, metric {metric:?}")]
    MissingAggregator {
        row_key: Vec<String>,
        col_key: Vec<String>,
        metric: Option<String>,
    },

    #[error("Invalid option: {0}")]
    InvalidOption(String),

    #[error("Cell out of range: ({row}, {col})")]
    CellOutOfRange { row: usize, col: usize },
}

pub type Result<T> = std::result::Result<T, PivotTableError>;
