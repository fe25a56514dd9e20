//! FILENAME: core/pivot-data/src/definition.rs
//! Pivot Data Definition - The vocabulary shared by engine and renderer.
//!
//! These structures are designed to be:
//! - Serializable (table configurations are stored and sent as JSON)
//! - Cheap to clone (key tuples are small and usually stack allocated)
//! - Immutable snapshots for the duration of a render pass

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Name of one pivoted dimension (a row or column attribute).
pub type AttributeName = String;

/// Ordered label values identifying one row or column slice.
/// Positions line up with the attribute list of that axis.
/// An empty tuple means "total over that axis".
pub type KeyTuple = SmallVec<[String; 4]>;

/// Builds a key tuple from anything yielding labels.
pub fn key_tuple<I, S>(labels: I) -> KeyTuple
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    labels.into_iter().map(Into::into).collect()
}

// ============================================================================
// AGGREGATION
// ============================================================================

/// Aggregation functions supported by the in-memory engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AggregationType {
    Sum,
    Count,
    Average,
    Min,
    Max,
}

impl Default for AggregationType {
    fn default() -> Self {
        AggregationType::Sum
    }
}

impl AggregationType {
    /// Short identifier used in metric labels ("Count sum").
    pub fn label(&self) -> &'static str {
        match self {
            AggregationType::Sum => "sum",
            AggregationType::Count => "count",
            AggregationType::Average => "average",
            AggregationType::Min => "min",
            AggregationType::Max => "max",
        }
    }
}

/// A value metric shown in the table.
/// `agg` is only used for labeling; the engine decides how to aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MetricSpec {
    /// Display name (e.g., "Sales").
    pub name: String,

    /// Aggregation function identifier (e.g., "sum").
    pub agg: String,
}

impl MetricSpec {
    pub fn new(name: impl Into<String>, agg: impl Into<String>) -> Self {
        MetricSpec {
            name: name.into(),
            agg: agg.into(),
        }
    }

    /// Creates a metric labeled with the identifier of `aggregation`.
    pub fn with_aggregation(name: impl Into<String>, aggregation: AggregationType) -> Self {
        MetricSpec::new(name, aggregation.label())
    }

    /// Label used for per-metric headers: "<name> <agg>".
    pub fn label(&self) -> String {
        format!("{} {}", self.name, self.agg)
    }
}

// ============================================================================
// KEY ORDERING
// ============================================================================

/// Order in which an engine hands out row or column keys.
///
/// Every order keeps keys that share a prefix contiguous, so the label
/// matrix of an axis is always grouped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyOrder {
    /// Groups appear in the order their first record was added.
    FirstSeen,
    /// Labels sorted ascending, numbers compared numerically.
    Ascending,
    /// Labels sorted descending, numbers compared numerically.
    Descending,
}

impl Default for KeyOrder {
    fn default() -> Self {
        KeyOrder::FirstSeen
    }
}

/// Compares two labels, numerically when both parse as numbers.
pub fn compare_labels(a: &str, b: &str) -> Ordering {
    match (a.trim().parse::<f64>(), b.trim().parse::<f64>()) {
        (Ok(na), Ok(nb)) => na.partial_cmp(&nb).unwrap_or(Ordering::Equal),
        // Numbers sort before text
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}
