//! FILENAME: core/pivot-data/src/aggregator.rs
//! The aggregation engine contract.
//!
//! The renderer never groups records itself. It asks an engine for the
//! ordered keys of each axis and for one aggregator per
//! (row key, column key, metric) triple. Empty key tuples stand for
//! "total over that axis"; a `None` metric selects the engine's default.

use crate::definition::{AttributeName, KeyTuple, MetricSpec};

/// Value and display projection bound to one slice of the data.
pub trait Aggregator {
    /// The aggregated value, or `None` when the slice holds no data.
    fn value(&self) -> Option<f64>;

    /// Display text for a value produced by this aggregator.
    fn format(&self, value: Option<f64>) -> String;

    /// Shorthand for `format(value())`.
    fn formatted(&self) -> String {
        self.format(self.value())
    }
}

/// A snapshot of grouped data the renderer can traverse.
///
/// Implementations must hand out keys already grouped so that identical
/// prefixes are contiguous, and every key must have exactly one label per
/// attribute of its axis.
pub trait AggregationEngine {
    type Aggregator: Aggregator;

    /// Ordered row attribute names.
    fn row_attrs(&self) -> &[AttributeName];

    /// Ordered column attribute names.
    fn col_attrs(&self) -> &[AttributeName];

    /// Ordered metrics; the first one is the default metric.
    fn metrics(&self) -> &[MetricSpec];

    /// Ordered row keys.
    fn row_keys(&self) -> Vec<KeyTuple>;

    /// Ordered column keys.
    fn col_keys(&self) -> Vec<KeyTuple>;

    /// Aggregator for one slice, or `None` if the engine cannot provide one.
    fn aggregator(
        &self,
        row_key: &[String],
        col_key: &[String],
        metric: Option<&str>,
    ) -> Option<Self::Aggregator>;
}

impl<A: Aggregator + ?Sized> Aggregator for Box<A> {
    fn value(&self) -> Option<f64> {
        (**self).value()
    }

    fn format(&self, value: Option<f64>) -> String {
        (**self).format(value)
    }
}
