//! FILENAME: core/pivot-table/src/traversal.rs
//! Cross-tabulation traversal.
//!
//! `CrossTab` pulls the ordered row and column keys from an aggregation
//! engine once per render pass and resolves cells, row totals, column
//! totals and grand totals against it. Both the grid view and the flat
//! export walk the keys in the order held here, so they always agree.
//!
//! Key order is exactly the engine's order; metric order is exactly the
//! configured order. Nothing is sorted here.

use pivot_data::{AggregationEngine, Aggregator, AttributeName, KeyTuple, MetricSpec};

use crate::error::{Axis, PivotTableError, Result};
use crate::logging::CATEGORY;

/// One render pass worth of keys over an aggregation engine.
#[derive(Debug)]
pub struct CrossTab<'a, E: AggregationEngine> {
    engine: &'a E,
    row_keys: Vec<KeyTuple>,
    col_keys: Vec<KeyTuple>,
}

impl<'a, E: AggregationEngine> CrossTab<'a, E> {
    /// Snapshots the engine's keys and checks them against the attribute lists.
    pub fn new(engine: &'a E) -> Result<Self> {
        let row_keys = engine.row_keys();
        let col_keys = engine.col_keys();

        validate_keys(Axis::Row, &row_keys, engine.row_attrs().len())?;
        validate_keys(Axis::Column, &col_keys, engine.col_attrs().len())?;

        log_debug!(
            CATEGORY,
            "crosstab rows={} cols={} metrics={}",
            row_keys.len(),
            col_keys.len(),
            engine.metrics().len()
        );

        Ok(CrossTab {
            engine,
            row_keys,
            col_keys,
        })
    }

    pub fn engine(&self) -> &'a E {
        self.engine
    }

    pub fn row_attrs(&self) -> &'a [AttributeName] {
        self.engine.row_attrs()
    }

    pub fn col_attrs(&self) -> &'a [AttributeName] {
        self.engine.col_attrs()
    }

    pub fn metrics(&self) -> &'a [MetricSpec] {
        self.engine.metrics()
    }

    pub fn row_keys(&self) -> &[KeyTuple] {
        &self.row_keys
    }

    pub fn col_keys(&self) -> &[KeyTuple] {
        &self.col_keys
    }

    /// Aggregator for one slice. Empty keys select the axis total and a
    /// `None` metric selects the engine's default metric.
    pub fn aggregator(
        &self,
        row_key: &[String],
        col_key: &[String],
        metric: Option<&str>,
    ) -> Result<E::Aggregator> {
        self.engine
            .aggregator(row_key, col_key, metric)
            .ok_or_else(|| {
                log_warn!(
                    CATEGORY,
                    "engine returned no aggregator for row={:?} col={:?} metric={:?}",
                    row_key,
                    col_key,
                    metric
                );
                PivotTableError::MissingAggregator {
                    row_key: row_key.to_vec(),
                    col_key: col_key.to_vec(),
                    metric: metric.map(str::to_string),
                }
            })
    }

    /// Value of one slice.
    pub fn value(
        &self,
        row_key: &[String],
        col_key: &[String],
        metric: Option<&str>,
    ) -> Result<Option<f64>> {
        Ok(self.aggregator(row_key, col_key, metric)?.value())
    }

    /// Total of one row across all columns.
    pub fn row_total(&self, row_key: &[String], metric: Option<&str>) -> Result<E::Aggregator> {
        self.aggregator(row_key, &[], metric)
    }

    /// Total of one column across all rows.
    pub fn col_total(&self, col_key: &[String], metric: Option<&str>) -> Result<E::Aggregator> {
        self.aggregator(&[], col_key, metric)
    }

    /// Total over the whole table.
    pub fn grand_total(&self, metric: Option<&str>) -> Result<E::Aggregator> {
        self.aggregator(&[], &[], metric)
    }

    // ------------------------------------------------------------------------
    // Value sets for heatmap scopes (default metric)
    // ------------------------------------------------------------------------

    /// Every cell value of the table, row-major. Missing values are skipped.
    pub fn all_values(&self) -> Result<Vec<f64>> {
        let mut values = Vec::with_capacity(self.row_keys.len() * self.col_keys.len());
        for row_key in &self.row_keys {
            values.extend(self.row_values(row_key)?);
        }
        Ok(values)
    }

    /// Values of one row across all column keys.
    pub fn row_values(&self, row_key: &[String]) -> Result<Vec<f64>> {
        self.col_keys
            .iter()
            .map(|col_key| self.value(row_key, col_key, None))
            .filter_map(|v| v.transpose())
            .collect()
    }

    /// Values of one column across all row keys.
    pub fn col_values(&self, col_key: &[String]) -> Result<Vec<f64>> {
        self.row_keys
            .iter()
            .map(|row_key| self.value(row_key, col_key, None))
            .filter_map(|v| v.transpose())
            .collect()
    }

    /// Per-row totals, one per row key.
    pub fn row_total_values(&self) -> Result<Vec<f64>> {
        self.row_keys
            .iter()
            .map(|row_key| self.value(row_key, &[], None))
            .filter_map(|v| v.transpose())
            .collect()
    }

    /// Per-column totals, one per column key.
    pub fn col_total_values(&self) -> Result<Vec<f64>> {
        self.col_keys
            .iter()
            .map(|col_key| self.value(&[], col_key, None))
            .filter_map(|v| v.transpose())
            .collect()
    }
}

fn validate_keys(axis: Axis, keys: &[KeyTuple], expected: usize) -> Result<()> {
    match keys.iter().find(|k| k.len() != expected) {
        Some(key) => {
            log_warn!(
                CATEGORY,
                "{} key {:?} has {} labels, expected {}",
                axis,
                key,
                key.len(),
                expected
            );
            Err(PivotTableError::KeyLengthMismatch {
                axis,
                key: key.to_vec(),
                expected,
                actual: key.len(),
            })
        }
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pivot_data::{key_tuple, AggregationType, MemoryPivotData};

    fn sales() -> MemoryPivotData {
        let mut data = MemoryPivotData::new(&["A"], &["B"]);
        data.add_metric(MetricSpec::new("Sales", "sum"), AggregationType::Sum);
        for (a, b, v) in [("a1", "b1", 3.0), ("a1", "b2", 5.0), ("a2", "b1", 2.0), ("a2", "b2", 4.0)] {
            data.add_record(&[a], &[b], "Sales", v).unwrap();
        }
        data
    }

    #[test]
    fn test_totals_agree_across_axes() {
        let data = sales();
        let tab = CrossTab::new(&data).unwrap();

        let grand = tab.grand_total(Some("Sales")).unwrap().value().unwrap();
        let row_sum: f64 = tab.row_total_values().unwrap().iter().sum();
        let col_sum: f64 = tab.col_total_values().unwrap().iter().sum();

        assert_eq!(grand, 14.0);
        assert_eq!(tab.row_total_values().unwrap(), vec![8.0, 6.0]);
        assert_eq!(tab.col_total_values().unwrap(), vec![5.0, 9.0]);
        assert_eq!(row_sum, grand);
        assert_eq!(col_sum, grand);
    }

    #[test]
    fn test_scope_values() {
        let data = sales();
        let tab = CrossTab::new(&data).unwrap();

        assert_eq!(tab.all_values().unwrap(), vec![3.0, 5.0, 2.0, 4.0]);
        assert_eq!(tab.row_values(&key_tuple(["a2"])).unwrap(), vec![2.0, 4.0]);
        assert_eq!(tab.col_values(&key_tuple(["b2"])).unwrap(), vec![5.0, 4.0]);
    }

    #[test]
    fn test_missing_aggregator_is_an_error() {
        let data = sales();
        let tab = CrossTab::new(&data).unwrap();

        let err = tab.aggregator(&key_tuple(["a9"]), &[], None).unwrap_err();
        assert!(matches!(err, PivotTableError::MissingAggregator { .. }));
    }

    #[test]
    fn test_keys_follow_engine_order() {
        let mut data = MemoryPivotData::new(&["Region"], &[]);
        data.add_metric(MetricSpec::new("Count", "sum"), AggregationType::Sum);
        for region in ["West", "East", "North"] {
            data.add_record(&[region], &[], "Count", 1.0).unwrap();
        }
        let tab = CrossTab::new(&data).unwrap();

        assert_eq!(tab.row_keys(), data.row_keys().as_slice());
        assert!(tab.col_keys().is_empty());
    }
}
