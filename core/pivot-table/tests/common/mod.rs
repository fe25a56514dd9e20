//! FILENAME: tests/common/mod.rs
//! Test harness and fixtures for pivot table renderer integration tests.

#![allow(dead_code)]

use pivot_data::{
    key_tuple, AggregationEngine, AggregationType, Aggregator, AttributeName, KeyTuple,
    MemoryPivotData, MetricSpec,
};
use pivot_table::{CellType, TableView};

// ============================================================================
// FIXTURES
// ============================================================================

/// Region x Year counts:
///
/// ```text
///          2020  2021  Totals
/// West        3     5       8
/// East        2             2
/// Totals      5     5      10
/// ```
pub fn region_by_year() -> MemoryPivotData {
    let mut data = MemoryPivotData::new(&["Region"], &["Year"]);
    data.add_metric(MetricSpec::new("Count", "sum"), AggregationType::Sum);
    data.add_record(&["West"], &["2020"], "Count", 3.0).unwrap();
    data.add_record(&["West"], &["2021"], "Count", 5.0).unwrap();
    data.add_record(&["East"], &["2020"], "Count", 2.0).unwrap();
    data
}

/// Sales data for multi-level pivot tests.
pub struct SalesFixture;

impl SalesFixture {
    pub fn data() -> Vec<(&'static str, &'static str, &'static str, f64, f64)> {
        vec![
            ("North", "Widget", "Q1", 10000.0, 100.0),
            ("North", "Widget", "Q2", 12000.0, 120.0),
            ("North", "Gadget", "Q1", 8000.0, 80.0),
            ("North", "Gadget", "Q2", 9000.0, 90.0),
            ("South", "Widget", "Q1", 15000.0, 150.0),
            ("South", "Widget", "Q2", 14000.0, 140.0),
            ("South", "Gadget", "Q1", 11000.0, 110.0),
            ("South", "Gadget", "Q2", 13000.0, 130.0),
            ("East", "Widget", "Q1", 9000.0, 90.0),
            ("East", "Widget", "Q2", 11000.0, 110.0),
            ("East", "Gadget", "Q1", 7000.0, 70.0),
            ("East", "Gadget", "Q2", 8500.0, 85.0),
        ]
    }

    /// Region, Product on rows; Quarter on columns; Sales and Quantity sums.
    pub fn engine() -> MemoryPivotData {
        let mut data = MemoryPivotData::new(&["Region", "Product"], &["Quarter"]);
        data.add_metric(MetricSpec::new("Sales", "sum"), AggregationType::Sum);
        data.add_metric(MetricSpec::new("Quantity", "sum"), AggregationType::Sum);
        for (region, product, quarter, sales, quantity) in Self::data() {
            data.add_record(&[region, product], &[quarter], "Sales", sales).unwrap();
            data.add_record(&[region, product], &[quarter], "Quantity", quantity).unwrap();
        }
        data
    }
}

// ============================================================================
// FAULTY ENGINE
// ============================================================================

/// How [`FaultyEngine`] misbehaves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Fault {
    /// Hands out a row key with too few labels.
    ShortRowKey,
    /// Refuses to produce aggregators for totals.
    NoTotals,
}

/// Engine returning a fixed value for every cell, with one fault injected.
pub struct FaultyEngine {
    fault: Fault,
    rows: Vec<AttributeName>,
    cols: Vec<AttributeName>,
    metrics: Vec<MetricSpec>,
}

impl FaultyEngine {
    pub fn new(fault: Fault) -> Self {
        FaultyEngine {
            fault,
            rows: vec!["Region".to_string(), "City".to_string()],
            cols: vec!["Year".to_string()],
            metrics: vec![MetricSpec::new("Count", "sum")],
        }
    }
}

pub struct FixedAggregator(pub Option<f64>);

impl Aggregator for FixedAggregator {
    fn value(&self) -> Option<f64> {
        self.0
    }

    fn format(&self, value: Option<f64>) -> String {
        value.map(|v| v.to_string()).unwrap_or_default()
    }
}

impl AggregationEngine for FaultyEngine {
    type Aggregator = FixedAggregator;

    fn row_attrs(&self) -> &[AttributeName] {
        &self.rows
    }

    fn col_attrs(&self) -> &[AttributeName] {
        &self.cols
    }

    fn metrics(&self) -> &[MetricSpec] {
        &self.metrics
    }

    fn row_keys(&self) -> Vec<KeyTuple> {
        match self.fault {
            Fault::ShortRowKey => vec![key_tuple(["West", "LA"]), key_tuple(["East"])],
            Fault::NoTotals => vec![key_tuple(["West", "LA"])],
        }
    }

    fn col_keys(&self) -> Vec<KeyTuple> {
        vec![key_tuple(["2020"])]
    }

    fn aggregator(
        &self,
        row_key: &[String],
        col_key: &[String],
        _metric: Option<&str>,
    ) -> Option<FixedAggregator> {
        if self.fault == Fault::NoTotals && (row_key.is_empty() || col_key.is_empty()) {
            return None;
        }
        Some(FixedAggregator(Some(1.0)))
    }
}

// ============================================================================
// ASSERTION HELPERS
// ============================================================================

/// Assert that a view cell has the expected text.
pub fn assert_cell_text(view: &TableView, row: usize, col: usize, expected: &str) {
    match view.get_cell(row, col) {
        Some(cell) => assert_eq!(
            cell.text, expected,
            "Cell ({}, {}) expected '{}', got '{}'",
            row, col, expected, cell.text
        ),
        None => panic!("Cell ({}, {}) does not exist", row, col),
    }
}

/// Texts of every cell of one type, in row order.
pub fn texts_of(view: &TableView, cell_type: CellType) -> Vec<String> {
    view.cells_of_type(cell_type).map(|c| c.text.clone()).collect()
}

/// Visual width of every row, accounting for cells covered by row spans
/// from earlier rows.
pub fn row_widths(view: &TableView) -> Vec<usize> {
    let rows: Vec<_> = view.rows().collect();
    let mut carried = vec![0usize; rows.len()];
    let mut widths = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let own: usize = row.iter().map(|c| c.col_span).sum();
        widths.push(own + carried[i]);
        for cell in row.iter() {
            for covered in carried.iter_mut().skip(i + 1).take(cell.row_span.saturating_sub(1)) {
                *covered += cell.col_span;
            }
        }
    }
    widths
}
