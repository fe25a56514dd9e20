//! FILENAME: tests/test_export.rs
//! Integration tests for the tab-separated export.

mod common;

use common::{region_by_year, SalesFixture};
use pivot_data::{AggregationType, MemoryPivotData, MetricSpec};
use pivot_table::{split_tsv, ExportHeaderMode, PivotTableRenderer, TableOptions};

#[test]
fn test_region_by_year_export() {
    let data = region_by_year();
    let text = PivotTableRenderer::new(&data, TableOptions::default())
        .export_tsv()
        .unwrap();

    assert_eq!(text, "Region\t2020\t2021\nWest\t3\t5\nEast\t2\t");
}

#[test]
fn test_round_trip_keeps_header_width() {
    let data = SalesFixture::engine();
    for export_header in [ExportHeaderMode::ColumnKey, ExportHeaderMode::MetricByColumnKey] {
        let options = TableOptions {
            export_header,
            ..Default::default()
        };
        let text = PivotTableRenderer::new(&data, options).export_tsv().unwrap();
        let rows = split_tsv(&text);

        assert_eq!(rows.len(), 7);
        assert!(rows.iter().all(|r| r.len() == rows[0].len()), "{:?}", rows);
    }
}

#[test]
fn test_multi_level_export() {
    let data = SalesFixture::engine();
    let text = PivotTableRenderer::new(&data, TableOptions::default())
        .export_tsv()
        .unwrap();
    let rows = split_tsv(&text);

    assert_eq!(rows[0], vec!["Region", "Product", "Q1", "Q2"]);
    assert_eq!(rows[1], vec!["North", "Widget", "10000", "12000"]);
    assert_eq!(rows[6], vec!["East", "Gadget", "7000", "8500"]);
}

#[test]
fn test_metric_by_column_key_header() {
    let data = SalesFixture::engine();
    let options = TableOptions {
        export_header: ExportHeaderMode::MetricByColumnKey,
        ..Default::default()
    };
    let text = PivotTableRenderer::new(&data, options).export_tsv().unwrap();
    let rows = split_tsv(&text);

    assert_eq!(
        rows[0],
        vec!["Region", "Product", "Q1 Sales", "Q1 Quantity", "Q2 Sales", "Q2 Quantity"]
    );
    assert_eq!(rows[3], vec!["South", "Widget", "15000", "150", "14000", "140"]);
}

#[test]
fn test_multi_level_column_keys_are_joined() {
    let mut data = MemoryPivotData::new(&["Region"], &["Year", "Quarter"]);
    data.add_metric(MetricSpec::new("Sales", "sum"), AggregationType::Sum);
    data.add_record(&["West"], &["2020", "Q1"], "Sales", 1.0).unwrap();
    data.add_record(&["West"], &["2020", "Q2"], "Sales", 2.0).unwrap();

    let text = PivotTableRenderer::new(&data, TableOptions::default())
        .export_tsv()
        .unwrap();
    assert_eq!(text, "Region\t2020-Q1\t2020-Q2\nWest\t1\t2");
}

#[test]
fn test_nothing_pivoted_exports_grand_total() {
    let mut data = MemoryPivotData::new(&[] as &[&str], &[]);
    data.add_metric(MetricSpec::new("Sales", "sum"), AggregationType::Sum);
    data.add_record(&[] as &[&str], &[], "Sales", 2.5).unwrap();

    let text = PivotTableRenderer::new(&data, TableOptions::default())
        .export_tsv()
        .unwrap();
    assert_eq!(text, "Sales\n2.5");
}

#[test]
fn test_empty_metrics_export() {
    let data = MemoryPivotData::new(&["Region"], &["Year"]);
    let text = PivotTableRenderer::new(&data, TableOptions::default())
        .export_tsv()
        .unwrap();

    // No keys and no metric: one blank header cell per column
    assert_eq!(split_tsv(&text), vec![vec!["Region", ""], vec!["", ""]]);
}
