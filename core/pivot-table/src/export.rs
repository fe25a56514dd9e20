//! FILENAME: core/pivot-table/src/export.rs
//! Flat text export.
//!
//! Serializes the traversal as tab-separated lines: a header row followed
//! by one line per row key. Spans and colors play no part here.

use pivot_data::{AggregationEngine, Aggregator, KeyTuple};

use crate::definition::{ExportHeaderMode, TableOptions};
use crate::error::Result;
use crate::logging::CATEGORY;
use crate::traversal::CrossTab;

/// Separates cells within a line.
pub const CELL_SEPARATOR: &str = "\t";
/// Separates lines.
pub const LINE_SEPARATOR: &str = "\n";
/// Joins the labels of a column key into one header cell.
pub const KEY_JOINER: &str = "-";

/// Exports the table as tab-separated text.
pub fn export_tsv<E: AggregationEngine>(crosstab: &CrossTab<'_, E>, options: &TableOptions) -> Result<String> {
    log_enter!(CATEGORY, "export_tsv", "mode={:?}", options.export_header);

    let row_attrs = crosstab.row_attrs();
    let metrics = crosstab.metrics();

    // At least one row and one value column, holding totals
    let mut row_keys: Vec<KeyTuple> = crosstab.row_keys().to_vec();
    if row_keys.is_empty() {
        row_keys.push(KeyTuple::new());
    }
    let mut col_keys: Vec<KeyTuple> = crosstab.col_keys().to_vec();
    if col_keys.is_empty() {
        col_keys.push(KeyTuple::new());
    }
    let degenerate_cols = col_keys.len() == 1 && col_keys[0].is_empty();

    let mut header: Vec<String> = row_attrs.to_vec();
    match options.export_header {
        ExportHeaderMode::ColumnKey => {
            if degenerate_cols {
                let label = options
                    .export_metric_label
                    .clone()
                    .or_else(|| metrics.first().map(|m| m.name.clone()))
                    .unwrap_or_default();
                header.push(label);
            } else {
                header.extend(col_keys.iter().map(|c| c.join(KEY_JOINER)));
            }
        }
        ExportHeaderMode::MetricByColumnKey => {
            for col_key in &col_keys {
                for metric in metrics {
                    if col_key.is_empty() {
                        header.push(metric.name.clone());
                    } else {
                        header.push(format!("{} {}", col_key.join(KEY_JOINER), metric.name));
                    }
                }
            }
        }
    }

    let mut lines = vec![header];
    for row_key in &row_keys {
        let mut line: Vec<String> = if row_key.is_empty() {
            vec![String::new(); row_attrs.len()]
        } else {
            row_key.to_vec()
        };

        for col_key in &col_keys {
            match options.export_header {
                ExportHeaderMode::ColumnKey => {
                    let value = crosstab.aggregator(row_key, col_key, None)?.value();
                    line.push(export_value(value));
                }
                ExportHeaderMode::MetricByColumnKey => {
                    for metric in metrics {
                        let value = crosstab.aggregator(row_key, col_key, Some(metric.name.as_str()))?.value();
                        line.push(export_value(value));
                    }
                }
            }
        }
        lines.push(line);
    }

    let text = lines
        .iter()
        .map(|line| line.join(CELL_SEPARATOR))
        .collect::<Vec<_>>()
        .join(LINE_SEPARATOR);

    log_exit!(CATEGORY, "export_tsv", "lines={} bytes={}", lines.len(), text.len());
    Ok(text)
}

/// Raw value text; missing, zero and NaN values export as empty cells.
///
/// A value of exactly 0 is therefore indistinguishable from a missing
/// value in the exported text.
fn export_value(value: Option<f64>) -> String {
    match value {
        Some(v) if v != 0.0 && !v.is_nan() => v.to_string(),
        _ => String::new(),
    }
}

/// Splits exported text back into cells.
pub fn split_tsv(text: &str) -> Vec<Vec<String>> {
    text.split(LINE_SEPARATOR)
        .map(|line| line.split(CELL_SEPARATOR).map(str::to_string).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pivot_data::{AggregationType, MemoryPivotData, MetricSpec};

    fn region_by_year() -> MemoryPivotData {
        let mut data = MemoryPivotData::new(&["Region"], &["Year"]);
        data.add_metric(MetricSpec::new("Count", "sum"), AggregationType::Sum);
        data.add_record(&["West"], &["2020"], "Count", 3.0).unwrap();
        data.add_record(&["West"], &["2021"], "Count", 5.0).unwrap();
        data.add_record(&["East"], &["2020"], "Count", 2.0).unwrap();
        data
    }

    #[test]
    fn test_export_by_column_key() {
        let data = region_by_year();
        let tab = CrossTab::new(&data).unwrap();
        let text = export_tsv(&tab, &TableOptions::default()).unwrap();
        assert_eq!(text, "Region\t2020\t2021\nWest\t3\t5\nEast\t2\t");
    }

    #[test]
    fn test_export_without_columns_uses_metric_name() {
        let mut data = MemoryPivotData::new(&["Region"], &[]);
        data.add_metric(MetricSpec::new("Count", "sum"), AggregationType::Sum);
        data.add_record(&["West"], &[], "Count", 8.0).unwrap();
        data.add_record(&["East"], &[], "Count", 2.5).unwrap();

        let tab = CrossTab::new(&data).unwrap();
        let text = export_tsv(&tab, &TableOptions::default()).unwrap();
        assert_eq!(text, "Region\tCount\nWest\t8\nEast\t2.5");
    }

    #[test]
    fn test_export_without_rows_emits_grand_total_row() {
        let mut data = MemoryPivotData::new(&[] as &[&str], &[]);
        data.add_metric(MetricSpec::new("Count", "sum"), AggregationType::Sum);
        data.add_record(&[] as &[&str], &[], "Count", 4.0).unwrap();
        data.add_record(&[] as &[&str], &[], "Count", 6.0).unwrap();

        let tab = CrossTab::new(&data).unwrap();
        let options = TableOptions {
            export_metric_label: Some("Count (sum)".to_string()),
            ..Default::default()
        };
        let text = export_tsv(&tab, &options).unwrap();
        assert_eq!(text, "Count (sum)\n10");
    }

    #[test]
    fn test_export_metric_by_column_key() {
        let mut data = region_by_year();
        data.add_metric(MetricSpec::new("Max", "max"), AggregationType::Max);
        data.add_record(&["West"], &["2020"], "Max", 7.0).unwrap();

        let tab = CrossTab::new(&data).unwrap();
        let options = TableOptions {
            export_header: ExportHeaderMode::MetricByColumnKey,
            ..Default::default()
        };
        let text = export_tsv(&tab, &options).unwrap();
        let rows = split_tsv(&text);

        assert_eq!(rows[0], vec!["Region", "2020 Count", "2020 Max", "2021 Count", "2021 Max"]);
        assert_eq!(rows[1], vec!["West", "3", "7", "5", ""]);
        assert!(rows.iter().all(|r| r.len() == rows[0].len()));
    }

    #[test]
    fn test_zero_cell_matches_missing_cell() {
        let mut data = MemoryPivotData::new(&[] as &[&str], &["Year"]);
        data.add_metric(MetricSpec::new("Count", "sum"), AggregationType::Sum);
        data.add_record(&[] as &[&str], &["2020"], "Count", 0.0).unwrap();
        data.add_record(&[] as &[&str], &["2021"], "Count", 4.0).unwrap();

        let tab = CrossTab::new(&data).unwrap();
        let text = export_tsv(&tab, &TableOptions::default()).unwrap();
        assert_eq!(text, "2020\t2021\n\t4");
    }

    #[test]
    fn test_zero_exports_as_empty() {
        assert_eq!(export_value(Some(0.0)), "");
        assert_eq!(export_value(None), "");
        assert_eq!(export_value(Some(-1.5)), "-1.5");
    }
}
