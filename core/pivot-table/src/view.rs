//! FILENAME: core/pivot-table/src/view.rs
//! Pivot Table View - Renderable output for the frontend.
//!
//! This module assembles the traversal, label spans, heatmap colors and
//! click targets into rows of cells that map one-to-one onto an HTML
//! table. Cells covered by a merged label are simply absent from their row.
//! It includes metadata for:
//! - Row/column spans of merged labels
//! - Cell types (labels, values, totals)
//! - Background colors from the heatmap
//! - Click targets, resolved to filters only when a cell is activated

use serde::{Deserialize, Serialize};

use pivot_data::{AggregationEngine, Aggregator, AttributeName, MetricSpec};

use crate::color::Color;
use crate::error::{PivotTableError, Result};
use crate::filter::{build_filter, key_selector, unconstrained, FilterMap, KeySelector};
use crate::heatmap::CellColors;
use crate::logging::CATEGORY;
use crate::renderer::ClickHandler;
use crate::span::{span_matrix, SpanResult};
use crate::traversal::CrossTab;

/// Extra columns the innermost row label spans so it sits under the
/// column axis label.
const ROW_LABEL_BRIDGE: usize = 1;

// ============================================================================
// CELL TYPES AND METADATA
// ============================================================================

/// The type of a cell in the table view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellType {
    /// Empty corner cell (top-left area).
    Corner,
    /// Attribute name of a row or column axis.
    AxisLabel,
    /// Column key label.
    ColLabel,
    /// "Total ..." and "Totals" labels.
    TotalLabel,
    /// "<metric> <agg>" label above a value column.
    MetricLabel,
    /// Blank cell (for layout purposes).
    Blank,
    /// Row key label.
    RowLabel,
    /// Aggregated value of one (row key, column key, metric).
    Value,
    /// Total of one row across all columns.
    RowTotal,
    /// Total of one column across all rows.
    ColTotal,
    /// Total over the whole table.
    GrandTotal,
}

impl CellType {
    /// Header-like cells render as `<th>`.
    pub fn is_header(&self) -> bool {
        !matches!(
            self,
            CellType::Value | CellType::RowTotal | CellType::ColTotal | CellType::GrandTotal
        )
    }

    pub fn css_class(&self) -> Option<&'static str> {
        match self {
            CellType::AxisLabel => Some("pvtAxisLabel"),
            CellType::ColLabel => Some("pvtColLabel"),
            CellType::TotalLabel => Some("pvtTotalLabel"),
            CellType::RowLabel => Some("pvtRowLabel"),
            CellType::Value => Some("pvtVal"),
            CellType::RowTotal | CellType::ColTotal => Some("pvtTotal"),
            CellType::GrandTotal => Some("pvtGrandTotal"),
            CellType::Corner | CellType::MetricLabel | CellType::Blank => None,
        }
    }
}

/// What a click on a value or total cell refers to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClickTarget {
    /// Raw value of the clicked cell.
    pub value: Option<f64>,
    /// Row labels; `[None]` for cells totaling over all rows.
    pub row_values: KeySelector,
    /// Column labels; `[None]` for cells totaling over all columns.
    pub col_values: KeySelector,
}

impl ClickTarget {
    pub fn new(value: Option<f64>, row_values: KeySelector, col_values: KeySelector) -> Self {
        ClickTarget {
            value,
            row_values,
            col_values,
        }
    }

    /// Filter identifying the clicked slice.
    pub fn filter(&self, row_attrs: &[AttributeName], col_attrs: &[AttributeName]) -> FilterMap {
        build_filter(col_attrs, &self.col_values, row_attrs, &self.row_values)
    }
}

/// Position of an activated cell: index into `TableView::rows()` and into
/// that row's cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellEvent {
    pub row: usize,
    pub col: usize,
}

// ============================================================================
// VIEW CELL
// ============================================================================

/// A single cell in the table view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewCell {
    /// Display text.
    pub text: String,

    /// Raw value for value and total cells.
    pub value: Option<f64>,

    /// The type of this cell.
    pub cell_type: CellType,

    /// Rows covered (merged labels span several).
    pub row_span: usize,

    /// Columns covered.
    pub col_span: usize,

    /// Heatmap background.
    pub color: Option<Color>,

    /// Present when the table is clickable and the cell holds a value.
    pub click: Option<ClickTarget>,
}

impl ViewCell {
    /// Creates a label cell.
    pub fn label(cell_type: CellType, text: impl Into<String>) -> Self {
        ViewCell {
            text: text.into(),
            value: None,
            cell_type,
            row_span: 1,
            col_span: 1,
            color: None,
            click: None,
        }
    }

    pub fn corner() -> Self {
        ViewCell::label(CellType::Corner, String::new())
    }

    pub fn blank() -> Self {
        ViewCell::label(CellType::Blank, String::new())
    }

    /// Creates a value or total cell.
    pub fn data(cell_type: CellType, value: Option<f64>, text: String) -> Self {
        ViewCell {
            text,
            value,
            cell_type,
            row_span: 1,
            col_span: 1,
            color: None,
            click: None,
        }
    }

    pub fn with_span(mut self, row_span: usize, col_span: usize) -> Self {
        self.row_span = row_span;
        self.col_span = col_span;
        self
    }

    pub fn with_color(mut self, color: Option<Color>) -> Self {
        self.color = color;
        self
    }

    pub fn with_click(mut self, click: Option<ClickTarget>) -> Self {
        self.click = click;
        self
    }
}

fn total_label(metric: &MetricSpec) -> ViewCell {
    ViewCell::label(CellType::TotalLabel, format!("Total {}", metric.label()))
}

// ============================================================================
// MAIN VIEW STRUCT
// ============================================================================

/// The complete rendered view of a pivot table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableView {
    /// Row attributes, kept to resolve click filters.
    pub row_attrs: Vec<AttributeName>,

    /// Column attributes, kept to resolve click filters.
    pub col_attrs: Vec<AttributeName>,

    /// Column label rows, then the row attribute row.
    pub header_rows: Vec<Vec<ViewCell>>,

    /// One row per row key, then the totals row.
    pub body_rows: Vec<Vec<ViewCell>>,
}

impl TableView {
    /// Assembles the view of one render pass.
    pub fn build<E, C>(crosstab: &CrossTab<'_, E>, colors: &C, clickable: bool) -> Result<TableView>
    where
        E: AggregationEngine,
        C: CellColors + ?Sized,
    {
        let row_attrs = crosstab.row_attrs();
        let col_attrs = crosstab.col_attrs();
        let metrics = crosstab.metrics();
        let row_keys = crosstab.row_keys();
        let col_keys = crosstab.col_keys();

        let click = |value: Option<f64>, row: KeySelector, col: KeySelector| {
            clickable.then(|| ClickTarget::new(value, row, col))
        };

        // --------------------------------------------------------------------
        // Header
        // --------------------------------------------------------------------

        let col_spans = span_matrix(col_keys);
        let total_label_rows = col_attrs.len() + usize::from(!row_attrs.is_empty());
        let mut header_rows = Vec::new();

        for (j, attr) in col_attrs.iter().enumerate() {
            let mut cells = Vec::new();
            if j == 0 && !row_attrs.is_empty() {
                cells.push(ViewCell::corner().with_span(col_attrs.len(), row_attrs.len()));
            }
            cells.push(ViewCell::label(CellType::AxisLabel, attr.as_str()));
            if !metrics.is_empty() {
                for (i, col_key) in col_keys.iter().enumerate() {
                    if let SpanResult::Span(span) = col_spans[i][j] {
                        cells.push(
                            ViewCell::label(CellType::ColLabel, col_key[j].as_str())
                                .with_span(1, span * metrics.len()),
                        );
                    }
                }
            }
            if j == 0 {
                cells.extend(metrics.iter().map(|m| total_label(m).with_span(total_label_rows, 1)));
            }
            header_rows.push(cells);
        }

        if !row_attrs.is_empty() {
            let mut cells: Vec<ViewCell> = row_attrs
                .iter()
                .map(|attr| ViewCell::label(CellType::AxisLabel, attr.as_str()))
                .collect();
            if col_attrs.is_empty() {
                cells.extend(metrics.iter().map(total_label));
            } else {
                cells.push(ViewCell::blank());
                for _ in col_keys {
                    cells.extend(
                        metrics
                            .iter()
                            .map(|m| ViewCell::label(CellType::MetricLabel, m.label())),
                    );
                }
            }
            header_rows.push(cells);
        } else if col_attrs.is_empty() && !metrics.is_empty() {
            let mut cells = vec![ViewCell::blank()];
            cells.extend(metrics.iter().map(total_label));
            header_rows.push(cells);
        }

        // --------------------------------------------------------------------
        // Body
        // --------------------------------------------------------------------

        let row_spans = span_matrix(row_keys);
        let mut body_rows = Vec::with_capacity(row_keys.len() + 1);

        for (i, row_key) in row_keys.iter().enumerate() {
            let mut cells = Vec::new();

            for (j, label) in row_key.iter().enumerate() {
                if let SpanResult::Span(span) = row_spans[i][j] {
                    let width = if j + 1 == row_attrs.len() && !col_attrs.is_empty() {
                        1 + ROW_LABEL_BRIDGE
                    } else {
                        1
                    };
                    cells.push(ViewCell::label(CellType::RowLabel, label.as_str()).with_span(span, width));
                }
            }

            for col_key in col_keys {
                for metric in metrics {
                    let agg = crosstab.aggregator(row_key, col_key, Some(metric.name.as_str()))?;
                    let value = agg.value();
                    cells.push(
                        ViewCell::data(CellType::Value, value, agg.format(value))
                            .with_color(colors.cell_color(row_key, col_key, value))
                            .with_click(click(value, key_selector(row_key), key_selector(col_key))),
                    );
                }
            }

            for metric in metrics {
                let agg = crosstab.row_total(row_key, Some(metric.name.as_str()))?;
                let value = agg.value();
                cells.push(
                    ViewCell::data(CellType::RowTotal, value, agg.format(value))
                        .with_color(colors.col_total_color(value))
                        .with_click(click(value, key_selector(row_key), unconstrained())),
                );
            }

            body_rows.push(cells);
        }

        let label_width = row_attrs.len() + if col_attrs.is_empty() { 0 } else { ROW_LABEL_BRIDGE };
        let mut totals = vec![ViewCell::label(CellType::TotalLabel, "Totals").with_span(1, label_width.max(1))];

        for col_key in col_keys {
            for metric in metrics {
                let agg = crosstab.col_total(col_key, Some(metric.name.as_str()))?;
                let value = agg.value();
                totals.push(
                    ViewCell::data(CellType::ColTotal, value, agg.format(value))
                        .with_color(colors.row_total_color(value))
                        .with_click(click(value, unconstrained(), key_selector(col_key))),
                );
            }
        }

        for metric in metrics {
            let agg = crosstab.grand_total(Some(metric.name.as_str()))?;
            let value = agg.value();
            totals.push(
                ViewCell::data(CellType::GrandTotal, value, agg.format(value))
                    .with_click(click(value, unconstrained(), unconstrained())),
            );
        }
        body_rows.push(totals);

        log_debug!(
            CATEGORY,
            "view header_rows={} body_rows={} clickable={}",
            header_rows.len(),
            body_rows.len(),
            clickable
        );

        Ok(TableView {
            row_attrs: row_attrs.to_vec(),
            col_attrs: col_attrs.to_vec(),
            header_rows,
            body_rows,
        })
    }

    /// Header rows followed by body rows.
    pub fn rows(&self) -> impl Iterator<Item = &[ViewCell]> {
        self.header_rows
            .iter()
            .chain(self.body_rows.iter())
            .map(Vec::as_slice)
    }

    pub fn row_count(&self) -> usize {
        self.header_rows.len() + self.body_rows.len()
    }

    /// Visual width of the table, in columns.
    pub fn column_count(&self) -> usize {
        self.body_rows
            .last()
            .map_or(0, |row| row.iter().map(|c| c.col_span).sum())
    }

    /// Gets a cell at the specified position (see [`CellEvent`]).
    pub fn get_cell(&self, row: usize, col: usize) -> Option<&ViewCell> {
        self.rows().nth(row).and_then(|r| r.get(col))
    }

    /// All cells of one type, in row order.
    pub fn cells_of_type(&self, cell_type: CellType) -> impl Iterator<Item = &ViewCell> {
        self.rows()
            .flat_map(|row| row.iter())
            .filter(move |c| c.cell_type == cell_type)
    }

    /// Filter for the cell at a position, or `None` if it is not clickable.
    pub fn filter_at(&self, row: usize, col: usize) -> Result<Option<FilterMap>> {
        let cell = self
            .get_cell(row, col)
            .ok_or(PivotTableError::CellOutOfRange { row, col })?;
        Ok(cell
            .click
            .as_ref()
            .map(|target| target.filter(&self.row_attrs, &self.col_attrs)))
    }

    /// Activates the cell at a position, invoking `handler` with its value
    /// and filter. Returns false when the cell is not clickable.
    pub fn activate<E, H>(&self, row: usize, col: usize, handler: &H, data: &E) -> Result<bool>
    where
        E: ?Sized,
        H: ClickHandler<E> + ?Sized,
    {
        let cell = self
            .get_cell(row, col)
            .ok_or(PivotTableError::CellOutOfRange { row, col })?;
        let target = match &cell.click {
            Some(target) => target,
            None => return Ok(false),
        };

        let filters = target.filter(&self.row_attrs, &self.col_attrs);
        log_debug!(CATEGORY, "activate ({},{}) filters={:?}", row, col, filters);
        handler.on_click(&CellEvent { row, col }, target.value, &filters, data);
        Ok(true)
    }
}
