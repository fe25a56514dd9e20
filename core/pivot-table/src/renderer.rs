//! FILENAME: core/pivot-table/src/renderer.rs
//! Renderer entry points.
//!
//! `PivotTableRenderer` ties an aggregation engine, the serializable
//! `TableOptions` and the per-render behavior (color scale generator,
//! click handler) together. Every call to `view`, `export_tsv` or `render`
//! is one render pass: keys are snapshotted, scales are built, output is
//! produced, nothing is cached across passes.

use serde::{Deserialize, Serialize};

use pivot_data::AggregationEngine;

use crate::color::{red_color_scale, ColorScaleGenerator};
use crate::definition::{HeatmapMode, RendererKind, TableOptions};
use crate::error::Result;
use crate::export;
use crate::filter::FilterMap;
use crate::heatmap::HeatmapScoper;
use crate::logging::CATEGORY;
use crate::traversal::CrossTab;
use crate::view::{CellEvent, TableView};

// ============================================================================
// CLICK HANDLER
// ============================================================================

/// Receives activations of value and total cells.
///
/// `data` is the engine the table was rendered from, so the handler can
/// drill into the clicked slice.
pub trait ClickHandler<E: ?Sized> {
    fn on_click(&self, event: &CellEvent, value: Option<f64>, filters: &FilterMap, data: &E);
}

impl<E, F> ClickHandler<E> for F
where
    E: ?Sized,
    F: Fn(&CellEvent, Option<f64>, &FilterMap, &E),
{
    fn on_click(&self, event: &CellEvent, value: Option<f64>, filters: &FilterMap, data: &E) {
        self(event, value, filters, data)
    }
}

// ============================================================================
// OUTPUT
// ============================================================================

/// Output of one named renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RenderOutput {
    /// Grid renderers ("Table" and the heatmap variants).
    Table(TableView),
    /// "Exportable TSV".
    Text(String),
}

impl RenderOutput {
    pub fn as_table(&self) -> Option<&TableView> {
        match self {
            RenderOutput::Table(view) => Some(view),
            RenderOutput::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            RenderOutput::Table(_) => None,
            RenderOutput::Text(text) => Some(text),
        }
    }
}

// ============================================================================
// RENDERER
// ============================================================================

/// Renders pivot tables from one engine.
pub struct PivotTableRenderer<'a, E: AggregationEngine> {
    engine: &'a E,
    options: TableOptions,
    color_scale: Box<dyn ColorScaleGenerator + 'a>,
    click_handler: Option<Box<dyn ClickHandler<E> + 'a>>,
}

impl<'a, E: AggregationEngine> PivotTableRenderer<'a, E> {
    /// Creates a renderer with the red color scale and no click handler.
    pub fn new(engine: &'a E, options: TableOptions) -> Self {
        PivotTableRenderer {
            engine,
            options,
            color_scale: Box::new(red_color_scale),
            click_handler: None,
        }
    }

    pub fn with_color_scale<G: ColorScaleGenerator + 'a>(mut self, generator: G) -> Self {
        self.color_scale = Box::new(generator);
        self
    }

    /// Makes value and total cells clickable.
    pub fn with_click_handler<H: ClickHandler<E> + 'a>(mut self, handler: H) -> Self {
        self.click_handler = Some(Box::new(handler));
        self
    }

    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    pub fn engine(&self) -> &'a E {
        self.engine
    }

    /// Snapshots the engine's keys for one pass.
    pub fn crosstab(&self) -> Result<CrossTab<'a, E>> {
        CrossTab::new(self.engine)
    }

    /// Grid view using the configured heatmap mode.
    pub fn view(&self) -> Result<TableView> {
        self.view_with_mode(self.options.heatmap_mode)
    }

    /// Grid view with an explicit heatmap mode.
    pub fn view_with_mode(&self, mode: HeatmapMode) -> Result<TableView> {
        let crosstab = self.crosstab()?;
        let colors = HeatmapScoper::build(mode, &crosstab, self.color_scale.as_ref())?;
        TableView::build(&crosstab, &colors, self.click_handler.is_some())
    }

    /// Tab-separated export.
    pub fn export_tsv(&self) -> Result<String> {
        let crosstab = self.crosstab()?;
        export::export_tsv(&crosstab, &self.options)
    }

    /// Runs a named renderer.
    pub fn render(&self, kind: RendererKind) -> Result<RenderOutput> {
        log_debug!(CATEGORY, "render '{}'", kind);
        match kind.heatmap_mode() {
            Some(mode) => Ok(RenderOutput::Table(self.view_with_mode(mode)?)),
            None => Ok(RenderOutput::Text(self.export_tsv()?)),
        }
    }

    /// Activates a cell of a view produced by this renderer. Returns false
    /// when no handler is installed or the cell is not clickable.
    pub fn activate(&self, view: &TableView, row: usize, col: usize) -> Result<bool> {
        match &self.click_handler {
            Some(handler) => view.activate(row, col, handler.as_ref(), self.engine),
            None => Ok(false),
        }
    }
}
