//! FILENAME: core/pivot-table/src/lib.rs
//! Pivot table renderer.
//!
//! This crate turns the grouped data of an aggregation engine (see the
//! `pivot-data` crate) into a renderable grid with merged label cells,
//! heatmap colors, row/column/grand totals and click-to-filter targets,
//! and into a tab-separated export.
//!
//! Layers:
//! - `definition`: Serializable configuration (what the table looks like)
//! - `traversal`: Ordered walk over keys, cells and totals (WHAT we read)
//! - `span`, `color`, `heatmap`, `filter`: The per-cell algorithms
//! - `view`: Renderable output for the frontend (WHAT we display)
//! - `html`: pvtTable markup for a view
//! - `export`: Flat text export of the same traversal
//! - `renderer`: Entry points tying engine, options and output together

#[macro_use]
pub mod logging;

pub mod color;
pub mod definition;
pub mod error;
pub mod export;
pub mod filter;
pub mod heatmap;
pub mod html;
pub mod renderer;
pub mod span;
pub mod traversal;
pub mod view;

pub use color::{
    channel_color_scale, red_color_scale, Channel, Color, ColorScale, ColorScaleGenerator,
    RangeColorizer,
};
pub use definition::{ExportHeaderMode, HeatmapMode, RendererKind, TableOptions};
pub use error::{Axis, PivotTableError, Result};
pub use export::{export_tsv, split_tsv};
pub use filter::{build_filter, key_selector, unconstrained, FilterMap, KeySelector};
pub use heatmap::{CellColors, HeatmapScoper};
pub use renderer::{ClickHandler, PivotTableRenderer, RenderOutput};
pub use span::{compute_span, span_matrix, SpanResult};
pub use traversal::CrossTab;
pub use view::{CellEvent, CellType, ClickTarget, TableView, ViewCell};

pub use pivot_data::{AggregationEngine, Aggregator, KeyTuple, MetricSpec};
