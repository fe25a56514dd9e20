//! FILENAME: core/pivot-table/src/definition.rs
//! Pivot Table Definition - The serializable rendering configuration.
//!
//! This module contains the types that DESCRIBE how a pivot table is
//! rendered. Like the data definition, these are plain serde structures so
//! they can be stored with a workbook or sent over a bridge as JSON.
//! Behavior (color scales, click handlers) is injected separately, per
//! render, on the renderer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PivotTableError;

// ============================================================================
// HEATMAP MODE
// ============================================================================

/// Which set of values a heatmap color range is computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeatmapMode {
    /// No coloring.
    Off,
    /// One range over every value cell in the table.
    Full,
    /// One range per row key.
    Row,
    /// One range per column key.
    Col,
}

impl Default for HeatmapMode {
    fn default() -> Self {
        HeatmapMode::Off
    }
}

impl FromStr for HeatmapMode {
    type Err = PivotTableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "off" | "" => Ok(HeatmapMode::Off),
            "full" => Ok(HeatmapMode::Full),
            "row" => Ok(HeatmapMode::Row),
            "col" => Ok(HeatmapMode::Col),
            other => Err(PivotTableError::InvalidOption(format!(
                "unknown heatmap mode '{}'",
                other
            ))),
        }
    }
}

// ============================================================================
// EXPORT
// ============================================================================

/// How the flat text export labels its value columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportHeaderMode {
    /// One column per column key holding the default metric, labeled by the
    /// joined key. Without column keys the single column is labeled by the
    /// metric name.
    ColumnKey,
    /// One column per (column key, metric), labeled "<key> <metric>".
    MetricByColumnKey,
}

impl Default for ExportHeaderMode {
    fn default() -> Self {
        ExportHeaderMode::ColumnKey
    }
}

// ============================================================================
// TABLE OPTIONS
// ============================================================================

/// Rendering options for a pivot table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableOptions {
    /// Heatmap scope for value cells.
    #[serde(default)]
    pub heatmap_mode: HeatmapMode,

    /// Header labeling of the flat text export.
    #[serde(default)]
    pub export_header: ExportHeaderMode,

    /// Header label of the single export value column when there are no
    /// column keys. Defaults to the default metric's name.
    #[serde(default)]
    pub export_metric_label: Option<String>,
}

impl Default for TableOptions {
    fn default() -> Self {
        TableOptions {
            heatmap_mode: HeatmapMode::Off,
            export_header: ExportHeaderMode::ColumnKey,
            export_metric_label: None,
        }
    }
}

impl TableOptions {
    pub fn with_heatmap(mode: HeatmapMode) -> Self {
        TableOptions {
            heatmap_mode: mode,
            ..Default::default()
        }
    }
}

// ============================================================================
// RENDERER KINDS
// ============================================================================

/// The named renderers a pivot UI offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RendererKind {
    Table,
    TableHeatmap,
    TableColHeatmap,
    TableRowHeatmap,
    ExportableTsv,
}

impl RendererKind {
    pub const ALL: [RendererKind; 5] = [
        RendererKind::Table,
        RendererKind::TableHeatmap,
        RendererKind::TableColHeatmap,
        RendererKind::TableRowHeatmap,
        RendererKind::ExportableTsv,
    ];

    /// Display name shown in renderer pickers.
    pub fn name(&self) -> &'static str {
        match self {
            RendererKind::Table => "Table",
            RendererKind::TableHeatmap => "Table Heatmap",
            RendererKind::TableColHeatmap => "Table Col Heatmap",
            RendererKind::TableRowHeatmap => "Table Row Heatmap",
            RendererKind::ExportableTsv => "Exportable TSV",
        }
    }

    /// Looks a renderer up by its display name.
    pub fn from_name(name: &str) -> Option<RendererKind> {
        RendererKind::ALL.iter().copied().find(|k| k.name() == name)
    }

    /// Heatmap mode fixed by a table renderer; `None` for text renderers.
    pub fn heatmap_mode(&self) -> Option<HeatmapMode> {
        match self {
            RendererKind::Table => Some(HeatmapMode::Off),
            RendererKind::TableHeatmap => Some(HeatmapMode::Full),
            RendererKind::TableColHeatmap => Some(HeatmapMode::Col),
            RendererKind::TableRowHeatmap => Some(HeatmapMode::Row),
            RendererKind::ExportableTsv => None,
        }
    }
}

impl fmt::Display for RendererKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heatmap_mode_from_str() {
        assert_eq!("full".parse::<HeatmapMode>().unwrap(), HeatmapMode::Full);
        assert_eq!(" Row ".parse::<HeatmapMode>().unwrap(), HeatmapMode::Row);
        assert_eq!("col".parse::<HeatmapMode>().unwrap(), HeatmapMode::Col);
        assert_eq!("".parse::<HeatmapMode>().unwrap(), HeatmapMode::Off);
        assert!(matches!(
            "diagonal".parse::<HeatmapMode>(),
            Err(PivotTableError::InvalidOption(_))
        ));
    }

    #[test]
    fn test_renderer_names_round_trip() {
        for kind in RendererKind::ALL {
            assert_eq!(RendererKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(RendererKind::from_name("Bar Chart"), None);
        assert_eq!(
            RendererKind::TableRowHeatmap.heatmap_mode(),
            Some(HeatmapMode::Row)
        );
        assert_eq!(RendererKind::ExportableTsv.heatmap_mode(), None);
    }

    #[test]
    fn test_options_defaults_from_json() {
        let options: TableOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, TableOptions::default());

        let options: TableOptions =
            serde_json::from_str(r#"{"heatmap_mode":"col","export_header":"metric_by_column_key"}"#)
                .unwrap();
        assert_eq!(options.heatmap_mode, HeatmapMode::Col);
        assert_eq!(options.export_header, ExportHeaderMode::MetricByColumnKey);
    }
}
