//! FILENAME: core/pivot-table/src/heatmap.rs
//! Heatmap scoping.
//!
//! Decides which values each color range is built from and memoizes one
//! color scale per scope: the whole table, each row key or each column key.
//! The two total scopes (all row totals, all column totals) are built
//! whenever any heatmap mode is active, independent of the mode itself.

use rustc_hash::FxHashMap;

use pivot_data::{AggregationEngine, KeyTuple};

use crate::color::{Color, ColorScale, ColorScaleGenerator};
use crate::definition::HeatmapMode;
use crate::error::Result;
use crate::logging::CATEGORY;
use crate::traversal::CrossTab;

/// Color lookups consumed by the grid assembler.
pub trait CellColors {
    /// Color of a value cell.
    fn cell_color(&self, row_key: &[String], col_key: &[String], value: Option<f64>) -> Option<Color>;

    /// Color of a cell in the bottom totals row (one total per column key).
    fn row_total_color(&self, value: Option<f64>) -> Option<Color>;

    /// Color of a cell in the right-hand totals column (one total per row key).
    fn col_total_color(&self, value: Option<f64>) -> Option<Color>;
}

/// Value-cell scales, selected once at construction.
enum CellScales {
    Off,
    Full(ColorScale),
    Row(FxHashMap<KeyTuple, ColorScale>),
    Col(FxHashMap<KeyTuple, ColorScale>),
}

/// Memoized color scales for one render pass.
pub struct HeatmapScoper {
    mode: HeatmapMode,
    cells: CellScales,
    /// Scope: every column total.
    row_totals: Option<ColorScale>,
    /// Scope: every row total.
    col_totals: Option<ColorScale>,
    scope_count: usize,
}

impl HeatmapScoper {
    /// A scoper that colors nothing.
    pub fn off() -> Self {
        HeatmapScoper {
            mode: HeatmapMode::Off,
            cells: CellScales::Off,
            row_totals: None,
            col_totals: None,
            scope_count: 0,
        }
    }

    /// Builds every scale the mode needs, one generator call per scope.
    pub fn build<E, G>(mode: HeatmapMode, crosstab: &CrossTab<'_, E>, generator: &G) -> Result<Self>
    where
        E: AggregationEngine,
        G: ColorScaleGenerator + ?Sized,
    {
        if mode == HeatmapMode::Off {
            return Ok(HeatmapScoper::off());
        }

        let mut scope_count = 2;
        let row_totals = generator.generate(&crosstab.col_total_values()?);
        let col_totals = generator.generate(&crosstab.row_total_values()?);

        let cells = match mode {
            HeatmapMode::Off => CellScales::Off,
            HeatmapMode::Full => {
                scope_count += 1;
                CellScales::Full(generator.generate(&crosstab.all_values()?))
            }
            HeatmapMode::Row => {
                let mut scales = FxHashMap::default();
                for row_key in crosstab.row_keys() {
                    let scale = generator.generate(&crosstab.row_values(row_key)?);
                    scales.insert(row_key.clone(), scale);
                }
                scope_count += scales.len();
                CellScales::Row(scales)
            }
            HeatmapMode::Col => {
                let mut scales = FxHashMap::default();
                for col_key in crosstab.col_keys() {
                    let scale = generator.generate(&crosstab.col_values(col_key)?);
                    scales.insert(col_key.clone(), scale);
                }
                scope_count += scales.len();
                CellScales::Col(scales)
            }
        };

        log_debug!(CATEGORY, "heatmap mode={:?} scopes={}", mode, scope_count);

        Ok(HeatmapScoper {
            mode,
            cells,
            row_totals: Some(row_totals),
            col_totals: Some(col_totals),
            scope_count,
        })
    }

    pub fn mode(&self) -> HeatmapMode {
        self.mode
    }

    /// Number of color scales built (generator invocations).
    pub fn scope_count(&self) -> usize {
        self.scope_count
    }
}

impl CellColors for HeatmapScoper {
    fn cell_color(&self, row_key: &[String], col_key: &[String], value: Option<f64>) -> Option<Color> {
        let value = value?;
        match &self.cells {
            CellScales::Off => None,
            CellScales::Full(scale) => Some(scale(value)),
            CellScales::Row(scales) => scales.get(row_key).map(|scale| scale(value)),
            CellScales::Col(scales) => scales.get(col_key).map(|scale| scale(value)),
        }
    }

    fn row_total_color(&self, value: Option<f64>) -> Option<Color> {
        let value = value?;
        self.row_totals.as_ref().map(|scale| scale(value))
    }

    fn col_total_color(&self, value: Option<f64>) -> Option<Color> {
        let value = value?;
        self.col_totals.as_ref().map(|scale| scale(value))
    }
}
