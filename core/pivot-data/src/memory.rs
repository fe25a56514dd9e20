//! FILENAME: core/pivot-data/src/memory.rs
//! In-memory aggregation engine over pre-aggregated records.
//!
//! Each record binds one value to a (row key, column key, metric) triple.
//! Adding a record folds it into four accumulators at once: the cell, its
//! row total, its column total and the grand total. Lookups are therefore
//! O(1) and totals always agree with the cells they summarize.

use rustc_hash::FxHashMap;

use crate::aggregator::{AggregationEngine, Aggregator};
use crate::definition::{
    compare_labels, AggregationType, AttributeName, KeyOrder, KeyTuple, MetricSpec,
};
use crate::format::{format_number, NumberFormat};

/// Index of a distinct key on one axis; `None` stands for the axis total.
type AxisSlot = Option<usize>;

// ============================================================================
// ACCUMULATOR
// ============================================================================

/// Running statistics for one slice of one metric.
#[derive(Debug, Clone, Copy, Default)]
struct Accumulator {
    sum: f64,
    count: u64,
    min: Option<f64>,
    max: Option<f64>,
}

impl Accumulator {
    fn push(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
        self.min = Some(self.min.map_or(value, |m| m.min(value)));
        self.max = Some(self.max.map_or(value, |m| m.max(value)));
    }

    fn result(&self, aggregation: AggregationType) -> Option<f64> {
        if self.count == 0 {
            return None;
        }
        match aggregation {
            AggregationType::Sum => Some(self.sum),
            AggregationType::Count => Some(self.count as f64),
            AggregationType::Average => Some(self.sum / self.count as f64),
            AggregationType::Min => self.min,
            AggregationType::Max => self.max,
        }
    }
}

// ============================================================================
// AGGREGATOR
// ============================================================================

/// Aggregator handed out by [`MemoryPivotData`]. Owns its result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MemoryAggregator {
    value: Option<f64>,
    format: NumberFormat,
}

impl Aggregator for MemoryAggregator {
    fn value(&self) -> Option<f64> {
        self.value
    }

    fn format(&self, value: Option<f64>) -> String {
        format_number(value, &self.format)
    }
}

// ============================================================================
// ENGINE
// ============================================================================

/// How a metric is folded and displayed.
#[derive(Debug, Clone, Copy)]
struct MetricBinding {
    aggregation: AggregationType,
    format: NumberFormat,
}

/// Distinct keys of one axis, in first-seen order.
#[derive(Debug, Clone, Default)]
struct AxisKeys {
    keys: Vec<KeyTuple>,
    index: FxHashMap<KeyTuple, usize>,
}

impl AxisKeys {
    fn intern(&mut self, key: KeyTuple) -> usize {
        if let Some(&idx) = self.index.get(&key) {
            return idx;
        }
        let idx = self.keys.len();
        self.keys.push(key.clone());
        self.index.insert(key, idx);
        idx
    }

    /// Resolves a lookup key: empty means the axis total.
    fn slot(&self, key: &[String]) -> Option<AxisSlot> {
        if key.is_empty() {
            return Some(None);
        }
        self.index.get(key).map(|&idx| Some(idx))
    }

    fn ordered(&self, order: KeyOrder) -> Vec<KeyTuple> {
        let mut keys = self.keys.clone();
        match order {
            KeyOrder::FirstSeen => {
                // Rank every prefix by first appearance so shared prefixes
                // stay together even when records arrive interleaved.
                let mut prefix_rank: FxHashMap<&[String], usize> = FxHashMap::default();
                for key in &self.keys {
                    for len in 1..=key.len() {
                        let next = prefix_rank.len();
                        prefix_rank.entry(&key[..len]).or_insert(next);
                    }
                }
                let rank_path = |key: &KeyTuple| -> Vec<usize> {
                    (1..=key.len())
                        .map(|len| prefix_rank.get(&key[..len]).copied().unwrap_or(usize::MAX))
                        .collect()
                };
                keys.sort_by_cached_key(rank_path);
            }
            KeyOrder::Ascending => keys.sort_by(|a, b| compare_keys(a, b)),
            KeyOrder::Descending => keys.sort_by(|a, b| compare_keys(b, a)),
        }
        keys
    }
}

fn compare_keys(a: &[String], b: &[String]) -> std::cmp::Ordering {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| compare_labels(x, y))
        .find(|ord| ord.is_ne())
        .unwrap_or_else(|| a.len().cmp(&b.len()))
}

/// In-memory engine over pre-aggregated `(row key, col key, metric, value)` records.
#[derive(Debug, Clone, Default)]
pub struct MemoryPivotData {
    rows: Vec<AttributeName>,
    cols: Vec<AttributeName>,
    metrics: Vec<MetricSpec>,
    bindings: Vec<MetricBinding>,
    row_keys: AxisKeys,
    col_keys: AxisKeys,
    row_order: KeyOrder,
    col_order: KeyOrder,
    cells: FxHashMap<(AxisSlot, AxisSlot, usize), Accumulator>,
}

impl MemoryPivotData {
    pub fn new<S: AsRef<str>>(rows: &[S], cols: &[S]) -> Self {
        MemoryPivotData {
            rows: rows.iter().map(|s| s.as_ref().to_string()).collect(),
            cols: cols.iter().map(|s| s.as_ref().to_string()).collect(),
            ..Default::default()
        }
    }

    /// Registers a metric. The first registered metric is the default.
    pub fn add_metric(&mut self, spec: MetricSpec, aggregation: AggregationType) -> &mut Self {
        self.metrics.push(spec);
        self.bindings.push(MetricBinding {
            aggregation,
            format: NumberFormat::General,
        });
        self
    }

    /// Sets the display format of a metric. Returns false if it is unknown.
    pub fn set_metric_format(&mut self, metric: &str, format: NumberFormat) -> bool {
        match self.metric_index(metric) {
            Some(idx) => {
                self.bindings[idx].format = format;
                true
            }
            None => false,
        }
    }

    pub fn set_row_order(&mut self, order: KeyOrder) -> &mut Self {
        self.row_order = order;
        self
    }

    pub fn set_col_order(&mut self, order: KeyOrder) -> &mut Self {
        self.col_order = order;
        self
    }

    /// Adds one pre-aggregated record.
    pub fn add_record<S: AsRef<str>>(
        &mut self,
        row_key: &[S],
        col_key: &[S],
        metric: &str,
        value: f64,
    ) -> Result<(), String> {
        if row_key.len() != self.rows.len() {
            return Err(format!(
                "row key has {} labels, expected {}",
                row_key.len(),
                self.rows.len()
            ));
        }
        if col_key.len() != self.cols.len() {
            return Err(format!(
                "column key has {} labels, expected {}",
                col_key.len(),
                self.cols.len()
            ));
        }
        let metric_idx = self
            .metric_index(metric)
            .ok_or_else(|| format!("unknown metric '{}'", metric))?;

        let row_slot = if row_key.is_empty() {
            None
        } else {
            Some(self.row_keys.intern(row_key.iter().map(|s| s.as_ref().to_string()).collect()))
        };
        let col_slot = if col_key.is_empty() {
            None
        } else {
            Some(self.col_keys.intern(col_key.iter().map(|s| s.as_ref().to_string()).collect()))
        };

        // Axes without attributes collapse onto the same slot
        let mut targets = vec![(row_slot, col_slot), (row_slot, None), (None, col_slot), (None, None)];
        targets.sort();
        targets.dedup();
        for (r, c) in targets {
            self.cells.entry((r, c, metric_idx)).or_default().push(value);
        }
        Ok(())
    }

    fn metric_index(&self, metric: &str) -> Option<usize> {
        self.metrics.iter().position(|m| m.name == metric)
    }
}

impl AggregationEngine for MemoryPivotData {
    type Aggregator = MemoryAggregator;

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
        self.row_keys.ordered(self.row_order)
    }

    fn col_keys(&self) -> Vec<KeyTuple> {
        self.col_keys.ordered(self.col_order)
    }

    fn aggregator(
        &self,
        row_key: &[String],
        col_key: &[String],
        metric: Option<&str>,
    ) -> Option<MemoryAggregator> {
        let row_slot = self.row_keys.slot(row_key)?;
        let col_slot = self.col_keys.slot(col_key)?;

        let metric_idx = match metric {
            Some(name) => self.metric_index(name)?,
            None if self.metrics.is_empty() => {
                return Some(MemoryAggregator {
                    value: None,
                    format: NumberFormat::General,
                })
            }
            None => 0,
        };
        let binding = self.bindings[metric_idx];
        let value = self
            .cells
            .get(&(row_slot, col_slot, metric_idx))
            .and_then(|acc| acc.result(binding.aggregation));

        Some(MemoryAggregator {
            value,
            format: binding.format,
        })
    }
}
