//! FILENAME: core/pivot-data/src/lib.rs
//! Pivot data subsystem.
//!
//! This crate describes the contract between an aggregation engine and the
//! pivot table renderer, and ships a small in-memory engine that satisfies
//! it over pre-aggregated records.
//!
//! Layers:
//! - `definition`: Shared vocabulary (attributes, key tuples, metrics)
//! - `aggregator`: The engine contract (what the renderer consumes)
//! - `format`: Number display formatting for aggregators
//! - `memory`: In-memory reference engine

pub mod definition;
pub mod aggregator;
pub mod format;
pub mod memory;

pub use definition::*;
pub use aggregator::{AggregationEngine, Aggregator};
pub use format::{format_number, NumberFormat};
pub use memory::{MemoryAggregator, MemoryPivotData};
