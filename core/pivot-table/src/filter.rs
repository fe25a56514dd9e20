//! FILENAME: core/pivot-table/src/filter.rs
//! Click-to-filter mapping.
//!
//! A clicked cell is identified by the label values of its row and column.
//! Total cells leave one axis unconstrained, which is expressed by a
//! selector holding a single `None`.

use std::collections::BTreeMap;

use smallvec::{smallvec, SmallVec};

use pivot_data::AttributeName;

/// Attribute -> label constraints identifying a clicked slice.
/// An attribute missing from the map is unconstrained.
pub type FilterMap = BTreeMap<AttributeName, String>;

/// Label values of one axis for a clicked cell; `None` is unconstrained.
pub type KeySelector = SmallVec<[Option<String>; 4]>;

/// Selector constraining every attribute of the axis to `key`.
pub fn key_selector(key: &[String]) -> KeySelector {
    key.iter().cloned().map(Some).collect()
}

/// Selector leaving the whole axis unconstrained (total cells).
pub fn unconstrained() -> KeySelector {
    smallvec![None]
}

/// Builds the filter for a clicked cell.
///
/// Column constraints are applied first, then row constraints. Positions
/// past the end of a selector are unconstrained.
pub fn build_filter(
    col_attrs: &[AttributeName],
    col_values: &[Option<String>],
    row_attrs: &[AttributeName],
    row_values: &[Option<String>],
) -> FilterMap {
    let mut filters = FilterMap::new();
    for (attrs, values) in [(col_attrs, col_values), (row_attrs, row_values)] {
        for (attr, value) in attrs.iter().zip(values.iter()) {
            if let Some(value) = value {
                filters.insert(attr.clone(), value.clone());
            }
        }
    }
    filters
}
