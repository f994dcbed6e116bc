//! Cell storage implementation
//!
//! Sparse, row-major storage: only cells that carry a value or a
//! non-default style are kept.

use std::collections::BTreeMap;

use super::{CellRange, CellValue};
use crate::style::StylePool;

/// Complete data for a single cell
#[derive(Debug, Clone, Default)]
pub struct CellData {
    /// The cell's value
    pub value: CellValue,
    /// Index into the worksheet's style pool (0 = default style)
    pub style_index: u32,
}

impl CellData {
    /// Create a new cell with a value and default style
    pub fn new(value: CellValue) -> Self {
        Self {
            value,
            style_index: 0,
        }
    }

    /// Check if this cell is effectively empty (no value and default style)
    pub fn is_empty(&self) -> bool {
        self.value.is_empty() && self.style_index == 0
    }
}

/// Sparse row-based storage for worksheet cells
///
/// Structure: `BTreeMap<row_index, BTreeMap<col_index, CellData>>`. The
/// ordered maps give the writer row-major iteration for free.
#[derive(Debug)]
pub struct CellStorage {
    rows: BTreeMap<u32, BTreeMap<u16, CellData>>,
    style_pool: StylePool,
    default_row_height: f64,
    default_column_width: f64,
    row_heights: BTreeMap<u32, f64>,
    column_widths: BTreeMap<u16, f64>,
    merged_regions: Vec<CellRange>,
}

impl CellStorage {
    /// Create empty storage
    pub fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
            style_pool: StylePool::new(),
            default_row_height: 15.0,
            default_column_width: 8.43,
            row_heights: BTreeMap::new(),
            column_widths: BTreeMap::new(),
            merged_regions: Vec::new(),
        }
    }

    /// Get a cell
    pub fn get(&self, row: u32, col: u16) -> Option<&CellData> {
        self.rows.get(&row).and_then(|r| r.get(&col))
    }

    /// Set a cell value, keeping any existing style
    pub fn set_value(&mut self, row: u32, col: u16, value: CellValue) {
        self.rows
            .entry(row)
            .or_default()
            .entry(col)
            .or_default()
            .value = value;
        self.prune(row, col);
    }

    /// Set a cell's style index, keeping any existing value
    pub fn set_style(&mut self, row: u32, col: u16, style_index: u32) {
        self.rows
            .entry(row)
            .or_default()
            .entry(col)
            .or_default()
            .style_index = style_index;
        self.prune(row, col);
    }

    /// Drop the cell at (row, col) if it holds neither a value nor a style
    fn prune(&mut self, row: u32, col: u16) {
        let Some(row_map) = self.rows.get_mut(&row) else {
            return;
        };
        if row_map.get(&col).is_some_and(CellData::is_empty) {
            row_map.remove(&col);
        }
        if row_map.is_empty() {
            self.rows.remove(&row);
        }
    }

    /// Number of stored cells
    pub fn cell_count(&self) -> usize {
        self.rows.values().map(BTreeMap::len).sum()
    }

    /// Bounds of all stored cells as (min_row, min_col, max_row, max_col)
    pub fn used_bounds(&self) -> Option<(u32, u16, u32, u16)> {
        let min_row = *self.rows.keys().next()?;
        let max_row = *self.rows.keys().next_back()?;
        let min_col = self.rows.values().filter_map(|r| r.keys().next()).min()?;
        let max_col = self
            .rows
            .values()
            .filter_map(|r| r.keys().next_back())
            .max()?;
        Some((min_row, *min_col, max_row, *max_col))
    }

    /// Iterate over all cells in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (u32, u16, &CellData)> {
        self.rows
            .iter()
            .flat_map(|(&row, cols)| cols.iter().map(move |(&col, data)| (row, col, data)))
    }

    /// Default row height in points
    pub fn default_row_height(&self) -> f64 {
        self.default_row_height
    }

    /// Row height in points
    pub fn row_height(&self, row: u32) -> f64 {
        self.row_heights
            .get(&row)
            .copied()
            .unwrap_or(self.default_row_height)
    }

    /// Set a custom row height
    pub fn set_row_height(&mut self, row: u32, height: f64) {
        self.row_heights.insert(row, height);
    }

    /// Column width in characters
    pub fn column_width(&self, col: u16) -> f64 {
        self.column_widths
            .get(&col)
            .copied()
            .unwrap_or(self.default_column_width)
    }

    /// Set a custom column width
    pub fn set_column_width(&mut self, col: u16, width: f64) {
        self.column_widths.insert(col, width);
    }

    /// Custom row heights (row index → height in points)
    pub fn custom_row_heights(&self) -> &BTreeMap<u32, f64> {
        &self.row_heights
    }

    /// Custom column widths (column index → width in characters)
    pub fn custom_column_widths(&self) -> &BTreeMap<u16, f64> {
        &self.column_widths
    }

    /// Merged regions in insertion order
    pub fn merged_regions(&self) -> &[CellRange] {
        &self.merged_regions
    }

    /// Record a merged region (overlap checks are the caller's job)
    pub fn add_merged_region(&mut self, range: CellRange) {
        self.merged_regions.push(range);
    }

    /// Style pool for this storage
    pub fn style_pool(&self) -> &StylePool {
        &self.style_pool
    }

    /// Mutable style pool
    pub fn style_pool_mut(&mut self) -> &mut StylePool {
        &mut self.style_pool
    }
}

impl Default for CellStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_and_style_merge() {
        let mut storage = CellStorage::new();
        storage.set_style(2, 1, 4);
        storage.set_value(2, 1, CellValue::from("Pikachu"));

        let cell = storage.get(2, 1).unwrap();
        assert_eq!(cell.style_index, 4);
        assert_eq!(cell.value.as_string(), Some("Pikachu"));
    }

    #[test]
    fn test_empty_cells_are_pruned() {
        let mut storage = CellStorage::new();
        storage.set_value(0, 0, CellValue::Empty);
        assert_eq!(storage.cell_count(), 0);

        storage.set_style(0, 0, 1);
        assert_eq!(storage.cell_count(), 1);
    }

    #[test]
    fn test_row_major_iteration() {
        let mut storage = CellStorage::new();
        storage.set_value(1, 0, CellValue::from(2u32));
        storage.set_value(0, 3, CellValue::from(1u32));
        storage.set_value(1, 2, CellValue::from(3u32));

        let order: Vec<_> = storage.iter().map(|(r, c, _)| (r, c)).collect();
        assert_eq!(order, vec![(0, 3), (1, 0), (1, 2)]);
        assert_eq!(storage.used_bounds(), Some((0, 0, 1, 3)));
    }
}
