//! Worksheet type

use std::collections::BTreeMap;

use crate::cell::{CellData, CellRange, CellStorage, CellValue};
use crate::conditional_format::ConditionalFormatRule;
use crate::error::{Error, Result};
use crate::style::Style;
use crate::validation::DataValidation;
use crate::{MAX_COLS, MAX_ROWS};

/// A worksheet (single sheet in a workbook)
#[derive(Debug)]
pub struct Worksheet {
    /// Sheet name
    name: String,
    /// Cell storage
    cells: CellStorage,
    /// Freeze pane settings
    freeze_panes: Option<FreezePanes>,
    /// Data validations
    data_validations: Vec<DataValidation>,
    /// Conditional formatting rules
    conditional_formats: Vec<ConditionalFormatRule>,
}

impl Worksheet {
    /// Create a new worksheet with the given name
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            cells: CellStorage::new(),
            freeze_panes: None,
            data_validations: Vec::new(),
            conditional_formats: Vec::new(),
        }
    }

    /// Get the sheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    // === Cell Access ===

    /// Get a cell by row and column indices
    pub fn cell_at(&self, row: u32, col: u16) -> Option<&CellData> {
        self.cells.get(row, col)
    }

    /// Get cell value by indices
    pub fn get_value_at(&self, row: u32, col: u16) -> CellValue {
        self.cells
            .get(row, col)
            .map(|c| c.value.clone())
            .unwrap_or(CellValue::Empty)
    }

    /// Get the non-default style applied to a cell, if any.
    pub fn cell_style_at(&self, row: u32, col: u16) -> Option<&Style> {
        match self.cells.get(row, col).map(|c| c.style_index) {
            None | Some(0) => None,
            Some(idx) => self.cells.style_pool().get(idx),
        }
    }

    /// Iterate over this worksheet's style pool
    pub fn styles(&self) -> impl Iterator<Item = (u32, &Style)> {
        self.cells.style_pool().iter()
    }

    // === Cell Modification ===

    /// Set a cell value by row and column indices
    pub fn set_cell_value_at<V: Into<CellValue>>(
        &mut self,
        row: u32,
        col: u16,
        value: V,
    ) -> Result<()> {
        self.validate_cell_position(row, col)?;
        self.cells.set_value(row, col, value.into());
        Ok(())
    }

    /// Set a cell formula by row and column indices
    pub fn set_cell_formula_at(&mut self, row: u32, col: u16, formula: &str) -> Result<()> {
        self.validate_cell_position(row, col)?;
        self.cells.set_value(row, col, CellValue::formula(formula));
        Ok(())
    }

    /// Set a cell style by row and column indices
    pub fn set_cell_style_at(&mut self, row: u32, col: u16, style: &Style) -> Result<()> {
        self.validate_cell_position(row, col)?;
        let style_index = self.cells.style_pool_mut().get_or_insert(style.clone());
        self.cells.set_style(row, col, style_index);
        Ok(())
    }

    /// Apply one style to every cell of a range, including empty ones
    pub fn set_range_style(&mut self, range: &CellRange, style: &Style) -> Result<()> {
        for addr in range.cells() {
            self.set_cell_style_at(addr.row, addr.col, style)?;
        }
        Ok(())
    }

    // === Range Operations ===

    /// Get the used range (bounds of all non-empty cells)
    pub fn used_range(&self) -> Option<CellRange> {
        self.cells
            .used_bounds()
            .map(|(min_row, min_col, max_row, max_col)| {
                CellRange::from_indices(min_row, min_col, max_row, max_col)
            })
    }

    // === Row/Column Operations ===

    /// Row height used for rows without a custom height
    pub fn default_row_height(&self) -> f64 {
        self.cells.default_row_height()
    }

    /// Get row height
    pub fn row_height(&self, row: u32) -> f64 {
        self.cells.row_height(row)
    }

    /// Set row height
    pub fn set_row_height(&mut self, row: u32, height: f64) {
        self.cells.set_row_height(row, height);
    }

    /// Get column width
    pub fn column_width(&self, col: u16) -> f64 {
        self.cells.column_width(col)
    }

    /// Set column width
    pub fn set_column_width(&mut self, col: u16, width: f64) {
        self.cells.set_column_width(col, width);
    }

    /// Get all custom row heights (row index → height in points).
    pub fn custom_row_heights(&self) -> &BTreeMap<u32, f64> {
        self.cells.custom_row_heights()
    }

    /// Get all custom column widths (column index → width in characters).
    pub fn custom_column_widths(&self) -> &BTreeMap<u16, f64> {
        self.cells.custom_column_widths()
    }

    // === Merged Cells ===

    /// Get merged regions
    pub fn merged_regions(&self) -> &[CellRange] {
        self.cells.merged_regions()
    }

    /// Merge cells
    pub fn merge_cells(&mut self, range: &CellRange) -> Result<()> {
        if let Some(existing) = self
            .cells
            .merged_regions()
            .iter()
            .find(|existing| range.overlaps(existing))
        {
            return Err(Error::MergedCellConflict(format!(
                "{} (existing {})",
                range, existing
            )));
        }
        self.validate_cell_position(range.end.row, range.end.col)?;
        self.cells.add_merged_region(*range);
        Ok(())
    }

    // === Freeze Panes ===

    /// Get freeze pane settings
    pub fn freeze_panes(&self) -> Option<&FreezePanes> {
        self.freeze_panes.as_ref()
    }

    /// Set freeze panes; `(0, 0)` removes them
    pub fn set_freeze_panes(&mut self, row: u32, col: u16) {
        if row == 0 && col == 0 {
            self.freeze_panes = None;
        } else {
            self.freeze_panes = Some(FreezePanes { row, col });
        }
    }

    // === Data Validation ===

    /// Add a data validation rule
    pub fn add_data_validation(&mut self, validation: DataValidation) {
        self.data_validations.push(validation);
    }

    /// Get all data validations
    pub fn data_validations(&self) -> &[DataValidation] {
        &self.data_validations
    }

    // === Conditional Formatting ===

    /// Add a conditional formatting rule
    pub fn add_conditional_format(&mut self, rule: ConditionalFormatRule) {
        self.conditional_formats.push(rule);
    }

    /// Get all conditional formatting rules
    pub fn conditional_formats(&self) -> &[ConditionalFormatRule] {
        &self.conditional_formats
    }

    /// Get the conditional formatting rules that apply to a cell
    pub fn conditional_formats_at(&self, row: u32, col: u16) -> Vec<&ConditionalFormatRule> {
        self.conditional_formats
            .iter()
            .filter(|rule| rule.applies_to(row, col))
            .collect()
    }

    // === Internal ===

    fn validate_cell_position(&self, row: u32, col: u16) -> Result<()> {
        if row >= MAX_ROWS {
            return Err(Error::RowOutOfBounds(row, MAX_ROWS - 1));
        }
        if col >= MAX_COLS {
            return Err(Error::ColumnOutOfBounds(col, MAX_COLS - 1));
        }
        Ok(())
    }

    /// Get number of stored cells
    pub fn cell_count(&self) -> usize {
        self.cells.cell_count()
    }

    /// Check if the worksheet has no cells
    pub fn is_empty(&self) -> bool {
        self.cells.cell_count() == 0
    }

    /// Iterate over all stored cells in row-major order
    pub fn iter_cells(&self) -> impl Iterator<Item = (u32, u16, &CellData)> {
        self.cells.iter()
    }
}

/// Freeze pane settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreezePanes {
    /// Freeze row (first unfrozen row)
    pub row: u32,
    /// Freeze column (first unfrozen column)
    pub col: u16,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{BorderLineStyle, BorderStyle, Color};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_worksheet() {
        let ws = Worksheet::new("Checklist");
        assert_eq!(ws.name(), "Checklist");
        assert!(ws.is_empty());
        assert!(ws.freeze_panes().is_none());
    }

    #[test]
    fn test_set_cell_values() {
        let mut ws = Worksheet::new("Test");

        ws.set_cell_value_at(0, 0, "Hello").unwrap();
        ws.set_cell_value_at(0, 1, 42.0).unwrap();
        ws.set_cell_value_at(0, 2, true).unwrap();

        assert_eq!(ws.get_value_at(0, 0).as_string(), Some("Hello"));
        assert_eq!(ws.get_value_at(0, 1).as_number(), Some(42.0));
        assert_eq!(ws.get_value_at(0, 2).as_bool(), Some(true));
        assert_eq!(ws.get_value_at(0, 3), CellValue::Empty);
    }

    #[test]
    fn test_set_cell_formula() {
        let mut ws = Worksheet::new("Test");

        ws.set_cell_formula_at(0, 3, "IMAGE(\"http://x/a.png\", 4)")
            .unwrap();

        let value = ws.get_value_at(0, 3);
        assert_eq!(value.formula_text(), Some("=IMAGE(\"http://x/a.png\", 4)"));
    }

    #[test]
    fn test_out_of_bounds() {
        let mut ws = Worksheet::new("Test");
        assert!(matches!(
            ws.set_cell_value_at(MAX_ROWS, 0, 1.0),
            Err(Error::RowOutOfBounds(..))
        ));
        assert!(matches!(
            ws.set_cell_value_at(0, MAX_COLS, 1.0),
            Err(Error::ColumnOutOfBounds(..))
        ));
    }

    #[test]
    fn test_styles_deduplicate() {
        let mut ws = Worksheet::new("Test");
        let bordered = Style::new().border(BorderStyle::all(BorderLineStyle::Thin, Color::BLACK));

        ws.set_cell_style_at(0, 0, &bordered).unwrap();
        ws.set_cell_style_at(0, 1, &bordered).unwrap();

        let a = ws.cell_at(0, 0).unwrap().style_index;
        let b = ws.cell_at(0, 1).unwrap().style_index;
        assert_eq!(a, b);
        assert_eq!(ws.cell_style_at(0, 0), Some(&bordered));
        assert_eq!(ws.cell_style_at(5, 5), None);
    }

    #[test]
    fn test_range_style_creates_empty_cells() {
        let mut ws = Worksheet::new("Boxes");
        let style = Style::new().border(BorderStyle::all(BorderLineStyle::Thin, Color::BLACK));

        ws.set_range_style(&CellRange::parse("A2:F6").unwrap(), &style)
            .unwrap();

        assert_eq!(ws.cell_count(), 30);
        assert!(ws.get_value_at(5, 5).is_empty());
    }

    #[test]
    fn test_used_range() {
        let mut ws = Worksheet::new("Test");

        assert!(ws.used_range().is_none());

        ws.set_cell_value_at(5, 3, "A").unwrap();
        ws.set_cell_value_at(10, 7, "B").unwrap();

        let range = ws.used_range().unwrap();
        assert_eq!(range.start.row, 5);
        assert_eq!(range.start.col, 3);
        assert_eq!(range.end.row, 10);
        assert_eq!(range.end.col, 7);
    }

    #[test]
    fn test_row_column_dimensions() {
        let mut ws = Worksheet::new("Test");

        assert!((ws.row_height(0) - 15.0).abs() < 0.001);
        assert!((ws.column_width(0) - 8.43).abs() < 0.001);

        ws.set_row_height(5, 60.0);
        ws.set_column_width(3, 12.0);

        assert!((ws.row_height(5) - 60.0).abs() < 0.001);
        assert!((ws.column_width(3) - 12.0).abs() < 0.001);
        assert_eq!(ws.custom_row_heights().len(), 1);
        assert_eq!(ws.custom_column_widths().len(), 1);
    }

    #[test]
    fn test_merge_cells() {
        let mut ws = Worksheet::new("Test");

        ws.merge_cells(&CellRange::parse("A1:F1").unwrap()).unwrap();
        ws.merge_cells(&CellRange::parse("H1:M1").unwrap()).unwrap();
        assert_eq!(ws.merged_regions().len(), 2);

        let overlapping = CellRange::parse("F1:H1").unwrap();
        assert!(matches!(
            ws.merge_cells(&overlapping),
            Err(Error::MergedCellConflict(_))
        ));
    }

    #[test]
    fn test_freeze_panes() {
        let mut ws = Worksheet::new("Test");
        ws.set_freeze_panes(1, 0);
        assert_eq!(ws.freeze_panes(), Some(&FreezePanes { row: 1, col: 0 }));
        ws.set_freeze_panes(0, 0);
        assert!(ws.freeze_panes().is_none());
    }

    #[test]
    fn test_data_validations() {
        let mut ws = Worksheet::new("Test");
        ws.add_data_validation(
            DataValidation::list("TRUE,FALSE").with_range(CellRange::parse("A2:A5").unwrap()),
        );

        assert_eq!(ws.data_validations().len(), 1);
        assert_eq!(ws.data_validations()[0].sqref(), "A2:A5");
    }

    #[test]
    fn test_conditional_formatting() {
        let mut ws = Worksheet::new("Test");

        ws.add_conditional_format(
            ConditionalFormatRule::expression("$A2=TRUE")
                .with_range(CellRange::parse("A2:F2").unwrap())
                .with_format(Style::new().fill_color(Color::rgb(183, 225, 205))),
        );
        ws.add_conditional_format(
            ConditionalFormatRule::expression("$A2=FALSE")
                .with_range(CellRange::parse("A2:F2").unwrap())
                .with_format(Style::new().fill_color(Color::rgb(244, 199, 195))),
        );

        assert_eq!(ws.conditional_formats().len(), 2);
        assert_eq!(ws.conditional_formats_at(1, 0).len(), 2);
        assert_eq!(ws.conditional_formats_at(2, 0).len(), 0);
    }
}
