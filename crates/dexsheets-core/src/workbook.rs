//! Workbook type - the main document structure

use crate::error::{Error, Result};
use crate::worksheet::Worksheet;
use crate::MAX_SHEET_NAME_LEN;

/// A workbook (spreadsheet document)
///
/// Sheets keep the order they were added in; the writer emits them in that
/// order and the first one becomes the active tab.
#[derive(Debug, Default)]
pub struct Workbook {
    worksheets: Vec<Worksheet>,
}

impl Workbook {
    /// Create an empty workbook with no worksheets
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of worksheets
    pub fn sheet_count(&self) -> usize {
        self.worksheets.len()
    }

    /// Check if the workbook has no worksheets
    pub fn is_empty(&self) -> bool {
        self.worksheets.is_empty()
    }

    /// Get a worksheet by index
    pub fn worksheet(&self, index: usize) -> Option<&Worksheet> {
        self.worksheets.get(index)
    }

    /// Get a worksheet by name
    pub fn worksheet_by_name(&self, name: &str) -> Option<&Worksheet> {
        self.worksheets.iter().find(|ws| ws.name() == name)
    }

    /// Get the index of a worksheet by name
    pub fn sheet_index(&self, name: &str) -> Option<usize> {
        self.worksheets.iter().position(|ws| ws.name() == name)
    }

    /// Iterate over worksheets in tab order
    pub fn worksheets(&self) -> impl Iterator<Item = &Worksheet> {
        self.worksheets.iter()
    }

    /// Append an already populated worksheet, returning its index
    pub fn push_worksheet(&mut self, sheet: Worksheet) -> Result<usize> {
        self.validate_sheet_name(sheet.name())?;
        self.worksheets.push(sheet);
        Ok(self.worksheets.len() - 1)
    }

    fn validate_sheet_name(&self, name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(Error::InvalidSheetName("Sheet name cannot be empty".into()));
        }
        if name.chars().count() > MAX_SHEET_NAME_LEN {
            return Err(Error::InvalidSheetName(format!(
                "Sheet name too long (max {} characters)",
                MAX_SHEET_NAME_LEN
            )));
        }

        const INVALID_CHARS: &[char] = &[':', '\\', '/', '?', '*', '[', ']'];
        if let Some(c) = INVALID_CHARS.iter().find(|c| name.contains(**c)) {
            return Err(Error::InvalidSheetName(format!(
                "Sheet name cannot contain '{}'",
                c
            )));
        }

        // Case-insensitive, like Excel
        let name_lower = name.to_lowercase();
        if self
            .worksheets
            .iter()
            .any(|ws| ws.name().to_lowercase() == name_lower)
        {
            return Err(Error::DuplicateSheetName(name.into()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn push(wb: &mut Workbook, name: &str) -> Result<usize> {
        wb.push_worksheet(Worksheet::new(name))
    }

    #[test]
    fn test_new_workbook() {
        let wb = Workbook::new();
        assert!(wb.is_empty());
        assert_eq!(wb.sheet_count(), 0);
    }

    #[test]
    fn test_push_worksheets() {
        let mut wb = Workbook::new();

        assert_eq!(push(&mut wb, "Checklist").unwrap(), 0);
        assert_eq!(push(&mut wb, "Boxes").unwrap(), 1);

        let names: Vec<_> = wb.worksheets().map(|ws| ws.name()).collect();
        assert_eq!(names, vec!["Checklist", "Boxes"]);
    }

    #[test]
    fn test_duplicate_name() {
        let mut wb = Workbook::new();
        push(&mut wb, "Boxes").unwrap();

        assert!(matches!(
            push(&mut wb, "boxes"),
            Err(Error::DuplicateSheetName(_))
        ));
        assert_eq!(wb.sheet_count(), 1);
    }

    #[test]
    fn test_invalid_sheet_name() {
        let mut wb = Workbook::new();

        assert!(push(&mut wb, "").is_err());
        assert!(push(&mut wb, "Box/1").is_err());
        assert!(push(&mut wb, "[Boxes]").is_err());
        assert!(push(&mut wb, &"x".repeat(32)).is_err());
        assert!(push(&mut wb, &"x".repeat(31)).is_ok());
    }

    #[test]
    fn test_push_keeps_contents() {
        let mut wb = Workbook::new();
        let mut sheet = Worksheet::new("Checklist");
        sheet.set_cell_value_at(0, 0, "Caught").unwrap();

        assert_eq!(wb.push_worksheet(sheet).unwrap(), 0);
        assert_eq!(
            wb.worksheet(0).unwrap().get_value_at(0, 0).as_string(),
            Some("Caught")
        );
    }

    #[test]
    fn test_worksheet_by_name() {
        let mut wb = Workbook::new();
        push(&mut wb, "Checklist").unwrap();
        push(&mut wb, "Boxes").unwrap();

        assert_eq!(wb.worksheet_by_name("Boxes").map(|ws| ws.name()), Some("Boxes"));
        assert_eq!(wb.sheet_index("Checklist"), Some(0));
        assert!(wb.worksheet_by_name("Missing").is_none());
    }
}
