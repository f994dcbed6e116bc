//! Data validation
//!
//! Only list (dropdown) validation is modelled; the checklist uses it to
//! restrict the Caught column to `TRUE`/`FALSE`.
//!
//! ## Example
//!
//! ```rust
//! use dexsheets_core::{CellRange, DataValidation};
//!
//! let validation = DataValidation::list("TRUE,FALSE")
//!     .with_range(CellRange::parse("A2:A10").unwrap());
//!
//! assert_eq!(validation.formula1(), "\"TRUE,FALSE\"");
//! ```

use crate::cell::CellRange;

/// List validation rule for cells
#[derive(Debug, Clone, PartialEq)]
pub struct DataValidation {
    /// Either a comma-separated list of values or a `=`-prefixed range reference
    pub source: String,
    /// Cell ranges this validation applies to
    pub ranges: Vec<CellRange>,
    /// Allow blank/empty cells
    pub allow_blank: bool,
    /// Show the in-cell dropdown
    pub show_dropdown: bool,
    /// Show error alert when invalid data entered
    pub show_error_alert: bool,
    /// Error alert title
    pub error_title: Option<String>,
    /// Error alert message
    pub error_message: Option<String>,
}

impl DataValidation {
    /// Create a list validation (dropdown)
    pub fn list(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            ranges: Vec::new(),
            allow_blank: true,
            show_dropdown: true,
            show_error_alert: true,
            error_title: None,
            error_message: None,
        }
    }

    /// Add a cell range
    pub fn with_range(mut self, range: CellRange) -> Self {
        self.ranges.push(range);
        self
    }

    /// Set error alert
    pub fn with_error_message(mut self, title: impl Into<String>, message: impl Into<String>) -> Self {
        self.show_error_alert = true;
        self.error_title = Some(title.into());
        self.error_message = Some(message.into());
        self
    }

    /// The `formula1` text as stored in OOXML
    ///
    /// Inline lists are quoted, range references lose their leading `=`.
    pub fn formula1(&self) -> String {
        match self.source.strip_prefix('=') {
            Some(reference) => reference.to_string(),
            None => format!("\"{}\"", self.source),
        }
    }

    /// Space-separated `sqref` attribute value for the validation's ranges
    pub fn sqref(&self) -> String {
        self.ranges
            .iter()
            .map(|r| r.to_a1_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
