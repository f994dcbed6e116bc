//! Conditional formatting
//!
//! Rules are attached to a worksheet and carry their own differential
//! format, which the writer collects into the workbook's dxf table.
//!
//! ## Example
//!
//! ```rust
//! use dexsheets_core::{CellRange, ConditionalFormatRule};
//! use dexsheets_core::style::{Color, Style};
//!
//! let rule = ConditionalFormatRule::expression("$A2=TRUE")
//!     .with_range(CellRange::parse("A2:F2").unwrap())
//!     .with_format(Style::new().fill_color(Color::rgb(183, 225, 205)));
//!
//! assert!(rule.applies_to(1, 5));
//! ```

use crate::cell::CellRange;
use crate::style::Style;

/// An expression rule: the format applies where the formula is TRUE
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConditionalFormatRule {
    /// Formula without a leading `=`
    pub formula: String,
    /// Cell ranges this rule applies to
    pub ranges: Vec<CellRange>,
    /// Priority (lower = higher priority)
    pub priority: u32,
    /// Format to apply when rule matches
    pub format: Option<Style>,
}

impl ConditionalFormatRule {
    /// Highlight cells where the formula evaluates to TRUE
    ///
    /// A leading `=` is stripped; OOXML stores the formula bare.
    pub fn expression(formula: impl Into<String>) -> Self {
        let formula = formula.into();
        let formula = match formula.strip_prefix('=') {
            Some(rest) => rest.to_string(),
            None => formula,
        };
        Self {
            formula,
            priority: 1,
            ..Self::default()
        }
    }

    // === Builder methods ===

    /// Add a cell range to this rule
    pub fn with_range(mut self, range: CellRange) -> Self {
        self.ranges.push(range);
        self
    }

    /// Set the format to apply when rule matches
    pub fn with_format(mut self, style: Style) -> Self {
        self.format = Some(style);
        self
    }

    /// Set the priority (lower = higher priority)
    pub fn with_priority(mut self, priority: u32) -> Self {
        self.priority = priority;
        self
    }

    /// Check if this rule applies to a specific cell
    pub fn applies_to(&self, row: u32, col: u16) -> bool {
        self.ranges.iter().any(|r| r.contains(row, col))
    }

    /// Space-separated `sqref` attribute value for the rule's ranges
    pub fn sqref(&self) -> String {
        self.ranges
            .iter()
            .map(|r| r.to_a1_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
