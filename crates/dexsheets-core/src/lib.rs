//! # dexsheets-core
//!
//! In-memory spreadsheet model for dexsheets.
//!
//! This crate holds everything the renderers write into before the workbook
//! is serialized:
//! - [`CellValue`] - Cell values (booleans, numbers, strings, formulas)
//! - [`CellAddress`] and [`CellRange`] - Cell addressing and ranges
//! - [`Style`] - Cell formatting (fonts, fills, borders, alignment)
//! - [`ConditionalFormatRule`] and [`DataValidation`] - Sheet-level rules
//! - [`Workbook`], [`Worksheet`] - The document structures
//!
//! ## Example
//!
//! ```rust
//! use dexsheets_core::{CellValue, Workbook, Worksheet};
//!
//! let mut sheet = Worksheet::new("Checklist");
//! sheet.set_cell_value_at(0, 0, "Caught").unwrap();
//! sheet.set_cell_value_at(1, 0, CellValue::Boolean(false)).unwrap();
//!
//! let mut workbook = Workbook::new();
//! workbook.push_worksheet(sheet).unwrap();
//! ```

pub mod cell;
pub mod conditional_format;
pub mod error;
pub mod style;
pub mod validation;
pub mod workbook;
pub mod worksheet;

pub use cell::{CellAddress, CellData, CellRange, CellValue};
pub use conditional_format::ConditionalFormatRule;
pub use error::{Error, Result};
pub use validation::DataValidation;
pub use workbook::Workbook;
pub use worksheet::{FreezePanes, Worksheet};

pub use style::{
    Alignment, BorderEdge, BorderLineStyle, BorderStyle, Color, FillStyle, FontStyle,
    HorizontalAlignment, Style, StylePool, VerticalAlignment,
};

/// Maximum number of rows in a worksheet (Excel limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet (Excel limit)
pub const MAX_COLS: u16 = 16_384;

/// Maximum length of a sheet name
pub const MAX_SHEET_NAME_LEN: usize = 31;
