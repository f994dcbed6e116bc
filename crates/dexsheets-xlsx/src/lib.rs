//! # dexsheets-xlsx
//!
//! XLSX (Office Open XML) writer for dexsheets workbooks.
//!
//! ```rust
//! use std::io::Cursor;
//! use dexsheets_core::{Workbook, Worksheet};
//! use dexsheets_xlsx::XlsxWriter;
//!
//! let mut workbook = Workbook::new();
//! workbook.push_worksheet(Worksheet::new("Checklist")).unwrap();
//!
//! let mut buffer = Cursor::new(Vec::new());
//! XlsxWriter::write(&workbook, &mut buffer).unwrap();
//! ```

pub mod error;
pub mod writer;

mod styles;

pub use error::{XlsxError, XlsxResult};
pub use writer::XlsxWriter;
