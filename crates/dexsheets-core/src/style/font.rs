//! Font settings

use super::Color;

/// Font family every cell is written with
pub const FONT_NAME: &str = "Calibri";

/// Font size in points
pub const FONT_SIZE: f64 = 11.0;

/// The parts of a cell's font that vary between cells
///
/// Family and size are fixed for the whole workbook; see [`FONT_NAME`] and
/// [`FONT_SIZE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FontStyle {
    pub bold: bool,
    /// `Color::Auto` leaves the theme's text color
    pub color: Color,
}

impl FontStyle {
    /// True when the font differs from the workbook default
    pub fn is_custom(&self) -> bool {
        *self != Self::default()
    }
}
