//! Shared cell formats for the checklist and box sheets

use dexsheets_core::style::{
    BorderLineStyle, BorderStyle, Color, HorizontalAlignment, Style, VerticalAlignment,
};

/// Conditional fill of a caught species
pub(crate) const CAUGHT_FILL: Color = Color::rgb(0xB7, 0xE1, 0xCD);

/// Conditional fill of a species still missing
pub(crate) const MISSING_FILL: Color = Color::rgb(0xEA, 0x43, 0x35);

/// Height of rows holding a sprite image, in points
pub(crate) const IMAGE_ROW_HEIGHT: f64 = 60.0;

pub(crate) fn thin_border() -> BorderStyle {
    BorderStyle::all(BorderLineStyle::Thin, Color::BLACK)
}

/// Bordered, vertically centered body cell
pub(crate) fn body() -> Style {
    Style::new()
        .border(thin_border())
        .vertical_alignment(VerticalAlignment::Center)
}

pub(crate) fn header() -> Style {
    Style::new()
        .bold(true)
        .horizontal_alignment(HorizontalAlignment::Center)
        .border(thin_border().with_bottom(BorderLineStyle::Medium, Color::BLACK))
}

pub(crate) fn box_title() -> Style {
    Style::new()
        .bold(true)
        .horizontal_alignment(HorizontalAlignment::Center)
        .vertical_alignment(VerticalAlignment::Center)
        .border(thin_border())
}

pub(crate) fn caught() -> Style {
    Style::new().fill_color(CAUGHT_FILL)
}

pub(crate) fn missing() -> Style {
    Style::new().fill_color(MISSING_FILL).font_color(Color::WHITE)
}
