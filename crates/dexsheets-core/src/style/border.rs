//! Cell borders

use super::Color;

/// Line weight of a border edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BorderLineStyle {
    Thin,
    /// Used under header rows
    Medium,
}

impl BorderLineStyle {
    /// OOXML `style` attribute value
    pub fn xlsx_name(&self) -> &'static str {
        match self {
            BorderLineStyle::Thin => "thin",
            BorderLineStyle::Medium => "medium",
        }
    }
}

/// One drawn edge of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BorderEdge {
    pub style: BorderLineStyle,
    pub color: Color,
}

/// The four edges of a cell; `None` leaves an edge undrawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BorderStyle {
    pub left: Option<BorderEdge>,
    pub right: Option<BorderEdge>,
    pub top: Option<BorderEdge>,
    pub bottom: Option<BorderEdge>,
}

impl BorderStyle {
    /// Draw all four edges alike
    pub fn all(style: BorderLineStyle, color: Color) -> Self {
        let edge = Some(BorderEdge { style, color });
        Self {
            left: edge,
            right: edge,
            top: edge,
            bottom: edge,
        }
    }

    /// Replace the bottom edge
    pub fn with_bottom(mut self, style: BorderLineStyle, color: Color) -> Self {
        self.bottom = Some(BorderEdge { style, color });
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Edges in OOXML element order
    pub fn edges(&self) -> [(&'static str, Option<BorderEdge>); 4] {
        [
            ("left", self.left),
            ("right", self.right),
            ("top", self.top),
            ("bottom", self.bottom),
        ]
    }
}
