//! Boxes sheet: storage boxes laid out two abreast

use dexsheets_core::{CellRange, ConditionalFormatRule, Worksheet};

use crate::checklist::ChecklistIndex;
use crate::data::{BoxLayout, BoxSpec, Slot, BOX_SLOTS};
use crate::error::Result;
use crate::sprites::{image_formula, SpriteCell, SpriteResolver};
use crate::theme;

/// Slot columns per box
pub const BOX_COLUMNS: u16 = 6;

/// Slot rows per box
pub const BOX_ROWS: u32 = 5;

/// Title row plus slot rows
const BOX_HEIGHT: u32 = 1 + BOX_ROWS;

/// Column offset of the right-hand box of a pair (one spacer column)
const PAIR_OFFSET: u16 = BOX_COLUMNS + 1;

const SLOT_WIDTH: f64 = 12.0;
const SPACER_WIDTH: f64 = 3.0;
const TITLE_HEIGHT: f64 = 20.0;

/// Counts from rendering the boxes sheet
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoxReport {
    pub boxes: usize,
    /// Slot cells written, always `boxes * 30`
    pub slots: usize,
    /// Slots linked to a checklist row
    pub linked: usize,
    /// Slots naming a species the checklist lacks
    pub unlinked: usize,
    /// Empty or unlisted slots
    pub empty: usize,
}

/// Position of the box being rendered and the slot within it
///
/// Moves forward only: slot by slot within a box, then to the right-hand
/// box of the pair, then down to the next pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoxCursor {
    top: u32,
    left: u16,
    slot: usize,
}

impl BoxCursor {
    /// Cursor at the first slot of the first box (A1)
    pub fn new() -> Self {
        Self::default()
    }

    /// Top-left cell of the current box (its title row)
    pub fn origin(&self) -> (u32, u16) {
        (self.top, self.left)
    }

    /// Slot index within the current box
    pub fn slot(&self) -> usize {
        self.slot
    }

    /// Cell of the current slot
    pub fn slot_position(&self) -> (u32, u16) {
        let row = self.top + 1 + (self.slot / BOX_COLUMNS as usize) as u32;
        let col = self.left + (self.slot % BOX_COLUMNS as usize) as u16;
        (row, col)
    }

    /// Title cells of the current box
    pub fn title_range(&self) -> CellRange {
        CellRange::from_indices(self.top, self.left, self.top, self.left + BOX_COLUMNS - 1)
    }

    pub fn advance_slot(&mut self) {
        self.slot += 1;
    }

    /// Move to the first slot of the next box
    pub fn next_box(&mut self) {
        self.slot = 0;
        if self.left == 0 {
            self.left = PAIR_OFFSET;
        } else {
            self.left = 0;
            self.top += BOX_HEIGHT + 1;
        }
    }
}

/// Render every box of `layout` into `sheet`.
///
/// Slots link to the checklist through `index`; a slot whose species has
/// no checklist row is still drawn, just without the caught highlight.
pub fn render_boxes(
    sheet: &mut Worksheet,
    layout: &BoxLayout,
    index: &ChecklistIndex,
    sprites: &SpriteResolver,
) -> Result<BoxReport> {
    let mut renderer = BoxRenderer {
        sheet,
        index,
        sprites,
        priority: 1,
        report: BoxReport::default(),
    };
    let mut cursor = BoxCursor::new();

    for box_spec in &layout.boxes {
        renderer.render_box(box_spec, &mut cursor)?;
        cursor.next_box();
    }

    let report = renderer.report;
    if report.boxes > 0 {
        let last_col = if report.boxes > 1 {
            PAIR_OFFSET + BOX_COLUMNS - 1
        } else {
            BOX_COLUMNS - 1
        };
        for col in 0..=last_col {
            let width = if col == BOX_COLUMNS { SPACER_WIDTH } else { SLOT_WIDTH };
            renderer.sheet.set_column_width(col, width);
        }
    }

    tracing::info!(
        boxes = report.boxes,
        linked = report.linked,
        unlinked = report.unlinked,
        "rendered boxes"
    );
    Ok(report)
}

struct BoxRenderer<'a> {
    sheet: &'a mut Worksheet,
    index: &'a ChecklistIndex,
    sprites: &'a SpriteResolver,
    /// Next conditional-format priority on the sheet
    priority: u32,
    report: BoxReport,
}

impl BoxRenderer<'_> {
    fn render_box(&mut self, box_spec: &BoxSpec, cursor: &mut BoxCursor) -> Result<()> {
        if box_spec.pokemon.len() > BOX_SLOTS {
            tracing::warn!(
                "box '{}' lists {} entries, ignoring all past {}",
                box_spec.title,
                box_spec.pokemon.len(),
                BOX_SLOTS
            );
        }

        let (top, left) = cursor.origin();
        let title = cursor.title_range();
        self.sheet.set_cell_value_at(top, left, box_spec.title.as_str())?;
        self.sheet.set_range_style(&title, &theme::box_title())?;
        self.sheet.merge_cells(&title)?;
        self.sheet.set_row_height(top, TITLE_HEIGHT);

        let body = theme::body();
        let mut entries = box_spec.pokemon.iter();
        for _ in 0..BOX_SLOTS {
            let (row, col) = cursor.slot_position();
            match entries.next() {
                Some(Some(slot)) => self.render_slot(row, col, slot)?,
                _ => self.report.empty += 1,
            }
            self.sheet.set_cell_style_at(row, col, &body)?;
            self.sheet.set_row_height(row, theme::IMAGE_ROW_HEIGHT);
            self.report.slots += 1;
            cursor.advance_slot();
        }

        self.report.boxes += 1;
        Ok(())
    }

    fn render_slot(&mut self, row: u32, col: u16, slot: &Slot) -> Result<()> {
        let sprite = slot.sprite_name();
        match self.sprites.resolve_with_principal(sprite) {
            SpriteCell::Image(url) => self.sheet.set_cell_formula_at(row, col, &image_formula(&url))?,
            SpriteCell::Missing => self
                .sheet
                .set_cell_value_at(row, col, format!("TODO: {}", sprite))?,
        }

        let key = slot.key();
        match self.index.reference(&key) {
            Some(reference) => {
                self.sheet.add_conditional_format(
                    ConditionalFormatRule::expression(format!("INDIRECT(\"{}\")=TRUE", reference))
                        .with_range(CellRange::from_indices(row, col, row, col))
                        .with_format(theme::caught())
                        .with_priority(self.priority),
                );
                self.priority += 1;
                self.report.linked += 1;
            }
            None => {
                tracing::warn!("box slot {} has no checklist row, leaving it unlinked", key);
                self.report.unlinked += 1;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_walks_slots_row_by_row() {
        let mut cursor = BoxCursor::new();
        assert_eq!(cursor.slot_position(), (1, 0));

        for _ in 0..5 {
            cursor.advance_slot();
        }
        assert_eq!(cursor.slot_position(), (1, 5));

        cursor.advance_slot();
        assert_eq!(cursor.slot_position(), (2, 0));

        for _ in 6..29 {
            cursor.advance_slot();
        }
        assert_eq!(cursor.slot(), 29);
        assert_eq!(cursor.slot_position(), (5, 5));
    }

    #[test]
    fn test_cursor_pairs_boxes() {
        let mut cursor = BoxCursor::new();
        assert_eq!(cursor.origin(), (0, 0));
        assert_eq!(cursor.title_range().to_string(), "A1:F1");

        cursor.advance_slot();
        cursor.next_box();
        assert_eq!(cursor.slot(), 0);
        assert_eq!(cursor.origin(), (0, 7));
        assert_eq!(cursor.title_range().to_string(), "H1:M1");
        assert_eq!(cursor.slot_position(), (1, 7));

        cursor.next_box();
        assert_eq!(cursor.origin(), (7, 0));
        assert_eq!(cursor.title_range().to_string(), "A8:F8");

        cursor.next_box();
        assert_eq!(cursor.origin(), (7, 7));
    }
}
