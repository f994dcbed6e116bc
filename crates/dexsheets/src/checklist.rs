//! Checklist sheet: one row per species with a caught flag

use std::collections::HashMap;

use dexsheets_core::{
    CellAddress, CellRange, CellValue, ConditionalFormatRule, DataValidation, HorizontalAlignment,
    Worksheet,
};

use crate::data::{Catalog, GameTable, RecordStore};
use crate::error::Result;
use crate::games::GamePalette;
use crate::names;
use crate::sprites::{image_formula, SpriteCell, SpriteResolver};
use crate::theme;

/// Column headers, left to right
pub const HEADERS: [&str; 6] = ["Caught", "ID", "Name", "Image", "Preferred Game", "Backup Game"];

const COL_CAUGHT: u16 = 0;
const COL_ID: u16 = 1;
const COL_NAME: u16 = 2;
const COL_IMAGE: u16 = 3;
const COL_PREFERRED: u16 = 4;
const COL_BACKUP: u16 = 5;

const COLUMN_WIDTHS: [f64; 6] = [8.0, 6.0, 24.0, 12.0, 18.0, 18.0];

/// Inputs of the checklist sheet
#[derive(Debug, Clone, Copy)]
pub struct ChecklistContext<'a> {
    pub catalog: &'a Catalog,
    pub records: &'a RecordStore,
    pub games: &'a GameTable,
    pub sprites: &'a SpriteResolver,
    pub palette: &'a GamePalette,
}

/// Species key → caught-flag cell on the checklist sheet
///
/// Only [`render_checklist`] produces one, so a sheet that links back to the
/// checklist is always rendered after it.
#[derive(Debug, Clone)]
pub struct ChecklistIndex {
    sheet: String,
    cells: HashMap<String, CellAddress>,
    missing_sprites: usize,
    placeholder_records: usize,
}

impl ChecklistIndex {
    fn new(sheet: &str) -> Self {
        Self {
            sheet: sheet.to_string(),
            cells: HashMap::new(),
            missing_sprites: 0,
            placeholder_records: 0,
        }
    }

    /// Name of the sheet the addresses point into
    pub fn sheet_name(&self) -> &str {
        &self.sheet
    }

    /// Absolute address of a species' caught flag
    pub fn get(&self, key: &str) -> Option<CellAddress> {
        self.cells.get(key).copied()
    }

    /// Sheet-qualified reference to a species' caught flag (`Checklist!$A$2`)
    pub fn reference(&self, key: &str) -> Option<String> {
        self.get(key).map(|addr| addr.to_sheet_reference(&self.sheet))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.cells.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Rows rendered with a `TODO` image cell
    pub fn missing_sprites(&self) -> usize {
        self.missing_sprites
    }

    /// Rows rendered from a placeholder record
    pub fn placeholder_records(&self) -> usize {
        self.placeholder_records
    }
}

/// Render the checklist into `sheet`, returning the caught-flag index
pub fn render_checklist(sheet: &mut Worksheet, ctx: &ChecklistContext<'_>) -> Result<ChecklistIndex> {
    let mut index = ChecklistIndex::new(sheet.name());

    let header = theme::header();
    for (col, title) in (0u16..).zip(HEADERS) {
        sheet.set_cell_value_at(0, col, title)?;
        sheet.set_cell_style_at(0, col, &header)?;
    }
    sheet.set_freeze_panes(1, 0);
    for (col, width) in (0u16..).zip(COLUMN_WIDTHS) {
        sheet.set_column_width(col, width);
    }

    let body = theme::body();
    let flag = body.clone().horizontal_alignment(HorizontalAlignment::Center);
    let mut priority = 1;

    for (i, entry) in ctx.catalog.iter().enumerate() {
        let row = i as u32 + 1;
        let name = entry.name.as_str();

        sheet.set_cell_value_at(row, COL_CAUGHT, false)?;
        sheet.set_cell_style_at(row, COL_CAUGHT, &flag)?;

        let record = ctx.records.load(name);
        let id = match record.id {
            Some(id) => CellValue::from(id),
            None => {
                index.placeholder_records += 1;
                CellValue::from("?")
            }
        };
        sheet.set_cell_value_at(row, COL_ID, id)?;
        sheet.set_cell_style_at(row, COL_ID, &body)?;

        sheet.set_cell_value_at(row, COL_NAME, names::display_name(name))?;
        sheet.set_cell_style_at(row, COL_NAME, &body)?;

        match ctx.sprites.resolve_with_principal(name) {
            SpriteCell::Image(url) => sheet.set_cell_formula_at(row, COL_IMAGE, &image_formula(&url))?,
            SpriteCell::Missing => {
                index.missing_sprites += 1;
                sheet.set_cell_value_at(row, COL_IMAGE, format!("TODO: {}", name))?;
            }
        }
        sheet.set_cell_style_at(row, COL_IMAGE, &body)?;

        let preference = ctx.games.get(name);
        let preferred = preference.and_then(|p| p.preferred.as_deref());
        let backup = preference.and_then(|p| p.backup.as_deref());
        for (col, game) in [(COL_PREFERRED, preferred), (COL_BACKUP, backup)] {
            match game {
                Some(game) => {
                    let badge = ctx.palette.badge(game);
                    let style = body.clone().fill_color(badge.fill).font_color(badge.font);
                    sheet.set_cell_value_at(row, col, game)?;
                    sheet.set_cell_style_at(row, col, &style)?;
                }
                None => sheet.set_cell_style_at(row, col, &body)?,
            }
        }

        sheet.set_row_height(row, theme::IMAGE_ROW_HEIGHT);

        let flag_cell = CellAddress::new(row, COL_CAUGHT).with_absolute_col();
        let span = CellRange::from_indices(row, COL_CAUGHT, row, COL_BACKUP);
        sheet.add_conditional_format(
            ConditionalFormatRule::expression(format!("{}=TRUE", flag_cell))
                .with_range(span)
                .with_format(theme::caught())
                .with_priority(priority),
        );
        sheet.add_conditional_format(
            ConditionalFormatRule::expression(format!("{}=FALSE", flag_cell))
                .with_range(span)
                .with_format(theme::missing())
                .with_priority(priority + 1),
        );
        priority += 2;

        let address = CellAddress::absolute(row, COL_CAUGHT);
        if index.cells.insert(name.to_string(), address).is_some() {
            tracing::warn!("{} listed twice in the catalog, linking the later row", name);
        }
    }

    if !ctx.catalog.is_empty() {
        let last = ctx.catalog.len() as u32;
        sheet.add_data_validation(
            DataValidation::list("TRUE,FALSE")
                .with_range(CellRange::from_indices(1, COL_CAUGHT, last, COL_CAUGHT))
                .with_error_message("Caught", "Choose TRUE or FALSE"),
        );
    }

    tracing::info!(
        species = index.len(),
        missing_sprites = index.missing_sprites,
        placeholders = index.placeholder_records,
        "rendered checklist"
    );
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{CatalogEntry, GamePreference, SpeciesRecord};
    use crate::games::GamePalette;
    use crate::sprites::SpriteHost;
    use dexsheets_core::style::Color;
    use pretty_assertions::assert_eq;
    use std::fs;

    struct Fixture {
        _dir: tempfile::TempDir,
        catalog: Catalog,
        records: RecordStore,
        games: GameTable,
        sprites: SpriteResolver,
        palette: GamePalette,
    }

    impl Fixture {
        fn new(names: &[&str]) -> Self {
            let dir = tempfile::tempdir().unwrap();
            let sprite_dir = dir.path().join("sprites");
            fs::create_dir_all(&sprite_dir).unwrap();

            Self {
                catalog: Catalog::new(names.iter().map(|n| CatalogEntry::new(*n, "")).collect()),
                records: RecordStore::new(dir.path().join("pokemon")),
                games: GameTable::default(),
                sprites: SpriteResolver::new(
                    SpriteHost::Local {
                        base_url: "http://localhost:8000/sprites".into(),
                    },
                    sprite_dir,
                ),
                palette: GamePalette::new(),
                _dir: dir,
            }
        }

        fn add_sprite(&self, name: &str) {
            fs::write(self.sprites.sprite_dir().join(format!("{}.png", name)), b"png").unwrap();
        }

        fn add_record(&self, name: &str, id: u32) {
            self.records
                .store(&SpeciesRecord {
                    id: Some(id),
                    name: name.into(),
                    sprite: None,
                })
                .unwrap();
        }

        fn render(&self) -> (Worksheet, ChecklistIndex) {
            let mut sheet = Worksheet::new("Checklist");
            let ctx = ChecklistContext {
                catalog: &self.catalog,
                records: &self.records,
                games: &self.games,
                sprites: &self.sprites,
                palette: &self.palette,
            };
            let index = render_checklist(&mut sheet, &ctx).unwrap();
            (sheet, index)
        }
    }

    #[test]
    fn test_header_row() {
        let (sheet, _) = Fixture::new(&[]).render();

        let headers: Vec<_> = (0..6).map(|c| sheet.get_value_at(0, c).to_string()).collect();
        assert_eq!(headers, HEADERS.to_vec());
        assert!(sheet.cell_style_at(0, 0).unwrap().font.bold);
        assert_eq!(sheet.freeze_panes().map(|p| (p.row, p.col)), Some((1, 0)));
        assert!(sheet.data_validations().is_empty());
    }

    #[test]
    fn test_species_row() {
        let fixture = Fixture::new(&["bulbasaur", "mr-mime"]);
        fixture.add_sprite("bulbasaur");
        fixture.add_record("bulbasaur", 1);
        let (sheet, index) = fixture.render();

        assert_eq!(sheet.get_value_at(1, 0), CellValue::Boolean(false));
        assert_eq!(sheet.get_value_at(1, 1), CellValue::Number(1.0));
        assert_eq!(sheet.get_value_at(1, 2), CellValue::string("Bulbasaur"));
        assert_eq!(
            sheet.get_value_at(1, 3),
            CellValue::formula("=IMAGE(\"http://localhost:8000/sprites/bulbasaur.png\", 4)")
        );

        // No record and no sprite
        assert_eq!(sheet.get_value_at(2, 1), CellValue::string("?"));
        assert_eq!(sheet.get_value_at(2, 2), CellValue::string("Mr Mime"));
        assert_eq!(sheet.get_value_at(2, 3), CellValue::string("TODO: mr-mime"));

        assert_eq!(index.missing_sprites(), 1);
        assert_eq!(index.placeholder_records(), 1);
        assert_eq!(sheet.row_height(1), 60.0);
        assert!(sheet.cell_style_at(2, 5).is_some_and(|s| !s.border.is_empty()));
    }

    #[test]
    fn test_index_references() {
        let fixture = Fixture::new(&["bulbasaur", "charizard", "charizard-gmax"]);
        let (_, index) = fixture.render();

        assert_eq!(index.len(), 3);
        assert_eq!(index.reference("bulbasaur").as_deref(), Some("Checklist!$A$2"));
        assert_eq!(index.reference("charizard-gmax").as_deref(), Some("Checklist!$A$4"));
        assert_ne!(index.get("charizard"), index.get("charizard-gmax"));
        assert!(index.reference("mew").is_none());
    }

    #[test]
    fn test_gigantamax_row() {
        let fixture = Fixture::new(&["charizard-gmax"]);
        fixture.add_sprite("charizard");
        fixture.add_record("charizard", 6);
        let (sheet, _) = fixture.render();

        assert_eq!(sheet.get_value_at(1, 2), CellValue::string("Gigantamax Charizard"));
        assert_eq!(sheet.get_value_at(1, 1), CellValue::Number(6.0));
        assert_eq!(
            sheet.get_value_at(1, 3).formula_text(),
            Some("=IMAGE(\"http://localhost:8000/sprites/charizard.png\", 4)")
        );
    }

    #[test]
    fn test_row_conditional_formats() {
        let (sheet, _) = Fixture::new(&["bulbasaur", "ivysaur"]).render();

        let rules = sheet.conditional_formats_at(2, 4);
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].sqref(), "A3:F3");

        let formulas: Vec<_> = sheet
            .conditional_formats()
            .iter()
            .map(|r| r.formula.as_str())
            .collect();
        assert_eq!(formulas, vec!["$A2=TRUE", "$A2=FALSE", "$A3=TRUE", "$A3=FALSE"]);

        let priorities: Vec<_> = sheet.conditional_formats().iter().map(|r| r.priority).collect();
        assert_eq!(priorities, vec![1, 2, 3, 4]);

        let missing = sheet.conditional_formats()[1].format.as_ref().unwrap();
        assert_eq!(missing.font.color, Color::WHITE);
    }

    #[test]
    fn test_caught_validation_covers_column() {
        let (sheet, _) = Fixture::new(&["bulbasaur", "ivysaur", "venusaur"]).render();

        let validation = &sheet.data_validations()[0];
        assert_eq!(validation.sqref(), "A2:A4");
        assert_eq!(validation.formula1(), "\"TRUE,FALSE\"");
    }

    #[test]
    fn test_game_badges() {
        let mut fixture = Fixture::new(&["bulbasaur", "ivysaur"]);
        fixture.games.insert(
            "bulbasaur",
            GamePreference {
                preferred: Some("Sword".into()),
                backup: Some("Stadium".into()),
            },
        );
        let (sheet, _) = fixture.render();

        assert_eq!(sheet.get_value_at(1, 4), CellValue::string("Sword"));
        let sword = sheet.cell_style_at(1, 4).unwrap();
        assert_eq!(sword.fill.color(), Some(fixture.palette.badge("Sword").fill));

        let stadium = sheet.cell_style_at(1, 5).unwrap();
        assert_eq!(stadium.fill.color(), Some(Color::LIGHT_GRAY));

        // Absent preference leaves the cells blank
        assert_eq!(sheet.get_value_at(2, 4), CellValue::Empty);
        assert!(sheet.cell_style_at(2, 4).unwrap().fill.is_none());
    }
}
