//! Checklist and box rendering into worksheets

use std::fs;
use std::path::Path;

use dexsheets::{
    render_boxes, render_checklist, BoxLayout, BoxReport, BoxSpec, Catalog, CatalogEntry,
    ChecklistContext, ChecklistIndex, GamePalette, GameTable, RecordStore, Slot, SpriteHost,
    SpriteResolver,
};
use dexsheets_core::{CellValue, Worksheet};
use pretty_assertions::assert_eq;

struct Env {
    dir: tempfile::TempDir,
    sprites: SpriteResolver,
}

impl Env {
    fn new(sprites: &[&str]) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let sprite_dir = dir.path().join("sprites");
        fs::create_dir_all(&sprite_dir).unwrap();
        for name in sprites {
            fs::write(sprite_dir.join(format!("{}.png", name)), b"png").unwrap();
        }
        let sprites = SpriteResolver::new(
            SpriteHost::Local {
                base_url: "http://localhost:8000/sprites".into(),
            },
            sprite_dir,
        );
        Self { dir, sprites }
    }

    fn records(&self) -> RecordStore {
        RecordStore::new(self.dir.path().join("pokemon"))
    }

    fn checklist(&self, names: &[&str]) -> (Worksheet, ChecklistIndex) {
        let catalog = Catalog::new(names.iter().map(|n| CatalogEntry::new(*n, "")).collect());
        let records = self.records();
        let games = GameTable::default();
        let palette = GamePalette::new();
        let ctx = ChecklistContext {
            catalog: &catalog,
            records: &records,
            games: &games,
            sprites: &self.sprites,
            palette: &palette,
        };

        let mut sheet = Worksheet::new("Checklist");
        let index = render_checklist(&mut sheet, &ctx).unwrap();
        (sheet, index)
    }

    fn boxes(&self, index: &ChecklistIndex, boxes: Vec<BoxSpec>) -> (Worksheet, BoxReport) {
        let mut sheet = Worksheet::new("Boxes");
        let report = render_boxes(&mut sheet, &BoxLayout::new(boxes), index, &self.sprites).unwrap();
        (sheet, report)
    }
}

fn named_box(title: &str, names: &[&str]) -> BoxSpec {
    BoxSpec {
        title: title.into(),
        pokemon: names.iter().map(|n| Some(Slot::Name(n.to_string()))).collect(),
    }
}

fn expression(sheet: &Worksheet, row: u32, col: u16) -> Option<String> {
    let rules = sheet.conditional_formats_at(row, col);
    match rules.as_slice() {
        [] => None,
        [rule] => Some(rule.formula.clone()),
        _ => panic!("more than one rule on ({}, {})", row, col),
    }
}

/// Count cells inside the 6x5 grid below a box origin that carry a style
fn styled_slots(sheet: &Worksheet, top: u32, left: u16) -> usize {
    (top + 1..top + 6)
        .flat_map(|row| (left..left + 6).map(move |col| (row, col)))
        .filter(|(row, col)| sheet.cell_style_at(*row, *col).is_some())
        .count()
}

#[test]
fn test_checklist_image_cells_follow_sprite_files() {
    let env = Env::new(&["bulbasaur", "pikachu"]);
    let names = ["bulbasaur", "ivysaur", "pikachu", "mr-mime"];
    let (sheet, index) = env.checklist(&names);

    for (i, name) in names.iter().enumerate() {
        let value = sheet.get_value_at(i as u32 + 1, 3);
        if Path::new(&env.sprites.sprite_dir().join(format!("{}.png", name))).exists() {
            assert_eq!(
                value.formula_text(),
                Some(format!("=IMAGE(\"http://localhost:8000/sprites/{}.png\", 4)", name).as_str())
            );
        } else {
            assert_eq!(value, CellValue::string(format!("TODO: {}", name)));
        }
    }
    assert_eq!(index.missing_sprites(), 2);
}

#[test]
fn test_index_covers_every_species() {
    let env = Env::new(&[]);
    let names = ["bulbasaur", "charizard", "charizard-gmax", "mew"];
    let (_, index) = env.checklist(&names);

    assert_eq!(index.len(), names.len());
    for (i, name) in names.iter().enumerate() {
        assert_eq!(
            index.reference(name),
            Some(format!("Checklist!$A${}", i + 2))
        );
    }
}

#[test]
fn test_every_box_has_thirty_slots() {
    let env = Env::new(&[]);
    let (_, index) = env.checklist(&["bulbasaur"]);

    let crowded: Vec<&str> = std::iter::repeat("bulbasaur").take(45).collect();
    let (sheet, report) = env.boxes(
        &index,
        vec![
            named_box("Empty", &[]),
            named_box("Partial", &["bulbasaur", "bulbasaur"]),
            named_box("Crowded", &crowded),
        ],
    );

    assert_eq!(report.boxes, 3);
    assert_eq!(report.slots, 90);
    assert_eq!(report.linked, 32);
    assert_eq!(report.empty, 58);

    assert_eq!(styled_slots(&sheet, 0, 0), 30);
    assert_eq!(styled_slots(&sheet, 0, 7), 30);
    assert_eq!(styled_slots(&sheet, 7, 0), 30);
    // Entries past thirty are dropped, not spilled below the box
    assert!(sheet.cell_at(13, 0).is_none());
}

#[test]
fn test_two_boxes_side_by_side() {
    let env = Env::new(&[]);
    let (_, index) = env.checklist(&["bulbasaur", "ivysaur"]);
    let (sheet, _) = env.boxes(
        &index,
        vec![
            named_box("Box 1", &["bulbasaur"]),
            named_box("Box 2", &["ivysaur"]),
        ],
    );

    assert_eq!(sheet.get_value_at(0, 0), CellValue::string("Box 1"));
    assert_eq!(sheet.get_value_at(0, 7), CellValue::string("Box 2"));

    let merged: Vec<_> = sheet.merged_regions().iter().map(|r| r.to_string()).collect();
    assert_eq!(merged, vec!["A1:F1", "H1:M1"]);

    assert_eq!(
        expression(&sheet, 1, 0).as_deref(),
        Some("INDIRECT(\"Checklist!$A$2\")=TRUE")
    );
    assert_eq!(
        expression(&sheet, 1, 7).as_deref(),
        Some("INDIRECT(\"Checklist!$A$3\")=TRUE")
    );
    // Spacer column stays empty
    assert!(sheet.cell_at(1, 6).is_none());
    assert_eq!(sheet.column_width(6), 3.0);
}

#[test]
fn test_third_box_starts_below_pair() {
    let env = Env::new(&[]);
    let (_, index) = env.checklist(&[]);
    let (sheet, _) = env.boxes(
        &index,
        vec![named_box("1", &[]), named_box("2", &[]), named_box("3", &[])],
    );

    assert_eq!(sheet.get_value_at(7, 0), CellValue::string("3"));
    // Spacer row between pairs
    assert!(sheet.cell_at(6, 0).is_none());
}

#[test]
fn test_unknown_slot_is_rendered_unlinked() {
    let env = Env::new(&["mew"]);
    let (_, index) = env.checklist(&["bulbasaur"]);
    let (sheet, report) = env.boxes(&index, vec![named_box("Box 1", &["mew", "missingno"])]);

    assert_eq!(report.linked, 0);
    assert_eq!(report.unlinked, 2);
    assert_eq!(
        sheet.get_value_at(1, 0).formula_text(),
        Some("=IMAGE(\"http://localhost:8000/sprites/mew.png\", 4)")
    );
    assert_eq!(sheet.get_value_at(1, 1), CellValue::string("TODO: missingno"));
    assert_eq!(expression(&sheet, 1, 0), None);
    assert!(sheet.cell_style_at(1, 1).is_some());
}

#[test]
fn test_gigantamax_slot_links_to_its_own_row() {
    let env = Env::new(&["charizard"]);
    let (sheet, index) = env.checklist(&["charizard", "charizard-gmax"]);

    assert_eq!(sheet.get_value_at(1, 2), CellValue::string("Charizard"));
    assert_eq!(sheet.get_value_at(2, 2), CellValue::string("Gigantamax Charizard"));

    let (boxes, report) = env.boxes(
        &index,
        vec![BoxSpec {
            title: "Gigantamax".into(),
            pokemon: vec![
                Some(Slot::Variant {
                    pid: "charizard".into(),
                    form: Some("gmax".into()),
                }),
                None,
                Some(Slot::Name("charizard".into())),
            ],
        }],
    );

    assert_eq!(report.linked, 2);
    assert_eq!(report.empty, 28);
    assert_eq!(
        expression(&boxes, 1, 0).as_deref(),
        Some("INDIRECT(\"Checklist!$A$3\")=TRUE")
    );
    assert_eq!(
        expression(&boxes, 1, 2).as_deref(),
        Some("INDIRECT(\"Checklist!$A$2\")=TRUE")
    );
    // Variant shows the principal's sprite
    assert_eq!(boxes.get_value_at(1, 0), boxes.get_value_at(1, 2));
    assert_eq!(boxes.get_value_at(1, 1), CellValue::Empty);
}
