//! Workbook assembly: checklist first, then boxes linked to it

use std::fs;
use std::path::PathBuf;

use dexsheets_core::{Workbook, Worksheet};
use dexsheets_xlsx::XlsxWriter;

use crate::boxes::{render_boxes, BoxReport};
use crate::checklist::{render_checklist, ChecklistContext, ChecklistIndex};
use crate::config::Config;
use crate::data::{BoxLayout, Catalog, GameTable, RecordStore};
use crate::error::{Error, Result};
use crate::games::GamePalette;
use crate::sprites::{SpriteHost, SpriteResolver};
use crate::{BOXES_SHEET, CHECKLIST_SHEET};

/// Everything the workbook is rendered from
#[derive(Debug, Clone)]
pub struct BuildInputs {
    pub catalog: Catalog,
    pub layout: BoxLayout,
    pub games: GameTable,
    pub records: RecordStore,
    pub sprites: SpriteResolver,
    pub palette: GamePalette,
}

impl BuildInputs {
    /// Load the data files named by `config`
    pub fn load(config: &Config) -> Result<Self> {
        let catalog = Catalog::load(&config.species_list)?;
        let layout = BoxLayout::load(&config.boxes)?;
        let games = GameTable::load_or_empty(&config.games)?;
        let host = SpriteHost::from_config(&config.sprite_host)?;
        let palette = GamePalette::with_overrides(&config.game_colors)?;

        tracing::debug!(
            species = catalog.len(),
            boxes = layout.boxes.len(),
            games = games.len(),
            host = host.base_url(),
            "loaded build inputs"
        );

        Ok(Self {
            catalog,
            layout,
            games,
            records: RecordStore::new(&config.species_dir),
            sprites: SpriteResolver::new(host, &config.sprite_dir),
            palette,
        })
    }
}

/// Summary of a build run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    /// Checklist rows
    pub species: usize,
    /// Checklist rows without a sprite file
    pub missing_sprites: usize,
    /// Checklist rows without a species record
    pub placeholder_records: usize,
    pub boxes: BoxReport,
    /// Workbook written
    pub output: PathBuf,
}

/// Render the Checklist and Boxes sheets
pub fn build_workbook(inputs: &BuildInputs) -> Result<Workbook> {
    render(inputs).map(|(workbook, _, _)| workbook)
}

/// Load inputs, render the workbook and write it to `config.output`
pub fn build(config: &Config) -> Result<BuildReport> {
    let inputs = BuildInputs::load(config)?;
    let (workbook, index, boxes) = render(&inputs)?;

    let output = &config.output;
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    XlsxWriter::write_file(&workbook, output)?;
    tracing::info!("wrote {}", output.display());

    Ok(BuildReport {
        species: index.len(),
        missing_sprites: index.missing_sprites(),
        placeholder_records: index.placeholder_records(),
        boxes,
        output: output.clone(),
    })
}

fn render(inputs: &BuildInputs) -> Result<(Workbook, ChecklistIndex, BoxReport)> {
    let ctx = ChecklistContext {
        catalog: &inputs.catalog,
        records: &inputs.records,
        games: &inputs.games,
        sprites: &inputs.sprites,
        palette: &inputs.palette,
    };
    let mut checklist = Worksheet::new(CHECKLIST_SHEET);
    let index = render_checklist(&mut checklist, &ctx)?;

    let mut boxes = Worksheet::new(BOXES_SHEET);
    let report = render_boxes(&mut boxes, &inputs.layout, &index, &inputs.sprites)?;

    let mut workbook = Workbook::new();
    workbook.push_worksheet(checklist)?;
    workbook.push_worksheet(boxes)?;
    Ok((workbook, index, report))
}
