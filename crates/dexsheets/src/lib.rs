//! # dexsheets
//!
//! Builds a Pokémon collection-tracking spreadsheet.
//!
//! Two jobs make up the tool:
//!
//! - [`SpriteFetcher`] mirrors every species sprite from PokeAPI into a local
//!   directory, logging failures to a plain-text file and skipping files that
//!   already exist.
//! - [`build()`] reads the local species list, records, box layout and game
//!   table and writes a workbook with a **Checklist** sheet (one row per
//!   species) and a **Boxes** sheet (the in-game storage grid) whose slots
//!   light up when the matching checklist row is marked caught.
//!
//! ## Example
//!
//! ```rust,no_run
//! use dexsheets::{build, Config};
//!
//! let config = Config::load(None)?;
//! let report = build(&config)?;
//! println!("{} species, {} boxes", report.species, report.boxes.boxes);
//! # Ok::<(), dexsheets::Error>(())
//! ```

pub mod boxes;
pub mod build;
pub mod checklist;
pub mod config;
pub mod data;
pub mod error;
pub mod games;
pub mod names;
pub mod sprites;

mod theme;

pub use boxes::{render_boxes, BoxCursor, BoxReport};
pub use build::{build, build_workbook, BuildInputs, BuildReport};
pub use checklist::{render_checklist, ChecklistContext, ChecklistIndex};
pub use config::{Config, HostKind, SpriteHostConfig};
pub use data::{
    BoxLayout, BoxSpec, Catalog, CatalogEntry, GamePreference, GameTable, RecordStore, Slot,
    SpeciesRecord,
};
pub use error::{Error, Result};
pub use games::{Badge, GamePalette};
pub use sprites::{
    image_formula, ApiError, FailureLog, FetchReport, HttpApi, SpeciesApi, SpeciesDetail,
    SpriteCell, SpriteFetcher, SpriteHost, SpriteResolver,
};

/// Name of the species checklist worksheet
pub const CHECKLIST_SHEET: &str = "Checklist";

/// Name of the storage box worksheet
pub const BOXES_SHEET: &str = "Boxes";
