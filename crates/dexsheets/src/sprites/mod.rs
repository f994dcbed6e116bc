//! Sprite download and sprite URL resolution
//!
//! [`SpriteFetcher`] mirrors the species API's front sprites into a local
//! directory. [`SpriteResolver`] maps species names to the URL the workbook's
//! image formulas load, on whichever host serves that directory.

mod api;
mod fetcher;
mod resolver;

pub use api::{ApiError, HttpApi, SpeciesApi, SpeciesDetail, SpriteUrls};
pub use fetcher::{FailureLog, FetchReport, SpriteFetcher};
pub use resolver::{image_formula, SpriteCell, SpriteHost, SpriteResolver};
