//! Local JSON data files: species catalog, species records, box layout and
//! preferred-game table

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::names;

/// Slots in one storage box (6 columns × 5 rows)
pub const BOX_SLOTS: usize = 30;

/// One species in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// External identifier; also the sprite file stem and record file stem
    pub name: String,
    /// Detail record URL
    #[serde(default)]
    pub url: String,
}

impl CatalogEntry {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// The species catalog, in the shape of the API's list page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    pub results: Vec<CatalogEntry>,
}

impl Catalog {
    /// Create a catalog from entries
    pub fn new(results: Vec<CatalogEntry>) -> Self {
        Self {
            count: Some(results.len() as u64),
            results,
        }
    }

    /// Load the species list file
    pub fn load(path: &Path) -> Result<Self> {
        read_required(path, "species list")
    }

    /// Write the catalog as pretty-printed JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        write_json(path, self)
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.results.iter()
    }
}

/// Locally stored details of one species
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesRecord {
    /// National dex id; `None` for a placeholder
    #[serde(default)]
    pub id: Option<u32>,
    pub name: String,
    /// Upstream sprite URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sprite: Option<String>,
}

impl SpeciesRecord {
    /// Stand-in for a species with no readable record
    pub fn placeholder(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            sprite: None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.id.is_none()
    }
}

/// Directory of `<name>.json` species records
#[derive(Debug, Clone)]
pub struct RecordStore {
    dir: PathBuf,
}

impl RecordStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the record file for `name`
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.json", name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.path_for(name).is_file()
    }

    /// Load the record for `name`.
    ///
    /// A variant form without its own record falls back to its principal's
    /// record. When neither can be read a placeholder is returned and a
    /// warning is logged.
    pub fn load(&self, name: &str) -> SpeciesRecord {
        if let Some(record) = self.read(name) {
            return record;
        }
        let principal = names::principal_name(name);
        if principal != name {
            if let Some(record) = self.read(principal) {
                return record;
            }
        }
        tracing::warn!("no species record for {}, using placeholder", name);
        SpeciesRecord::placeholder(name)
    }

    /// Write a record unless one already exists; returns whether it was written
    pub fn store(&self, record: &SpeciesRecord) -> Result<bool> {
        let path = self.path_for(&record.name);
        if path.exists() {
            return Ok(false);
        }
        fs::create_dir_all(&self.dir).map_err(|e| Error::io(&self.dir, e))?;
        write_json(&path, record)?;
        Ok(true)
    }

    fn read(&self, name: &str) -> Option<SpeciesRecord> {
        let path = self.path_for(name);
        let contents = fs::read_to_string(&path).ok()?;
        match serde_json::from_str(&contents) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!("unreadable species record {}: {}", path.display(), e);
                None
            }
        }
    }
}

/// A box slot entry
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Slot {
    /// A plain species name
    Name(String),
    /// A variant form of a principal species
    Variant {
        pid: String,
        #[serde(default)]
        form: Option<String>,
    },
}

impl Slot {
    /// Checklist key this slot links to
    pub fn key(&self) -> String {
        match self {
            Slot::Name(name) => name.clone(),
            Slot::Variant { pid, form } => {
                if form.as_deref().map_or(true, str::is_empty) {
                    tracing::debug!("slot {{pid: {}}} has no form, linking to the base species", pid);
                }
                names::variant_key(pid, form.as_deref())
            }
        }
    }

    /// Name whose sprite is shown in the slot
    pub fn sprite_name(&self) -> &str {
        match self {
            Slot::Name(name) => name,
            Slot::Variant { pid, .. } => pid,
        }
    }
}

/// One storage box
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BoxSpec {
    pub title: String,
    /// Slot entries in reading order; `None` is an empty slot
    #[serde(default)]
    pub pokemon: Vec<Option<Slot>>,
}

/// The box layout file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BoxLayout {
    pub boxes: Vec<BoxSpec>,
}

impl BoxLayout {
    pub fn new(boxes: Vec<BoxSpec>) -> Self {
        Self { boxes }
    }

    /// Load the box layout file
    pub fn load(path: &Path) -> Result<Self> {
        read_required(path, "box layout")
    }
}

/// Preferred and backup game for one species
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GamePreference {
    #[serde(default)]
    pub preferred: Option<String>,
    #[serde(default)]
    pub backup: Option<String>,
}

/// Species name → game preference
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct GameTable(BTreeMap<String, GamePreference>);

impl GameTable {
    /// Load the game table; a missing file yields an empty table
    pub fn load_or_empty(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(contents) => serde_json::from_str(&contents).map_err(|e| Error::json(path, e)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!("game table {} not found, badges left blank", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(Error::io(path, e)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&GamePreference> {
        self.0.get(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, preference: GamePreference) {
        self.0.insert(name.into(), preference);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn read_required<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(Error::Data {
                path: path.to_path_buf(),
                message: format!("{} not found", what),
            })
        }
        Err(e) => return Err(Error::io(path, e)),
    };
    serde_json::from_str(&contents).map_err(|e| Error::json(path, e))
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    let json = serde_json::to_string_pretty(value).map_err(|e| Error::json(path, e))?;
    fs::write(path, json).map_err(|e| Error::io(path, e))
}
