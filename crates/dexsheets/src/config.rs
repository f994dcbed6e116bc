//! Configuration loading for `dexsheets.toml`
//!
//! Every field has a default, so running without a config file works against
//! the conventional layout (`sprites/`, `data/…`, `pokemon.xlsx`) in the
//! working directory.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "dexsheets.toml";

/// Default species API root
pub const DEFAULT_API_BASE: &str = "https://pokeapi.co/api/v2";

/// Default base URL of a locally served sprite directory
pub const DEFAULT_LOCAL_SPRITE_URL: &str = "http://localhost:8000/sprites";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root of the species API
    pub api_base: String,
    /// Directory holding `<name>.png` sprites
    pub sprite_dir: PathBuf,
    /// Plain-text log of species whose sprite could not be fetched
    pub failure_log: PathBuf,
    /// Species catalog (`{"results": [{"name", "url"}]}`)
    pub species_list: PathBuf,
    /// Directory of per-species `<name>.json` records
    pub species_dir: PathBuf,
    /// Box layout file
    pub boxes: PathBuf,
    /// Preferred/backup game table
    pub games: PathBuf,
    /// Output workbook
    pub output: PathBuf,
    /// Write species records while fetching sprites
    pub store_records: bool,
    /// Save the fetched catalog to `species_list`
    pub save_catalog: bool,
    /// Where sprite image formulas point
    pub sprite_host: SpriteHostConfig,
    /// Badge color overrides keyed by game name
    pub game_colors: BTreeMap<String, GameColor>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            sprite_dir: PathBuf::from("sprites"),
            failure_log: PathBuf::from("sprites-failed.txt"),
            species_list: PathBuf::from("data/pokemon.json"),
            species_dir: PathBuf::from("data/pokemon"),
            boxes: PathBuf::from("data/boxes.json"),
            games: PathBuf::from("data/games.json"),
            output: PathBuf::from("pokemon.xlsx"),
            store_records: true,
            save_catalog: false,
            sprite_host: SpriteHostConfig::default(),
            game_colors: BTreeMap::new(),
        }
    }
}

/// Which sprite host the image formulas reference
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostKind {
    /// A local static file server
    #[default]
    Local,
    /// A public raw-file host
    Remote,
}

/// `[sprite_host]` table
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SpriteHostConfig {
    pub kind: HostKind,
    pub local_url: String,
    pub remote_url: Option<String>,
}

impl Default for SpriteHostConfig {
    fn default() -> Self {
        Self {
            kind: HostKind::Local,
            local_url: DEFAULT_LOCAL_SPRITE_URL.to_string(),
            remote_url: None,
        }
    }
}

/// Badge colors for one game, as hex strings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GameColor {
    pub fill: String,
    #[serde(default)]
    pub font: Option<String>,
}

impl Config {
    /// Load configuration.
    ///
    /// With an explicit path the file must exist. Without one,
    /// `dexsheets.toml` in the working directory is used when present and the
    /// defaults otherwise. Relative paths in a config file resolve against the
    /// file's directory.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_file(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.is_file() {
                    Self::load_file(default)
                } else {
                    tracing::debug!("no {} found, using defaults", DEFAULT_CONFIG_FILE);
                    Ok(Self::default())
                }
            }
        }
    }

    /// Load and parse a specific config file
    pub fn load_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let config = Self::from_toml_str(&contents).map_err(|source| Error::Toml {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!("loaded config from {}", path.display());

        match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => Ok(config.rooted_at(dir)),
            _ => Ok(config),
        }
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(contents: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Resolve every relative path against `base`
    pub fn rooted_at(mut self, base: &Path) -> Self {
        for path in [
            &mut self.sprite_dir,
            &mut self.failure_log,
            &mut self.species_list,
            &mut self.species_dir,
            &mut self.boxes,
            &mut self.games,
            &mut self.output,
        ] {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_config_is_default() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.api_base, "https://pokeapi.co/api/v2");
        assert!(config.store_records);
        assert_eq!(config.sprite_host.kind, HostKind::Local);
    }

    #[test]
    fn test_partial_config() {
        let config = Config::from_toml_str(
            r#"
            output = "dex.xlsx"
            save_catalog = true

            [sprite_host]
            kind = "remote"
            remote_url = "https://raw.example.com/sprites"

            [game_colors]
            "Sword" = { fill = "00A0DC", font = "FFFFFF" }
            "Shield" = { fill = "C8004B" }
            "#,
        )
        .unwrap();

        assert_eq!(config.output, PathBuf::from("dex.xlsx"));
        assert!(config.save_catalog);
        assert_eq!(config.sprite_dir, PathBuf::from("sprites"));
        assert_eq!(config.sprite_host.kind, HostKind::Remote);
        assert_eq!(config.sprite_host.local_url, DEFAULT_LOCAL_SPRITE_URL);
        assert_eq!(
            config.sprite_host.remote_url.as_deref(),
            Some("https://raw.example.com/sprites")
        );
        assert_eq!(config.game_colors["Shield"].font, None);
        assert_eq!(config.game_colors["Sword"].fill, "00A0DC");
    }

    #[test]
    fn test_unknown_host_kind_rejected() {
        assert!(Config::from_toml_str("[sprite_host]\nkind = \"ftp\"").is_err());
    }

    #[test]
    fn test_rooted_at_keeps_absolute_paths() {
        let mut config = Config::default();
        config.output = PathBuf::from("/tmp/out.xlsx");
        let config = config.rooted_at(Path::new("/data/dex"));

        assert_eq!(config.sprite_dir, PathBuf::from("/data/dex/sprites"));
        assert_eq!(config.boxes, PathBuf::from("/data/dex/data/boxes.json"));
        assert_eq!(config.output, PathBuf::from("/tmp/out.xlsx"));
    }

    #[test]
    fn test_load_file_resolves_relative_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dexsheets.toml");
        fs::write(&path, "sprite_dir = \"img\"\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.sprite_dir, dir.path().join("img"));
        assert_eq!(config.output, dir.path().join("pokemon.xlsx"));
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load(Some(&dir.path().join("nope.toml")));
        assert!(matches!(result, Err(Error::Io { .. })));
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "store_records = \"maybe\"").unwrap();

        assert!(matches!(Config::load(Some(&path)), Err(Error::Toml { .. })));
    }
}
