//! Sprite URL resolution for image formulas

use std::path::{Path, PathBuf};

use crate::config::{HostKind, SpriteHostConfig};
use crate::error::{Error, Result};
use crate::names;

/// Where the sprite directory is served from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpriteHost {
    /// Local static file server, e.g. `http://localhost:8000/sprites`
    Local { base_url: String },
    /// Public raw-file host
    Remote { base_url: String },
}

impl SpriteHost {
    /// Pick the host named by the `[sprite_host]` table
    pub fn from_config(config: &SpriteHostConfig) -> Result<Self> {
        match config.kind {
            HostKind::Local => Ok(SpriteHost::Local {
                base_url: config.local_url.clone(),
            }),
            HostKind::Remote => match &config.remote_url {
                Some(url) => Ok(SpriteHost::Remote {
                    base_url: url.clone(),
                }),
                None => Err(Error::Config(
                    "remote sprite host selected but sprite_host.remote_url is not set".into(),
                )),
            },
        }
    }

    pub fn base_url(&self) -> &str {
        match self {
            SpriteHost::Local { base_url } | SpriteHost::Remote { base_url } => base_url,
        }
    }

    /// URL of a species sprite on this host
    pub fn url_for(&self, name: &str) -> String {
        format!("{}/{}.png", self.base_url().trim_end_matches('/'), name)
    }
}

/// What goes into an image cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpriteCell {
    /// Sprite on disk, served at this URL
    Image(String),
    /// No sprite file
    Missing,
}

impl SpriteCell {
    pub fn is_missing(&self) -> bool {
        matches!(self, SpriteCell::Missing)
    }
}

/// Maps species names to sprite URLs, checking the local sprite directory
#[derive(Debug, Clone)]
pub struct SpriteResolver {
    host: SpriteHost,
    sprite_dir: PathBuf,
}

impl SpriteResolver {
    pub fn new(host: SpriteHost, sprite_dir: impl Into<PathBuf>) -> Self {
        Self {
            host,
            sprite_dir: sprite_dir.into(),
        }
    }

    pub fn host(&self) -> &SpriteHost {
        &self.host
    }

    pub fn sprite_dir(&self) -> &Path {
        &self.sprite_dir
    }

    /// Resolve a sprite by exact name
    pub fn resolve(&self, name: &str) -> SpriteCell {
        if self.sprite_dir.join(format!("{}.png", name)).is_file() {
            SpriteCell::Image(self.host.url_for(name))
        } else {
            SpriteCell::Missing
        }
    }

    /// Resolve a sprite, falling back to the principal form's sprite
    pub fn resolve_with_principal(&self, name: &str) -> SpriteCell {
        match self.resolve(name) {
            SpriteCell::Missing => {
                let principal = names::principal_name(name);
                if principal != name {
                    self.resolve(principal)
                } else {
                    SpriteCell::Missing
                }
            }
            found => found,
        }
    }
}

/// Image formula that loads `url` into a cell
pub fn image_formula(url: &str) -> String {
    format!("=IMAGE(\"{}\", 4)", url.replace('"', "\"\""))
}
