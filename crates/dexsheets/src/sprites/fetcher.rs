//! Sprite mirroring

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::data::{CatalogEntry, RecordStore, SpeciesRecord};
use crate::error::{Error, Result};

use super::api::SpeciesApi;

/// Counts from one fetch run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchReport {
    /// Sprites written this run
    pub downloaded: usize,
    /// Species whose sprite was already on disk
    pub skipped_existing: usize,
    /// Species the API has no front sprite for
    pub no_sprite: usize,
    /// Species appended to the failure log
    pub failed: usize,
    /// Species records written this run
    pub records_written: usize,
}

/// Append-only list of species whose sprite could not be fetched
#[derive(Debug, Clone)]
pub struct FailureLog {
    path: PathBuf,
}

impl FailureLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one species name as a line, creating the file and its
    /// directory if needed
    pub fn append(&self, name: &str) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| Error::io(&self.path, e))?;
        writeln!(file, "{}", name).map_err(|e| Error::io(&self.path, e))
    }
}

/// Ensures a `<name>.png` exists for every species in the catalog
///
/// Species are handled one at a time, in catalog order. Existing files are
/// never refetched; a failed detail or image request is logged and skipped.
pub struct SpriteFetcher<A> {
    api: A,
    sprite_dir: PathBuf,
    records: Option<RecordStore>,
    failures: FailureLog,
    catalog_out: Option<PathBuf>,
}

impl<A: SpeciesApi> SpriteFetcher<A> {
    pub fn new(api: A, config: &Config) -> Self {
        Self {
            api,
            sprite_dir: config.sprite_dir.clone(),
            records: config
                .store_records
                .then(|| RecordStore::new(&config.species_dir)),
            failures: FailureLog::new(&config.failure_log),
            catalog_out: config.save_catalog.then(|| config.species_list.clone()),
        }
    }

    /// Path a species' sprite is written to
    pub fn sprite_path(&self, name: &str) -> PathBuf {
        self.sprite_dir.join(format!("{}.png", name))
    }

    /// Fetch the catalog and mirror every missing sprite.
    ///
    /// Only a failed catalog request or a local write error stops the run.
    pub fn run(&self) -> Result<FetchReport> {
        let catalog = self.api.catalog()?;
        tracing::info!("catalog lists {} species", catalog.len());

        fs::create_dir_all(&self.sprite_dir).map_err(|e| Error::io(&self.sprite_dir, e))?;

        let mut report = FetchReport::default();
        for entry in catalog.iter() {
            self.fetch_one(entry, &mut report)?;
        }

        if let Some(path) = &self.catalog_out {
            catalog.save(path)?;
            tracing::info!("saved catalog to {}", path.display());
        }

        tracing::info!(
            downloaded = report.downloaded,
            skipped = report.skipped_existing,
            no_sprite = report.no_sprite,
            failed = report.failed,
            "sprite fetch finished"
        );
        Ok(report)
    }

    fn fetch_one(&self, entry: &CatalogEntry, report: &mut FetchReport) -> Result<()> {
        let sprite_path = self.sprite_path(&entry.name);
        let has_sprite = sprite_path.exists();
        let needs_record = self
            .records
            .as_ref()
            .is_some_and(|records| !records.contains(&entry.name));

        if has_sprite && !needs_record {
            tracing::debug!("{} already present", entry.name);
            report.skipped_existing += 1;
            return Ok(());
        }

        let detail = match self.api.detail(&entry.url) {
            Ok(detail) => detail,
            Err(e) => {
                tracing::warn!("detail for {} failed: {}", entry.name, e);
                return self.record_failure(&entry.name, report);
            }
        };

        if let Some(records) = &self.records {
            let record = SpeciesRecord {
                id: Some(detail.id),
                name: entry.name.clone(),
                sprite: detail.front_sprite().map(str::to_string),
            };
            if records.store(&record)? {
                report.records_written += 1;
            }
        }

        if has_sprite {
            report.skipped_existing += 1;
            return Ok(());
        }

        let Some(url) = detail.front_sprite() else {
            tracing::info!("{} has no sprite", entry.name);
            report.no_sprite += 1;
            return Ok(());
        };

        let bytes = match self.api.image(url) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!("sprite for {} failed: {}", entry.name, e);
                return self.record_failure(&entry.name, report);
            }
        };

        fs::write(&sprite_path, bytes).map_err(|e| Error::io(&sprite_path, e))?;
        tracing::info!("downloaded {}", sprite_path.display());
        report.downloaded += 1;
        Ok(())
    }

    fn record_failure(&self, name: &str, report: &mut FetchReport) -> Result<()> {
        report.failed += 1;
        self.failures.append(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_log_appends() {
        let dir = tempfile::tempdir().unwrap();
        let log = FailureLog::new(dir.path().join("failed.txt"));

        log.append("bulbasaur").unwrap();
        log.append("ivysaur").unwrap();

        let contents = fs::read_to_string(log.path()).unwrap();
        assert_eq!(contents, "bulbasaur\nivysaur\n");
    }

    #[test]
    fn test_failure_log_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let log = FailureLog::new(dir.path().join("logs/fetch/failed.txt"));

        log.append("ivysaur").unwrap();

        assert_eq!(fs::read_to_string(log.path()).unwrap(), "ivysaur\n");
    }
}
