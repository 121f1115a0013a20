use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use tasklist_shared::KeyValueStore;
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

pub const STORE_FILE: &str = "storage.json";

/// Key-value store kept as one JSON object of string values on disk.
///
/// Every read goes to the file; nothing is cached between calls.
#[derive(Debug)]
pub struct FileStore {
    pub path: PathBuf,
}

impl FileStore {
    #[tracing::instrument(skip(data_dir))]
    pub fn open(data_dir: &Path) -> anyhow::Result<Self> {
        fs::create_dir_all(data_dir)
            .with_context(|| format!("failed to create {}", data_dir.display()))?;

        let path = data_dir.join(STORE_FILE);
        if !path.exists() {
            fs::write(&path, "{}")
                .with_context(|| format!("failed to create {}", path.display()))?;
        }

        info!(
            data_dir = %data_dir.display(),
            store = %path.display(),
            "opened file store"
        );

        Ok(Self { path })
    }

    #[tracing::instrument(skip(self))]
    fn read_items(&self) -> io::Result<BTreeMap<String, String>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(file = %self.path.display(), "store file missing");
                return Ok(BTreeMap::new());
            }
            Err(err) => return Err(err),
        };

        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&raw).map_err(|err| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("failed parsing {}: {err}", self.path.display()),
            )
        })
    }

    #[tracing::instrument(skip(self, items), fields(count = items.len()))]
    fn write_items_atomic(&self, items: &BTreeMap<String, String>) -> io::Result<()> {
        debug!(file = %self.path.display(), "saving store atomically");

        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        let mut temp = NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(&mut temp, items)?;
        writeln!(temp)?;
        temp.flush()?;

        temp.persist(&self.path).map_err(|err| err.error)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    type Error = io::Error;

    fn get_item(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.read_items()?.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), Self::Error> {
        let mut items = match self.read_items() {
            Ok(items) => items,
            Err(err) if err.kind() == io::ErrorKind::InvalidData => {
                warn!(
                    file = %self.path.display(),
                    error = %err,
                    "store file is corrupt; starting a fresh one"
                );
                BTreeMap::new()
            }
            Err(err) => return Err(err),
        };
        items.insert(key.to_string(), value.to_string());
        self.write_items_atomic(&items)
    }
}
