use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Serialize;
use serde::de::DeserializeOwned;

use musicshop_core::{Collection, DocumentStore, StoreError};

use crate::config::StoreConfig;

/// JSON-file document store: one `<collection>.json` array per collection.
///
/// Each save rewrites the whole file (via a sibling temp file and rename).
/// There is no locking; one process owns the data directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
    pretty: bool,
}

impl JsonFileStore {
    /// Open the store described by `config`, creating the data directory if needed.
    pub fn open(config: &StoreConfig) -> anyhow::Result<Self> {
        fs::create_dir_all(&config.data_dir).with_context(|| {
            format!("failed to create data directory at {:?}", config.data_dir)
        })?;
        tracing::info!(data_dir = ?config.data_dir, "json document store opened");
        Ok(Self {
            root: config.data_dir.clone(),
            pretty: config.pretty,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, collection: Collection) -> PathBuf {
        self.root.join(format!("{}.json", collection.name()))
    }
}

impl DocumentStore for JsonFileStore {
    fn load<T: DeserializeOwned>(&self, collection: Collection) -> Result<Vec<T>, StoreError> {
        let path = self.path_for(collection);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(StoreError::Io {
                    collection,
                    message: format!("{}: {e}", path.display()),
                });
            }
        };

        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&raw).map_err(|e| StoreError::Decode {
            collection,
            message: format!("{}: {e}", path.display()),
        })
    }

    fn save<T: Serialize>(&self, collection: Collection, items: &[T]) -> Result<(), StoreError> {
        let encoded = if self.pretty {
            serde_json::to_string_pretty(items)
        } else {
            serde_json::to_string(items)
        }
        .map_err(|e| StoreError::Encode {
            collection,
            message: e.to_string(),
        })?;

        let path = self.path_for(collection);
        let tmp = path.with_extension("json.tmp");
        let io_err = |e: std::io::Error| StoreError::Io {
            collection,
            message: format!("{}: {e}", path.display()),
        };

        fs::write(&tmp, encoded).map_err(io_err)?;
        fs::rename(&tmp, &path).map_err(io_err)?;

        tracing::debug!(%collection, count = items.len(), "collection saved");
        Ok(())
    }
}
