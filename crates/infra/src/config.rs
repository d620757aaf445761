//! Configuration loading and representation.

use std::path::PathBuf;

use anyhow::Context;

pub const DATA_DIR_ENV: &str = "MUSICSHOP_DATA_DIR";
pub const PRETTY_JSON_ENV: &str = "MUSICSHOP_PRETTY_JSON";

const DEFAULT_DATA_DIR: &str = "data";

/// Where and how collections are persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub data_dir: PathBuf,
    /// Indent JSON output (the files are meant to be hand-inspectable).
    pub pretty: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            pretty: true,
        }
    }
}

impl StoreConfig {
    /// Read `MUSICSHOP_DATA_DIR` and `MUSICSHOP_PRETTY_JSON`, falling back to defaults.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup (env, file, test map).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut config = Self::default();

        if let Some(dir) = lookup(DATA_DIR_ENV).filter(|v| !v.trim().is_empty()) {
            config.data_dir = PathBuf::from(dir.trim());
        }

        if let Some(raw) = lookup(PRETTY_JSON_ENV) {
            config.pretty = raw
                .trim()
                .parse::<bool>()
                .with_context(|| format!("{PRETTY_JSON_ENV} must be 'true' or 'false', got {raw:?}"))?;
        }

        Ok(config)
    }
}
