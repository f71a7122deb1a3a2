//! Shared data-root resolution (settings file location, document paths).
//!
//! The CLI and any future frontend use these functions so the settings file
//! is always `~/.config/cinelog/settings.toml` and data-root resolution is
//! consistent.

use std::io;
use std::path::{Path, PathBuf};

use crate::util::write_atomic;

/// Canonical path to the shared settings file: `~/.config/cinelog/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("cinelog").join("settings.toml")
}

/// Resolve the data root using a priority chain:
///
/// 1. CLI override (if `Some`)
/// 2. Saved `storage.data_root` in `settings.toml`
/// 3. Platform data dir (`~/.local/share/cinelog` on Linux)
pub fn resolve_data_root(cli_override: Option<PathBuf>) -> PathBuf {
    if let Some(p) = cli_override {
        return p;
    }
    if let Some(p) = load_data_root() {
        return p;
    }
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cinelog")
}

/// Read `storage.data_root` from `settings.toml`, if set.
fn load_data_root() -> Option<PathBuf> {
    let contents = std::fs::read_to_string(settings_path()).ok()?;
    let doc: toml::Value = contents.parse().ok()?;
    let root = doc.get("storage")?.get("data_root")?.as_str()?;
    if root.is_empty() {
        None
    } else {
        Some(PathBuf::from(root))
    }
}

/// Save (or clear) the data root in `settings.toml`.
///
/// Uses `toml::Value` for a surgical update so unrelated settings are
/// preserved.
pub fn save_data_root(path: Option<&Path>) -> io::Result<()> {
    let settings = settings_path();
    let mut doc: toml::Value = if let Ok(contents) = std::fs::read_to_string(&settings) {
        contents
            .parse()
            .unwrap_or_else(|_| toml::Value::Table(Default::default()))
    } else {
        toml::Value::Table(Default::default())
    };

    let table = doc
        .as_table_mut()
        .ok_or_else(|| io::Error::other("settings.toml root is not a table"))?;
    let storage = table
        .entry("storage")
        .or_insert_with(|| toml::Value::Table(Default::default()));
    let storage_table = storage
        .as_table_mut()
        .ok_or_else(|| io::Error::other("[storage] is not a table"))?;

    match path {
        Some(p) => {
            storage_table.insert(
                "data_root".to_string(),
                toml::Value::String(p.to_string_lossy().into_owned()),
            );
        }
        None => {
            storage_table.remove("data_root");
        }
    }

    let serialized = toml::to_string_pretty(&doc).map_err(io::Error::other)?;
    write_atomic(&settings, &serialized)
}

/// Locations of the three durable documents under a data root.
#[derive(Debug, Clone)]
pub struct DataPaths {
    pub registry: PathBuf,
    pub ratings: PathBuf,
    pub cache: PathBuf,
}

impl DataPaths {
    pub fn under(root: &Path) -> Self {
        Self {
            registry: root.join("registry.json"),
            ratings: root.join("ratings.json"),
            cache: root.join("cache.json"),
        }
    }
}
