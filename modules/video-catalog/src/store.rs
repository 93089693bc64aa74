//! Persisted catalog: a single pretty-printed JSON object mapping video id to record.
//!
//! Loading is forgiving: a missing, unreadable or malformed file is an empty
//! catalog. Entries are held as raw JSON so that anything already on disk,
//! including entries this version would not produce, survives a merge
//! unchanged. Saving rewrites the whole file through a
//! temporary sibling and a rename, so a failed run never leaves a partial file.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CatalogError>;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Catalog serialize error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Catalog write error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Id-keyed catalog entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    entries: BTreeMap<String, Value>,
}

/// What a merge did to the catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    pub added: usize,
    pub updated: usize,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn raw(&self, id: &str) -> Option<&Value> {
        self.entries.get(id)
    }

    /// Decode one entry. `None` when absent or not shaped like `T`.
    pub fn get<T: DeserializeOwned>(&self, id: &str) -> Option<T> {
        self.entries
            .get(id)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    /// Last-write-wins union: incoming entries replace same-id entries, new ids
    /// are added and ids absent from `incoming` are left alone.
    pub fn merge<T, I>(&mut self, incoming: I) -> Result<MergeStats>
    where
        T: Serialize,
        I: IntoIterator<Item = (String, T)>,
    {
        let mut stats = MergeStats::default();
        for (id, record) in incoming {
            let value = serde_json::to_value(record)?;
            match self.entries.insert(id, value) {
                Some(_) => stats.updated += 1,
                None => stats.added += 1,
            }
        }
        Ok(stats)
    }
}

impl From<BTreeMap<String, Value>> for Catalog {
    fn from(entries: BTreeMap<String, Value>) -> Self {
        Self { entries }
    }
}

/// Read the catalog at `path`. Never fails: anything unusable starts a fresh catalog.
pub fn load(path: &Path) -> Catalog {
    let data = match std::fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::info!(path = %path.display(), "No existing catalog, starting fresh");
            return Catalog::new();
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Unreadable catalog, starting fresh");
            return Catalog::new();
        }
    };

    match serde_json::from_str::<BTreeMap<String, Value>>(&data) {
        Ok(entries) => {
            tracing::info!(path = %path.display(), entries = entries.len(), "Loaded catalog");
            Catalog::from(entries)
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Malformed catalog, starting fresh");
            Catalog::new()
        }
    }
}

/// Write the full catalog to `path`, replacing whatever is there. An existing
/// file keeps its permissions.
pub fn save(path: &Path, catalog: &Catalog) -> Result<()> {
    let io_err = |source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&dir).map_err(io_err)?;

    let body = to_pretty_json(&catalog.entries)?;
    let mut tmp = tempfile::NamedTempFile::new_in(&dir).map_err(io_err)?;
    tmp.write_all(&body).map_err(io_err)?;
    tmp.write_all(b"\n").map_err(io_err)?;
    if let Ok(existing) = std::fs::metadata(path) {
        tmp.as_file()
            .set_permissions(existing.permissions())
            .map_err(io_err)?;
    }
    tmp.as_file().sync_all().map_err(io_err)?;
    tmp.persist(path).map_err(|e| io_err(e.error))?;

    tracing::info!(path = %path.display(), entries = catalog.len(), "Saved catalog");
    Ok(())
}

/// Four-space indentation, matching catalogs written by earlier versions.
fn to_pretty_json<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    Ok(buf)
}
