use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::{PersistenceError, PersistenceResult, SpriteStore, decode, encode};
use crate::config::EngineConfig;
use crate::sprite::Sprite;

fn validate_id(id: &str) -> PersistenceResult<()> {
    let bad = id.trim().is_empty()
        || id.starts_with('.')
        || id.contains(|c: char| matches!(c, '/' | '\\' | ':') || c.is_control());
    if bad {
        return Err(PersistenceError::InvalidId(id.to_string()));
    }
    Ok(())
}

/// Stores one `<id>.json` file per project in a directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// A store in the configured project directory.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(&config.store_dir)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, id: &str) -> PersistenceResult<PathBuf> {
        validate_id(id)?;
        Ok(self.dir.join(format!("{id}.json")))
    }
}

impl SpriteStore for JsonFileStore {
    fn save(&mut self, id: &str, sprite: &Sprite) -> PersistenceResult<()> {
        let path = self.path_for(id)?;
        let json = encode(id, sprite)?;
        fs::create_dir_all(&self.dir)?;

        // write-then-rename so a failed save never truncates the old file
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &path)?;
        log::info!("saved project {id:?} to {}", path.display());
        Ok(())
    }

    fn load(&self, id: &str) -> PersistenceResult<Sprite> {
        let path = self.path_for(id)?;
        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(PersistenceError::NotFound(id.to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        let sprite = decode(&json)?;
        log::info!("loaded project {id:?} from {}", path.display());
        Ok(sprite)
    }

    fn list(&self) -> PersistenceResult<Vec<String>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut ids = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                if let Some(stem) = path.file_stem() {
                    ids.push(stem.to_string_lossy().into_owned());
                }
            }
        }
        ids.sort();
        Ok(ids)
    }
}

/// Keeps encoded records in memory. Goes through the same JSON encoding as
/// [`JsonFileStore`].
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a raw record as-is, e.g. one in an older layout.
    pub fn insert_raw(&mut self, id: &str, json: impl Into<String>) {
        self.records.insert(id.to_string(), json.into());
    }

    pub fn raw(&self, id: &str) -> Option<&str> {
        self.records.get(id).map(String::as_str)
    }
}

impl SpriteStore for MemoryStore {
    fn save(&mut self, id: &str, sprite: &Sprite) -> PersistenceResult<()> {
        validate_id(id)?;
        let json = encode(id, sprite)?;
        self.records.insert(id.to_string(), json);
        Ok(())
    }

    fn load(&self, id: &str) -> PersistenceResult<Sprite> {
        let json = self
            .records
            .get(id)
            .ok_or_else(|| PersistenceError::NotFound(id.to_string()))?;
        decode(json)
    }

    fn list(&self) -> PersistenceResult<Vec<String>> {
        Ok(self.records.keys().cloned().collect())
    }
}
