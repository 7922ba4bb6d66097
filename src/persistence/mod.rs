//! Saving and loading sprites keyed by a project id.
//!
//! The engine talks to storage through [`SpriteStore`]. Records are JSON
//! with a schema version tag; records without one are the original layout
//! and get upgraded in memory on load.

mod record;
mod store;

use thiserror::Error;

pub use record::{CelRecord, FrameRecord, LayerRecord, ProjectRecord, SCHEMA_VERSION};
pub use store::{JsonFileStore, MemoryStore};

use crate::sprite::Sprite;

/// Errors that can occur during persistence operations. None of them leave
/// the in-memory sprite modified.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to serialize project: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Failed to access project storage: {0}")]
    Io(#[from] std::io::Error),

    #[error("No project named {0:?}")]
    NotFound(String),

    #[error("Invalid project id {0:?}")]
    InvalidId(String),

    #[error("Invalid project data: {0}")]
    InvalidRecord(String),

    #[error("Unsupported project schema version {0}")]
    UnsupportedVersion(u64),
}

/// Result type for persistence operations
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// A place sprites can be saved to and loaded from by project id.
pub trait SpriteStore {
    fn save(&mut self, id: &str, sprite: &Sprite) -> PersistenceResult<()>;

    fn load(&self, id: &str) -> PersistenceResult<Sprite>;

    /// Ids of every stored project, sorted.
    fn list(&self) -> PersistenceResult<Vec<String>>;
}

/// Serializes `sprite` into the current record layout.
pub fn encode(id: &str, sprite: &Sprite) -> PersistenceResult<String> {
    Ok(serde_json::to_string(&ProjectRecord::from_sprite(id, sprite))?)
}

/// Parses a record of any known layout and rebuilds the sprite.
pub fn decode(json: &str) -> PersistenceResult<Sprite> {
    record::parse(json)?.into_sprite()
}
