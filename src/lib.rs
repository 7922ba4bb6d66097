#![warn(clippy::all, rust_2018_idioms)]

pub mod blend;
pub mod cel;
pub mod color;
pub mod command;
pub mod config;
pub mod editor;
pub mod error;
pub mod export;
pub mod frame;
pub mod layer;
pub mod persistence;
pub mod renderer;
pub mod sprite;
pub mod tool;

pub use blend::BlendMode;
pub use cel::{Cel, StrokeId};
pub use color::Rgba;
pub use command::{Command, CompositeCommand, History, PixelCommand};
pub use config::EngineConfig;
pub use editor::{Editor, FileState, SaveOutcome};
pub use error::{ConfigError, ExportError, SpriteError};
pub use frame::{Frame, FrameId};
pub use layer::{Layer, LayerId};
pub use persistence::{JsonFileStore, MemoryStore, PersistenceError, SpriteStore};
pub use renderer::{Checkerboard, PixelBuffer, Renderer};
pub use sprite::{CelKey, Sprite};
pub use tool::{Point, Tool, ToolBox, ToolContext, ToolKind};
