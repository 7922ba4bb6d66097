use thiserror::Error;

/// Errors from structural edits that address layers or frames by index.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SpriteError {
    #[error("layer index {index} out of range ({len} layers)")]
    LayerOutOfRange { index: usize, len: usize },

    #[error("frame index {index} out of range ({len} frames)")]
    FrameOutOfRange { index: usize, len: usize },
}

/// Errors from writing a rendered frame to disk.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("frame index {0} out of range")]
    FrameOutOfRange(usize),

    #[error("failed to encode image: {0}")]
    Image(#[from] image::ImageError),
}

/// Errors from loading an [`EngineConfig`](crate::config::EngineConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}
