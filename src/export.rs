use std::path::Path;

use crate::error::ExportError;
use crate::renderer::Renderer;
use crate::sprite::Sprite;

/// Writes frame `index` to `path` with a transparent background. The format
/// follows the file extension (PNG for `.png`).
pub fn export_frame(sprite: &Sprite, index: usize, path: impl AsRef<Path>) -> Result<(), ExportError> {
    let frame = sprite
        .frame(index)
        .ok_or(ExportError::FrameOutOfRange(index))?;
    let buffer = Renderer::default().render_frame_to_image_data(sprite, frame);
    let path = path.as_ref();
    buffer.to_rgba_image().save(path)?;
    log::info!("exported frame {index} to {}", path.display());
    Ok(())
}

/// Writes the active frame as PNG.
pub fn export_png(sprite: &Sprite, path: impl AsRef<Path>) -> Result<(), ExportError> {
    export_frame(sprite, sprite.active_frame(), path)
}
