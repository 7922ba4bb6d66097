use serde::{Deserialize, Serialize};

use crate::blend::blend_over_with_opacity;
use crate::cel::Cel;
use crate::color::Rgba;
use crate::config::EngineConfig;
use crate::frame::Frame;
use crate::layer::Layer;
use crate::sprite::Sprite;

/// A flattened RGBA image, row-major, 4 bytes per pixel.
#[derive(Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl std::fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

impl PixelBuffer {
    /// A fully transparent buffer.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Reads a pixel; out-of-bounds reads are transparent black.
    pub fn get_pixel(&self, x: i32, y: i32) -> Rgba {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return Rgba::TRANSPARENT;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        Rgba::new(self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3])
    }

    /// For upload as an egui texture.
    pub fn to_color_image(&self) -> egui::ColorImage {
        egui::ColorImage::from_rgba_unmultiplied(
            [self.width as usize, self.height as usize],
            &self.data,
        )
    }

    pub fn to_rgba_image(&self) -> image::RgbaImage {
        image::RgbaImage::from_fn(self.width, self.height, |x, y| {
            image::Rgba(self.get_pixel(x as i32, y as i32).to_array())
        })
    }

    fn pixels_mut(&mut self) -> impl Iterator<Item = &mut [u8]> {
        self.data.chunks_exact_mut(4)
    }
}

/// The transparency indicator drawn behind preview renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkerboard {
    /// Edge length of one square, in sprite pixels
    pub cell_size: u32,
    pub light: u8,
    pub dark: u8,
}

impl Default for Checkerboard {
    fn default() -> Self {
        Self {
            cell_size: 8,
            light: 220,
            dark: 180,
        }
    }
}

impl Checkerboard {
    /// Background color at (x, y).
    pub fn color_at(&self, x: u32, y: u32) -> Rgba {
        let size = self.cell_size.max(1);
        let dark = ((x / size) + (y / size)) & 1 == 1;
        let level = if dark { self.dark } else { self.light };
        Rgba::opaque(level, level, level)
    }

    fn fill(&self, buffer: &mut PixelBuffer) {
        let width = buffer.width.max(1);
        for (i, px) in buffer.pixels_mut().enumerate() {
            let (x, y) = (i as u32 % width, i as u32 / width);
            px.copy_from_slice(&self.color_at(x, y).to_array());
        }
    }
}

/// Flattens a sprite frame into a single image.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    checkerboard: Checkerboard,
}

impl Renderer {
    pub fn new(checkerboard: Checkerboard) -> Self {
        Self { checkerboard }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.checkerboard)
    }

    pub fn checkerboard(&self) -> &Checkerboard {
        &self.checkerboard
    }

    /// Preview render: layers composited over the checkerboard.
    pub fn render_frame(&self, sprite: &Sprite, frame: &Frame) -> PixelBuffer {
        let mut out = PixelBuffer::new(sprite.width(), sprite.height());
        self.checkerboard.fill(&mut out);
        composite_layers(&mut out, sprite, frame);
        out
    }

    /// Export render: layers composited over full transparency, so the
    /// checkerboard never ends up in saved output.
    pub fn render_frame_to_image_data(&self, sprite: &Sprite, frame: &Frame) -> PixelBuffer {
        let mut out = PixelBuffer::new(sprite.width(), sprite.height());
        composite_layers(&mut out, sprite, frame);
        out
    }
}

/// [`Renderer::render_frame`] with the default checkerboard.
pub fn render_frame(sprite: &Sprite, frame: &Frame) -> PixelBuffer {
    Renderer::default().render_frame(sprite, frame)
}

/// [`Renderer::render_frame_to_image_data`] with the default settings.
pub fn render_frame_to_image_data(sprite: &Sprite, frame: &Frame) -> PixelBuffer {
    Renderer::default().render_frame_to_image_data(sprite, frame)
}

/// Back to front: layer 0 is the bottom of the stack.
fn composite_layers(out: &mut PixelBuffer, sprite: &Sprite, frame: &Frame) {
    for layer in sprite.layers() {
        if !layer.contributes() {
            continue;
        }
        // no cel yet means nothing painted
        if let Some(cel) = frame.cel(layer.id) {
            composite_cel(out, cel, layer);
        }
    }
}

fn composite_cel(out: &mut PixelBuffer, cel: &Cel, layer: &Layer) {
    if cel.width() != out.width || cel.height() != out.height {
        log::warn!(
            "skipping {}x{} cel of layer {:?} in {}x{} frame",
            cel.width(),
            cel.height(),
            layer.name,
            out.width,
            out.height
        );
        return;
    }
    let opacity = layer.opacity();
    for (dst, src) in out.pixels_mut().zip(cel.pixels().chunks_exact(4)) {
        if src[3] == 0 {
            continue;
        }
        let blended = blend_over_with_opacity(
            Rgba::new(dst[0], dst[1], dst[2], dst[3]),
            Rgba::new(src[0], src[1], src[2], src[3]),
            opacity,
        );
        dst.copy_from_slice(&blended.to_array());
    }
}
