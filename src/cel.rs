use crate::blend::blend_over;
use crate::color::Rgba;

/// Identifier of one continuous paint gesture.
///
/// Only equality with the current stroke matters; tags left behind by older
/// strokes are simply stale.
pub type StrokeId = u32;

/// The pixel content of one layer within one frame.
///
/// Dimensions are fixed at creation. Each pixel carries the id of the stroke
/// that last painted it, which is what keeps a stroke from blending the same
/// pixel twice.
#[derive(Clone, PartialEq, Eq)]
pub struct Cel {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    stroke_tags: Vec<StrokeId>,
}

impl std::fmt::Debug for Cel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cel")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("pixels", &format_args!("<{} bytes>", self.pixels.len()))
            .finish()
    }
}

impl Cel {
    /// Creates a fully transparent cel.
    pub fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            pixels: vec![0; len * 4],
            stroke_tags: vec![0; len],
        }
    }

    /// Builds a cel from raw RGBA bytes. Returns `None` when the byte count
    /// does not match the dimensions.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        let len = width as usize * height as usize;
        if pixels.len() != len * 4 {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels,
            stroke_tags: vec![0; len],
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA bytes, row-major.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        self.contains(x, y)
            .then(|| y as usize * self.width as usize + x as usize)
    }

    /// Reads a pixel. Out-of-bounds reads are fully transparent black.
    pub fn get_pixel(&self, x: i32, y: i32) -> Rgba {
        match self.index(x, y) {
            Some(i) => {
                let p = &self.pixels[i * 4..i * 4 + 4];
                Rgba::new(p[0], p[1], p[2], p[3])
            }
            None => Rgba::TRANSPARENT,
        }
    }

    /// Blends `color` over the pixel at (x, y). Out-of-bounds is a no-op.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Rgba) {
        let dst = self.get_pixel(x, y);
        self.set_pixel_direct(x, y, blend_over(dst, color));
    }

    /// Overwrites the pixel at (x, y) without blending. Out-of-bounds is a
    /// no-op.
    ///
    /// Blending cannot be inverted, so undo and redo only ever go through
    /// here with stored snapshots.
    pub fn set_pixel_direct(&mut self, x: i32, y: i32, color: Rgba) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i * 4..i * 4 + 4].copy_from_slice(&color.to_array());
        }
    }

    pub fn stroke_tag(&self, x: i32, y: i32) -> Option<StrokeId> {
        self.index(x, y).map(|i| self.stroke_tags[i])
    }

    /// Tags the pixel with `stroke`. Returns `false` when it already carried
    /// that tag or lies outside the cel.
    pub fn mark_stroke(&mut self, x: i32, y: i32, stroke: StrokeId) -> bool {
        match self.index(x, y) {
            Some(i) if self.stroke_tags[i] != stroke => {
                self.stroke_tags[i] = stroke;
                true
            }
            _ => false,
        }
    }

    /// Forgets which stroke last touched each pixel.
    pub fn clear_stroke_tags(&mut self) {
        self.stroke_tags.fill(0);
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.chunks_exact(4).all(|p| p[3] == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_cel_is_transparent() {
        let cel = Cel::new(3, 2);
        assert_eq!(cel.pixels().len(), 24);
        assert!(cel.is_empty());
        assert_eq!(cel.get_pixel(2, 1), Rgba::TRANSPARENT);
    }

    #[test]
    fn out_of_bounds_is_ignored() {
        let mut cel = Cel::new(2, 2);
        cel.set_pixel(-1, 0, Rgba::BLACK);
        cel.set_pixel(2, 0, Rgba::BLACK);
        cel.set_pixel_direct(0, 5, Rgba::BLACK);
        assert!(cel.is_empty());
        assert_eq!(cel.get_pixel(-3, -3), Rgba::TRANSPARENT);
        assert_eq!(cel.stroke_tag(7, 0), None);
    }

    #[test]
    fn set_pixel_blends_and_direct_overwrites() {
        let mut cel = Cel::new(2, 2);
        cel.set_pixel(1, 1, Rgba::new(10, 20, 30, 255));
        assert_eq!(cel.get_pixel(1, 1), Rgba::new(10, 20, 30, 255));

        // zero alpha leaves the destination alone
        cel.set_pixel(1, 1, Rgba::new(200, 0, 0, 0));
        assert_eq!(cel.get_pixel(1, 1), Rgba::new(10, 20, 30, 255));

        cel.set_pixel_direct(1, 1, Rgba::new(1, 2, 3, 4));
        assert_eq!(cel.get_pixel(1, 1), Rgba::new(1, 2, 3, 4));
    }

    #[test]
    fn mark_stroke_reports_first_touch_only() {
        let mut cel = Cel::new(2, 2);
        assert!(cel.mark_stroke(0, 0, 5));
        assert!(!cel.mark_stroke(0, 0, 5));
        assert!(cel.mark_stroke(0, 0, 6));
        assert!(!cel.mark_stroke(-1, 0, 6));
    }

    #[test]
    fn cleared_tags_accept_the_same_stroke_again() {
        let mut cel = Cel::new(2, 2);
        assert!(cel.mark_stroke(1, 1, 9));
        cel.clear_stroke_tags();
        assert_eq!(cel.stroke_tag(1, 1), Some(0));
        assert!(cel.mark_stroke(1, 1, 9));
    }

    #[test]
    fn from_pixels_checks_length() {
        assert!(Cel::from_pixels(2, 2, vec![0; 15]).is_none());
        let cel = Cel::from_pixels(1, 1, vec![1, 2, 3, 4]).unwrap();
        assert_eq!(cel.get_pixel(0, 0), Rgba::new(1, 2, 3, 4));
    }
}
