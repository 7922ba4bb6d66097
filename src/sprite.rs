use crate::cel::Cel;
use crate::error::SpriteError;
use crate::frame::{DEFAULT_FRAME_DURATION_MS, Frame, FrameId};
use crate::layer::{Layer, LayerId};

/// Addresses one cel: a layer within a frame.
///
/// Commands hold this instead of a reference, so they stay valid across
/// structural edits that leave the cel itself in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CelKey {
    pub frame: FrameId,
    pub layer: LayerId,
}

/// The document: layers stacked back to front, frames in playback order.
///
/// `active_layer` and `active_frame` are kept valid (or zero when the
/// respective list is empty) across every structural edit.
#[derive(Debug, Clone)]
pub struct Sprite {
    width: u32,
    height: u32,
    layers: Vec<Layer>,
    frames: Vec<Frame>,
    active_layer: usize,
    active_frame: usize,
    frame_duration: u32,
}

impl Sprite {
    /// An empty sprite with no layers and no frames.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            layers: Vec::new(),
            frames: Vec::new(),
            active_layer: 0,
            active_frame: 0,
            frame_duration: DEFAULT_FRAME_DURATION_MS,
        }
    }

    /// A sprite ready for painting: one layer and one empty frame.
    pub fn blank(width: u32, height: u32) -> Self {
        let mut sprite = Self::new(width, height);
        sprite.add_layer("Layer 1");
        sprite.add_frame(false);
        sprite
    }

    /// Duration given to frames created from now on.
    pub fn set_default_frame_duration(&mut self, duration: u32) {
        self.frame_duration = duration;
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn layer(&self, index: usize) -> Option<&Layer> {
        self.layers.get(index)
    }

    pub fn layer_mut(&mut self, index: usize) -> Option<&mut Layer> {
        self.layers.get_mut(index)
    }

    pub fn frame(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    pub fn frame_mut(&mut self, index: usize) -> Option<&mut Frame> {
        self.frames.get_mut(index)
    }

    pub fn active_layer(&self) -> usize {
        self.active_layer
    }

    pub fn active_frame(&self) -> usize {
        self.active_frame
    }

    pub fn active_layer_id(&self) -> Option<LayerId> {
        self.layers.get(self.active_layer).map(|l| l.id)
    }

    pub fn current_frame(&self) -> Option<&Frame> {
        self.frames.get(self.active_frame)
    }

    pub fn current_frame_mut(&mut self) -> Option<&mut Frame> {
        self.frames.get_mut(self.active_frame)
    }

    pub fn layer_index(&self, id: LayerId) -> Option<usize> {
        self.layers.iter().position(|l| l.id == id)
    }

    pub fn frame_index(&self, id: FrameId) -> Option<usize> {
        self.frames.iter().position(|f| f.id == id)
    }

    /// Appends a layer on top of the stack.
    pub fn add_layer(&mut self, name: &str) -> &mut Layer {
        self.push_layer(Layer::new(name))
    }

    pub(crate) fn push_layer(&mut self, layer: Layer) -> &mut Layer {
        self.layers.push(layer);
        let last = self.layers.len() - 1;
        &mut self.layers[last]
    }

    /// Removes a layer together with its cels in every frame.
    pub fn remove_layer(&mut self, index: usize) -> Result<Layer, SpriteError> {
        if index >= self.layers.len() {
            return Err(SpriteError::LayerOutOfRange {
                index,
                len: self.layers.len(),
            });
        }
        let layer = self.layers.remove(index);
        for frame in &mut self.frames {
            frame.remove_cel(layer.id);
        }
        if self.active_layer > index || self.active_layer >= self.layers.len() {
            self.active_layer = self.active_layer.saturating_sub(1);
        }
        log::debug!("removed layer {:?} ({})", layer.name, layer.id);
        Ok(layer)
    }

    pub fn select_layer(&mut self, index: usize) -> Result<(), SpriteError> {
        if index >= self.layers.len() {
            return Err(SpriteError::LayerOutOfRange {
                index,
                len: self.layers.len(),
            });
        }
        self.active_layer = index;
        Ok(())
    }

    /// Appends a frame and makes it active. With `copy_previous`, the new
    /// frame starts with copies of the last frame's cels.
    pub fn add_frame(&mut self, copy_previous: bool) -> &mut Frame {
        let frame = match self.frames.last() {
            Some(prev) if copy_previous => prev.duplicate(),
            _ => Frame::new(self.frame_duration),
        };
        self.frames.push(frame);
        self.active_frame = self.frames.len() - 1;
        &mut self.frames[self.active_frame]
    }

    /// Inserts a frame right after `index` and makes it active. An `index`
    /// past the end appends. With `copy`, the new frame starts with copies of
    /// the cels at `index`.
    pub fn insert_frame_after(&mut self, index: usize, copy: bool) -> &mut Frame {
        let at = (index + 1).min(self.frames.len());
        let frame = match self.frames.get(index) {
            Some(src) if copy => src.duplicate(),
            _ => Frame::new(self.frame_duration),
        };
        self.frames.insert(at, frame);
        self.active_frame = at;
        &mut self.frames[at]
    }

    pub fn remove_frame(&mut self, index: usize) -> Result<Frame, SpriteError> {
        if index >= self.frames.len() {
            return Err(SpriteError::FrameOutOfRange {
                index,
                len: self.frames.len(),
            });
        }
        let frame = self.frames.remove(index);
        if self.active_frame > index || self.active_frame >= self.frames.len() {
            self.active_frame = self.active_frame.saturating_sub(1);
        }
        Ok(frame)
    }

    pub fn select_frame(&mut self, index: usize) -> Result<(), SpriteError> {
        if index >= self.frames.len() {
            return Err(SpriteError::FrameOutOfRange {
                index,
                len: self.frames.len(),
            });
        }
        self.active_frame = index;
        Ok(())
    }

    /// Key of the cel painting would currently target, if there is a layer
    /// and a frame to paint into.
    pub fn active_cel_key(&self) -> Option<CelKey> {
        Some(CelKey {
            frame: self.current_frame()?.id,
            layer: self.active_layer_id()?,
        })
    }

    /// Resolves the cel for the active layer and frame, creating it on first
    /// use.
    pub fn active_cel_or_insert(&mut self) -> Option<(CelKey, &mut Cel)> {
        let key = self.active_cel_key()?;
        let (width, height) = (self.width, self.height);
        let frame = self.frames.get_mut(self.active_frame)?;
        Some((key, frame.cel_or_insert(key.layer, width, height)))
    }

    pub fn cel(&self, key: CelKey) -> Option<&Cel> {
        self.frames
            .iter()
            .find(|f| f.id == key.frame)
            .and_then(|f| f.cel(key.layer))
    }

    pub fn cel_mut(&mut self, key: CelKey) -> Option<&mut Cel> {
        self.frames
            .iter_mut()
            .find(|f| f.id == key.frame)
            .and_then(|f| f.cel_mut(key.layer))
    }

    /// Clears stroke tags in every cel of every frame.
    pub fn reset_stroke_tags(&mut self) {
        for frame in &mut self.frames {
            for cel in frame.cels_mut() {
                cel.clear_stroke_tags();
            }
        }
    }

    pub(crate) fn restore_active(&mut self, layer: usize, frame: usize) {
        self.active_layer = layer.min(self.layers.len().saturating_sub(1));
        self.active_frame = frame.min(self.frames.len().saturating_sub(1));
    }

    pub(crate) fn push_frame(&mut self, frame: Frame) {
        self.frames.push(frame);
    }
}
